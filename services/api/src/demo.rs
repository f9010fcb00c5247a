use crate::infra::portal_service;
use clap::Args;
use jogjahub::config::AppConfig;
use jogjahub::error::AppError;
use jogjahub::marketplace::{
    Category, CategoryFilter, Listing, ListingDraft, ModerationDecision, UserRole,
};
use jogjahub::payment::PaymentPrompt;

const DEFAULT_QUESTION: &str = "Rekomendasi oleh-oleh khas Jogja yang murah?";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role to browse as after curation (defaults to wisatawan)
    #[arg(long, value_parser = crate::infra::parse_role)]
    pub(crate) role: Option<UserRole>,
    /// Search text applied to the final marketplace view
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Also send the search text to the travel assistant
    #[arg(long)]
    pub(crate) ask: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { role, query, ask } = args;
    let config = AppConfig::load()?;
    let service = portal_service(&config.assistant);

    println!("=== JogjaHub marketplace ===");
    render_listings("Approved listings for tourists", &service.browse(None, None)?);

    service.switch_role(UserRole::PelakuUsaha)?;
    let submitted = service.submit(ListingDraft {
        name: Some("Kursus Membatik Tamansari".to_string()),
        description: Some("Belajar membatik tulis bersama perajin kampung Taman.".to_string()),
        price: Some(85_000),
        category: Some(Category::Wisata),
        sub_category: Some("Workshop".to_string()),
    })?;
    println!();
    println!(
        "Business owner submitted {} ({}) with status {:?}",
        submitted.name, submitted.id, submitted.status
    );
    render_listings("My listings", &service.my_listings()?);

    service.switch_role(UserRole::AdminDinas)?;
    let before = service.curation_summary()?;
    let approved = service.moderate(submitted.id.clone(), ModerationDecision::Approved)?;
    let after = service.curation_summary()?;
    println!();
    println!("=== Curation dashboard ===");
    println!(
        "Pending {} -> {}, approved {} -> {}, total {}",
        before.pending, after.pending, before.approved, after.approved, after.total
    );
    println!("{} is now {:?}", approved.name, approved.status);

    let role = role.unwrap_or(UserRole::Wisatawan);
    service.switch_role(role)?;
    let view = service.session_view()?;
    println!();
    println!("=== Browsing as {} ({:?}) ===", view.role_label, view.mode);
    let results = service.browse(query.clone(), Some(CategoryFilter::All))?;
    render_listings("Search results", &results);

    let prompt = service.checkout(approved.id.clone())?;
    render_payment(&prompt);
    let receipt = service.confirm_payment()?;
    println!("{}", receipt.message);
    println!(
        "Transaction {} for Rp {} at {}",
        receipt.transaction.transaction_no,
        receipt.transaction.amount,
        receipt.transaction.time.format("%Y-%m-%d %H:%M UTC")
    );

    if ask {
        let question = query.unwrap_or_else(|| DEFAULT_QUESTION.to_string());
        let answer = service.ask(question.clone()).await?;
        println!();
        println!("=== JogjaHub Guide ===");
        println!("Q: {question}");
        println!("A: {answer}");
    }

    Ok(())
}

fn render_listings(title: &str, listings: &[Listing]) {
    println!("{title} ({}):", listings.len());
    if listings.is_empty() {
        println!("  (nothing matches)");
        return;
    }
    for listing in listings {
        println!(
            "  - [{}] {} | {} | Rp {} | {} | {:?}",
            listing.id, listing.name, listing.category, listing.price, listing.location, listing.status
        );
    }
}

fn render_payment(prompt: &PaymentPrompt) {
    println!();
    println!(
        "Pay Rp {} for {} ({}) reference {}",
        prompt.amount, prompt.listing_name, prompt.location, prompt.reference
    );
    for row in &prompt.grid {
        let line: String = row
            .iter()
            .map(|filled| if *filled { "##" } else { "  " })
            .collect();
        println!("  {line}");
    }
}
