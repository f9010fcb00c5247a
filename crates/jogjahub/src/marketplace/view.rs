use serde::{Deserialize, Serialize};

use super::catalog::CategoryFilter;
use super::domain::{Listing, ModerationStatus, UserRole};

/// Search text and category selected in the browse controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub category: CategoryFilter,
}

impl ViewFilter {
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    fn matches_query(&self, listing: &Listing) -> bool {
        let needle = self.query.to_lowercase();
        listing.name.to_lowercase().contains(&needle)
            || listing.description.to_lowercase().contains(&needle)
    }
}

/// Which dashboard a role is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Marketplace,
    BusinessDashboard,
    CurationDashboard,
}

impl ViewMode {
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Wisatawan => ViewMode::Marketplace,
            UserRole::PelakuUsaha => ViewMode::BusinessDashboard,
            UserRole::AdminDinas | UserRole::SuperAdmin => ViewMode::CurationDashboard,
        }
    }
}

/// Listings visible to `role` under `filter`, in store order.
///
/// Tourists only ever see approved listings; every other role sees the whole
/// catalog, still narrowed by search text and category.
pub fn visible_listings<'a>(
    listings: &'a [Listing],
    filter: &ViewFilter,
    role: UserRole,
) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| filter.matches_query(listing))
        .filter(|listing| filter.category.matches(listing.category))
        .filter(|listing| role != UserRole::Wisatawan || listing.is_approved)
        .collect()
}

/// Listings submitted by `owner_id`, for the business "manage my products" table.
pub fn owned_listings<'a>(listings: &'a [Listing], owner_id: &str) -> Vec<&'a Listing> {
    listings
        .iter()
        .filter(|listing| listing.owner_id == owner_id)
        .collect()
}

/// Counters shown on the curation dashboard tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CurationSummary {
    pub pending: usize,
    pub approved: usize,
    pub total: usize,
}

impl CurationSummary {
    pub fn from_listings(listings: &[Listing]) -> Self {
        listings
            .iter()
            .fold(Self::default(), |mut summary, listing| {
                summary.total += 1;
                match listing.status {
                    ModerationStatus::Pending => summary.pending += 1,
                    ModerationStatus::Approved => summary.approved += 1,
                    ModerationStatus::Disapproved | ModerationStatus::Correction => {}
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::catalog::seed_listings;
    use crate::marketplace::domain::{Category, ModerationDecision};

    fn names(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|listing| listing.name.clone()).collect()
    }

    #[test]
    fn tourist_search_for_bakpia_returns_only_the_seeded_bakpia() {
        let listings = seed_listings();
        let filter = ViewFilter::new("bakpia", CategoryFilter::All);
        let visible = visible_listings(&listings, &filter, UserRole::Wisatawan);
        assert_eq!(names(&visible), ["Bakpia Pathok 25 Premium"]);
    }

    #[test]
    fn query_matches_description_case_insensitively() {
        let listings = seed_listings();
        let filter = ViewFilter::new("KERATON", CategoryFilter::All);
        let visible = visible_listings(&listings, &filter, UserRole::Wisatawan);
        assert_eq!(names(&visible), ["Royal Ambarrukmo Hotel"]);
    }

    #[test]
    fn tourists_never_see_unapproved_listings() {
        let mut listings = seed_listings();
        listings[1].apply_decision(ModerationDecision::Disapproved);
        listings[2].apply_decision(ModerationDecision::Correction);

        let filter = ViewFilter::default();
        let tourist = visible_listings(&listings, &filter, UserRole::Wisatawan);
        assert!(tourist.iter().all(|listing| listing.status == ModerationStatus::Approved));
        assert_eq!(tourist.len(), 2);

        for role in [UserRole::PelakuUsaha, UserRole::AdminDinas, UserRole::SuperAdmin] {
            assert_eq!(visible_listings(&listings, &filter, role).len(), 4);
        }
    }

    #[test]
    fn category_filter_narrows_results() {
        let listings = seed_listings();
        let filter = ViewFilter::new("", CategoryFilter::Only(Category::Museum));
        let visible = visible_listings(&listings, &filter, UserRole::SuperAdmin);
        assert_eq!(names(&visible), ["Tiket Museum Sonobudoyo"]);

        let filter = ViewFilter::new("bakpia", CategoryFilter::Only(Category::Museum));
        assert!(visible_listings(&listings, &filter, UserRole::SuperAdmin).is_empty());
    }

    #[test]
    fn summary_counts_pending_and_approved() {
        let mut listings = seed_listings();
        listings[0].status = ModerationStatus::Pending;
        listings[0].is_approved = false;
        listings[3].apply_decision(ModerationDecision::Disapproved);

        let summary = CurationSummary::from_listings(&listings);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.approved, 2);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn modes_follow_roles() {
        assert_eq!(ViewMode::for_role(UserRole::Wisatawan), ViewMode::Marketplace);
        assert_eq!(ViewMode::for_role(UserRole::PelakuUsaha), ViewMode::BusinessDashboard);
        assert_eq!(ViewMode::for_role(UserRole::AdminDinas), ViewMode::CurationDashboard);
    }
}
