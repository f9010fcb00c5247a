use serde::{Deserialize, Serialize};

use super::catalog::placeholder_image;
use super::domain::{Category, Department, Listing, ListingId, ModerationStatus, User};

pub const DEFAULT_NAME: &str = "Untitled";
pub const DEFAULT_SUB_CATEGORY: &str = "General";
pub const DEFAULT_LOCATION: &str = "Yogyakarta";
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// Partially filled listing form sent by a business owner for curation.
///
/// Nothing here is validated; blanks fall back to defaults when the draft
/// becomes a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub sub_category: Option<String>,
}

fn filled(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

impl ListingDraft {
    pub fn into_listing(self, id: ListingId, submitter: Option<&User>) -> Listing {
        let department = submitter
            .and_then(|user| user.department)
            .unwrap_or(Department::KoperasiUkm);
        let owner_id = submitter
            .map(|user| user.id.clone())
            .unwrap_or_else(|| ANONYMOUS_OWNER.to_string());

        Listing {
            id,
            name: filled(self.name).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            description: filled(self.description).unwrap_or_default(),
            price: self.price.unwrap_or(0),
            category: self.category.unwrap_or_default(),
            sub_category: filled(self.sub_category)
                .unwrap_or_else(|| DEFAULT_SUB_CATEGORY.to_string()),
            department,
            image_url: placeholder_image("new"),
            location: DEFAULT_LOCATION.to_string(),
            rating: 0.0,
            is_approved: false,
            status: ModerationStatus::Pending,
            owner_id,
        }
    }
}
