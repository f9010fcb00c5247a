use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of listing categories curated on the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Oleh-Oleh")]
    OlehOleh,
    #[serde(rename = "Penginapan")]
    Penginapan,
    #[serde(rename = "Wisata")]
    Wisata,
    #[serde(rename = "Kuliner")]
    Kuliner,
    #[serde(rename = "Parkir")]
    Parkir,
    #[serde(rename = "Tour")]
    Tour,
    #[serde(rename = "Transportasi Tradisional")]
    TransportasiTradisional,
    #[serde(rename = "Transportasi Modern")]
    TransportasiModern,
    #[serde(rename = "Sewa Kendaraan")]
    SewaKendaraan,
    #[serde(rename = "Museum")]
    Museum,
    #[serde(rename = "Event")]
    Event,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::OlehOleh,
        Category::Penginapan,
        Category::Wisata,
        Category::Kuliner,
        Category::Parkir,
        Category::Tour,
        Category::TransportasiTradisional,
        Category::TransportasiModern,
        Category::SewaKendaraan,
        Category::Museum,
        Category::Event,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::OlehOleh => "Oleh-Oleh",
            Category::Penginapan => "Penginapan",
            Category::Wisata => "Wisata",
            Category::Kuliner => "Kuliner",
            Category::Parkir => "Parkir",
            Category::Tour => "Tour",
            Category::TransportasiTradisional => "Transportasi Tradisional",
            Category::TransportasiModern => "Transportasi Modern",
            Category::SewaKendaraan => "Sewa Kendaraan",
            Category::Museum => "Museum",
            Category::Event => "Event",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

/// Regional government department (Dinas) owning curation of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Department {
    #[default]
    #[serde(rename = "Dinas Koperasi dan UKM DIY")]
    KoperasiUkm,
    #[serde(rename = "Dinas Pariwisata DIY")]
    Pariwisata,
    #[serde(rename = "Dinas Perhubungan DIY")]
    Perhubungan,
    #[serde(rename = "Dinas Kebudayaan DIY")]
    Kebudayaan,
    #[serde(rename = "Dinas Komunikasi dan Informatika DIY")]
    Kominfo,
}

impl Department {
    pub fn label(&self) -> &'static str {
        match self {
            Department::KoperasiUkm => "Dinas Koperasi dan UKM DIY",
            Department::Pariwisata => "Dinas Pariwisata DIY",
            Department::Perhubungan => "Dinas Perhubungan DIY",
            Department::Kebudayaan => "Dinas Kebudayaan DIY",
            Department::Kominfo => "Dinas Komunikasi dan Informatika DIY",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Curation state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Disapproved,
    Correction,
}

impl ModerationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "PENDING",
            ModerationStatus::Approved => "APPROVED",
            ModerationStatus::Disapproved => "DISAPPROVED",
            ModerationStatus::Correction => "CORRECTION",
        }
    }
}

/// Outcome an admin can record against a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModerationDecision {
    Approved,
    Disapproved,
    Correction,
}

impl From<ModerationDecision> for ModerationStatus {
    fn from(decision: ModerationDecision) -> Self {
        match decision {
            ModerationDecision::Approved => ModerationStatus::Approved,
            ModerationDecision::Disapproved => ModerationStatus::Disapproved,
            ModerationDecision::Correction => ModerationStatus::Correction,
        }
    }
}

/// A souvenir, stay, attraction, or transport offer listed on the portal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: Category,
    pub sub_category: String,
    pub department: Department,
    pub image_url: String,
    pub location: String,
    pub rating: f32,
    pub is_approved: bool,
    pub status: ModerationStatus,
    pub owner_id: String,
}

impl Listing {
    /// Records a curation decision; the approval flag always tracks the status.
    pub fn apply_decision(&mut self, decision: ModerationDecision) {
        self.status = decision.into();
        self.is_approved = self.status == ModerationStatus::Approved;
    }
}

/// Persona the session is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Wisatawan.
    #[default]
    Wisatawan,
    /// Pelaku usaha.
    PelakuUsaha,
    AdminDinas,
    SuperAdmin,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Wisatawan,
        UserRole::PelakuUsaha,
        UserRole::AdminDinas,
        UserRole::SuperAdmin,
    ];

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::AdminDinas | UserRole::SuperAdmin)
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Wisatawan => "Wisatawan",
            UserRole::PelakuUsaha => "Pelaku Usaha",
            UserRole::AdminDinas => "Admin Dinas",
            UserRole::SuperAdmin => "Super Admin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "wisatawan" | "tourist" => Ok(UserRole::Wisatawan),
            "pelaku_usaha" | "business_owner" | "business" => Ok(UserRole::PelakuUsaha),
            "admin_dinas" | "department_admin" | "admin" => Ok(UserRole::AdminDinas),
            "super_admin" | "superadmin" => Ok(UserRole::SuperAdmin),
            _ => Err(UnknownRole(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Waiting,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Qris,
    Va,
    Transfer,
}

/// Purchase record produced when a simulated payment is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub client_id: String,
    pub listing_id: ListingId,
    pub transaction_no: String,
    pub location: String,
    pub time: DateTime<Utc>,
    pub amount: u64,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}
