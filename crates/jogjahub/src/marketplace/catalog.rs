use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::domain::{
    Category, Department, Listing, ListingId, ModerationStatus, UnknownCategory,
};

/// Labels offered by the category control, in display order.
pub const FILTER_LABELS: [&str; 9] = [
    "All",
    "Oleh-Oleh",
    "Penginapan",
    "Wisata",
    "Kuliner",
    "Museum",
    "Event",
    "Transportasi Tradisional",
    "Transportasi Modern",
];

/// Category narrowing applied by the view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        raw.parse().map(CategoryFilter::Only)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Options for the category control, parsed from [`FILTER_LABELS`].
pub fn filter_options() -> Vec<CategoryFilter> {
    FILTER_LABELS
        .iter()
        .filter_map(|label| label.parse().ok())
        .collect()
}

struct SeedListing {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: u64,
    category: Category,
    sub_category: &'static str,
    department: Department,
    image_seed: &'static str,
    location: &'static str,
    rating: f32,
    owner_id: &'static str,
}

const SEED: [SeedListing; 4] = [
    SeedListing {
        id: "1",
        name: "Bakpia Pathok 25 Premium",
        description: "Bakpia legendaris dengan isian kacang hijau kupas lembut.",
        price: 45_000,
        category: Category::OlehOleh,
        sub_category: "Snack",
        department: Department::KoperasiUkm,
        image_seed: "bakpia",
        location: "Kota Yogyakarta",
        rating: 4.8,
        owner_id: "owner_1",
    },
    SeedListing {
        id: "2",
        name: "Royal Ambarrukmo Hotel",
        description: "Hotel bintang 5 bersejarah dengan fasilitas keraton.",
        price: 1_500_000,
        category: Category::Penginapan,
        sub_category: "Hotel Bintang 5",
        department: Department::Pariwisata,
        image_seed: "hotel1",
        location: "Sleman",
        rating: 4.9,
        owner_id: "owner_2",
    },
    SeedListing {
        id: "3",
        name: "Tiket Museum Sonobudoyo",
        description: "Museum sejarah dan kebudayaan Jawa terlengkap.",
        price: 10_000,
        category: Category::Museum,
        sub_category: "Seni & Budaya",
        department: Department::Kebudayaan,
        image_seed: "museum",
        location: "Kota Yogyakarta",
        rating: 4.7,
        owner_id: "owner_3",
    },
    SeedListing {
        id: "4",
        name: "Sewa Becak Listrik Malioboro",
        description: "Keliling Malioboro dengan becak ramah lingkungan.",
        price: 50_000,
        category: Category::TransportasiTradisional,
        sub_category: "Becak Listrik",
        department: Department::Perhubungan,
        image_seed: "becak",
        location: "Malioboro",
        rating: 4.5,
        owner_id: "owner_4",
    },
];

pub(crate) fn placeholder_image(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/400/300")
}

/// Fixed sample listings the store starts with, all already curated.
pub fn seed_listings() -> Vec<Listing> {
    SEED.iter()
        .map(|seed| Listing {
            id: ListingId(seed.id.to_string()),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: seed.price,
            category: seed.category,
            sub_category: seed.sub_category.to_string(),
            department: seed.department,
            image_url: placeholder_image(seed.image_seed),
            location: seed.location.to_string(),
            rating: seed.rating,
            is_approved: true,
            status: ModerationStatus::Approved,
            owner_id: seed.owner_id.to_string(),
        })
        .collect()
}
