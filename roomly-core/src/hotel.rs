use serde::{Deserialize, Serialize};
use std::fmt;

/// Hotel categories in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HotelCategory {
    Economy,
    Standard,
    Premium,
    Luxury,
}

impl HotelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotelCategory::Economy => "economy",
            HotelCategory::Standard => "standard",
            HotelCategory::Premium => "premium",
            HotelCategory::Luxury => "luxury",
        }
    }
}

impl fmt::Display for HotelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core hotel structure. Loaded once from the seed catalog at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    /// Guest rating in [0, 5]
    pub rating: f64,
    pub base_price_per_night: f64,
    pub amenities: Vec<String>,
    pub image_url: String,
    pub available_rooms: u32,
    pub category: HotelCategory,
}
