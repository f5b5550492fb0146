pub mod catalog;
pub mod pricing;
pub mod stay;

pub use catalog::HotelCatalog;
pub use pricing::{quote, quote_with, round2, PriceBreakdown, PriceQuote, PriceStrategy};
pub use stay::{stay_nights, StayNights};
