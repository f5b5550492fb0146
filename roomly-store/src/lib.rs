pub mod app_config;
pub mod booking_store;

pub use app_config::Config;
pub use booking_store::{BookingStore, StoreError};
