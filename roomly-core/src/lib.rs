pub mod booking;
pub mod hotel;
pub mod ids;
pub mod pii;

pub use booking::{Booking, BookingRequest, BookingStatus, BookingUpdateRequest, InvalidStatus};
pub use hotel::{Hotel, HotelCategory};
pub use pii::Masked;
