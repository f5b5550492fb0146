use crate::pii::Masked;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is outside {pending, confirmed, rejected}.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid booking status: {0}")]
pub struct InvalidStatus(pub String);

impl FromStr for BookingStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// A booking record. Held only in process memory; never deleted.
///
/// Status transitions are deliberately unrestricted: the admin side moves
/// bookings between any pair of states, so the only guard is enum
/// membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub hotel_id: String,
    pub status: BookingStatus,
    pub confirmation_number: Option<String>,
    pub total_price: f64,
    pub guest_name: Masked<String>,
    pub guest_email: Masked<String>,
    pub checkin: String,
    pub checkout: String,
    pub guests: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound payload for creating a booking.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub hotel_id: String,
    pub checkin: String,
    pub checkout: String,
    pub guests: u32,
    pub guest_name: String,
    pub guest_email: String,
}

/// Inbound payload for the partial-update endpoint. `status` arrives as a
/// raw string so the store can reject bad values without mutating.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingUpdateRequest {
    pub status: Option<String>,
    pub confirmation_number: Option<String>,
}
