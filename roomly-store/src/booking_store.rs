use chrono::Utc;
use dashmap::DashMap;
use rand::Rng;
use roomly_catalog::{quote_with, stay_nights, PriceStrategy};
use roomly_core::ids;
use roomly_core::{Booking, BookingRequest, BookingStatus, Hotel};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("booking not found: {0}")]
    NotFound(String),
    #[error("invalid booking status: {0}")]
    InvalidStatus(String),
}

/// In-memory booking lifecycle store. Owns every booking record for the
/// life of the process; handlers reach it through `AppState`, never as a
/// global. The map's entry guards make each operation atomic, so
/// concurrent creates and updates cannot lose writes.
pub struct BookingStore {
    bookings: DashMap<String, Booking>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: DashMap::new(),
        }
    }

    /// Create a booking: price the stay, generate identifiers, and pick
    /// the initial status from the instant-booking flag. Instant bookings
    /// are confirmed immediately with a confirmation number; everything
    /// else starts pending for manual approval.
    pub fn create<R: Rng>(
        &self,
        req: &BookingRequest,
        hotel: &Hotel,
        strategy: PriceStrategy,
        instant_booking: bool,
        rng: &mut R,
    ) -> Booking {
        let stay = stay_nights(&req.checkin, &req.checkout);
        let quote = quote_with(hotel.base_price_per_night, stay.nights, strategy, rng);

        let (status, confirmation_number) = if instant_booking {
            (BookingStatus::Confirmed, Some(ids::confirmation_number()))
        } else {
            (BookingStatus::Pending, None)
        };

        let now = Utc::now();
        let booking = Booking {
            booking_id: ids::booking_id(),
            hotel_id: hotel.id.clone(),
            status,
            confirmation_number,
            total_price: quote.display_price,
            guest_name: req.guest_name.clone().into(),
            guest_email: req.guest_email.clone().into(),
            checkin: req.checkin.clone(),
            checkout: req.checkout.clone(),
            guests: req.guests,
            created_at: now,
            updated_at: now,
        };

        self.bookings
            .insert(booking.booking_id.clone(), booking.clone());

        tracing::info!(
            booking_id = %booking.booking_id,
            hotel_id = %booking.hotel_id,
            status = %booking.status,
            nights = stay.nights,
            instant = instant_booking,
            "booking created"
        );

        booking
    }

    pub fn get(&self, id: &str) -> Result<Booking, StoreError> {
        self.bookings
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// All bookings, or only those with the given status. Sorted by
    /// creation time (then id) so list responses are stable regardless of
    /// map iteration order.
    pub fn list(&self, status: Option<BookingStatus>) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|entry| status.is_none_or(|s| entry.status == s))
            .map(|entry| entry.value().clone())
            .collect();
        bookings.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.booking_id.cmp(&b.booking_id))
        });
        bookings
    }

    /// Partial update: apply whichever fields are present and refresh
    /// `updated_at` when anything changed. A status string outside the
    /// enum fails with `InvalidStatus` before any mutation; both fields
    /// absent is a plain read.
    pub fn update(
        &self,
        id: &str,
        status: Option<&str>,
        confirmation_number: Option<String>,
    ) -> Result<Booking, StoreError> {
        let parsed_status = status
            .map(|s| {
                s.parse::<BookingStatus>()
                    .map_err(|err| StoreError::InvalidStatus(err.0))
            })
            .transpose()?;

        let mut entry = self
            .bookings
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let changed = parsed_status.is_some() || confirmation_number.is_some();
        if let Some(new_status) = parsed_status {
            entry.status = new_status;
        }
        if let Some(code) = confirmation_number {
            entry.confirmation_number = Some(code);
        }
        if changed {
            entry.updated_at = Utc::now();
            tracing::info!(
                booking_id = %entry.booking_id,
                status = %entry.status,
                "booking updated"
            );
        }

        Ok(entry.value().clone())
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomly_catalog::catalog::seed_hotels;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn request(hotel_id: &str) -> BookingRequest {
        BookingRequest {
            hotel_id: hotel_id.to_string(),
            checkin: "2024-06-01".to_string(),
            checkout: "2024-06-03".to_string(),
            guests: 2,
            guest_name: "Ada Lovelace".to_string(),
            guest_email: "ada@example.com".to_string(),
        }
    }

    fn hotel() -> Hotel {
        seed_hotels().into_iter().next().unwrap()
    }

    #[test]
    fn create_without_instant_booking_is_pending() {
        let store = BookingStore::new();
        let booking = store.create(
            &request("hotel-1"),
            &hotel(),
            PriceStrategy::Total,
            false,
            &mut rand::thread_rng(),
        );

        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.confirmation_number.is_none());
        assert_eq!(booking.total_price, 299.99 * 2.0);
        assert_eq!(booking.created_at, booking.updated_at);

        let fetched = store.get(&booking.booking_id).unwrap();
        assert_eq!(fetched.booking_id, booking.booking_id);
        assert_eq!(fetched.status, booking.status);
        assert_eq!(fetched.total_price, booking.total_price);
    }

    #[test]
    fn instant_booking_is_confirmed_with_code() {
        let store = BookingStore::new();
        let booking = store.create(
            &request("hotel-1"),
            &hotel(),
            PriceStrategy::Total,
            true,
            &mut rand::thread_rng(),
        );

        assert_eq!(booking.status, BookingStatus::Confirmed);
        let code = booking.confirmation_number.expect("confirmation number");
        assert!(code.starts_with("CONF-"));
        assert!(!code.is_empty());
    }

    #[test]
    fn update_status_bumps_timestamp() {
        let store = BookingStore::new();
        let booking = store.create(
            &request("hotel-1"),
            &hotel(),
            PriceStrategy::Total,
            false,
            &mut rand::thread_rng(),
        );

        thread::sleep(Duration::from_millis(5));
        let updated = store
            .update(&booking.booking_id, Some("confirmed"), None)
            .unwrap();

        assert_eq!(updated.status, BookingStatus::Confirmed);
        assert_eq!(updated.confirmation_number, None);
        assert_eq!(updated.total_price, booking.total_price);
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn invalid_status_leaves_record_unchanged() {
        let store = BookingStore::new();
        let booking = store.create(
            &request("hotel-1"),
            &hotel(),
            PriceStrategy::Total,
            false,
            &mut rand::thread_rng(),
        );

        let err = store
            .update(&booking.booking_id, Some("bogus"), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidStatus(_)));

        let unchanged = store.get(&booking.booking_id).unwrap();
        assert_eq!(unchanged.status, BookingStatus::Pending);
        assert_eq!(unchanged.updated_at, booking.updated_at);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = BookingStore::new();
        assert!(matches!(
            store.get("BK-MISSING"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update("BK-MISSING", Some("confirmed"), None),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn update_with_no_fields_is_a_read() {
        let store = BookingStore::new();
        let booking = store.create(
            &request("hotel-1"),
            &hotel(),
            PriceStrategy::Total,
            false,
            &mut rand::thread_rng(),
        );

        thread::sleep(Duration::from_millis(5));
        let read = store.update(&booking.booking_id, None, None).unwrap();
        assert_eq!(read.updated_at, booking.updated_at);
        assert_eq!(read.status, booking.status);
    }

    #[test]
    fn list_filters_by_status() {
        let store = BookingStore::new();
        let h = hotel();
        let mut rng = rand::thread_rng();

        let pending = store.create(&request("hotel-1"), &h, PriceStrategy::Total, false, &mut rng);
        let confirmed = store.create(&request("hotel-1"), &h, PriceStrategy::Total, true, &mut rng);
        store.create(&request("hotel-1"), &h, PriceStrategy::Total, false, &mut rng);

        assert_eq!(store.list(None).len(), 3);

        let pending_only = store.list(Some(BookingStatus::Pending));
        assert_eq!(pending_only.len(), 2);
        assert!(pending_only
            .iter()
            .any(|b| b.booking_id == pending.booking_id));

        let confirmed_only = store.list(Some(BookingStatus::Confirmed));
        assert_eq!(confirmed_only.len(), 1);
        assert_eq!(confirmed_only[0].booking_id, confirmed.booking_id);

        assert!(store.list(Some(BookingStatus::Rejected)).is_empty());
    }

    #[test]
    fn concurrent_creates_do_not_lose_writes() {
        let store = Arc::new(BookingStore::new());
        let h = hotel();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                let h = h.clone();
                thread::spawn(move || {
                    store
                        .create(
                            &request("hotel-1"),
                            &h,
                            PriceStrategy::Total,
                            false,
                            &mut rand::thread_rng(),
                        )
                        .booking_id
                })
            })
            .collect();

        let mut ids: Vec<String> = handles.into_iter().map(|j| j.join().unwrap()).collect();
        assert_eq!(ids.len(), 32);

        for id in &ids {
            assert!(store.get(id).is_ok());
        }

        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32, "booking ids must be distinct");
        assert_eq!(store.list(None).len(), 32);
    }
}
