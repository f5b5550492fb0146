use crate::metrics::ApiMetrics;
use roomly_catalog::HotelCatalog;
use roomly_flags::FliptClient;
use roomly_store::BookingStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<HotelCatalog>,
    pub bookings: Arc<BookingStore>,
    pub flags: Arc<FliptClient>,
    pub metrics: Arc<ApiMetrics>,
}
