use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Request counters mirroring what operators watch on this service:
/// search volume, availability checks, booking outcomes, and which flag
/// values actually get served.
pub struct ApiMetrics {
    registry: Registry,
    pub searches: IntCounterVec,
    pub availability_checks: IntCounterVec,
    pub bookings: IntCounterVec,
    pub flag_evaluations: IntCounterVec,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let searches = IntCounterVec::new(
            Opts::new("hotel_searches_total", "Total number of hotel searches"),
            &["location", "has_dates"],
        )?;
        registry.register(Box::new(searches.clone()))?;

        let availability_checks = IntCounterVec::new(
            Opts::new(
                "hotel_availability_checks_total",
                "Total number of availability checks",
            ),
            &["hotel_id", "instant_booking"],
        )?;
        registry.register(Box::new(availability_checks.clone()))?;

        let bookings = IntCounterVec::new(
            Opts::new("hotel_bookings_total", "Total number of bookings"),
            &["hotel_id", "status", "instant"],
        )?;
        registry.register(Box::new(bookings.clone()))?;

        let flag_evaluations = IntCounterVec::new(
            Opts::new(
                "feature_flag_evaluations_total",
                "Total number of feature flag evaluations",
            ),
            &["flag", "value"],
        )?;
        registry.register(Box::new(flag_evaluations.clone()))?;

        Ok(Self {
            registry,
            searches,
            availability_checks,
            bookings,
            flag_evaluations,
        })
    }

    pub fn record_flag(&self, flag: &str, value: &str) {
        self.flag_evaluations.with_label_values(&[flag, value]).inc();
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(err) = encoder.encode(&self.registry.gather(), &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", err);
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
