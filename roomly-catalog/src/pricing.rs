use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tax rate applied by the with-fees strategy.
pub const TAX_RATE: f64 = 0.12;

/// Flat booking fee applied by the with-fees strategy.
pub const BOOKING_FEE: f64 = 25.00;

/// Bounds for the dynamic-pricing multiplier.
const DYNAMIC_MIN: f64 = 0.90;
const DYNAMIC_MAX: f64 = 1.15;

/// Price display strategy, selected per request via the
/// `price-display-strategy` variant flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PriceStrategy {
    Total,
    PerNight,
    WithFees,
    Dynamic,
}

impl PriceStrategy {
    /// Parse a flag variant. Unknown variants (including the empty string)
    /// degrade to `Total` rather than erroring, so a bad flag rollout can
    /// never break pricing.
    pub fn from_variant(variant: &str) -> Self {
        match variant {
            "total" => PriceStrategy::Total,
            "per-night" => PriceStrategy::PerNight,
            "with-fees" => PriceStrategy::WithFees,
            "dynamic" => PriceStrategy::Dynamic,
            _ => PriceStrategy::Total,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceStrategy::Total => "total",
            PriceStrategy::PerNight => "per-night",
            PriceStrategy::WithFees => "with-fees",
            PriceStrategy::Dynamic => "dynamic",
        }
    }
}

/// A per-request price quote. Never persisted on its own; bookings copy the
/// display price at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceQuote {
    pub display_price: f64,
    pub label: String,
    pub breakdown: Option<PriceBreakdown>,
}

/// Strategy-specific breakdown. Untagged so the JSON shape is the bare map
/// each strategy documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PriceBreakdown {
    PerNight {
        per_night: f64,
        nights: u32,
        total: f64,
    },
    WithFees {
        base: f64,
        taxes: f64,
        fees: f64,
        total: f64,
    },
    Dynamic {
        original: f64,
        current: f64,
        savings: f64,
    },
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute a quote with an injected random source. Only the `Dynamic`
/// strategy draws from it; tests seed a `StdRng` for exact assertions.
pub fn quote_with<R: Rng>(
    base_price: f64,
    nights: u32,
    strategy: PriceStrategy,
    rng: &mut R,
) -> PriceQuote {
    let total = base_price * nights as f64;

    match strategy {
        PriceStrategy::Total => PriceQuote {
            display_price: total,
            label: "Total Price".to_string(),
            breakdown: None,
        },
        PriceStrategy::PerNight => PriceQuote {
            display_price: base_price,
            label: "Per Night".to_string(),
            breakdown: Some(PriceBreakdown::PerNight {
                per_night: base_price,
                nights,
                total,
            }),
        },
        PriceStrategy::WithFees => {
            let taxes = total * TAX_RATE;
            let grand_total = total + taxes + BOOKING_FEE;
            PriceQuote {
                display_price: grand_total,
                label: "Total with Fees".to_string(),
                breakdown: Some(PriceBreakdown::WithFees {
                    base: total,
                    taxes: round2(taxes),
                    fees: BOOKING_FEE,
                    total: round2(grand_total),
                }),
            }
        }
        PriceStrategy::Dynamic => {
            let multiplier = rng.gen_range(DYNAMIC_MIN..=DYNAMIC_MAX);
            let current = round2(total * multiplier);
            let savings = if current < total {
                round2(total - current)
            } else {
                0.0
            };
            PriceQuote {
                display_price: current,
                label: "Dynamic Price".to_string(),
                breakdown: Some(PriceBreakdown::Dynamic {
                    original: total,
                    current,
                    savings,
                }),
            }
        }
    }
}

/// Compute a quote with the thread-local RNG.
pub fn quote(base_price: f64, nights: u32, strategy: PriceStrategy) -> PriceQuote {
    quote_with(base_price, nights, strategy, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn total_strategy_multiplies_and_has_no_breakdown() {
        let q = quote(100.0, 2, PriceStrategy::Total);
        assert_eq!(q.display_price, 200.0);
        assert_eq!(q.label, "Total Price");
        assert!(q.breakdown.is_none());

        let q = quote(79.99, 5, PriceStrategy::Total);
        assert_eq!(q.display_price, 79.99 * 5.0);
    }

    #[test]
    fn per_night_strategy_displays_base_price() {
        let q = quote(100.0, 2, PriceStrategy::PerNight);
        assert_eq!(q.display_price, 100.0);
        assert_eq!(q.label, "Per Night");
        assert_eq!(
            q.breakdown,
            Some(PriceBreakdown::PerNight {
                per_night: 100.0,
                nights: 2,
                total: 200.0,
            })
        );
    }

    #[test]
    fn with_fees_strategy_adds_taxes_and_flat_fee() {
        let q = quote(100.0, 2, PriceStrategy::WithFees);
        assert_eq!(q.display_price, 249.0);
        assert_eq!(q.label, "Total with Fees");
        assert_eq!(
            q.breakdown,
            Some(PriceBreakdown::WithFees {
                base: 200.0,
                taxes: 24.0,
                fees: 25.0,
                total: 249.0,
            })
        );
    }

    #[test]
    fn dynamic_strategy_stays_in_multiplier_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let q = quote_with(100.0, 2, PriceStrategy::Dynamic, &mut rng);
            assert!(
                (180.0..=230.0).contains(&q.display_price),
                "display {} out of range",
                q.display_price
            );
            match q.breakdown {
                Some(PriceBreakdown::Dynamic {
                    original,
                    current,
                    savings,
                }) => {
                    assert_eq!(original, 200.0);
                    assert_eq!(current, q.display_price);
                    if current < original {
                        assert_eq!(savings, round2(original - current));
                    } else {
                        assert_eq!(savings, 0.0);
                    }
                }
                other => panic!("unexpected breakdown: {:?}", other),
            }
        }
    }

    #[test]
    fn dynamic_strategy_is_deterministic_under_seeded_rng() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let qa = quote_with(150.0, 3, PriceStrategy::Dynamic, &mut a);
        let qb = quote_with(150.0, 3, PriceStrategy::Dynamic, &mut b);
        assert_eq!(qa, qb);
    }

    #[test]
    fn unknown_variant_degrades_to_total() {
        assert_eq!(
            PriceStrategy::from_variant("unknown-strategy"),
            PriceStrategy::Total
        );
        assert_eq!(PriceStrategy::from_variant(""), PriceStrategy::Total);

        let fallback = quote(123.45, 4, PriceStrategy::from_variant("unknown-strategy"));
        let explicit = quote(123.45, 4, PriceStrategy::Total);
        assert_eq!(fallback, explicit);
    }

    #[test]
    fn known_variants_parse() {
        assert_eq!(PriceStrategy::from_variant("total"), PriceStrategy::Total);
        assert_eq!(
            PriceStrategy::from_variant("per-night"),
            PriceStrategy::PerNight
        );
        assert_eq!(
            PriceStrategy::from_variant("with-fees"),
            PriceStrategy::WithFees
        );
        assert_eq!(
            PriceStrategy::from_variant("dynamic"),
            PriceStrategy::Dynamic
        );
    }
}
