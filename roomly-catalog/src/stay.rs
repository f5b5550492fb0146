use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Result of the stay-length calculation. `fallback` is true only when a
/// date failed to parse; inverted ranges clamp to one night without
/// setting it, so callers and tests can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayNights {
    pub nights: u32,
    pub fallback: bool,
}

/// Number of nights between two date strings: whole-day difference,
/// clamped to a minimum of 1. Malformed input never propagates an error,
/// it yields the 1-night fallback.
pub fn stay_nights(checkin: &str, checkout: &str) -> StayNights {
    match (parse_instant(checkin), parse_instant(checkout)) {
        (Some(start), Some(end)) => {
            let nights = (end - start).num_days().max(1);
            StayNights {
                nights: nights as u32,
                fallback: false,
            }
        }
        _ => StayNights {
            nights: 1,
            fallback: true,
        },
    }
}

/// Parse an ISO-8601 instant: RFC 3339 (trailing `Z` accepted), a bare
/// datetime, or a bare date taken as midnight UTC.
fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_day_difference() {
        let stay = stay_nights("2024-01-01T00:00:00Z", "2024-01-03T00:00:00Z");
        assert_eq!(stay, StayNights { nights: 2, fallback: false });
    }

    #[test]
    fn date_only_inputs_parse() {
        let stay = stay_nights("2024-01-01", "2024-01-05");
        assert_eq!(stay, StayNights { nights: 4, fallback: false });
    }

    #[test]
    fn partial_days_floor() {
        let stay = stay_nights("2024-01-01T15:00:00Z", "2024-01-03T09:00:00Z");
        assert_eq!(stay.nights, 1);
        assert!(!stay.fallback);
    }

    #[test]
    fn malformed_input_falls_back_to_one_night() {
        let stay = stay_nights("garbage", "2024-01-03");
        assert_eq!(stay, StayNights { nights: 1, fallback: true });

        let stay = stay_nights("2024-01-01", "not-a-date");
        assert_eq!(stay, StayNights { nights: 1, fallback: true });

        let stay = stay_nights("", "");
        assert_eq!(stay, StayNights { nights: 1, fallback: true });
    }

    #[test]
    fn inverted_range_clamps_without_fallback() {
        let stay = stay_nights("2024-01-03", "2024-01-01");
        assert_eq!(stay, StayNights { nights: 1, fallback: false });
    }

    #[test]
    fn same_day_clamps_to_one_night() {
        let stay = stay_nights("2024-01-01", "2024-01-01");
        assert_eq!(stay, StayNights { nights: 1, fallback: false });
    }
}
