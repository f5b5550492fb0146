use uuid::Uuid;

/// Generate a booking identifier: `BK-` plus 8 uppercase hex digits drawn
/// from a fresh v4 UUID. High entropy, not registered anywhere, so
/// collisions are accepted rather than mitigated.
pub fn booking_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("BK-{}", hex[..8].to_uppercase())
}

/// Generate a confirmation number: `CONF-` plus 6 uppercase hex digits from
/// an independently drawn v4 UUID.
pub fn confirmation_number() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("CONF-{}", hex[..6].to_uppercase())
}
