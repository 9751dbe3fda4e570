//! Identifier generation for groups and bookmarks.
//!
//! Ids look like `id-<time><random>`: base-36 epoch milliseconds followed by
//! nine base-36 characters drawn from a v4 UUID.

use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Literal prefix carried by every generated id.
pub const ID_PREFIX: &str = "id-";

const RANDOM_CHARS: usize = 9;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a new opaque id.
///
/// Length stays within 11..=29 characters; collisions across interactive use
/// are negligible (9 random base-36 digits per millisecond).
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();

    let mut id = String::from(ID_PREFIX);
    id.push_str(&to_base36(millis));
    id.push_str(&random_suffix(Uuid::new_v4().as_u128()));
    id
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

fn random_suffix(mut entropy: u128) -> String {
    let mut suffix = String::with_capacity(RANDOM_CHARS);
    for _ in 0..RANDOM_CHARS {
        suffix.push(char::from(BASE36_DIGITS[(entropy % 36) as usize]));
        entropy /= 36;
    }
    suffix
}
