// src/assessment/ids.rs

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

pub fn batch_id(now: &DateTime<FixedOffset>) -> String {
    format!("BATCH-{}", now.format("%Y%m%d-%H%M%S-%3f"))
}

pub fn item_id() -> String {
    format!("ITM-{}", short_uuid())
}

pub fn selection_id() -> String {
    format!("SEL-{}", short_uuid())
}

pub fn photo_id() -> String {
    Uuid::new_v4().to_string()
}

/// `I` plus the 1-based sequence, zero-padded to three digits.
pub fn item_code(sequence: usize) -> String {
    format!("I{:03}", sequence)
}

fn short_uuid() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn batch_id_uses_local_wall_clock_with_millis() {
        let zone = FixedOffset::east_opt(10 * 3600).unwrap();
        let now = zone.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap()
            + chrono::Duration::milliseconds(45);
        assert_eq!(batch_id(&now), "BATCH-20240307-090502-045");
    }

    #[test]
    fn short_ids_have_prefix_and_eight_chars() {
        let item = item_id();
        assert!(item.starts_with("ITM-"));
        assert_eq!(item.len(), 12);
        let sel = selection_id();
        assert!(sel.starts_with("SEL-"));
        assert_eq!(sel.len(), 12);
        assert_ne!(item_id(), item_id());
    }

    #[test]
    fn photo_id_is_a_full_uuid() {
        let id = photo_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn item_codes_are_zero_padded() {
        assert_eq!(item_code(1), "I001");
        assert_eq!(item_code(42), "I042");
        assert_eq!(item_code(1234), "I1234");
    }
}
