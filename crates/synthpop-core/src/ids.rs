//! Time-ordered UUID generation
//!
//! Person and event identities are UUIDv7 values whose timestamp bits come
//! from the source data (first_seen_at for persons, the event timestamp for
//! events), so primary keys sort in event-time order in both stores.

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

/// Build a UUIDv7 whose timestamp component is the given instant.
///
/// UUIDv7 string order and byte order agree, so identifiers derived from a
/// later instant always sort after identifiers derived from an earlier one,
/// down to millisecond precision. The remaining bits are random, which keeps
/// identifiers distinct when many share a millisecond.
///
/// Instants before the unix epoch clamp to the epoch.
pub fn time_ordered_uuid(at: DateTime<Utc>) -> Uuid {
    let seconds = at.timestamp().max(0) as u64;
    // Leap-second representations can exceed 999_999_999 nanos
    let subsec_nanos = at.timestamp_subsec_nanos().min(999_999_999);
    Uuid::new_v7(Timestamp::from_unix(NoContext, seconds, subsec_nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn produces_version_7() {
        let id = time_ordered_uuid(Utc::now());
        assert_eq!(id.get_version_num(), 7);
    }

    #[test]
    fn later_instants_sort_after_earlier_ones() {
        let earlier = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let later = DateTime::from_timestamp_millis(1_700_000_000_001).unwrap();
        let a = time_ordered_uuid(earlier);
        let b = time_ordered_uuid(later);
        assert!(a.to_string() < b.to_string());
        assert!(a.as_bytes() < b.as_bytes());
    }

    #[test]
    fn same_instant_yields_distinct_ids() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let a = time_ordered_uuid(at);
        let b = time_ordered_uuid(at);
        assert_ne!(a, b);
    }

    #[test]
    fn pre_epoch_instants_clamp_instead_of_panicking() {
        let before_epoch = DateTime::from_timestamp(-1000, 0).unwrap();
        let id = time_ordered_uuid(before_epoch);
        assert_eq!(id.get_version_num(), 7);
    }

    proptest! {
        // Ordering holds for any pair of instants at least one millisecond apart
        #[test]
        fn ordering_tracks_millisecond_timestamps(
            base_ms in 0i64..4_102_444_800_000i64,
            delta_ms in 1i64..1_000_000_000i64,
        ) {
            let earlier = DateTime::from_timestamp_millis(base_ms).unwrap();
            let later = DateTime::from_timestamp_millis(base_ms + delta_ms).unwrap();
            let a = time_ordered_uuid(earlier);
            let b = time_ordered_uuid(later);
            prop_assert!(a.to_string() < b.to_string());
        }
    }
}
