//! Canonical schema constants for structured logging
//!
//! Field keys and event names shared by every crate that emits log events,
//! so downstream tooling can rely on a stable vocabulary.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Entity identifiers
pub const FIELD_TEAM_ID: &str = "team_id";
pub const FIELD_PERSON_UUID: &str = "person_uuid";
pub const FIELD_DISTINCT_ID: &str = "distinct_id";
pub const FIELD_GROUP_KEY: &str = "group_key";

// Collection sizes
pub const FIELD_PEOPLE_COUNT: &str = "people_count";
pub const FIELD_EVENTS_COUNT: &str = "events_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical lifecycle event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_are_non_empty() {
        let keys = [
            FIELD_COMPONENT,
            FIELD_OP,
            FIELD_EVENT,
            FIELD_DURATION_MS,
            FIELD_RUN_ID,
            FIELD_TEAM_ID,
            FIELD_PERSON_UUID,
            FIELD_DISTINCT_ID,
            FIELD_GROUP_KEY,
            FIELD_PEOPLE_COUNT,
            FIELD_EVENTS_COUNT,
            FIELD_ERR_KIND,
            FIELD_ERR_CODE,
        ];
        for key in keys {
            assert!(!key.is_empty());
        }
    }

    #[test]
    fn lifecycle_events_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
    }
}
