//! Groups and the five-slot group type index

use crate::errors::SimDataError;
use crate::model::properties::Properties;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Index of a group type within a team.
///
/// Teams support exactly five group types, addressed by fixed slots 0
/// through 4. The constructor enforces the range, so a value of this type
/// always names a valid slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GroupTypeIndex(u8);

impl GroupTypeIndex {
    /// Number of group type slots per team
    pub const SLOT_COUNT: u8 = 5;

    /// Create a validated index (must be 0-4)
    pub fn new(index: u8) -> Result<Self, SimDataError> {
        if index >= Self::SLOT_COUNT {
            return Err(SimDataError::GroupTypeIndexOutOfRange { index });
        }
        Ok(Self(index))
    }

    /// Get the raw slot value
    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// All five slots in order
    pub fn all() -> [GroupTypeIndex; Self::SLOT_COUNT as usize] {
        [Self(0), Self(1), Self(2), Self(3), Self(4)]
    }
}

impl TryFrom<u8> for GroupTypeIndex {
    type Error = SimDataError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<GroupTypeIndex> for u8 {
    fn from(index: GroupTypeIndex) -> Self {
        index.0
    }
}

impl std::fmt::Display for GroupTypeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group stored in the analytics store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Team this group belongs to
    pub team_id: i64,
    /// Slot the group's type occupies
    pub group_type_index: GroupTypeIndex,
    /// Key identifying the group within its type (e.g. a company slug)
    pub group_key: String,
    /// Group properties
    pub group_properties: Properties,
    /// Timestamp when this group row was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group row
    pub fn new(
        team_id: i64,
        group_type_index: GroupTypeIndex,
        group_key: String,
        group_properties: Properties,
    ) -> Self {
        Self {
            team_id,
            group_type_index,
            group_key,
            group_properties,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slots_zero_through_four_are_valid() {
        for index in 0..GroupTypeIndex::SLOT_COUNT {
            assert!(GroupTypeIndex::new(index).is_ok());
        }
    }

    #[test]
    fn slot_five_and_above_are_rejected() {
        for index in [5u8, 6, 100, 255] {
            let err = GroupTypeIndex::new(index).unwrap_err();
            assert_eq!(err, SimDataError::GroupTypeIndexOutOfRange { index });
        }
    }

    #[test]
    fn all_lists_the_five_slots_in_order() {
        let slots = GroupTypeIndex::all();
        let raw: Vec<u8> = slots.iter().map(|s| s.as_u8()).collect();
        assert_eq!(raw, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn serde_round_trips_through_u8() {
        let index = GroupTypeIndex::new(2).unwrap();
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, "2");
        let back: GroupTypeIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }

    #[test]
    fn deserializing_an_invalid_slot_fails() {
        let result: Result<GroupTypeIndex, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }

    #[test]
    fn new_group_keeps_slot_and_key() {
        let group = Group::new(
            1,
            GroupTypeIndex::new(0).unwrap(),
            "acme".to_string(),
            Properties::from_json(json!({"industry": "saas"})),
        );
        assert_eq!(group.group_type_index.as_u8(), 0);
        assert_eq!(group.group_key, "acme");
        assert_eq!(group.group_properties.get_str("industry"), Some("saas"));
    }
}
