//! Domain models
//!
//! App-store entities (Organization, User, Team, Person, Action) and the
//! analytics-store entities (Event, Group) they feed.

pub mod action;
pub mod event;
pub mod group;
pub mod org;
pub mod person;
pub mod properties;
pub mod team;

pub use action::Action;
pub use event::Event;
pub use group::{Group, GroupTypeIndex};
pub use org::{Organization, User};
pub use person::{Person, PersonDistinctId};
pub use properties::Properties;
pub use team::Team;
