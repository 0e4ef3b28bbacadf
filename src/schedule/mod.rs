//! The scheduling engine: pure transformations over session collections.
//!
//! Everything here is synchronous and side-effect free (malformed-field
//! warnings aside). The view layer and CLI are thin consumers that hand a
//! pre-filtered slice in and print what comes back.

pub mod conflict;
pub mod group;
pub mod normalize;
pub mod order;
pub mod upcoming;

pub use conflict::{ConflictGroup, EntityRef, conflict_groups, conflict_ids, conflict_sessions,
    entity_conflict_ids};
pub use group::{SlotKey, by_date, by_slot};
pub use normalize::{normalize_date, normalize_session, normalize_time};
pub use order::{date_sort_key, minute_of_day, sort_sessions, sort_sessions_by_time};
pub use upcoming::{FixedToday, HijriDate, SystemToday, TodayProvider, is_upcoming,
    retain_upcoming};
