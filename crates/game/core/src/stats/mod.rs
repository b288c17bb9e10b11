//! Stat system.
//!
//! # Architecture
//!
//! ```text
//! [ StatKind / StatLine ]      five combat stats
//!      ↓
//! [ Merge distribution ]       rank-ordered bonus points
//!      ↓
//! [ Resolver ]                 base + merge + might + skills + buffs − debuffs
//!      ↓
//! [ StatStack ]                per-source breakdown, floored at 0
//! ```
//!
//! Everything here is a pure function of the catalog and the instance.

pub mod bonus;
pub mod core;
pub mod gauge;
pub mod merge;
pub mod resolve;

pub use bonus::{Contribution, StatSource, StatStack};
pub use self::core::{StatKind, StatLine};
pub use gauge::HpGauge;
pub use merge::{MAX_MERGES, merge_bonus, merge_bonuses, stat_ranks};
pub use resolve::{Level, LevelError, resolve_stat, resolve_stats, stat_breakdown};
