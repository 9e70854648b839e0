//! Core logic for the pomver workspace tools.
//!
//! The version comparator, branch classifier, and version recommender are
//! pure functions over string inputs; they never fail and never touch I/O.
//! The crate also provides the shared HTTP cache, the `VersionSource` port
//! implemented by repository clients, and the concurrent lookup service the
//! CLI drives.

pub mod branch;
pub mod cache;
pub mod error;
pub mod lookup;
pub mod recommend;
pub mod source;
pub mod version;

pub use branch::{BranchKind, task_number};
pub use cache::HttpCache;
pub use error::{CoreError, Result};
pub use lookup::{DEFAULT_LOOKUP_TIMEOUT, VersionLookup, coordinate_key};
pub use recommend::{next_base_version, recommend_version};
pub use source::{RemoteVersions, VersionSource};
pub use version::{
    VersionParts, compare_versions, is_snapshot, max_version, parse_version, strip_snapshot_suffix,
};
