pub mod anchor;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod merge;
pub mod persist;
pub mod scaffold;
pub mod session;

pub use anchor::Anchor;
pub use classify::{FragmentKind, Partition, classify};
pub use config::{Classification, InsertPolicy, MergeConfig};
pub use document::{CompositeDocument, DocumentState};
pub use error::{ConfigError, MergeError, PersistError};
pub use merge::{MergeReport, Merger, SpliceMerger, generate_from_composition};
pub use scaffold::ensure_scaffold;
pub use session::Session;
