pub mod config;
pub mod error;
pub mod gedcom;
pub mod graph;
pub mod interactive;
pub mod render;
pub mod store;

pub use config::Config;
pub use error::{GedtreeError, Result};
pub use gedcom::{load_file, parse_str};
pub use graph::{CommonAncestor, Relationship, RelationshipEngine};
pub use store::{Event, EventKind, Family, Individual, Store};
