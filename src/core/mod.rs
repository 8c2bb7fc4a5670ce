//! Core library modules for butterfly-nav
//!
//! The map-model contract, the turn-aware search built on it and the error
//! type shared by the whole crate.

pub mod error;
pub mod network;
pub mod search;

pub use error::{Error, Result};
pub use network::RoadNetwork;
pub use search::{find_path, search, SearchOutcome, SearchStats};
