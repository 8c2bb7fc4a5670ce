//! # Butterfly-nav
//!
//! Turn-aware shortest path search over town road maps.
//!
//! Intersections are joined by roads, but not every pair of roads meeting at an
//! intersection may be driven one after the other: turn tables, one-way
//! streets and no-left / no-right / no-U-turn lists all forbid continuations.
//! [`find_path`] runs a breadth-first search over `(intersection, arrived-from)`
//! states and returns the route with the fewest roads that obeys every rule.
//!
//! ```no_run
//! use butterfly_nav::{find_path, TownMap};
//!
//! # fn main() -> butterfly_nav::Result<()> {
//! let map = TownMap::load("town.json")?;
//! match find_path(&map, "0", "44")? {
//!     Some(path) => println!("{}", map.names(&path).collect::<Vec<_>>().join(" -> ")),
//!     None => println!("No path found"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod core;
pub mod map;
pub mod navigation;

pub use analysis::ConnectivityReport;
pub use config::{NavConfig, SpeedTable};
pub use crate::core::{find_path, search, Error, Result, RoadNetwork, SearchOutcome, SearchStats};
pub use map::{IntersectionId, RestrictionKind, TownMap, TownMapBuilder};
pub use navigation::{Navigator, RandomRoute, RouteSummary};
