//! JSON town map format
//!
//! ```json
//! {
//!   "metadata": { "name": "Riverton" },
//!   "intersections": {
//!     "0": { "x": 0.0, "y": 0.0, "turns": { "north": "1", "east": "4" } }
//!   },
//!   "roads": [ { "from": "0", "to": "1", "type": "main_road", "one_way": false } ],
//!   "traffic_restrictions": { "no_left_turn": [["4", "0", "1"]] },
//!   "landmarks": { "0": { "name": "Town Hall", "type": "government" } }
//! }
//! ```
//!
//! Object key order is significant: intersections are enumerated and turn
//! tables are walked in file order, which decides tie-breaks between equally
//! short routes. Everything except `intersections` is optional.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Road type assumed for roads without an entry in `roads`
pub const DEFAULT_ROAD_TYPE: &str = "local_road";

fn default_road_type() -> String {
    DEFAULT_ROAD_TYPE.to_string()
}

/// Whole map file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    #[serde(default)]
    pub metadata: MapMetadata,

    pub intersections: IndexMap<String, IntersectionRecord>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roads: Vec<RoadRecord>,

    #[serde(default)]
    pub traffic_restrictions: RestrictionLists,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub landmarks: IndexMap<String, Landmark>,
}

/// Descriptive map header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared counts; informational only, the loaded map is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersections_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roads_count: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    pub x: f64,
    pub y: f64,
    /// Direction label -> neighbor id
    #[serde(default)]
    pub turns: IndexMap<String, String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub traffic_light: bool,
}

/// Attributes of the road between two intersections (either direction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub from: String,
    pub to: String,
    #[serde(default = "default_road_type", rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub one_way: bool,
}

/// Forbidden `[from, through, to]` triples, by restriction name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestrictionLists {
    #[serde(default)]
    pub no_left_turn: Vec<[String; 3]>,
    #[serde(default)]
    pub no_right_turn: Vec<[String; 3]>,
    #[serde(default)]
    pub no_u_turn: Vec<[String; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}
