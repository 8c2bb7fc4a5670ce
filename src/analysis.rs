//! Map connectivity report

use std::fmt;

use crate::core::network::RoadNetwork;
use crate::map::{RestrictionKind, TownMap};

/// Intersection type used when a map leaves it out
pub const UNTYPED_INTERSECTION: &str = "unspecified";

/// Counts describing a town map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub intersections: usize,
    pub roads: usize,
    /// Intersections per type, in order of first appearance
    pub intersection_types: Vec<(String, usize)>,
    pub traffic_lights: usize,
    /// Roads per type, in order of first appearance
    pub road_types: Vec<(String, usize)>,
    pub one_way_roads: usize,
    pub restrictions: Vec<(RestrictionKind, usize)>,
    /// Intersections with an empty turn table
    pub isolated: Vec<String>,
}

fn bump(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

impl ConnectivityReport {
    pub fn from_map(map: &TownMap) -> Self {
        let mut intersection_types = Vec::new();
        let mut traffic_lights = 0;
        let mut isolated = Vec::new();

        for id in map.intersection_ids() {
            bump(
                &mut intersection_types,
                map.intersection_type(id).unwrap_or(UNTYPED_INTERSECTION),
            );
            if map.has_traffic_light(id) {
                traffic_lights += 1;
            }
            if map.neighbors(id).is_empty() {
                isolated.push(map.name(id).to_string());
            }
        }

        let mut road_types = Vec::new();
        let mut one_way_roads = 0;
        for road in map.roads() {
            bump(&mut road_types, &road.kind);
            if road.one_way {
                one_way_roads += 1;
            }
        }

        let restrictions = RestrictionKind::ALL
            .iter()
            .map(|&kind| (kind, map.restrictions(kind).len()))
            .collect();

        Self {
            intersections: map.intersection_count(),
            roads: map.road_count(),
            intersection_types,
            traffic_lights,
            road_types,
            one_way_roads,
            restrictions,
            isolated,
        }
    }
}

/// `main_road` -> `Main Road`
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for ConnectivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Intersections: {}", self.intersections)?;
        writeln!(f, "Roads: {}", self.roads)?;

        writeln!(f, "Intersection types:")?;
        for (kind, count) in &self.intersection_types {
            writeln!(f, "  - {}: {count}", title_case(kind))?;
        }
        writeln!(f, "Traffic lights: {}", self.traffic_lights)?;

        writeln!(f, "Road types:")?;
        for (kind, count) in &self.road_types {
            writeln!(f, "  - {}: {count} segments", title_case(kind))?;
        }
        writeln!(f, "One-way roads: {}", self.one_way_roads)?;

        writeln!(f, "Turn restrictions:")?;
        for (kind, count) in &self.restrictions {
            writeln!(f, "  - {kind}: {count}")?;
        }

        if self.isolated.is_empty() {
            write!(f, "Isolated intersections: none")
        } else {
            write!(f, "Isolated intersections: {}", self.isolated.join(", "))
        }
    }
}
