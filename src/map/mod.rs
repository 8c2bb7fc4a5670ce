//! Town map model
//!
//! Loads a JSON town map (see [`format`]) into a compact, read-only graph of
//! intersections and implements [`RoadNetwork`] for the path search.
//!
//! ## Turn legality
//!
//! A continuation `from -> through -> to` is legal when
//!
//! 1. `to` is a target of `through`'s turn table,
//! 2. `from` is a neighbor of `through` (a road between them exists), and
//! 3. the triple is on none of the `no_left_turn`, `no_right_turn` and
//!    `no_u_turn` lists.
//!
//! Rule 2 only checks that a road exists, not that it can be driven towards
//! `through`. Restriction lists in existing maps are written against this
//! rule, so it is kept as is.

pub mod format;

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::SpeedTable;
use crate::core::error::{Error, Result};
use crate::core::network::RoadNetwork;

pub use format::{
    IntersectionRecord, Landmark, MapFile, MapMetadata, RestrictionLists, RoadRecord,
    DEFAULT_ROAD_TYPE,
};

/// Compact handle of an intersection inside one [`TownMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntersectionId(u32);

impl IntersectionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Named turn restriction lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictionKind {
    NoLeftTurn,
    NoRightTurn,
    NoUTurn,
}

impl RestrictionKind {
    pub const ALL: [RestrictionKind; 3] = [
        RestrictionKind::NoLeftTurn,
        RestrictionKind::NoRightTurn,
        RestrictionKind::NoUTurn,
    ];

    /// Key used in the map file
    pub fn key(self) -> &'static str {
        match self {
            RestrictionKind::NoLeftTurn => "no_left_turn",
            RestrictionKind::NoRightTurn => "no_right_turn",
            RestrictionKind::NoUTurn => "no_u_turn",
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RestrictionKind::NoLeftTurn => "no left turn",
            RestrictionKind::NoRightTurn => "no right turn",
            RestrictionKind::NoUTurn => "no U-turn",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct Intersection {
    pub name: String,
    pub position: (f64, f64),
    /// Direction label -> target, in file order
    pub turns: Vec<(String, IntersectionId)>,
    pub kind: Option<String>,
    pub traffic_light: bool,
}

/// Undirected road, listed once per adjacent pair
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub from: IntersectionId,
    pub to: IntersectionId,
    pub kind: String,
    pub one_way: bool,
}

/// Read-only town road graph with turn tables and restrictions
#[derive(Debug, Clone)]
pub struct TownMap {
    metadata: MapMetadata,
    intersections: Vec<Intersection>,
    /// Turn targets de-duplicated, first occurrence kept
    neighbors: Vec<Vec<IntersectionId>>,
    index: FxHashMap<String, IntersectionId>,
    roads: Vec<Road>,
    /// Both orientations of every road -> index into `roads`
    road_index: FxHashMap<(IntersectionId, IntersectionId), usize>,
    restrictions: Vec<(RestrictionKind, Vec<[IntersectionId; 3]>)>,
    banned: FxHashSet<(IntersectionId, IntersectionId, IntersectionId)>,
    landmarks: IndexMap<IntersectionId, Landmark>,
}

impl TownMap {
    /// Load a JSON map file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let map = Self::from_json_str(&text)?;
        info!(
            "Loaded map {} ({} intersections, {} roads)",
            path.display(),
            map.intersection_count(),
            map.road_count()
        );
        Ok(map)
    }

    /// Parse a JSON map document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: MapFile = serde_json::from_str(text)?;
        Self::from_map_file(file)
    }

    /// Build the graph from an already parsed map file
    pub fn from_map_file(file: MapFile) -> Result<Self> {
        let MapFile {
            metadata,
            intersections: records,
            roads: road_records,
            traffic_restrictions,
            landmarks: landmark_records,
        } = file;

        if records.len() > u32::MAX as usize {
            return Err(Error::InvalidMap(format!(
                "{} intersections exceed the supported maximum",
                records.len()
            )));
        }

        let mut index: FxHashMap<String, IntersectionId> = FxHashMap::default();
        index.reserve(records.len());
        for (i, name) in records.keys().enumerate() {
            index.insert(name.clone(), IntersectionId(i as u32));
        }

        let mut intersections = Vec::with_capacity(records.len());
        let mut neighbors = Vec::with_capacity(records.len());

        for (name, record) in records {
            let mut turns = Vec::with_capacity(record.turns.len());
            let mut adjacent: Vec<IntersectionId> = Vec::with_capacity(record.turns.len());

            for (direction, target) in record.turns {
                let target_id = *index.get(&target).ok_or_else(|| {
                    Error::InvalidMap(format!(
                        "intersection '{name}' turns {direction} to unknown intersection '{target}'"
                    ))
                })?;
                if !adjacent.contains(&target_id) {
                    adjacent.push(target_id);
                }
                turns.push((direction, target_id));
            }

            intersections.push(Intersection {
                name,
                position: (record.x, record.y),
                turns,
                kind: record.kind,
                traffic_light: record.traffic_light,
            });
            neighbors.push(adjacent);
        }

        // Road attributes by unordered pair; the first record for a pair wins
        let mut attributes: FxHashMap<(IntersectionId, IntersectionId), RoadRecord> =
            FxHashMap::default();
        for road in road_records {
            let (Some(&a), Some(&b)) = (index.get(&road.from), index.get(&road.to)) else {
                return Err(Error::InvalidMap(format!(
                    "road {} - {} references an unknown intersection",
                    road.from, road.to
                )));
            };
            attributes.entry(unordered(a, b)).or_insert(road);
        }

        let mut roads = Vec::new();
        let mut road_index: FxHashMap<(IntersectionId, IntersectionId), usize> =
            FxHashMap::default();
        for (i, adjacent) in neighbors.iter().enumerate() {
            let a = IntersectionId(i as u32);
            for &b in adjacent {
                if road_index.contains_key(&(a, b)) {
                    continue;
                }
                let (kind, one_way) = match attributes.remove(&unordered(a, b)) {
                    Some(record) => (record.kind, record.one_way),
                    None => (DEFAULT_ROAD_TYPE.to_string(), false),
                };
                road_index.insert((a, b), roads.len());
                road_index.insert((b, a), roads.len());
                roads.push(Road {
                    from: a,
                    to: b,
                    kind,
                    one_way,
                });
            }
        }
        for record in attributes.values() {
            warn!(
                "road {} - {} has attributes but no turn leads along it; ignored",
                record.from, record.to
            );
        }

        let mut restrictions = Vec::with_capacity(RestrictionKind::ALL.len());
        let mut banned: FxHashSet<(IntersectionId, IntersectionId, IntersectionId)> =
            FxHashSet::default();
        let RestrictionLists {
            no_left_turn,
            no_right_turn,
            no_u_turn,
        } = traffic_restrictions;

        for (kind, list) in [
            (RestrictionKind::NoLeftTurn, no_left_turn),
            (RestrictionKind::NoRightTurn, no_right_turn),
            (RestrictionKind::NoUTurn, no_u_turn),
        ] {
            let mut resolved = Vec::with_capacity(list.len());
            for [from, through, to] in list {
                match (index.get(&from), index.get(&through), index.get(&to)) {
                    (Some(&f), Some(&t), Some(&o)) => {
                        banned.insert((f, t, o));
                        resolved.push([f, t, o]);
                    }
                    _ => warn!(
                        "{} restriction [{from}, {through}, {to}] names an unknown intersection; ignored",
                        kind.key()
                    ),
                }
            }
            restrictions.push((kind, resolved));
        }

        let mut landmarks = IndexMap::with_capacity(landmark_records.len());
        for (name, landmark) in landmark_records {
            match index.get(&name) {
                Some(&id) => {
                    landmarks.insert(id, landmark);
                }
                None => warn!(
                    "landmark '{}' placed at unknown intersection '{name}'; ignored",
                    landmark.name
                ),
            }
        }

        Ok(TownMap {
            metadata,
            intersections,
            neighbors,
            index,
            roads,
            road_index,
            restrictions,
            banned,
            landmarks,
        })
    }

    pub fn metadata(&self) -> &MapMetadata {
        &self.metadata
    }

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// All intersections in file order
    pub fn intersection_ids(&self) -> impl Iterator<Item = IntersectionId> + '_ {
        (0..self.intersections.len() as u32).map(IntersectionId)
    }

    /// The `n`-th intersection in file order
    pub fn nth(&self, n: usize) -> Option<IntersectionId> {
        (n < self.intersections.len()).then(|| IntersectionId(n as u32))
    }

    /// Look up an intersection by its external id
    pub fn get(&self, name: &str) -> Option<IntersectionId> {
        self.index.get(name).copied()
    }

    pub fn intersection(&self, id: IntersectionId) -> &Intersection {
        &self.intersections[id.index()]
    }

    pub fn name(&self, id: IntersectionId) -> &str {
        &self.intersections[id.index()].name
    }

    pub fn names<'a>(&'a self, path: &'a [IntersectionId]) -> impl Iterator<Item = &'a str> + 'a {
        path.iter().map(move |&id| self.name(id))
    }

    pub fn position(&self, id: IntersectionId) -> (f64, f64) {
        self.intersections[id.index()].position
    }

    pub fn intersection_type(&self, id: IntersectionId) -> Option<&str> {
        self.intersections[id.index()].kind.as_deref()
    }

    pub fn has_traffic_light(&self, id: IntersectionId) -> bool {
        self.intersections[id.index()].traffic_light
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Road between two intersections, in either direction
    pub fn road(&self, a: IntersectionId, b: IntersectionId) -> Option<&Road> {
        self.road_index.get(&(a, b)).map(|&i| &self.roads[i])
    }

    /// Type of the road between two intersections, `None` if they aren't adjacent
    pub fn road_type(&self, a: IntersectionId, b: IntersectionId) -> Option<&str> {
        self.road(a, b).map(|road| road.kind.as_str())
    }

    pub fn landmark(&self, id: IntersectionId) -> Option<&Landmark> {
        self.landmarks.get(&id)
    }

    pub fn landmarks(&self) -> impl Iterator<Item = (IntersectionId, &Landmark)> + '_ {
        self.landmarks.iter().map(|(&id, landmark)| (id, landmark))
    }

    /// Restriction triples per list, unknown ids already dropped
    pub fn restrictions(&self, kind: RestrictionKind) -> &[[IntersectionId; 3]] {
        self.restrictions
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// Straight-line distance between two intersections, in map units
    pub fn distance(&self, a: IntersectionId, b: IntersectionId) -> f64 {
        let (ax, ay) = self.position(a);
        let (bx, by) = self.position(b);
        (bx - ax).hypot(by - ay)
    }

    /// Total length of a path, in map units
    pub fn path_distance(&self, path: &[IntersectionId]) -> f64 {
        path.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }

    /// Estimated travel time of a path, in minutes
    pub fn path_time(&self, path: &[IntersectionId], speeds: &SpeedTable) -> f64 {
        path.windows(2)
            .map(|w| {
                let kind = self.road_type(w[0], w[1]).unwrap_or(DEFAULT_ROAD_TYPE);
                self.distance(w[0], w[1]) / speeds.speed_for(kind)
            })
            .sum()
    }

    fn suggest_unknown(&self, id: &str) -> Error {
        Error::unknown_intersection(id, self.intersections.iter().map(|i| i.name.as_str()))
    }
}

fn unordered(a: IntersectionId, b: IntersectionId) -> (IntersectionId, IntersectionId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl RoadNetwork for TownMap {
    type Node = IntersectionId;

    fn resolve(&self, id: &str) -> Result<IntersectionId> {
        self.get(id).ok_or_else(|| self.suggest_unknown(id))
    }

    #[inline]
    fn neighbors(&self, node: IntersectionId) -> &[IntersectionId] {
        &self.neighbors[node.index()]
    }

    fn is_turn_allowed(
        &self,
        from: IntersectionId,
        through: IntersectionId,
        to: IntersectionId,
    ) -> bool {
        let turns_to = self.intersections[through.index()]
            .turns
            .iter()
            .any(|&(_, target)| target == to);
        if !turns_to {
            return false;
        }

        if !self.neighbors[through.index()].contains(&from) {
            return false;
        }

        !self.banned.contains(&(from, through, to))
    }
}

/// Programmatic map construction, mostly for tests and generated maps
#[derive(Debug, Clone, Default)]
pub struct TownMapBuilder {
    file: MapFile,
}

impl TownMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.file.metadata.name = Some(name.to_string());
        self
    }

    /// Add an intersection at `(x, y)` with `(direction, target)` turns
    pub fn intersection(mut self, id: &str, x: f64, y: f64, turns: &[(&str, &str)]) -> Self {
        let record = IntersectionRecord {
            x,
            y,
            turns: turns
                .iter()
                .map(|(direction, target)| (direction.to_string(), target.to_string()))
                .collect(),
            ..Default::default()
        };
        self.file.intersections.insert(id.to_string(), record);
        self
    }

    /// Set type and traffic light of an already added intersection
    pub fn describe(mut self, id: &str, kind: &str, traffic_light: bool) -> Self {
        if let Some(record) = self.file.intersections.get_mut(id) {
            record.kind = Some(kind.to_string());
            record.traffic_light = traffic_light;
        }
        self
    }

    pub fn road(mut self, from: &str, to: &str, kind: &str, one_way: bool) -> Self {
        self.file.roads.push(RoadRecord {
            from: from.to_string(),
            to: to.to_string(),
            kind: kind.to_string(),
            one_way,
        });
        self
    }

    pub fn restrict(mut self, kind: RestrictionKind, from: &str, through: &str, to: &str) -> Self {
        let triple = [from.to_string(), through.to_string(), to.to_string()];
        let lists = &mut self.file.traffic_restrictions;
        match kind {
            RestrictionKind::NoLeftTurn => lists.no_left_turn.push(triple),
            RestrictionKind::NoRightTurn => lists.no_right_turn.push(triple),
            RestrictionKind::NoUTurn => lists.no_u_turn.push(triple),
        }
        self
    }

    pub fn landmark(mut self, at: &str, name: &str, kind: &str) -> Self {
        self.file.landmarks.insert(
            at.to_string(),
            Landmark {
                name: name.to_string(),
                kind: kind.to_string(),
            },
        );
        self
    }

    /// The map file being assembled, e.g. to write it out as JSON
    pub fn map_file(&self) -> &MapFile {
        &self.file
    }

    pub fn build(self) -> Result<TownMap> {
        TownMap::from_map_file(self.file)
    }
}
