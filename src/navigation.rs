//! Route lookup on a loaded town map
//!
//! Wraps the path search with what a user of the map wants to know about a
//! route: the intersections by name, its length, the expected travel time and
//! which kinds of road it uses.

use std::path::Path;

use log::debug;
use rand::Rng;

use crate::config::NavConfig;
use crate::core::error::{Error, Result};
use crate::core::network::RoadNetwork;
use crate::core::search::search;
use crate::map::{IntersectionId, TownMap, DEFAULT_ROAD_TYPE};

/// A found route with its derived figures
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub start: String,
    pub goal: String,
    /// Intersection ids, start and goal included
    pub path: Vec<String>,
    /// Map units
    pub distance: f64,
    pub time_minutes: f64,
    /// Segments per road type, in order of first use
    pub road_types: Vec<(String, usize)>,
}

impl RouteSummary {
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Outcome of a random route draw
#[derive(Debug, Clone, PartialEq)]
pub struct RandomRoute {
    pub start: String,
    pub goal: String,
    /// `None` when the goal cannot be reached from the start
    pub route: Option<RouteSummary>,
}

pub struct Navigator {
    map: TownMap,
    config: NavConfig,
}

impl Navigator {
    pub fn new(map: TownMap, config: NavConfig) -> Self {
        Self { map, config }
    }

    /// Load a map file and navigate on it
    pub fn open<P: AsRef<Path>>(map_path: P, config: NavConfig) -> Result<Self> {
        Ok(Self::new(TownMap::load(map_path)?, config))
    }

    pub fn map(&self) -> &TownMap {
        &self.map
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Shortest turn-legal route between two intersection ids
    ///
    /// `Ok(None)` means both ids are known but no legal route exists.
    pub fn find_route(&self, start: &str, goal: &str) -> Result<Option<RouteSummary>> {
        let start = self.map.resolve(start)?;
        let goal = self.map.resolve(goal)?;

        let outcome = search(&self.map, start, goal);
        debug!(
            "{} -> {}: {} states expanded",
            self.map.name(start),
            self.map.name(goal),
            outcome.stats.states_expanded
        );

        Ok(outcome.path.map(|path| self.summarize(start, goal, &path)))
    }

    /// Draw a start and a distinct goal uniformly and route between them
    pub fn random_route<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RandomRoute> {
        let n = self.map.intersection_count();
        if n < 2 {
            return Err(Error::InvalidInput(format!(
                "random routes need at least two intersections, map has {n}"
            )));
        }

        let start = rng.gen_range(0..n);
        let mut goal = rng.gen_range(0..n - 1);
        if goal >= start {
            goal += 1;
        }

        let (Some(start), Some(goal)) = (self.map.nth(start), self.map.nth(goal)) else {
            return Err(Error::InvalidInput(format!("no intersection at index {start} or {goal}")));
        };
        let route = search(&self.map, start, goal)
            .path
            .map(|path| self.summarize(start, goal, &path));

        Ok(RandomRoute {
            start: self.map.name(start).to_string(),
            goal: self.map.name(goal).to_string(),
            route,
        })
    }

    fn summarize(
        &self,
        start: IntersectionId,
        goal: IntersectionId,
        path: &[IntersectionId],
    ) -> RouteSummary {
        let mut road_types: Vec<(String, usize)> = Vec::new();
        for pair in path.windows(2) {
            let kind = self
                .map
                .road_type(pair[0], pair[1])
                .unwrap_or(DEFAULT_ROAD_TYPE);
            match road_types.iter_mut().find(|(k, _)| k == kind) {
                Some((_, count)) => *count += 1,
                None => road_types.push((kind.to_string(), 1)),
            }
        }

        RouteSummary {
            start: self.map.name(start).to_string(),
            goal: self.map.name(goal).to_string(),
            path: self.map.names(path).map(str::to_string).collect(),
            distance: self.map.path_distance(path),
            time_minutes: self.map.path_time(path, &self.config.speeds),
            road_types,
        }
    }
}
