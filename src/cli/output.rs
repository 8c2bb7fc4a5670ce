//! Human-readable output for the command-line interface

use std::fmt::Write;

use butterfly_nav::analysis::title_case;
use butterfly_nav::{RandomRoute, RestrictionKind, RouteSummary, TownMap};

/// Restriction examples listed per kind by `info`
const RESTRICTION_EXAMPLES: usize = 3;

/// Join a path with arrows, eliding everything after `limit` entries
pub fn format_path(path: &[String], limit: Option<usize>) -> String {
    match limit {
        Some(limit) if path.len() > limit => format!("{} -> ...", path[..limit].join(" -> ")),
        _ => path.join(" -> "),
    }
}

/// Intersection id followed by its landmark name, if it has one
fn describe(map: &TownMap, id: &str) -> String {
    match map.get(id).and_then(|i| map.landmark(i)) {
        Some(landmark) => format!("{id} ({})", landmark.name),
        None => id.to_string(),
    }
}

pub fn render_route(map: &TownMap, from: &str, to: &str, route: Option<&RouteSummary>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "From: {}", describe(map, from));
    let _ = writeln!(out, "To:   {}", describe(map, to));

    let Some(route) = route else {
        let _ = write!(
            out,
            "No path found (turn restrictions or one-way streets block every route)"
        );
        return out;
    };

    let _ = writeln!(out, "Path: {}", format_path(&route.path, None));
    let _ = writeln!(out, "Distance: {:.2} units", route.distance);
    let _ = writeln!(out, "Time: {:.1} minutes", route.time_minutes);
    let _ = writeln!(out, "Intersections: {}", route.path.len());
    let _ = write!(out, "Road types:");
    for (kind, count) in &route.road_types {
        let _ = write!(out, "\n  - {}: {count} segments", title_case(kind));
    }
    out
}

pub fn render_random(n: usize, drawn: &RandomRoute) -> String {
    let mut out = format!("Random route {n}: {} -> {}\n", drawn.start, drawn.goal);
    match &drawn.route {
        Some(route) => {
            let _ = writeln!(out, "  Path: {}", format_path(&route.path, Some(5)));
            let _ = write!(
                out,
                "  Distance: {:.2} units, Time: {:.1} minutes",
                route.distance, route.time_minutes
            );
        }
        None => out.push_str("  No path found"),
    }
    out
}

pub fn render_info(map: &TownMap) -> String {
    let mut out = String::new();
    let metadata = map.metadata();

    let _ = writeln!(
        out,
        "Map: {}",
        metadata.name.as_deref().unwrap_or("Unknown Town")
    );
    if let Some(description) = &metadata.description {
        let _ = writeln!(out, "  {description}");
    }
    let _ = writeln!(out, "Intersections: {}", map.intersection_count());
    let _ = writeln!(out, "Roads: {}", map.road_count());

    let landmarks: Vec<_> = map.landmarks().collect();
    let _ = writeln!(out, "Landmarks ({}):", landmarks.len());
    for (id, landmark) in landmarks {
        let (x, y) = map.position(id);
        let _ = writeln!(
            out,
            "  - {} ({}) at intersection {} ({x}, {y})",
            landmark.name,
            landmark.kind,
            map.name(id)
        );
    }

    let _ = write!(out, "Turn restrictions:");
    for kind in RestrictionKind::ALL {
        let list = map.restrictions(kind);
        let _ = write!(out, "\n  {kind}: {} locations", list.len());
        for (i, [from, through, to]) in list.iter().take(RESTRICTION_EXAMPLES).enumerate() {
            let _ = write!(
                out,
                "\n    {}. {} -> {} -> {}",
                i + 1,
                map.name(*from),
                map.name(*through),
                map.name(*to)
            );
        }
    }
    out
}
