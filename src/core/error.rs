//! Error types for butterfly-nav
//!
//! "No path between two known intersections" is not an error: the search
//! reports it as `Ok(None)`. Everything in here is a caller or data fault.

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

/// Main error type for butterfly-nav operations
#[derive(Debug, Error)]
pub enum Error {
    /// Intersection identifier not known to the map
    #[error("Unknown intersection '{id}'{}", did_you_mean(.suggestion))]
    UnknownIntersection {
        id: String,
        suggestion: Option<String>,
    },

    /// Map file parsed but its content is inconsistent
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// Invalid parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON map
    #[error("Map parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML configuration
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// Build an `UnknownIntersection` error, suggesting the closest known id
    pub fn unknown_intersection<'a, I>(id: &str, known: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Error::UnknownIntersection {
            id: id.to_string(),
            suggestion: suggest_intersection(id, known),
        }
    }

    /// True for errors caused by the caller naming an intersection the map doesn't have
    pub fn is_unknown_intersection(&self) -> bool {
        matches!(self, Error::UnknownIntersection { .. })
    }
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{s}'?)"),
        None => String::new(),
    }
}

/// Minimum combined similarity for a suggestion to be offered
const MIN_SUGGESTION_SCORE: f64 = 0.75;

/// Suggest the known intersection id closest to `input`
///
/// Scores each candidate with Jaro-Winkler (70%) and normalized Levenshtein
/// (30%). Exact matches are never suggested. Candidates are scanned in the
/// order given and ties keep the earliest one.
pub fn suggest_intersection<'a, I>(input: &str, known: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let input_lower = input.to_lowercase();
    let mut best: Option<(&str, f64)> = None;

    for candidate in known {
        let candidate_lower = candidate.to_lowercase();
        if candidate_lower == input_lower {
            // Case-only difference is the most likely intent
            return Some(candidate.to_string());
        }

        let score = jaro_winkler(&input_lower, &candidate_lower) * 0.7
            + normalized_levenshtein(&input_lower, &candidate_lower) * 0.3;

        if score < MIN_SUGGESTION_SCORE {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(candidate, _)| candidate.to_string())
}

/// Convenience result type for butterfly-nav operations
pub type Result<T> = std::result::Result<T, Error>;
