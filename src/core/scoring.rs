use std::collections::HashSet;
use crate::models::MatchResult;
use crate::core::{cross_match::derive_cross_matches, weights::{ScoringTables, WeightTable}};

/// Points available to the interest axis
pub const INTEREST_POINTS: f64 = 60.0;

/// Points available to the location axis
pub const LOCATION_POINTS: f64 = 40.0;

/// Calculate the compatibility (0-100) between a viewer and a candidate
///
/// Scoring formula, per axis:
/// ```text
/// component = sum(weight(common)) / (min(|viewer|, |candidate|) * ceiling) * points
/// ```
/// with 60 points for interests and 40 for locations. The total is rounded
/// and clamped to 0..=100. Duplicate labels count once.
pub fn calculate_compatibility(
    viewer_interests: &[String],
    viewer_locations: &[String],
    candidate_interests: &[String],
    candidate_locations: &[String],
    tables: &ScoringTables,
) -> MatchResult {
    let (common_interests, interest_score) = score_axis(
        viewer_interests,
        candidate_interests,
        &tables.interest_weights,
        tables.ceiling.ceiling_weight(&tables.interest_weights),
        INTEREST_POINTS,
    );

    let (common_locations, location_score) = score_axis(
        viewer_locations,
        candidate_locations,
        &tables.location_weights,
        tables.ceiling.ceiling_weight(&tables.location_weights),
        LOCATION_POINTS,
    );

    let cross_matches = derive_cross_matches(&common_interests, &common_locations, &tables.associations);

    MatchResult {
        score: (interest_score + location_score).round().clamp(0.0, 100.0) as u8,
        common_interests: common_interests.into_iter().map(str::to_string).collect(),
        common_location_preferences: common_locations.into_iter().map(str::to_string).collect(),
        cross_matches,
    }
}

/// Score one axis, returning the common labels in viewer order
fn score_axis<'a>(
    viewer: &'a [String],
    candidate: &[String],
    weights: &WeightTable,
    ceiling_weight: f64,
    points: f64,
) -> (Vec<&'a str>, f64) {
    let viewer = distinct(viewer);
    let candidate_set: HashSet<&str> = candidate.iter().map(String::as_str).collect();

    let common: Vec<&str> = viewer
        .iter()
        .copied()
        .filter(|label| candidate_set.contains(label))
        .collect();

    // summed in ascending order so the result does not depend on which side is the viewer
    let mut common_weights: Vec<f64> = common.iter().map(|label| weights.weight(label)).collect();
    common_weights.sort_by(f64::total_cmp);
    let weighted: f64 = common_weights.iter().sum();
    let max_score = viewer.len().min(candidate_set.len()) as f64 * ceiling_weight;

    let component = if max_score > 0.0 {
        weighted / max_score * points
    } else {
        0.0
    };

    (common, component)
}

/// Labels with duplicates removed, first occurrence kept
fn distinct(labels: &[String]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(labels.len());
    labels
        .iter()
        .map(String::as_str)
        .filter(|label| seen.insert(*label))
        .collect()
}
