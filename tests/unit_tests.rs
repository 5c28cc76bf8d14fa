// Unit tests for Viva Match

use viva_match::core::{
    calculate_compatibility, derive_cross_matches, is_eligible, is_feature_available,
    AssociationTable, ScoringTables,
};
use viva_match::models::{Gender, GenderPreference, Profile, SubscriptionTier};

const INTERESTS: [&str; 6] = ["Music", "Cinema", "Travel", "Dance", "Knitting", "Sports"];
const LOCATIONS: [&str; 6] = ["shows", "cinemas", "parks", "festivals", "gyms", "rooftops"];

fn subset(vocabulary: &[&str], mask: u32) -> Vec<String> {
    vocabulary
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, s)| s.to_string())
        .collect()
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_score_is_symmetric() {
    let tables = ScoringTables::default();

    for a in (0..64).step_by(5) {
        for b in (0..64).step_by(7) {
            let (ia, la) = (subset(&INTERESTS, a), subset(&LOCATIONS, b));
            let (ib, lb) = (subset(&INTERESTS, b), subset(&LOCATIONS, a));

            let forward = calculate_compatibility(&ia, &la, &ib, &lb, &tables);
            let backward = calculate_compatibility(&ib, &lb, &ia, &la, &tables);
            assert_eq!(forward.score, backward.score, "asymmetric for masks {} / {}", a, b);
        }
    }
}

#[test]
fn test_score_stays_in_range_and_explanations_stay_common() {
    let tables = ScoringTables::default();

    for a in 0..64 {
        for b in (0..64).step_by(3) {
            let (vi, vl) = (subset(&INTERESTS, a), subset(&LOCATIONS, a ^ 0b101));
            let (ci, cl) = (subset(&INTERESTS, b), subset(&LOCATIONS, b));
            let result = calculate_compatibility(&vi, &vl, &ci, &cl, &tables);

            assert!(result.score <= 100);
            for interest in &result.common_interests {
                assert!(vi.contains(interest) && ci.contains(interest));
            }
            for location in &result.common_location_preferences {
                assert!(vl.contains(location) && cl.contains(location));
            }
            for cross in &result.cross_matches {
                let (interest, location) = cross.split_once(" at ").unwrap();
                assert!(result.common_interests.iter().any(|i| i == interest));
                assert!(result.common_location_preferences.iter().any(|l| l == location));
            }
        }
    }
}

#[test]
fn test_disjoint_profiles_score_zero() {
    let result = calculate_compatibility(
        &labels(&["Music", "Cinema"]),
        &labels(&["shows"]),
        &labels(&["Sports"]),
        &labels(&["gyms", "parks"]),
        &ScoringTables::default(),
    );
    assert_eq!(result.score, 0);
}

#[test]
fn test_more_overlap_never_scores_lower() {
    let tables = ScoringTables::default();
    let viewer_interests = labels(&["Music", "Cinema", "Travel"]);
    let viewer_locations = labels(&["shows", "cinemas", "parks"]);

    let one = calculate_compatibility(
        &viewer_interests,
        &viewer_locations,
        &labels(&["Music", "Sports", "Knitting"]),
        &labels(&["parks", "gyms", "rooftops"]),
        &tables,
    );
    let two = calculate_compatibility(
        &viewer_interests,
        &viewer_locations,
        &labels(&["Music", "Cinema", "Knitting"]),
        &labels(&["parks", "gyms", "rooftops"]),
        &tables,
    );
    assert!(two.score >= one.score);
}

#[test]
fn test_music_and_parks_regression() {
    let result = calculate_compatibility(
        &labels(&["Music", "Cinema", "Travel"]),
        &labels(&["shows", "cinemas", "parks"]),
        &labels(&["Music", "Sports", "Nature"]),
        &labels(&["parks", "nature", "sports"]),
        &ScoringTables::default(),
    );

    assert_eq!(result.common_interests, vec!["Music"]);
    assert_eq!(result.common_location_preferences, vec!["parks"]);
    assert!(result.cross_matches.is_empty());
    // 1.2 / 3.6 * 60 + 0.9 / 3.6 * 40 = 20 + 10
    assert_eq!(result.score, 30);
}

#[test]
fn test_cross_matches_for_shared_culture() {
    let result = calculate_compatibility(
        &labels(&["Cinema", "Music"]),
        &labels(&["festivals", "cinemas"]),
        &labels(&["Music", "Cinema"]),
        &labels(&["cinemas", "festivals"]),
        &ScoringTables::default(),
    );
    assert_eq!(
        result.cross_matches,
        vec!["Cinema at cinemas", "Cinema at festivals", "Music at festivals"]
    );
}

#[test]
fn test_cross_matches_ignore_uncommon_items() {
    let result = derive_cross_matches(&["Music"], &[] as &[&str], &AssociationTable::default());
    assert!(result.is_empty());
}

#[test]
fn test_eligibility() {
    let viewer = Profile::new(1, Gender::Woman, &[], &[], 0.0);
    let man = Profile::new(2, Gender::Man, &[], &[], 0.0);
    let other = Profile::new(3, Gender::Other, &[], &[], 0.0);

    assert!(is_eligible(&viewer, &man, GenderPreference::Man));
    assert!(!is_eligible(&viewer, &other, GenderPreference::Man));
    assert!(is_eligible(&viewer, &other, GenderPreference::Any));
    assert!(!is_eligible(&viewer, &viewer, GenderPreference::Any));
}

#[test]
fn test_feature_gate_table() {
    assert!(is_feature_available("basic", SubscriptionTier::Free));
    assert!(!is_feature_available("advanced", SubscriptionTier::Free));
    assert!(is_feature_available("advanced", SubscriptionTier::Premium));
    assert!(is_feature_available("whatsapp", SubscriptionTier::Vip));
}
