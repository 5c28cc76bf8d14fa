use crate::models::{GenderPreference, Profile, ProfileQuery};

/// Check if a candidate may be ranked for a viewer at all
///
/// Eligibility is decided before scoring: the viewer never sees themself,
/// and the gender preference is a hard filter.
#[inline]
pub fn is_eligible(
    viewer: &Profile,
    candidate: &Profile,
    gender_preference: GenderPreference,
) -> bool {
    candidate.id != viewer.id && gender_preference.accepts(candidate.gender)
}

/// Check if a profile satisfies a profile store query
///
/// Every filter in the query is optional; an empty query accepts everything.
pub fn matches_profile_query(profile: &Profile, query: &ProfileQuery) -> bool {
    if let Some(term) = query.search_term.as_deref() {
        if !matches_search_term(profile, term) {
            return false;
        }
    }

    if let Some(max_distance) = query.max_distance_km {
        if profile.distance_km > max_distance {
            return false;
        }
    }

    if let Some(min_compatibility) = query.min_compatibility {
        if profile.compatibility.unwrap_or(0) < min_compatibility {
            return false;
        }
    }

    if let Some(location) = query.location.as_deref() {
        if !profile.location_preferences.iter().any(|l| l == location) {
            return false;
        }
    }

    if let Some(preference) = query.gender_preference {
        if !preference.accepts(profile.gender) {
            return false;
        }
    }

    if !query.interests.is_empty()
        && !query.interests.iter().any(|i| profile.interests.contains(i)) {
        return false;
    }

    true
}

/// Free-text search: any whitespace-separated term found in name, city or bio
fn matches_search_term(profile: &Profile, term: &str) -> bool {
    let terms: Vec<String> = term.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return true;
    }

    let fields = [
        profile.name.to_lowercase(),
        profile.city.to_lowercase(),
        profile.bio.to_lowercase(),
    ];

    fields
        .iter()
        .any(|field| terms.iter().any(|t| field.contains(t.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn create_test_profile() -> Profile {
        let mut profile = Profile::new(7, Gender::Woman, &["Music", "Travel"], &["shows", "parks"], 12.0);
        profile.name = "Ana".to_string();
        profile.city = "São Paulo".to_string();
        profile.bio = "Loves live music and long walks".to_string();
        profile.compatibility = Some(80);
        profile
    }

    #[test]
    fn test_viewer_is_never_eligible() {
        let viewer = create_test_profile();
        assert!(!is_eligible(&viewer, &viewer, GenderPreference::Any));
    }

    #[test]
    fn test_gender_is_a_hard_filter() {
        let viewer = Profile::new(1, Gender::Man, &[], &[], 0.0);
        let candidate = create_test_profile();

        assert!(is_eligible(&viewer, &candidate, GenderPreference::Woman));
        assert!(is_eligible(&viewer, &candidate, GenderPreference::Any));
        assert!(!is_eligible(&viewer, &candidate, GenderPreference::Man));
    }

    #[test]
    fn test_empty_query_matches() {
        assert!(matches_profile_query(&create_test_profile(), &ProfileQuery::default()));
    }

    #[test]
    fn test_search_term() {
        let profile = create_test_profile();

        let query = ProfileQuery { search_term: Some("paulo".into()), ..Default::default() };
        assert!(matches_profile_query(&profile, &query));

        let query = ProfileQuery { search_term: Some("rio MUSIC".into()), ..Default::default() };
        assert!(matches_profile_query(&profile, &query));

        let query = ProfileQuery { search_term: Some("rio".into()), ..Default::default() };
        assert!(!matches_profile_query(&profile, &query));
    }

    #[test]
    fn test_distance_and_compatibility() {
        let profile = create_test_profile();

        let query = ProfileQuery { max_distance_km: Some(12.0), ..Default::default() };
        assert!(matches_profile_query(&profile, &query));

        let query = ProfileQuery { max_distance_km: Some(5.0), ..Default::default() };
        assert!(!matches_profile_query(&profile, &query));

        let query = ProfileQuery { min_compatibility: Some(90), ..Default::default() };
        assert!(!matches_profile_query(&profile, &query));
    }

    #[test]
    fn test_location_and_interests() {
        let profile = create_test_profile();

        let query = ProfileQuery { location: Some("parks".into()), ..Default::default() };
        assert!(matches_profile_query(&profile, &query));

        let query = ProfileQuery { location: Some("museums".into()), ..Default::default() };
        assert!(!matches_profile_query(&profile, &query));

        let query = ProfileQuery { interests: vec!["Art".into(), "Travel".into()], ..Default::default() };
        assert!(matches_profile_query(&profile, &query));

        let query = ProfileQuery { interests: vec!["Art".into()], ..Default::default() };
        assert!(!matches_profile_query(&profile, &query));
    }
}
