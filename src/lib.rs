//! Viva Match - compatibility engine for the Viva dating app
//!
//! This library scores how well two profiles fit on shared interests and
//! favourite kinds of places, explains the overlap as cross-matches, and
//! ranks candidate lists for a viewer.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{calculate_compatibility, is_feature_available, Matcher, RankingSettings, ScoringTables};
pub use models::{Gender, GenderPreference, MatchResult, Profile, ProfileQuery, RankedMatch, SubscriptionTier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = calculate_compatibility(&[], &[], &[], &[], &ScoringTables::default());
        assert_eq!(result, MatchResult::default());
    }
}
