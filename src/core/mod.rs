// Core algorithm exports
pub mod cross_match;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod tiers;
pub mod weights;

pub use cross_match::derive_cross_matches;
pub use filters::{is_eligible, matches_profile_query};
pub use matcher::{Matcher, RankingSettings, RankingSettingsError};
pub use scoring::calculate_compatibility;
pub use tiers::{is_feature_available, Feature, FeatureError};
pub use weights::{Association, AssociationTable, CeilingPolicy, ScoringTables, WeightTable, WeightTableError};
