// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ContactInfo, Gender, GenderPreference, MatchResult, Profile, ProfileId, ProfileQuery,
    RankedMatch, SubscriptionTier,
};
pub use requests::{DiscoverRequest, LikeRequest, ScoreRequest};
pub use responses::{DiscoverResponse, ErrorResponse, FeatureResponse, HealthResponse, LikeResponse};
