use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{ProfileId, ProfileQuery};

/// Request to rank candidates for a viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverRequest {
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: ProfileId,
    #[validate(nested)]
    #[serde(default)]
    pub query: ProfileQuery,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}

/// Request for the compatibility of a single pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: ProfileId,
    #[serde(alias = "candidate_id", rename = "candidateId")]
    pub candidate_id: ProfileId,
}

/// Request to like a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: ProfileId,
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: ProfileId,
}
