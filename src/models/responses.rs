use serde::{Deserialize, Serialize};
use crate::models::domain::{ProfileId, RankedMatch, SubscriptionTier};

/// Response for the discover endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub matches: Vec<RankedMatch>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Like response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    pub like_id: String,
    pub profile_id: ProfileId,
}

/// Feature gate lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureResponse {
    pub feature: String,
    pub tier: SubscriptionTier,
    pub available: bool,
}
