use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;
use crate::core::is_feature_available;
use crate::models::{
    DiscoverRequest, DiscoverResponse, ErrorResponse, FeatureResponse, HealthResponse, LikeRequest,
    LikeResponse, Profile, ProfileId, ScoreRequest, SubscriptionTier,
};
use crate::services::{DiscoveryError, DiscoveryService, LikeError, LikeLimiter};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub discovery: DiscoveryService,
    pub likes: LikeLimiter,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/discover", web::post().to(discover))
        .route("/matches/score", web::post().to(score))
        .route("/profiles", web::put().to(upsert_profile))
        .route("/profiles/{id}", web::get().to(get_profile))
        .route("/likes", web::post().to(like_profile))
        .route("/features/{feature}", web::get().to(feature_available));
}

fn error_response(status_code: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code,
    };
    match status_code {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        429 => HttpResponse::TooManyRequests().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn discovery_error(e: DiscoveryError) -> HttpResponse {
    match e {
        DiscoveryError::NotFound(_) => error_response(404, "Profile not found", e.to_string()),
        DiscoveryError::Store(_) => {
            tracing::error!("Profile store failure: {}", e);
            error_response(500, "Profile store failure", e.to_string())
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Discover endpoint
///
/// POST /api/v1/matches/discover
///
/// Request body:
/// ```json
/// {
///   "viewerId": 1,
///   "query": { "genderPreference": "WOMAN", "maxDistanceKm": 25 },
///   "limit": 20
/// }
/// ```
async fn discover(
    state: web::Data<AppState>,
    req: web::Json<DiscoverRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for discover request: field_errors={:?}", errors);
        return error_response(400, "Validation failed", errors.to_string());
    }

    tracing::info!("Discovering matches for viewer: {}, limit: {}", req.viewer_id, req.limit);

    match state
        .discovery
        .discover(req.viewer_id, &req.query, req.limit as usize)
        .await
    {
        Ok(discovery) => HttpResponse::Ok().json(DiscoverResponse {
            matches: discovery.matches,
            total_results: discovery.total_candidates,
        }),
        Err(e) => discovery_error(e),
    }
}

/// Pairwise compatibility endpoint
///
/// POST /api/v1/matches/score
async fn score(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    match state.discovery.compatibility(req.viewer_id, req.candidate_id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => discovery_error(e),
    }
}

#[derive(Debug, Deserialize)]
struct ProfileLookup {
    #[serde(rename = "viewerTier", default)]
    viewer_tier: SubscriptionTier,
}

/// Profile lookup endpoint
///
/// GET /api/v1/profiles/{id}?viewerTier=VIP
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<ProfileId>,
    query: web::Query<ProfileLookup>,
) -> impl Responder {
    match state.discovery.profile(query.viewer_tier, path.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => discovery_error(e),
    }
}

/// Profile write endpoint
///
/// PUT /api/v1/profiles
async fn upsert_profile(
    state: web::Data<AppState>,
    req: web::Json<Profile>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    let profile = req.into_inner();
    let id = profile.id;
    match state.discovery.upsert_profile(profile).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "id": id, "updated": true })),
        Err(e) => discovery_error(e),
    }
}

/// Like endpoint
///
/// POST /api/v1/likes
///
/// Request body:
/// ```json
/// { "userId": 1, "profileId": 2 }
/// ```
async fn like_profile(
    state: web::Data<AppState>,
    req: web::Json<LikeRequest>,
) -> impl Responder {
    match state.likes.try_like(req.user_id, req.profile_id).await {
        Ok(like) => HttpResponse::Ok().json(LikeResponse {
            success: true,
            like_id: like.id.to_string(),
            profile_id: like.profile_id,
        }),
        Err(e @ LikeError::RateLimited { .. }) => error_response(429, "Rate limited", e.to_string()),
        Err(e @ LikeError::SelfLike) => error_response(400, "Invalid like", e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct FeatureLookup {
    #[serde(default)]
    tier: SubscriptionTier,
}

/// Feature gate endpoint
///
/// GET /api/v1/features/{feature}?tier=PREMIUM
async fn feature_available(
    path: web::Path<String>,
    query: web::Query<FeatureLookup>,
) -> impl Responder {
    let feature = path.into_inner();
    let available = is_feature_available(&feature, query.tier);

    HttpResponse::Ok().json(FeatureResponse {
        feature,
        tier: query.tier,
        available,
    })
}
