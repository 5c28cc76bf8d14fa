//! HTTP surface of the matching service
//!
//! Everything lives under `/api/v1`. The health probe is also mounted at the
//! root so load balancers don't need the version prefix.

pub mod matches;

use actix_web::web;

pub const API_PREFIX: &str = "/api/v1";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(matches::health_check))
        .service(web::scope(API_PREFIX).configure(matches::configure));
}
