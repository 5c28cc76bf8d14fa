use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use moka::ops::compute::{CompResult, Op};
use uuid::Uuid;
use crate::models::ProfileId;

#[derive(Debug, Error)]
pub enum LikeError {
    #[error("Please wait {retry_after_ms}ms before liking another profile")]
    RateLimited { retry_after_ms: u64 },

    #[error("A profile cannot like itself")]
    SelfLike,
}

/// A recorded like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub user_id: ProfileId,
    pub profile_id: ProfileId,
    pub liked_at: DateTime<Utc>,
}

/// Allows one like per user per interval
///
/// Keyed by the liking user only; the last accepted like time is kept for
/// one interval and then evicted.
#[derive(Clone)]
pub struct LikeLimiter {
    last_like: moka::future::Cache<ProfileId, DateTime<Utc>>,
    interval: Duration,
}

impl LikeLimiter {
    pub fn new(interval: Duration) -> Self {
        let last_like = moka::future::CacheBuilder::new(100_000)
            .time_to_live(interval)
            .build();

        Self { last_like, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn try_like(&self, user_id: ProfileId, profile_id: ProfileId) -> Result<Like, LikeError> {
        self.try_like_at(user_id, profile_id, Utc::now()).await
    }

    /// Record a like at `now`, or reject it if the user liked too recently
    pub async fn try_like_at(
        &self,
        user_id: ProfileId,
        profile_id: ProfileId,
        now: DateTime<Utc>,
    ) -> Result<Like, LikeError> {
        if user_id == profile_id {
            return Err(LikeError::SelfLike);
        }

        // check and record under the entry's lock so concurrent likes from one user serialize
        let interval = self.interval;
        let outcome = self
            .last_like
            .entry(user_id)
            .and_compute_with(|current| {
                let op = match current {
                    Some(entry) if elapsed_since(*entry.value(), now) < interval => Op::Nop,
                    _ => Op::Put(now),
                };
                std::future::ready(op)
            })
            .await;

        match outcome {
            CompResult::Inserted(_) | CompResult::ReplacedWith(_) => {}
            CompResult::Unchanged(entry) => {
                let retry_after_ms = interval.saturating_sub(elapsed_since(*entry.value(), now)).as_millis() as u64;
                tracing::warn!("User {} rate limited for {}ms", user_id, retry_after_ms);
                return Err(LikeError::RateLimited { retry_after_ms });
            }
            CompResult::StillNone(_) | CompResult::Removed(_) => {
                return Err(LikeError::RateLimited { retry_after_ms: interval.as_millis() as u64 });
            }
        }

        let like = Like {
            id: Uuid::new_v4(),
            user_id,
            profile_id,
            liked_at: now,
        };
        tracing::info!("User {} liked profile {}", user_id, profile_id);
        Ok(like)
    }
}

/// Time since `previous`, zero when `previous` lies in the future
fn elapsed_since(previous: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - previous).to_std().unwrap_or(Duration::ZERO)
}
