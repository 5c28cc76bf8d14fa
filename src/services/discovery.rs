use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use crate::core::Matcher;
use crate::models::{MatchResult, Profile, ProfileId, ProfileQuery, RankedMatch, SubscriptionTier};
use crate::services::cache::{CacheKey, CacheManager};
use crate::services::store::{ProfileStore, StoreError};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Profile {0} not found")]
    NotFound(ProfileId),

    #[error("Profile store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for DiscoveryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => DiscoveryError::NotFound(id),
            other => DiscoveryError::Store(other),
        }
    }
}

/// Result of a discovery request
#[derive(Debug, Clone)]
pub struct Discovery {
    pub matches: Vec<RankedMatch>,
    /// Eligible candidates before the limit was applied
    pub total_candidates: usize,
}

/// Wires the profile store, cache and matcher together
///
/// All collaborators are injected; nothing here is global. `generation` is
/// bumped on every profile write; a cache fill that straddles a write is
/// dropped again.
#[derive(Clone)]
pub struct DiscoveryService {
    store: Arc<dyn ProfileStore>,
    cache: CacheManager,
    matcher: Matcher,
    generation: Arc<AtomicU64>,
}

impl DiscoveryService {
    pub fn new(store: Arc<dyn ProfileStore>, cache: CacheManager, matcher: Matcher) -> Self {
        Self {
            store,
            cache,
            matcher,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cache a value read at generation `seen`
    ///
    /// Must be called after the store read. If a write landed in between, its
    /// invalidation may already have run, so the fresh entry is removed again.
    async fn fill_cache<T: Serialize>(&self, key: &str, value: &T, seen: u64) {
        if let Err(e) = self.cache.set(key, value).await {
            tracing::warn!("Failed to cache {}: {}", key, e);
            return;
        }
        if self.generation() != seen {
            tracing::debug!("Dropping cache fill for {} after a concurrent write", key);
            self.cache.delete(key).await;
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Cached profile lookup, without contact redaction
    async fn load_profile(&self, id: ProfileId) -> Result<Profile, DiscoveryError> {
        let key = CacheKey::profile(id);
        if let Ok(profile) = self.cache.get::<Profile>(&key).await {
            return Ok(profile);
        }

        let seen = self.generation();
        let profile = self.store.get_by_id(id)?;
        self.fill_cache(&key, &profile, seen).await;
        Ok(profile)
    }

    /// Profile as shown to a viewer of the given tier
    pub async fn profile(
        &self,
        viewer_tier: SubscriptionTier,
        id: ProfileId,
    ) -> Result<Profile, DiscoveryError> {
        let mut profile = self.load_profile(id).await?;
        redact_contact(&mut profile, viewer_tier);
        Ok(profile)
    }

    /// Compatibility of one candidate for one viewer
    pub async fn compatibility(
        &self,
        viewer_id: ProfileId,
        candidate_id: ProfileId,
    ) -> Result<MatchResult, DiscoveryError> {
        let key = CacheKey::compatibility(viewer_id, candidate_id);
        if let Ok(result) = self.cache.get::<MatchResult>(&key).await {
            return Ok(result);
        }

        let seen = self.generation();
        let viewer = self.load_profile(viewer_id).await?;
        let candidate = self.load_profile(candidate_id).await?;
        let result = self.matcher.score(&viewer, &candidate);

        self.fill_cache(&key, &result, seen).await;
        Ok(result)
    }

    /// Rank store candidates for a viewer
    ///
    /// The store applies `query`; the matcher then excludes the viewer,
    /// applies the gender preference (ANY when absent), scores and sorts.
    pub async fn discover(
        &self,
        viewer_id: ProfileId,
        query: &ProfileQuery,
        limit: usize,
    ) -> Result<Discovery, DiscoveryError> {
        let viewer = self.load_profile(viewer_id).await?;
        let candidates = self.store.query(query)?;

        let gender_preference = query.gender_preference.unwrap_or_default();
        let mut matches = self.matcher.rank(&viewer, candidates, gender_preference);
        let total_candidates = matches.len();
        matches.truncate(limit);

        for m in &mut matches {
            redact_contact(&mut m.profile, viewer.subscription_tier);
        }

        tracing::info!(
            "Returning {} matches for viewer {} (from {} candidates)",
            matches.len(),
            viewer_id,
            total_candidates
        );

        Ok(Discovery { matches, total_candidates })
    }

    /// Write a profile through to the store and drop stale cache entries
    pub async fn upsert_profile(&self, profile: Profile) -> Result<(), DiscoveryError> {
        let id = profile.id;
        self.store.upsert(profile)?;
        self.generation.fetch_add(1, Ordering::SeqCst);

        self.cache.delete(&CacheKey::profile(id)).await;
        // any pair involving this profile may have changed
        self.cache.invalidate_all();

        tracing::info!("Profile {} updated", id);
        Ok(())
    }
}

fn redact_contact(profile: &mut Profile, viewer_tier: SubscriptionTier) {
    if !viewer_tier.sees_contact_info() {
        profile.contact_info = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactInfo, Gender, GenderPreference};
    use crate::services::store::InMemoryProfileStore;

    fn create_service() -> DiscoveryService {
        let mut vip = Profile::new(1, Gender::Man, &["Music", "Cinema"], &["shows", "cinemas"], 0.0);
        vip.subscription_tier = SubscriptionTier::Vip;

        let mut ana = Profile::new(2, Gender::Woman, &["Music"], &["shows"], 5.0);
        ana.contact_info = Some(ContactInfo { whatsapp: Some("+55 11 90000-0000".into()) });

        let store = InMemoryProfileStore::new(vec![
            vip,
            ana,
            Profile::new(3, Gender::Woman, &["Cinema"], &["parks"], 2.0),
            Profile::new(4, Gender::Man, &["Music", "Cinema"], &["shows", "cinemas"], 8.0),
            Profile::new(5, Gender::Woman, &["Sports"], &["gyms"], 1.0),
        ])
        .unwrap();

        DiscoveryService::new(Arc::new(store), CacheManager::new(100, 300), Matcher::default())
    }

    #[tokio::test]
    async fn test_discover_filters_and_ranks() {
        let service = create_service();
        let query = ProfileQuery {
            gender_preference: Some(GenderPreference::Woman),
            ..Default::default()
        };

        let result = service.discover(1, &query, 10).await.unwrap();
        let ids: Vec<u64> = result.matches.iter().map(|m| m.profile.id).collect();
        assert_eq!(result.total_candidates, 3);
        assert_eq!(ids, vec![2, 3, 5]);
    }

    #[tokio::test]
    async fn test_discover_respects_limit() {
        let service = create_service();
        let result = service.discover(1, &ProfileQuery::default(), 2).await.unwrap();
        assert_eq!(result.matches.len(), 2);
        // the store returns all five, the viewer is not a candidate
        assert_eq!(result.total_candidates, 4);
    }

    #[tokio::test]
    async fn test_contact_info_is_vip_only() {
        let service = create_service();

        let profile = service.profile(SubscriptionTier::Vip, 2).await.unwrap();
        assert!(profile.contact_info.is_some());

        let profile = service.profile(SubscriptionTier::Premium, 2).await.unwrap();
        assert!(profile.contact_info.is_none());

        // cached copy keeps the contact for later VIP lookups
        let profile = service.profile(SubscriptionTier::Vip, 2).await.unwrap();
        assert!(profile.contact_info.is_some());
    }

    #[tokio::test]
    async fn test_unknown_viewer_is_not_found() {
        let service = create_service();
        let result = service.discover(42, &ProfileQuery::default(), 10).await;
        assert!(matches!(result, Err(DiscoveryError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_upsert_invalidates_cached_results() {
        let service = create_service();

        let before = service.compatibility(1, 3).await.unwrap();
        assert_eq!(before.common_interests, vec!["Cinema"]);

        let mut updated = Profile::new(3, Gender::Woman, &["Music"], &["shows"], 2.0);
        updated.name = "Bia".into();
        service.upsert_profile(updated).await.unwrap();

        let after = service.compatibility(1, 3).await.unwrap();
        assert_eq!(after.common_interests, vec!["Music"]);
        assert_eq!(service.profile(SubscriptionTier::Free, 3).await.unwrap().name, "Bia");
    }

    #[tokio::test]
    async fn test_fill_racing_an_upsert_is_not_kept() {
        let service = create_service();

        // a lookup reads the old profile, then a write lands before it caches
        let seen = service.generation();
        let stale = service.store.get_by_id(3).unwrap();

        let mut updated = stale.clone();
        updated.name = "Bia".into();
        service.upsert_profile(updated).await.unwrap();

        service.fill_cache(&CacheKey::profile(3), &stale, seen).await;

        assert!(service.cache.get::<Profile>(&CacheKey::profile(3)).await.is_err());
        assert_eq!(service.profile(SubscriptionTier::Free, 3).await.unwrap().name, "Bia");
    }

    #[tokio::test]
    async fn test_fill_without_writes_is_kept() {
        let service = create_service();
        service.profile(SubscriptionTier::Free, 3).await.unwrap();
        assert!(service.cache.get::<Profile>(&CacheKey::profile(3)).await.is_ok());
    }
}
