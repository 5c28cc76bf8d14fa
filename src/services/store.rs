use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;
use validator::Validate;
use crate::core::filters::matches_profile_query;
use crate::models::{Profile, ProfileId, ProfileQuery};

/// Errors that can occur when reading or writing profiles
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Profile {0} not found")]
    NotFound(ProfileId),

    #[error("Invalid profile: {0}")]
    InvalidProfile(#[from] validator::ValidationErrors),

    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Profile store unavailable: {0}")]
    Unavailable(String),
}

/// Source of profile snapshots
///
/// The engine only ever reads through this trait; candidate search happens
/// here, not in the ranker.
pub trait ProfileStore: Send + Sync {
    fn get_by_id(&self, id: ProfileId) -> Result<Profile, StoreError>;

    fn query(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError>;

    /// Insert or replace a profile by id
    fn upsert(&self, profile: Profile) -> Result<(), StoreError>;
}

/// Profile store backed by an in-memory snapshot
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl InMemoryProfileStore {
    pub fn new(profiles: Vec<Profile>) -> Result<Self, StoreError> {
        for profile in &profiles {
            profile.validate()?;
        }
        Ok(Self {
            profiles: RwLock::new(profiles),
        })
    }

    /// Load profiles from a JSON array
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let profiles: Vec<Profile> = serde_json::from_str(json)?;
        Self::new(profiles)
    }

    /// Load profiles from a JSON seed file
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} profiles from {}",
            store.len(),
            path.as_ref().display()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.profiles.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("profile lock poisoned".to_string())
}

impl ProfileStore for InMemoryProfileStore {
    fn get_by_id(&self, id: ProfileId) -> Result<Profile, StoreError> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn query(&self, query: &ProfileQuery) -> Result<Vec<Profile>, StoreError> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        let matched: Vec<Profile> = profiles
            .iter()
            .filter(|p| matches_profile_query(p, query))
            .cloned()
            .collect();

        tracing::debug!("Store query matched {} of {} profiles", matched.len(), profiles.len());
        Ok(matched)
    }

    fn upsert(&self, profile: Profile) -> Result<(), StoreError> {
        profile.validate()?;
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, GenderPreference};

    fn create_store() -> InMemoryProfileStore {
        InMemoryProfileStore::new(vec![
            Profile::new(1, Gender::Woman, &["Music"], &["shows"], 5.0),
            Profile::new(2, Gender::Man, &["Cinema"], &["cinemas"], 12.0),
            Profile::new(3, Gender::Woman, &["Art"], &["museums"], 30.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_by_id() {
        let store = create_store();
        assert_eq!(store.get_by_id(2).unwrap().gender, Gender::Man);
        assert!(matches!(store.get_by_id(99), Err(StoreError::NotFound(99))));
    }

    #[test]
    fn test_query_keeps_seed_order() {
        let store = create_store();
        let query = ProfileQuery {
            gender_preference: Some(GenderPreference::Woman),
            ..Default::default()
        };
        let ids: Vec<u64> = store.query(&query).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_upsert_replaces_and_appends() {
        let store = create_store();

        let mut updated = store.get_by_id(1).unwrap();
        updated.interests = vec!["Dance".to_string()];
        store.upsert(updated).unwrap();
        assert_eq!(store.get_by_id(1).unwrap().interests, vec!["Dance"]);

        store.upsert(Profile::new(4, Gender::Other, &[], &[], 1.0)).unwrap();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let store = create_store();
        let result = store.upsert(Profile::new(5, Gender::Man, &[], &[], -2.0));
        assert!(matches!(result, Err(StoreError::InvalidProfile(_))));
    }

    #[test]
    fn test_from_json_requires_sets() {
        let json = r#"[{"id": 1, "gender": "WOMAN", "interests": ["Music"], "distanceKm": 2}]"#;
        assert!(matches!(InMemoryProfileStore::from_json(json), Err(StoreError::Parse(_))));
    }
}
