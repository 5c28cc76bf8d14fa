use std::cmp::Ordering;
use std::sync::Arc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::{GenderPreference, MatchResult, Profile, RankedMatch};
use crate::core::{
    filters::is_eligible,
    scoring::calculate_compatibility,
    weights::ScoringTables,
};

#[derive(Debug, Error, PartialEq)]
pub enum RankingSettingsError {
    #[error("significance_threshold must be finite and positive, got {0}")]
    InvalidThreshold(f64),

    #[error("km_per_point must be finite and positive, got {0}")]
    InvalidKmPerPoint(f64),
}

/// Ordering parameters for ranked results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RankingSettingsConfig", into = "RankingSettingsConfig")]
pub struct RankingSettings {
    significance_threshold: f64,
    km_per_point: f64,
}

/// Unvalidated form of [`RankingSettings`] as read from configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingSettingsConfig {
    /// Score gap (points) above which the higher score always ranks first
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,
    /// Kilometres of distance worth one score point within the threshold
    #[serde(default = "default_km_per_point")]
    pub km_per_point: f64,
}

fn default_significance_threshold() -> f64 { 10.0 }
fn default_km_per_point() -> f64 { 5.0 }

impl TryFrom<RankingSettingsConfig> for RankingSettings {
    type Error = RankingSettingsError;

    fn try_from(value: RankingSettingsConfig) -> Result<Self, Self::Error> {
        RankingSettings::new(value.significance_threshold, value.km_per_point)
    }
}

impl From<RankingSettings> for RankingSettingsConfig {
    fn from(value: RankingSettings) -> Self {
        Self {
            significance_threshold: value.significance_threshold,
            km_per_point: value.km_per_point,
        }
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            significance_threshold: default_significance_threshold(),
            km_per_point: default_km_per_point(),
        }
    }
}

impl RankingSettings {
    /// Both values must be finite and positive
    pub fn new(significance_threshold: f64, km_per_point: f64) -> Result<Self, RankingSettingsError> {
        if !significance_threshold.is_finite() || significance_threshold <= 0.0 {
            return Err(RankingSettingsError::InvalidThreshold(significance_threshold));
        }
        if !km_per_point.is_finite() || km_per_point <= 0.0 {
            return Err(RankingSettingsError::InvalidKmPerPoint(km_per_point));
        }

        Ok(Self { significance_threshold, km_per_point })
    }

    pub fn significance_threshold(&self) -> f64 {
        self.significance_threshold
    }

    pub fn km_per_point(&self) -> f64 {
        self.km_per_point
    }

    /// Distance penalty in score points, capped at the significance threshold
    #[inline]
    fn distance_penalty(&self, distance_km: f64) -> f64 {
        let cap_km = self.significance_threshold * self.km_per_point;
        distance_km.max(0.0).min(cap_km) / self.km_per_point
    }

    /// Sort key, higher ranks first
    ///
    /// Because the penalty never exceeds the threshold, two scores further
    /// apart than the threshold keep their score order whatever the
    /// distances; closer scores let distance decide.
    #[inline]
    pub fn ranking_key(&self, score: u8, distance_km: f64) -> f64 {
        f64::from(score) - self.distance_penalty(distance_km)
    }

    /// Total order over ranked matches: key descending, then distance ascending
    pub fn compare(&self, a: &RankedMatch, b: &RankedMatch) -> Ordering {
        let key_a = self.ranking_key(a.compatibility.score, a.profile.distance_km);
        let key_b = self.ranking_key(b.compatibility.score, b.profile.distance_km);

        key_b
            .total_cmp(&key_a)
            .then_with(|| a.profile.distance_km.total_cmp(&b.profile.distance_km))
    }
}

/// Compatibility engine: scores pairs and ranks candidate lists
///
/// # Pipeline Stages
/// 1. Self exclusion and gender hard filter
/// 2. Weighted scoring of every survivor (parallel)
/// 3. Stable sort by score, distance deciding within the threshold
#[derive(Debug, Clone)]
pub struct Matcher {
    tables: Arc<ScoringTables>,
    ranking: RankingSettings,
}

impl Matcher {
    pub fn new(tables: ScoringTables, ranking: RankingSettings) -> Self {
        Self {
            tables: Arc::new(tables),
            ranking,
        }
    }

    pub fn with_default_tables() -> Self {
        Self::new(ScoringTables::default(), RankingSettings::default())
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    pub fn ranking(&self) -> RankingSettings {
        self.ranking
    }

    /// Compatibility of a candidate as seen by the viewer
    pub fn score(&self, viewer: &Profile, candidate: &Profile) -> MatchResult {
        calculate_compatibility(
            &viewer.interests,
            &viewer.location_preferences,
            &candidate.interests,
            &candidate.location_preferences,
            &self.tables,
        )
    }

    /// Rank candidates for a viewer
    ///
    /// # Arguments
    /// * `viewer` - The profile doing the browsing
    /// * `candidates` - Snapshot of candidate profiles
    /// * `gender_preference` - Hard filter applied before scoring
    ///
    /// # Returns
    /// Eligible candidates with their compatibility, best first
    pub fn rank(
        &self,
        viewer: &Profile,
        candidates: Vec<Profile>,
        gender_preference: GenderPreference,
    ) -> Vec<RankedMatch> {
        let total_candidates = candidates.len();

        let mut ranked: Vec<RankedMatch> = candidates
            .into_par_iter()
            .filter(|candidate| is_eligible(viewer, candidate, gender_preference))
            .map(|profile| {
                let compatibility = self.score(viewer, &profile);
                RankedMatch { profile, compatibility }
            })
            .collect();

        let ranking = self.ranking;
        ranked.sort_by(|a, b| ranking.compare(a, b));

        tracing::debug!(
            "Ranked {} of {} candidates for viewer {}",
            ranked.len(),
            total_candidates,
            viewer.id
        );

        ranked
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_tables()
    }
}
