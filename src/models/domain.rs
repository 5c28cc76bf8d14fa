use serde::{Deserialize, Serialize};
use validator::Validate;

pub type ProfileId = u64;

/// Gender as stored on a profile
///
/// Unrecognised values deserialize to `Other`, which never satisfies a
/// `MAN`/`WOMAN` preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Man,
    Woman,
    NonBinary,
    #[serde(other)]
    Other,
}

/// Who the viewer wants to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenderPreference {
    Man,
    Woman,
    #[default]
    Any,
}

impl GenderPreference {
    /// Hard filter applied before any scoring
    #[inline]
    pub fn accepts(self, gender: Gender) -> bool {
        match self {
            GenderPreference::Man => gender == Gender::Man,
            GenderPreference::Woman => gender == Gender::Woman,
            GenderPreference::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
    Vip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub whatsapp: Option<String>,
}

/// Profile snapshot handed to the engine
///
/// `interests` and `locationPreferences` are required on the wire: a payload
/// missing either fails to deserialize instead of being read as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub gender: Gender,
    pub interests: Vec<String>,
    #[serde(alias = "locations")]
    pub location_preferences: Vec<String>,
    #[validate(range(min = 0.0))]
    pub distance_km: f64,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub compatibility: Option<u8>,
    #[serde(default)]
    pub subscription_tier: SubscriptionTier,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

impl Profile {
    /// Minimal profile carrying only the fields the engine reads
    pub fn new(
        id: ProfileId,
        gender: Gender,
        interests: &[&str],
        location_preferences: &[&str],
        distance_km: f64,
    ) -> Self {
        Self {
            id,
            gender,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            location_preferences: location_preferences.iter().map(|s| s.to_string()).collect(),
            distance_km,
            compatibility: None,
            subscription_tier: SubscriptionTier::Free,
            name: format!("User {}", id),
            age: None,
            city: String::new(),
            bio: String::new(),
            photos: vec![],
            is_premium: false,
            contact_info: None,
        }
    }
}

/// Compatibility between a viewer and one candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub score: u8,
    pub common_interests: Vec<String>,
    pub common_location_preferences: Vec<String>,
    pub cross_matches: Vec<String>,
}

/// A candidate together with its compatibility against the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub profile: Profile,
    pub compatibility: MatchResult,
}

/// Filter the profile store applies before candidates reach the ranker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuery {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub search_term: Option<String>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub max_distance_km: Option<f64>,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub min_compatibility: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub gender_preference: Option<GenderPreference>,
    #[serde(default)]
    pub interests: Vec<String>,
}
