use std::str::FromStr;
use thiserror::Error;
use crate::models::SubscriptionTier;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Unknown feature: {0}")]
    Unknown(String),
}

/// Features gated by subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Basic,
    Advanced,
    /// Direct contact through WhatsApp
    Whatsapp,
}

impl FromStr for Feature {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Feature::Basic),
            "advanced" => Ok(Feature::Advanced),
            "whatsapp" => Ok(Feature::Whatsapp),
            _ => Err(FeatureError::Unknown(s.to_string())),
        }
    }
}

const FREE_FEATURES: &[Feature] = &[Feature::Basic];
const PREMIUM_FEATURES: &[Feature] = &[Feature::Basic, Feature::Advanced];
const VIP_FEATURES: &[Feature] = &[Feature::Basic, Feature::Advanced, Feature::Whatsapp];

impl SubscriptionTier {
    pub fn features(self) -> &'static [Feature] {
        match self {
            SubscriptionTier::Free => FREE_FEATURES,
            SubscriptionTier::Premium => PREMIUM_FEATURES,
            SubscriptionTier::Vip => VIP_FEATURES,
        }
    }

    pub fn has(self, feature: Feature) -> bool {
        self.features().contains(&feature)
    }

    /// Whether profiles shown to this tier may keep their contact details
    pub fn sees_contact_info(self) -> bool {
        self.has(Feature::Whatsapp)
    }
}

/// Check a feature by name; unknown names are never available
pub fn is_feature_available(feature: &str, tier: SubscriptionTier) -> bool {
    feature
        .parse::<Feature>()
        .map(|f| tier.has(f))
        .unwrap_or(false)
}
