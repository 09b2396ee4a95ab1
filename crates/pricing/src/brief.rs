//! Client brief (questionnaire).
//!
//! Only `video_length`, `deliverables` and `special_requirements` feed the
//! price; every other field is carried for the quote document and exports.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lapis_core::{DomainError, DomainResult};

use crate::catalog::Money;
use crate::labels::labeled_enum;

labeled_enum! {
    /// Where the finished video will be published. Informational only.
    pub enum DistributionChannel {
        Instagram => "Instagram",
        TikTok => "TikTok",
        YouTube => "YouTube",
        LinkedIn => "LinkedIn",
        Website => "Website",
        TvBroadcast => "TV/Broadcast",
    }
}

labeled_enum! {
    /// Format / genre of the production. Informational only.
    pub enum VideoFormat {
        Commercial => "Commercial",
        Documentary => "Documentary",
        EventCoverage => "Event Coverage",
        SocialMedia => "Social Media",
        Corporate => "Corporate",
        Training => "Training",
    }
}

labeled_enum! {
    /// Special requirements; each one raises the complexity factor.
    pub enum SpecialRequirement {
        Sfx => "SFX",
        MotionGraphics => "Motion Graphics",
        GreenScreen => "Green Screen",
        AerialShots => "Aerial Shots",
        Underwater => "Underwater",
    }
}

impl SpecialRequirement {
    /// Additive contribution to the complexity factor.
    pub fn complexity_increment(self) -> f64 {
        match self {
            SpecialRequirement::MotionGraphics => 0.20,
            SpecialRequirement::GreenScreen => 0.15,
            SpecialRequirement::Sfx => 0.10,
            SpecialRequirement::AerialShots => 0.20,
            SpecialRequirement::Underwater => 0.0,
        }
    }
}

/// Client-supplied project requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brief {
    /// Finished video length in minutes.
    pub video_length: f64,
    pub deliverables: u32,
    #[serde(default)]
    pub distribution: BTreeSet<DistributionChannel>,
    #[serde(default)]
    pub format: Option<VideoFormat>,
    #[serde(default)]
    pub special_requirements: BTreeSet<SpecialRequirement>,
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub shoot_date: Option<NaiveDate>,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget_min: Option<Money>,
    #[serde(default)]
    pub budget_max: Option<Money>,
}

impl Default for Brief {
    fn default() -> Self {
        Self {
            video_length: 2.0,
            deliverables: 1,
            distribution: BTreeSet::new(),
            format: None,
            special_requirements: BTreeSet::new(),
            concept: String::new(),
            shoot_date: None,
            delivery_date: None,
            budget_min: None,
            budget_max: None,
        }
    }
}

impl Brief {
    /// Validate the fields the pricing formula relies on.
    pub fn validate(&self) -> DomainResult<()> {
        if !self.video_length.is_finite() || self.video_length <= 0.0 {
            return Err(DomainError::validation("video_length must be > 0 minutes"));
        }
        if self.deliverables < 1 {
            return Err(DomainError::validation("deliverables must be at least 1"));
        }
        if let (Some(min), Some(max)) = (self.budget_min, self.budget_max) {
            if min > max {
                return Err(DomainError::validation("budget_min cannot exceed budget_max"));
            }
        }
        Ok(())
    }
}
