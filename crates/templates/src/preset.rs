use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use lapis_core::{DomainError, DomainResult};
use lapis_pricing::{
    DistributionChannel, FootageVolume, PropsDesign, QuoteDraft, SpecialRequirement, VideoFormat,
};

/// Named presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Commercial,
    Social,
    Documentary,
    Event,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Commercial,
        TemplateKind::Social,
        TemplateKind::Documentary,
        TemplateKind::Event,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Commercial => "commercial",
            TemplateKind::Social => "social",
            TemplateKind::Documentary => "documentary",
            TemplateKind::Event => "event",
        }
    }
}

impl core::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TemplateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown template type: {s}")))
    }
}

/// Brief fields a preset may set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BriefPreset {
    pub video_length: Option<f64>,
    pub deliverables: Option<u32>,
    pub distribution: Option<BTreeSet<DistributionChannel>>,
    pub format: Option<VideoFormat>,
    pub special_requirements: Option<BTreeSet<SpecialRequirement>>,
    pub concept: Option<String>,
}

/// Production fields a preset may set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionPreset {
    pub shooting_days: Option<f64>,
    pub crew_size: Option<u32>,
    pub location: Option<String>,
    pub talent_count: Option<u32>,
    pub agency_markup: Option<bool>,
    pub props_design: Option<PropsDesign>,
    pub footage_volume: Option<FootageVolume>,
    pub contingency: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub kind: TemplateKind,
    #[serde(rename = "questionnaire")]
    pub brief: BriefPreset,
    pub production_vars: ProductionPreset,
}

fn overwrite<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

impl Template {
    /// Merge this preset into `draft` by field overwrite.
    pub fn apply_to(&self, draft: &mut QuoteDraft) {
        let brief = &mut draft.brief;
        overwrite(&mut brief.video_length, &self.brief.video_length);
        overwrite(&mut brief.deliverables, &self.brief.deliverables);
        overwrite(&mut brief.distribution, &self.brief.distribution);
        if self.brief.format.is_some() {
            brief.format = self.brief.format;
        }
        overwrite(&mut brief.special_requirements, &self.brief.special_requirements);
        overwrite(&mut brief.concept, &self.brief.concept);

        let vars = &mut draft.production_vars;
        let preset = &self.production_vars;
        overwrite(&mut vars.shooting_days, &preset.shooting_days);
        overwrite(&mut vars.crew_size, &preset.crew_size);
        overwrite(&mut vars.location, &preset.location);
        overwrite(&mut vars.talent_count, &preset.talent_count);
        overwrite(&mut vars.agency_markup, &preset.agency_markup);
        overwrite(&mut vars.props_design, &preset.props_design);
        overwrite(&mut vars.footage_volume, &preset.footage_volume);
        overwrite(&mut vars.contingency, &preset.contingency);
    }

    pub fn for_kind(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Commercial => commercial(),
            TemplateKind::Social => social(),
            TemplateKind::Documentary => documentary(),
            TemplateKind::Event => event(),
        }
    }
}

/// Look up a preset by name (`commercial`, `social`, `documentary`, `event`).
pub fn load_template(name: &str) -> DomainResult<Template> {
    let kind: TemplateKind = name.parse()?;
    Ok(Template::for_kind(kind))
}

fn set<T: Ord + Copy>(items: &[T]) -> Option<BTreeSet<T>> {
    Some(items.iter().copied().collect())
}

fn commercial() -> Template {
    use DistributionChannel::*;
    Template {
        kind: TemplateKind::Commercial,
        brief: BriefPreset {
            video_length: Some(1.0),
            deliverables: Some(2),
            distribution: set(&[Instagram, YouTube, Website]),
            format: Some(VideoFormat::Commercial),
            special_requirements: set(&[SpecialRequirement::MotionGraphics]),
            concept: Some("Brand commercial highlighting key product features".to_string()),
        },
        production_vars: ProductionPreset {
            shooting_days: Some(1.0),
            crew_size: Some(6),
            location: Some("Studio (1.5 M)".to_string()),
            talent_count: Some(2),
            agency_markup: Some(true),
            props_design: Some(PropsDesign::Custom),
            footage_volume: Some(FootageVolume::Standard),
            contingency: Some(10),
        },
    }
}

fn social() -> Template {
    use DistributionChannel::*;
    Template {
        kind: TemplateKind::Social,
        brief: BriefPreset {
            video_length: Some(0.5),
            deliverables: Some(3),
            distribution: set(&[Instagram, TikTok]),
            format: Some(VideoFormat::SocialMedia),
            special_requirements: set(&[]),
            concept: Some("Short social media snippets for product launch".to_string()),
        },
        production_vars: ProductionPreset {
            shooting_days: Some(0.5),
            crew_size: Some(3),
            location: Some("none".to_string()),
            talent_count: Some(1),
            agency_markup: Some(false),
            props_design: Some(PropsDesign::Basic),
            footage_volume: Some(FootageVolume::Low),
            contingency: Some(5),
        },
    }
}

fn documentary() -> Template {
    use DistributionChannel::*;
    Template {
        kind: TemplateKind::Documentary,
        brief: BriefPreset {
            video_length: Some(10.0),
            deliverables: Some(1),
            distribution: set(&[YouTube, Website]),
            format: Some(VideoFormat::Documentary),
            special_requirements: set(&[SpecialRequirement::AerialShots]),
            concept: Some("Documentary style brand story covering company history".to_string()),
        },
        production_vars: ProductionPreset {
            shooting_days: Some(2.0),
            crew_size: Some(5),
            location: Some("Styled Home (6 M)".to_string()),
            talent_count: Some(4),
            agency_markup: Some(false),
            props_design: Some(PropsDesign::Elaborate),
            footage_volume: Some(FootageVolume::High),
            contingency: Some(15),
        },
    }
}

fn event() -> Template {
    use DistributionChannel::*;
    Template {
        kind: TemplateKind::Event,
        brief: BriefPreset {
            video_length: Some(3.0),
            deliverables: Some(2),
            distribution: set(&[LinkedIn, Website, YouTube]),
            format: Some(VideoFormat::EventCoverage),
            special_requirements: set(&[]),
            concept: Some("Corporate event highlight reel".to_string()),
        },
        production_vars: ProductionPreset {
            shooting_days: Some(1.0),
            crew_size: Some(4),
            location: Some("none".to_string()),
            talent_count: Some(0),
            agency_markup: Some(false),
            props_design: Some(PropsDesign::Basic),
            footage_volume: Some(FootageVolume::High),
            contingency: Some(10),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lapis_pricing::{QuoteTotals, RateCatalog, calculate_quote};
    use proptest::prelude::*;

    #[test]
    fn unknown_template_is_rejected() {
        let err = load_template("wedding").unwrap_err();
        assert_eq!(err, DomainError::validation("unknown template type: wedding"));
    }

    #[test]
    fn failed_load_leaves_draft_untouched() {
        let mut draft = QuoteDraft::default();
        draft.brief.concept = "keep me".to_string();
        let before = draft.clone();

        if let Ok(template) = load_template("Commercial ") {
            template.apply_to(&mut draft);
        }
        assert_eq!(draft, before);
    }

    #[test]
    fn every_preset_is_valid_against_default_catalog() {
        let catalog = RateCatalog::default();
        for kind in TemplateKind::ALL {
            let mut draft = QuoteDraft::default();
            load_template(kind.as_str()).unwrap().apply_to(&mut draft);
            draft.validate().unwrap();
            draft.production_vars.check_against(&catalog).unwrap();
        }
    }

    #[test]
    fn preset_totals_match_reference_values() {
        let catalog = RateCatalog::default();
        let expected = [
            (TemplateKind::Commercial, 32_970_500, 53_345_000, 48_336_680),
            (TemplateKind::Social, 15_403_500, 25_819_500, 23_084_880),
            (TemplateKind::Documentary, 98_000_000, 156_408_000, 142_468_480),
            (TemplateKind::Event, 33_393_500, 54_614_000, 49_284_200),
        ];

        for (kind, low, high, recommended) in expected {
            let mut draft = QuoteDraft::default();
            Template::for_kind(kind).apply_to(&mut draft);
            let totals =
                calculate_quote(&draft.brief, &draft.production_vars, &catalog).unwrap();
            assert_eq!(totals, QuoteTotals { low, high, recommended }, "{kind}");
        }
    }

    #[test]
    fn apply_overwrites_only_named_fields() {
        let mut draft = QuoteDraft::default();
        draft.brief.shoot_date = NaiveDate::from_ymd_opt(2026, 11, 2);
        draft.brief.budget_max = Some(90_000_000);

        let template = Template {
            kind: TemplateKind::Social,
            brief: BriefPreset {
                deliverables: Some(7),
                ..BriefPreset::default()
            },
            production_vars: ProductionPreset {
                agency_markup: Some(true),
                ..ProductionPreset::default()
            },
        };
        template.apply_to(&mut draft);

        assert_eq!(draft.brief.deliverables, 7);
        assert!(draft.production_vars.agency_markup);
        assert_eq!(draft.brief.video_length, 2.0);
        assert_eq!(draft.brief.shoot_date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(draft.brief.budget_max, Some(90_000_000));
        assert_eq!(draft.production_vars.crew_size, 5);
    }

    proptest! {
        /// Property: presets never touch dates, budgets or anything they do not name.
        #[test]
        fn presets_preserve_unmanaged_fields(
            kind_idx in 0usize..4,
            budget_min in proptest::option::of(0u64..1_000_000_000),
            day in 1u32..28,
        ) {
            let mut draft = QuoteDraft::default();
            draft.brief.budget_min = budget_min;
            draft.brief.delivery_date = NaiveDate::from_ymd_opt(2027, 1, day);

            Template::for_kind(TemplateKind::ALL[kind_idx]).apply_to(&mut draft);

            prop_assert_eq!(draft.brief.budget_min, budget_min);
            prop_assert_eq!(draft.brief.delivery_date, NaiveDate::from_ymd_opt(2027, 1, day));
        }
    }
}
