//! Template presets: canned briefs and production setups for common jobs.
//!
//! A preset is a partial record. Applying it overwrites only the fields it
//! names; everything else in the draft keeps its current value.

pub mod preset;

pub use preset::{BriefPreset, ProductionPreset, Template, TemplateKind, load_template};
