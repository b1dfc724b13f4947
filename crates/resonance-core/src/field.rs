use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoreError};
use crate::phase::Phase;

/// The nine named consciousness fields, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldName {
    Mind,
    Heart,
    Body,
    Will,
    Shadow,
    Child,
    Soul,
    Spirit,
    Synthesis,
}

impl FieldName {
    pub const ALL: [FieldName; 9] = [
        FieldName::Mind,
        FieldName::Heart,
        FieldName::Body,
        FieldName::Will,
        FieldName::Shadow,
        FieldName::Child,
        FieldName::Soul,
        FieldName::Spirit,
        FieldName::Synthesis,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Mind => "Mind",
            FieldName::Heart => "Heart",
            FieldName::Body => "Body",
            FieldName::Will => "Will",
            FieldName::Shadow => "Shadow",
            FieldName::Child => "Child",
            FieldName::Soul => "Soul",
            FieldName::Spirit => "Spirit",
            FieldName::Synthesis => "Synthesis",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| format!("unknown field name: {s}"))
    }
}

/// Qualitative waveform label. Informational only; never scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldPattern {
    Harmonic,
    Spiral,
    Crystalline,
    Ascending,
    Chaotic,
}

impl FieldPattern {
    const ALL: [FieldPattern; 5] = [
        FieldPattern::Harmonic,
        FieldPattern::Spiral,
        FieldPattern::Crystalline,
        FieldPattern::Ascending,
        FieldPattern::Chaotic,
    ];
}

/// Static snapshot of one field's oscillation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    /// Activation level, [0, 1].
    pub amplitude: f64,
    /// Base oscillation in Hz, > 0.
    pub frequency: f64,
    pub phase: Phase,
    /// Internal stability, [0, 1].
    pub coherence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entropy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FieldPattern>,
}

fn unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl FieldState {
    pub fn new(amplitude: f64, frequency: f64, phase: f64, coherence: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase: Phase::new(phase),
            coherence,
            entropy: None,
            pattern: None,
        }
    }

    /// Random in-range state.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            amplitude: rng.random_range(0.0..=1.0),
            frequency: rng.random_range(0.05..=5.0),
            phase: Phase::new(rng.random_range(0.0..TAU)),
            coherence: rng.random_range(0.0..=1.0),
            entropy: Some(rng.random_range(0.0..=1.0)),
            pattern: Some(FieldPattern::ALL[rng.random_range(0..FieldPattern::ALL.len())]),
        }
    }

    /// Check documented ranges. `field` names the offender in the error.
    pub fn validate(&self, field: FieldName) -> Result<()> {
        let invalid = |reason: String| -> Result<()> {
            Err(ScoreError::InvalidField { field, reason })
        };
        if !unit_interval(self.amplitude) {
            return invalid(format!("amplitude {} outside [0, 1]", self.amplitude));
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return invalid(format!("frequency {} must be positive", self.frequency));
        }
        if !self.phase.radians().is_finite() {
            return invalid("phase is not finite".to_string());
        }
        if !unit_interval(self.coherence) {
            return invalid(format!("coherence {} outside [0, 1]", self.coherence));
        }
        if let Some(entropy) = self.entropy
            && !unit_interval(entropy)
        {
            return invalid(format!("entropy {entropy} outside [0, 1]"));
        }
        Ok(())
    }
}

/// Per-entity field states keyed by name.
pub type FieldMap = BTreeMap<FieldName, FieldState>;

/// A full canonical map of random states.
pub fn random_fields(rng: &mut impl Rng) -> FieldMap {
    FieldName::ALL
        .into_iter()
        .map(|name| (name, FieldState::random(rng)))
        .collect()
}

/// Validate every state in a map.
pub fn validate_fields(fields: &FieldMap) -> Result<()> {
    fields
        .iter()
        .try_for_each(|(name, state)| state.validate(*name))
}

/// Mean internal coherence across fields. High coherence = stable system.
/// `None` for an empty map.
pub fn network_coherence(fields: &FieldMap) -> Option<f64> {
    if fields.is_empty() {
        return None;
    }
    let total: f64 = fields.values().map(|s| s.coherence).sum();
    Some(total / fields.len() as f64)
}
