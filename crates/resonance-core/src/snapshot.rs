use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{COLLABORATE_THRESHOLD, GATE_MAX, GATE_MIN};
use crate::error::{Result, ScoreError};
use crate::field::{FieldMap, FieldName, random_fields, validate_fields};
use crate::scorer::{CompatibilityResult, GatePolicy, Weights, score_with_synergy};
use crate::vector::ConsciousnessVector;

/// One entity's immutable scoring input: CI vector, field states and an
/// optional dominant gate.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    id: String,
    vector: ConsciousnessVector,
    fields: FieldMap,
    dominant_gate: Option<u8>,
    profile: Option<String>,
}

impl Snapshot {
    /// Field ranges are checked here. Completeness is not: a partial map
    /// surfaces as `MissingField` when it is compared.
    pub fn new(id: impl Into<String>, vector: ConsciousnessVector, fields: FieldMap) -> Result<Self> {
        validate_fields(&fields)?;
        Ok(Self {
            id: id.into(),
            vector,
            fields,
            dominant_gate: None,
            profile: None,
        })
    }

    pub fn with_gate(mut self, gate: i64) -> Result<Self> {
        if !(GATE_MIN..=GATE_MAX).contains(&gate) {
            return Err(ScoreError::OutOfRange(gate));
        }
        self.dominant_gate = Some(gate as u8);
        Ok(self)
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Random but valid snapshot with a complete field map and a gate.
    pub fn random(id: impl Into<String>, rng: &mut impl Rng) -> Self {
        Self {
            id: id.into(),
            vector: ConsciousnessVector::random(rng),
            fields: random_fields(rng),
            dominant_gate: Some(rng.random_range(GATE_MIN as u8..=GATE_MAX as u8)),
            profile: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vector(&self) -> &ConsciousnessVector {
        &self.vector
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn dominant_gate(&self) -> Option<u8> {
        self.dominant_gate
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}

/// Scoring parameters supplied by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub weights: Weights,
    pub gate: GatePolicy,
}

/// Coarse follow-up suggestion carried over from the matching API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Collaborate,
    Observe,
}

impl Interaction {
    pub fn for_overall(overall: f64) -> Self {
        if overall > COLLABORATE_THRESHOLD {
            Interaction::Collaborate
        } else {
            Interaction::Observe
        }
    }
}

/// Full comparison of two snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub left_id: String,
    pub right_id: String,
    #[serde(flatten)]
    pub result: CompatibilityResult,
    pub field_synergy: BTreeMap<FieldName, f64>,
    /// 0 unless both snapshots carry a gate and the gates resonate.
    pub gate_bonus: f64,
    pub gate_resonance: bool,
    pub interaction: Interaction,
}

/// Score `a` against `b` and assemble the breakdown.
pub fn compare(a: &Snapshot, b: &Snapshot, policy: &ScoringPolicy) -> Result<MatchReport> {
    let (result, field_synergy) = score_with_synergy(
        a.vector.as_slice(),
        b.vector.as_slice(),
        &a.fields,
        &b.fields,
        policy.weights,
    )?;

    let gate_resonance = match (a.dominant_gate, b.dominant_gate) {
        (Some(ga), Some(gb)) => policy.gate.resonates(i64::from(ga), i64::from(gb))?,
        _ => false,
    };
    let gate_bonus = if gate_resonance { policy.gate.bonus } else { 0.0 };

    Ok(MatchReport {
        left_id: a.id.clone(),
        right_id: b.id.clone(),
        result,
        field_synergy,
        gate_bonus,
        gate_resonance,
        interaction: Interaction::for_overall(result.overall),
    })
}
