//! Resonance scoring: CI-vector similarity, field phase synchrony, the
//! weighted blend of the two, and the recommendation ladder.
//!
//! Every function here is pure. Inputs are borrowed and never mutated, so
//! any number of callers may score concurrently without coordination.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEEP_THRESHOLD, DEFAULT_CI_WEIGHT, DEFAULT_SYNC_WEIGHT, FIELD_COUNT, GATE_BONUS,
    GATE_MAX, GATE_MIN, GATE_PROXIMITY, MIRROR_THRESHOLD, NEUTRAL_THRESHOLD, POSITIVE_THRESHOLD,
};
use crate::error::{Result, ScoreError};
use crate::field::{FieldMap, FieldName};
use crate::vector::norm;

/// Categorical interaction recommendation, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    MirrorResonance,
    DeepCompatibility,
    PositiveResonance,
    Neutral,
    Incompatible,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Recommendation::MirrorResonance => "MirrorResonance",
            Recommendation::DeepCompatibility => "DeepCompatibility",
            Recommendation::PositiveResonance => "PositiveResonance",
            Recommendation::Neutral => "Neutral",
            Recommendation::Incompatible => "Incompatible",
        };
        f.pad(s)
    }
}

/// Blend weights for `overall_compatibility`. Not renormalized: callers
/// should supply weights summing to 1 to keep the blend in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub ci: f64,
    pub sync: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            ci: DEFAULT_CI_WEIGHT,
            sync: DEFAULT_SYNC_WEIGHT,
        }
    }
}

impl Weights {
    pub fn is_convex(&self) -> bool {
        self.ci >= 0.0 && self.sync >= 0.0 && (self.ci + self.sync - 1.0).abs() < 1e-9
    }
}

/// Gate tie-break parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatePolicy {
    pub bonus: f64,
    pub proximity: i64,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            bonus: GATE_BONUS,
            proximity: GATE_PROXIMITY,
        }
    }
}

impl GatePolicy {
    /// Whether the gates are closer than `proximity`. Independent of the
    /// configured bonus value.
    pub fn resonates(&self, gate_a: i64, gate_b: i64) -> Result<bool> {
        check_gate(gate_a)?;
        check_gate(gate_b)?;
        Ok((gate_a - gate_b).abs() < self.proximity)
    }

    /// Flat bonus when the gates resonate, else 0.
    pub fn bonus(&self, gate_a: i64, gate_b: i64) -> Result<f64> {
        Ok(if self.resonates(gate_a, gate_b)? {
            self.bonus
        } else {
            0.0
        })
    }
}

/// Derived, read-only result of one scoring call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub ci_similarity: f64,
    pub field_synchrony: f64,
    pub overall: f64,
    pub recommendation: Recommendation,
}

/// Cosine similarity mapped from [-1, 1] to [0, 1] via `(cos + 1) / 2`.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ScoreError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let (na, nb) = (norm(a), norm(b));
    if !na.is_finite() || !nb.is_finite() || na == 0.0 || nb == 0.0 {
        return Err(ScoreError::DegenerateVector);
    }
    // Each side is scaled to unit length before the product so the dot
    // cannot overflow or underflow for extreme magnitudes.
    let cos: f64 = a.iter().zip(b).map(|(x, y)| (x / na) * (y / nb)).sum();
    // Rounding can push |cos| a hair past 1 for near-parallel inputs
    let cos = cos.clamp(-1.0, 1.0);
    Ok((cos + 1.0) / 2.0)
}

/// Per-field phase synchrony for every canonical field.
///
/// Fails with `MissingField` for the first canonical field absent from
/// either map; a missing field is never scored as 0.
pub fn field_synergy(a: &FieldMap, b: &FieldMap) -> Result<BTreeMap<FieldName, f64>> {
    FieldName::ALL
        .into_iter()
        .map(|name| -> Result<(FieldName, f64)> {
            let fa = a.get(&name).ok_or(ScoreError::MissingField(name))?;
            let fb = b.get(&name).ok_or(ScoreError::MissingField(name))?;
            Ok((name, fa.phase.synchrony(fb.phase)))
        })
        .collect()
}

/// Unweighted mean phase synchrony across the nine fields. Phase only:
/// amplitude and coherence never exclude a field.
pub fn field_synchrony(a: &FieldMap, b: &FieldMap) -> Result<f64> {
    Ok(mean_synergy(&field_synergy(a, b)?))
}

fn mean_synergy(synergy: &BTreeMap<FieldName, f64>) -> f64 {
    synergy.values().sum::<f64>() / FIELD_COUNT as f64
}

/// `ci * weights.ci + sync * weights.sync`. No clamping.
pub fn overall_compatibility(ci_similarity: f64, synchrony: f64, weights: Weights) -> f64 {
    weights.ci * ci_similarity + weights.sync * synchrony
}

/// Threshold ladder, top-down, strict `>`. Values outside [0, 1] are out of
/// contract but still land in a bucket.
pub fn classify(overall: f64) -> Recommendation {
    if overall > MIRROR_THRESHOLD {
        Recommendation::MirrorResonance
    } else if overall > DEEP_THRESHOLD {
        Recommendation::DeepCompatibility
    } else if overall > POSITIVE_THRESHOLD {
        Recommendation::PositiveResonance
    } else if overall > NEUTRAL_THRESHOLD {
        Recommendation::Neutral
    } else {
        Recommendation::Incompatible
    }
}

fn check_gate(gate: i64) -> Result<()> {
    if (GATE_MIN..=GATE_MAX).contains(&gate) {
        Ok(())
    } else {
        Err(ScoreError::OutOfRange(gate))
    }
}

/// Default gate tie-break: 0.1 when `|a - b| < 5`, else 0.
pub fn gate_resonance_bonus(gate_a: i64, gate_b: i64) -> Result<f64> {
    GatePolicy::default().bonus(gate_a, gate_b)
}

/// Score two snapshots end to end.
pub fn score(
    vector_a: &[f64],
    vector_b: &[f64],
    fields_a: &FieldMap,
    fields_b: &FieldMap,
    weights: Weights,
) -> Result<CompatibilityResult> {
    score_with_synergy(vector_a, vector_b, fields_a, fields_b, weights).map(|(result, _)| result)
}

/// Like [`score`], also returning the per-field synergy the synchrony mean
/// was taken over.
pub fn score_with_synergy(
    vector_a: &[f64],
    vector_b: &[f64],
    fields_a: &FieldMap,
    fields_b: &FieldMap,
    weights: Weights,
) -> Result<(CompatibilityResult, BTreeMap<FieldName, f64>)> {
    let ci_similarity = cosine_similarity(vector_a, vector_b)?;
    let synergy = field_synergy(fields_a, fields_b)?;
    let field_synchrony = mean_synergy(&synergy);
    let overall = overall_compatibility(ci_similarity, field_synchrony, weights);
    let result = CompatibilityResult {
        ci_similarity,
        field_synchrony,
        overall,
        recommendation: classify(overall),
    };
    Ok((result, synergy))
}
