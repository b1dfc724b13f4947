use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{CI_DIM, EPSILON};
use crate::error::{Result, ScoreError};

/// Unit vector in the 32-dimensional consciousness (CI) space.
///
/// Always normalized. Construction is the only mutation point; components are
/// exposed read-only. On the wire it is a plain array of 32 numbers, which is
/// re-normalized on the way in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ConsciousnessVector {
    components: [f64; CI_DIM],
}

/// Euclidean norm of a raw component slice.
///
/// Components are scaled by the largest magnitude before squaring, so very
/// large or very small inputs neither overflow nor flush to zero. Returns
/// a non-finite value when any component is non-finite.
pub(crate) fn norm(components: &[f64]) -> f64 {
    let scale = components.iter().fold(0.0f64, |m, c| m.max(c.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let sum: f64 = components.iter().map(|c| (c / scale) * (c / scale)).sum();
    scale * sum.sqrt()
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl ConsciousnessVector {
    /// Create a vector from raw components, normalized to unit length.
    ///
    /// Fails with `DimensionMismatch` unless exactly `CI_DIM` components are
    /// given, and with `DegenerateVector` for a zero or non-finite norm.
    pub fn new(components: &[f64]) -> Result<Self> {
        if components.len() != CI_DIM {
            return Err(ScoreError::DimensionMismatch {
                left: components.len(),
                right: CI_DIM,
            });
        }
        let n = norm(components);
        if !n.is_finite() || n == 0.0 {
            return Err(ScoreError::DegenerateVector);
        }
        let mut out = [0.0; CI_DIM];
        for (dst, src) in out.iter_mut().zip(components) {
            *dst = src / n;
        }
        Ok(Self { components: out })
    }

    /// Random unit vector, each raw component drawn from [-1, 1].
    pub fn random(rng: &mut impl Rng) -> Self {
        loop {
            let raw: [f64; CI_DIM] = std::array::from_fn(|_| rng.random_range(-1.0..=1.0));
            if let Ok(v) = Self::new(&raw) {
                return v;
            }
        }
    }

    pub fn components(&self) -> &[f64; CI_DIM] {
        &self.components
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    pub fn dot(&self, other: &Self) -> f64 {
        dot(&self.components, &other.components)
    }

    pub fn norm(&self) -> f64 {
        norm(&self.components)
    }
}

impl AsRef<[f64]> for ConsciousnessVector {
    fn as_ref(&self) -> &[f64] {
        &self.components
    }
}

impl TryFrom<Vec<f64>> for ConsciousnessVector {
    type Error = ScoreError;

    fn try_from(components: Vec<f64>) -> Result<Self> {
        Self::new(&components)
    }
}

impl From<ConsciousnessVector> for Vec<f64> {
    fn from(v: ConsciousnessVector) -> Self {
        v.components.to_vec()
    }
}

impl PartialEq for ConsciousnessVector {
    fn eq(&self, other: &Self) -> bool {
        self.components
            .iter()
            .zip(&other.components)
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }
}
