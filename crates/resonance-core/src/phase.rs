use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;

/// Phase angle on the unit circle, normalized to [0, 2π).
///
/// Serializes as a bare f64 in radians.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Phase {
    theta: f64,
}

impl Phase {
    /// Create a phase with the given angle, normalized to [0, 2π).
    pub fn new(theta: f64) -> Self {
        let theta = theta.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        Self {
            theta: if theta >= TAU { 0.0 } else { theta },
        }
    }

    pub fn radians(self) -> f64 {
        self.theta
    }

    /// Angular distance along the shorter arc. Range: [0, π].
    pub fn distance(self, other: Self) -> f64 {
        let d = (self.theta - other.theta).abs() % TAU;
        d.min(TAU - d)
    }

    /// Phase-lock measure: 1 when in phase, 0 when anti-phase.
    pub fn synchrony(self, other: Self) -> f64 {
        1.0 - self.distance(other) / PI
    }
}

impl From<f64> for Phase {
    fn from(theta: f64) -> Self {
        Self::new(theta)
    }
}

impl From<Phase> for f64 {
    fn from(p: Phase) -> Self {
        p.theta
    }
}

impl PartialEq for Phase {
    fn eq(&self, other: &Self) -> bool {
        self.distance(*other) < EPSILON
    }
}
