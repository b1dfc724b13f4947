/// Dimensionality of a consciousness (CI) vector.
pub const CI_DIM: usize = 32;

/// Number of named consciousness fields.
pub const FIELD_COUNT: usize = 9;

/// Default weight of the CI-vector similarity in the overall blend.
pub const DEFAULT_CI_WEIGHT: f64 = 0.6;

/// Default weight of the field phase synchrony in the overall blend.
pub const DEFAULT_SYNC_WEIGHT: f64 = 0.4;

/// Recommendation ladder. Each threshold is exclusive: `overall > threshold`.
pub const MIRROR_THRESHOLD: f64 = 0.90;
pub const DEEP_THRESHOLD: f64 = 0.75;
pub const POSITIVE_THRESHOLD: f64 = 0.60;
pub const NEUTRAL_THRESHOLD: f64 = 0.40;

/// Overall score above which two snapshots are told to collaborate.
pub const COLLABORATE_THRESHOLD: f64 = 0.75;

/// Gate catalog bounds (inclusive).
pub const GATE_MIN: i64 = 1;
pub const GATE_MAX: i64 = 64;

/// Gates closer than this count as resonant.
pub const GATE_PROXIMITY: i64 = 5;

/// Flat bonus awarded to resonant gates.
pub const GATE_BONUS: f64 = 0.1;

/// Network defaults: minimum overall score to keep an edge, and edge cap.
pub const DEFAULT_MIN_COMPATIBILITY: f64 = 0.6;
pub const DEFAULT_MAX_CONNECTIONS: usize = 20;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;
