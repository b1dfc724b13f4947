//! Resonance compatibility engine.
//!
//! Compares two consciousness snapshots: cosine similarity between unit CI
//! vectors, phase synchrony across the nine named fields, a weighted blend of
//! the two, and a threshold ladder mapping the blend to a recommendation.
//! On top of the scorer sit match reports, ego-network ranking and a JSON
//! wire format.
//!
//! Zero I/O. Every operation is a pure function over borrowed inputs.

pub mod constants;
pub mod error;
pub mod field;
pub mod network;
pub mod phase;
pub mod scorer;
pub mod seed;
pub mod snapshot;
pub mod vector;
pub mod wire;

pub use constants::{CI_DIM, FIELD_COUNT};
pub use error::{Result, ScoreError};
pub use field::{FieldMap, FieldName, FieldPattern, FieldState, network_coherence};
pub use network::{NetworkEdge, NetworkGraph, NetworkNode, NetworkOptions, NodeKind, build_network};
pub use phase::Phase;
pub use scorer::{
    CompatibilityResult, GatePolicy, Recommendation, Weights, classify, cosine_similarity,
    field_synchrony, field_synergy, gate_resonance_bonus, overall_compatibility, score,
    score_with_synergy,
};
pub use seed::seed_roster;
pub use snapshot::{Interaction, MatchReport, ScoringPolicy, Snapshot, compare};
pub use vector::ConsciousnessVector;
pub use wire::{CURRENT_VERSION, export_roster, export_snapshot, import_roster, import_snapshot};
