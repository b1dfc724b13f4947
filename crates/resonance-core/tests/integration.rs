//! Integration tests exercising the public scoring pipeline:
//! wire import → compare → classify → network, across module boundaries.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use resonance_core::{
    CI_DIM, ConsciousnessVector, FieldMap, FieldName, FieldState, NetworkOptions, Recommendation,
    ScoreError, ScoringPolicy, Snapshot, Weights, build_network, classify, compare,
    cosine_similarity, export_roster, field_synchrony, gate_resonance_bonus, import_roster,
    import_snapshot, network_coherence, overall_compatibility, seed_roster,
};

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn uniform_fields(phase: f64) -> FieldMap {
    FieldName::ALL
        .into_iter()
        .map(|n| (n, FieldState::new(0.7, 1.0, phase, 0.8)))
        .collect()
}

fn planar(t: f64) -> ConsciousnessVector {
    let mut raw = [0.0; CI_DIM];
    raw[0] = t.cos();
    raw[1] = t.sin();
    ConsciousnessVector::new(&raw).unwrap()
}

/// Identical vectors and field maps: every stage scores perfectly.
#[test]
fn identical_snapshots_are_mirror_resonance() {
    let mut rng = rng();
    let v = ConsciousnessVector::random(&mut rng);
    let f = uniform_fields(1.1);
    let a = Snapshot::new("a", v, f.clone()).unwrap();
    let b = Snapshot::new("b", v, f).unwrap();

    let report = compare(&a, &b, &ScoringPolicy::default()).unwrap();
    assert_relative_eq!(report.result.ci_similarity, 1.0, epsilon = 1e-9);
    assert_relative_eq!(report.result.field_synchrony, 1.0, epsilon = 1e-12);
    assert_relative_eq!(report.result.overall, 1.0, epsilon = 1e-9);
    assert_eq!(report.result.recommendation, Recommendation::MirrorResonance);
}

/// cos = 0.5 (mapped 0.75), synchrony 0.5 → 0.65 → PositiveResonance.
#[test]
fn blended_score_lands_in_positive_bucket() {
    let a = Snapshot::new("a", planar(0.0), uniform_fields(0.0)).unwrap();
    let b = Snapshot::new("b", planar(PI / 3.0), uniform_fields(FRAC_PI_2)).unwrap();

    let report = compare(&a, &b, &ScoringPolicy::default()).unwrap();
    assert_relative_eq!(report.result.ci_similarity, 0.75, epsilon = 1e-12);
    assert_relative_eq!(report.result.field_synchrony, 0.5, epsilon = 1e-12);
    assert_relative_eq!(report.result.overall, 0.65, epsilon = 1e-12);
    assert_eq!(report.result.recommendation, Recommendation::PositiveResonance);
}

#[test]
fn boundary_overall_is_not_mirror() {
    assert_eq!(classify(0.90), Recommendation::DeepCompatibility);
}

#[test]
fn operations_are_symmetric_over_random_snapshots() {
    let mut rng = rng();
    let roster = seed_roster(12, &mut rng);
    let policy = ScoringPolicy::default();
    for a in &roster {
        for b in &roster {
            let ab = compare(a, b, &policy).unwrap();
            let ba = compare(b, a, &policy).unwrap();
            assert_relative_eq!(ab.result.overall, ba.result.overall, epsilon = 1e-12);
            assert_eq!(ab.result.recommendation, ba.result.recommendation);
            assert!((0.0..=1.0).contains(&ab.result.ci_similarity));
            assert!((0.0..=1.0).contains(&ab.result.field_synchrony));
            assert!((0.0..=1.0).contains(&ab.result.overall));
        }
    }
}

#[test]
fn error_kinds_surface_at_the_boundary() {
    assert!(matches!(
        cosine_similarity(&[1.0; 31], &[1.0; 32]),
        Err(ScoreError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        cosine_similarity(&[0.0; 32], &[1.0; 32]),
        Err(ScoreError::DegenerateVector)
    ));

    let full = uniform_fields(0.0);
    let mut partial = full.clone();
    partial.remove(&FieldName::Synthesis);
    assert!(matches!(
        field_synchrony(&full, &partial),
        Err(ScoreError::MissingField(FieldName::Synthesis))
    ));

    assert_relative_eq!(gate_resonance_bonus(10, 12).unwrap(), 0.1);
    assert_relative_eq!(gate_resonance_bonus(10, 20).unwrap(), 0.0);
    assert!(matches!(
        gate_resonance_bonus(0, 5),
        Err(ScoreError::OutOfRange(0))
    ));
}

#[test]
fn custom_weights_flow_through_compare() {
    let a = Snapshot::new("a", planar(0.0), uniform_fields(0.0)).unwrap();
    let b = Snapshot::new("b", planar(FRAC_PI_2), uniform_fields(0.0)).unwrap();
    let policy = ScoringPolicy {
        weights: Weights { ci: 0.0, sync: 1.0 },
        ..ScoringPolicy::default()
    };
    let report = compare(&a, &b, &policy).unwrap();
    assert_relative_eq!(report.result.overall, 1.0, epsilon = 1e-12);
    assert_relative_eq!(
        report.result.overall,
        overall_compatibility(
            report.result.ci_similarity,
            report.result.field_synchrony,
            policy.weights
        )
    );
}

#[test]
fn roster_export_import_then_network() {
    let mut rng = rng();
    let roster = seed_roster(30, &mut rng);
    let json = export_roster(&roster).unwrap();
    let loaded = import_roster(&json).unwrap();
    assert_eq!(loaded.len(), 30);

    let center = &loaded[0];
    let options = NetworkOptions {
        min_compatibility: 0.0,
        max_connections: 10,
    };
    let graph = build_network(center, &loaded, &ScoringPolicy::default(), &options).unwrap();
    assert_eq!(graph.edges.len(), 10);
    assert_eq!(graph.nodes.len(), 11);
    assert!(graph.edges.iter().all(|e| e.target != center.id()));
    assert!(
        graph
            .edges
            .windows(2)
            .all(|w| w[0].weight >= w[1].weight)
    );

    // Scores survive the wire round trip
    let direct = compare(&roster[0], &roster[1], &ScoringPolicy::default()).unwrap();
    let via_wire = compare(&loaded[0], &loaded[1], &ScoringPolicy::default()).unwrap();
    assert_relative_eq!(direct.result.overall, via_wire.result.overall, epsilon = 1e-9);
}

#[test]
fn single_snapshot_import_and_coherence() {
    let json = r#"{
        "userId": "solo",
        "consciousnessVector": [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
        "fieldStates": {
            "Mind":      {"amplitude": 0.6, "frequency": 2.0,  "phase": 0.0,    "coherence": 0.9},
            "Heart":     {"amplitude": 0.8, "frequency": 1.0,  "phase": 1.5708, "coherence": 0.6},
            "Body":      {"amplitude": 0.7, "frequency": 0.5,  "phase": 0.0,    "coherence": 0.7},
            "Will":      {"amplitude": 0.5, "frequency": 3.0,  "phase": 3.1416, "coherence": 0.8},
            "Shadow":    {"amplitude": 0.4, "frequency": 1.5,  "phase": 3.1416, "coherence": 0.3},
            "Child":     {"amplitude": 0.9, "frequency": 5.0,  "phase": 0.0,    "coherence": 0.9},
            "Soul":      {"amplitude": 0.5, "frequency": 0.1,  "phase": 0.7854, "coherence": 0.95},
            "Spirit":    {"amplitude": 0.3, "frequency": 0.05, "phase": 0.0,    "coherence": 1.0},
            "Synthesis": {"amplitude": 0.6, "frequency": 1.0,  "phase": 1.5708, "coherence": 0.8}
        },
        "dominantGate": 41
    }"#;
    let s = import_snapshot(json).unwrap();
    assert_eq!(s.dominant_gate(), Some(41));
    let coherence = network_coherence(s.fields()).unwrap();
    assert_relative_eq!(coherence, 6.95 / 9.0, epsilon = 1e-12);

    let report = compare(&s, &s, &ScoringPolicy::default()).unwrap();
    assert_eq!(report.result.recommendation, Recommendation::MirrorResonance);
}
