//! Ego-network ranking: compare one snapshot against a roster and keep the
//! strongest connections as a node/edge graph.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_COMPATIBILITY};
use crate::error::Result;
use crate::scorer::Recommendation;
use crate::snapshot::{MatchReport, ScoringPolicy, Snapshot, compare};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkOptions {
    /// Connections with `overall` below this are dropped.
    pub min_compatibility: f64,
    pub max_connections: usize,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            min_compatibility: DEFAULT_MIN_COMPATIBILITY,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[serde(rename = "self")]
    Center,
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub dominant_gate: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkGraph {
    pub center_id: String,
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

/// Rank `roster` against `center`.
///
/// Entries sharing the center's id are skipped. Survivors are ordered by
/// overall score, then gate bonus, then id, and truncated to
/// `max_connections`. A scoring error on any entry aborts the whole build.
pub fn build_network(
    center: &Snapshot,
    roster: &[Snapshot],
    policy: &ScoringPolicy,
    options: &NetworkOptions,
) -> Result<NetworkGraph> {
    let mut connections: Vec<(&Snapshot, MatchReport)> = Vec::new();
    for other in roster.iter().filter(|s| s.id() != center.id()) {
        let report = compare(center, other, policy)?;
        if report.result.overall >= options.min_compatibility {
            connections.push((other, report));
        }
    }

    connections.sort_by(|(_, a), (_, b)| {
        b.result
            .overall
            .total_cmp(&a.result.overall)
            .then(b.gate_bonus.total_cmp(&a.gate_bonus))
            .then_with(|| a.right_id.cmp(&b.right_id))
    });
    connections.truncate(options.max_connections);

    let mut nodes = Vec::with_capacity(connections.len() + 1);
    nodes.push(NetworkNode {
        id: center.id().to_string(),
        kind: NodeKind::Center,
        dominant_gate: center.dominant_gate(),
        profile: center.profile().map(str::to_string),
        compatibility: None,
        recommendation: None,
    });
    let mut edges = Vec::with_capacity(connections.len());

    for (other, report) in &connections {
        nodes.push(NetworkNode {
            id: other.id().to_string(),
            kind: NodeKind::Other,
            dominant_gate: other.dominant_gate(),
            profile: other.profile().map(str::to_string),
            compatibility: Some(report.result.overall),
            recommendation: Some(report.result.recommendation),
        });
        edges.push(NetworkEdge {
            source: center.id().to_string(),
            target: other.id().to_string(),
            weight: report.result.overall,
        });
    }

    Ok(NetworkGraph {
        center_id: center.id().to_string(),
        nodes,
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CI_DIM;
    use crate::error::ScoreError;
    use crate::field::{FieldMap, FieldName, FieldState};
    use crate::vector::ConsciousnessVector;
    use std::f64::consts::PI;

    fn fields(phase: f64) -> FieldMap {
        FieldName::ALL
            .into_iter()
            .map(|n| (n, FieldState::new(0.5, 1.0, phase, 0.8)))
            .collect()
    }

    /// Vector at angle `t` in the e0/e1 plane.
    fn planar(t: f64) -> ConsciousnessVector {
        let mut raw = [0.0; CI_DIM];
        raw[0] = t.cos();
        raw[1] = t.sin();
        ConsciousnessVector::new(&raw).unwrap()
    }

    fn snap(id: &str, t: f64, gate: i64) -> Snapshot {
        Snapshot::new(id, planar(t), fields(0.0))
            .unwrap()
            .with_gate(gate)
            .unwrap()
    }

    #[test]
    fn test_filters_sorts_and_skips_center() {
        let center = snap("center", 0.0, 10);
        let roster = vec![
            center.clone(),
            snap("near", 0.2, 40),
            snap("far", PI, 40),
            snap("mid", 1.0, 40),
        ];
        let graph = build_network(
            &center,
            &roster,
            &ScoringPolicy::default(),
            &NetworkOptions::default(),
        )
        .unwrap();

        let ids: Vec<&str> = graph.edges.iter().map(|e| e.target.as_str()).collect();
        // "far": ci 0.0 -> overall 0.4, below 0.6
        assert_eq!(ids, ["near", "mid"]);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.nodes[0].kind, NodeKind::Center);
        assert_eq!(graph.center_id, "center");
        assert!(graph.edges[0].weight >= graph.edges[1].weight);
    }

    #[test]
    fn test_truncates_to_max_connections() {
        let center = snap("c", 0.0, 10);
        let roster: Vec<Snapshot> = (0..10)
            .map(|i| snap(&format!("u{i}"), 0.01 * i as f64, 30))
            .collect();
        let options = NetworkOptions {
            min_compatibility: 0.0,
            max_connections: 3,
        };
        let graph =
            build_network(&center, &roster, &ScoringPolicy::default(), &options).unwrap();
        let ids: Vec<&str> = graph.edges.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(ids, ["u0", "u1", "u2"]);
    }

    #[test]
    fn test_ties_break_on_gate_then_id() {
        let center = snap("c", 0.0, 10);
        let roster = vec![snap("b", 0.5, 40), snap("a", 0.5, 40), snap("z", 0.5, 12)];
        let graph = build_network(
            &center,
            &roster,
            &ScoringPolicy::default(),
            &NetworkOptions::default(),
        )
        .unwrap();
        let ids: Vec<&str> = graph.edges.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(ids, ["z", "a", "b"]);
    }

    #[test]
    fn test_error_on_member_propagates() {
        let center = snap("c", 0.0, 10);
        let mut partial = fields(0.0);
        partial.remove(&FieldName::Soul);
        let broken = Snapshot::new("broken", planar(0.0), partial).unwrap();
        let result = build_network(
            &center,
            &[broken],
            &ScoringPolicy::default(),
            &NetworkOptions::default(),
        );
        assert!(matches!(result, Err(ScoreError::MissingField(FieldName::Soul))));
    }

    #[test]
    fn test_empty_roster_has_only_center() {
        let center = snap("c", 0.0, 10);
        let graph = build_network(
            &center,
            &[],
            &ScoringPolicy::default(),
            &NetworkOptions::default(),
        )
        .unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_node_kind_wire_names() {
        assert_eq!(serde_json::to_string(&NodeKind::Center).unwrap(), "\"self\"");
        assert_eq!(serde_json::to_string(&NodeKind::Other).unwrap(), "\"other\"");
    }
}
