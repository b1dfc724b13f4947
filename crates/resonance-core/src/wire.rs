//! JSON serde for profile snapshots and rosters.
//!
//! The wire format uses the matching API's camelCase keys, stores the CI
//! vector as a bare array and phases as bare f64 radians. Everything read
//! from the wire goes through the same validating constructors as in-process
//! snapshots.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::FieldMap;
use crate::snapshot::Snapshot;
use crate::vector::ConsciousnessVector;

pub const CURRENT_VERSION: &str = "1.0";

#[derive(Serialize, Deserialize, Debug)]
pub struct WireSnapshot {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "consciousnessVector")]
    pub consciousness_vector: Vec<f64>,
    #[serde(rename = "fieldStates")]
    pub field_states: FieldMap,
    #[serde(rename = "dominantGate", default, skip_serializing_if = "Option::is_none")]
    pub dominant_gate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct WireRoster {
    #[serde(default = "default_version")]
    pub version: String,
    pub users: Vec<WireSnapshot>,
}

fn default_version() -> String {
    CURRENT_VERSION.to_string()
}

impl From<&Snapshot> for WireSnapshot {
    fn from(s: &Snapshot) -> Self {
        Self {
            user_id: s.id().to_string(),
            consciousness_vector: s.vector().as_slice().to_vec(),
            field_states: s.fields().clone(),
            dominant_gate: s.dominant_gate().map(i64::from),
            profile: s.profile().map(str::to_string),
        }
    }
}

impl TryFrom<WireSnapshot> for Snapshot {
    type Error = crate::error::ScoreError;

    fn try_from(w: WireSnapshot) -> Result<Self> {
        let vector = ConsciousnessVector::new(&w.consciousness_vector)?;
        let mut snapshot = Snapshot::new(w.user_id, vector, w.field_states)?;
        if let Some(gate) = w.dominant_gate {
            snapshot = snapshot.with_gate(gate)?;
        }
        if let Some(profile) = w.profile {
            snapshot = snapshot.with_profile(profile);
        }
        Ok(snapshot)
    }
}

pub fn import_snapshot(json: &str) -> Result<Snapshot> {
    let wire: WireSnapshot = serde_json::from_str(json)?;
    Snapshot::try_from(wire)
}

pub fn export_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(&WireSnapshot::from(snapshot))?)
}

pub fn import_roster(json: &str) -> Result<Vec<Snapshot>> {
    let wire: WireRoster = serde_json::from_str(json)?;
    wire.users.into_iter().map(Snapshot::try_from).collect()
}

pub fn export_roster(snapshots: &[Snapshot]) -> Result<String> {
    let wire = WireRoster {
        version: CURRENT_VERSION.to_string(),
        users: snapshots.iter().map(WireSnapshot::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&wire)?)
}
