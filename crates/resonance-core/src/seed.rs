use rand::Rng;

use crate::snapshot::Snapshot;

/// Build `count` random, valid snapshots for demos and benchmarks.
///
/// Ids are UUIDs drawn from `rng`, so a seeded rng yields a reproducible
/// roster.
pub fn seed_roster(count: usize, rng: &mut impl Rng) -> Vec<Snapshot> {
    (0..count)
        .map(|_| {
            let id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
            Snapshot::random(id.to_string(), rng)
        })
        .collect()
}
