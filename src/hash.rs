//! Determinism-verification state hash (§4.6, §6). Canonical byte order is
//! fixed so two independently-stepped worlds with identical histories always
//! agree, and so the hash is stable across process/platform boundaries.
//! Trajectory samples are never fed in: the trajectory-cap policy must never
//! perturb the hash.

use std::fmt;

use crate::domain::ProjectileLifecycle;
use crate::world::World;

/// 128-bit truncation of a BLAKE3 digest over the canonical state encoding.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct StateHash([u8; 16]);

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

fn lifecycle_tag(lifecycle: ProjectileLifecycle) -> u8 {
    match lifecycle {
        ProjectileLifecycle::InFlight => 0,
        ProjectileLifecycle::GroundImpact => 1,
        ProjectileLifecycle::OutOfBounds => 2,
        ProjectileLifecycle::Expired => 3,
    }
}

/// Computes the canonical state hash: agents ascending by id, then
/// projectiles ascending by id, then the step counter, then the RNG
/// fingerprint. Ids are already index-ordered in the backing vectors, so
/// iteration order matches ascending-id order without an explicit sort.
pub(crate) fn compute(world: &World) -> StateHash {
    let mut hasher = blake3::Hasher::new();

    for agent in &world.agents {
        hasher.update(&agent.pos.x.to_le_bytes());
        hasher.update(&agent.pos.y.to_le_bytes());
        hasher.update(&agent.vel.x.to_le_bytes());
        hasher.update(&agent.vel.y.to_le_bytes());
        hasher.update(&agent.heading.to_le_bytes());
        hasher.update(&[agent.alive as u8]);
    }

    for projectile in &world.projectiles {
        hasher.update(&projectile.pos.x.to_le_bytes());
        hasher.update(&projectile.pos.y.to_le_bytes());
        hasher.update(&projectile.pos.z.to_le_bytes());
        hasher.update(&projectile.vel.x.to_le_bytes());
        hasher.update(&projectile.vel.y.to_le_bytes());
        hasher.update(&projectile.vel.z.to_le_bytes());
        hasher.update(&[lifecycle_tag(projectile.lifecycle)]);
    }

    hasher.update(&world.step_index.to_le_bytes());

    let (seed, draws) = world.rng.fingerprint();
    hasher.update(&seed.to_le_bytes());
    hasher.update(&draws.to_le_bytes());

    let digest = hasher.finalize();
    let mut truncated = [0u8; 16];
    truncated.copy_from_slice(&digest.as_bytes()[..16]);
    StateHash(truncated)
}
