//! Deterministic stepping kernel for a 2.5D multi-agent combat simulation:
//! circular agents with bounded acceleration and turn rate, ballistic
//! projectiles, elastic collisions resolved via a naive or grid broad-phase
//! depending on population, and a state hash for cross-run determinism
//! verification. This crate has no notion of wall-clock time, rendering, or
//! networking — it is a pure, steppable kernel meant to be embedded.

pub mod domain;
pub mod error;
pub mod events;
pub mod params;

mod collision;
mod grid;
mod hash;
mod kinematics;
mod projectile;
mod rng;
mod world;

pub use collision::{CollisionStats, COLLISION_EPSILON};
pub use domain::{
    Agent, AgentAction, AgentAttributes, AgentId, AgentSpec, InfantryBlock, InfantryBlockId,
    InfantryBlockSpec, Projectile, ProjectileId, ProjectileLifecycle, Team, TrajectoryPolicy, Vec2,
    Vec3,
};
pub use error::{ConstructError, ConstructResult, ContractError, ContractResult};
pub use events::{Event, EventKind, EventPosition};
pub use hash::StateHash;
pub use params::Parameters;
pub use world::{World, WorldSnapshot};
