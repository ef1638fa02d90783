//! Core value types shared by every phase of the stepping kernel: vectors,
//! identifiers, agents, infantry blocks and projectiles.

use serde::{Deserialize, Serialize};

/// A 2D vector used for arena-plane positions, velocities and headings.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Squared Euclidean length.
    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector; the zero vector normalizes to itself.
    pub fn normalize(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::ZERO
        } else {
            Vec2 {
                x: self.x / len,
                y: self.y / len,
            }
        }
    }

    pub fn scale(self, k: f64) -> Vec2 {
        Vec2 {
            x: self.x * k,
            y: self.y * k,
        }
    }

    pub fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// A 3D vector used for projectile state, where z is height above ground.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }
}

/// Team tag. Small integer, not otherwise interpreted by the core.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team(pub u8);

/// Stable identifier for a live or dead agent. Equal to the agent's index in
/// the world's agent vector; ids are never reused, dead agents keep theirs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Stable identifier for an infantry block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfantryBlockId(pub u32);

/// Stable identifier for a projectile, ever-growing across its lifetime in
/// the world (non-IN_FLIGHT projectiles are retained, never reused).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Attributes carried by an agent but not consumed by the stepping kernel
/// itself; read by future AI/reward phases.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentAttributes {
    pub strength: f64,
    pub cruise_speed: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    /// Turn rate, rad/s.
    pub agility: f64,
    pub precision: f64,
    pub impetuousness: f64,
    pub timidity: f64,
}

impl Default for AgentAttributes {
    fn default() -> Self {
        AgentAttributes {
            strength: 1.0,
            cruise_speed: 2.0,
            max_speed: 5.0,
            acceleration: 3.0,
            agility: std::f64::consts::PI,
            precision: 1.0,
            impetuousness: 0.5,
            timidity: 0.5,
        }
    }
}

/// Construction-time description of a new agent, consumed by `World::add_agent`.
#[derive(Clone, Debug)]
pub struct AgentSpec {
    pub team: Team,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub attrs: AgentAttributes,
}

/// Kinematic and control state of a single circular agent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub team: Team,
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f64,
    pub desired_vel: Vec2,
    pub desired_heading: f64,
    pub attrs: AgentAttributes,
    pub alive: bool,
}

impl Agent {
    pub(crate) fn new(id: AgentId, spec: AgentSpec) -> Self {
        Agent {
            id,
            team: spec.team,
            pos: Vec2::new(spec.x, spec.y),
            vel: Vec2::ZERO,
            heading: spec.heading,
            desired_vel: Vec2::ZERO,
            desired_heading: spec.heading,
            attrs: spec.attrs,
            alive: true,
        }
    }
}

/// Per-tick control input for one agent: the desired velocity bound by the
/// orchestrator to the agent's control state before kinematics runs.
#[derive(Copy, Clone, Debug, Default)]
pub struct AgentAction {
    pub desired_vel: Vec2,
}

/// Axis-aligned rectangular infantry region. Immutable over an episode.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct InfantryBlock {
    pub id: InfantryBlockId,
    pub team: Team,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Construction-time description of a new infantry block.
#[derive(Copy, Clone, Debug)]
pub struct InfantryBlockSpec {
    pub team: Team,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl InfantryBlock {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// Distance from `p` to the nearest point on the rectangle's boundary.
    /// Zero on the boundary; positive both inside and outside.
    pub fn nearest_boundary_distance(&self, p: Vec2) -> f64 {
        if self.contains(p) {
            let dx = (p.x - self.x_min).min(self.x_max - p.x);
            let dy = (p.y - self.y_min).min(self.y_max - p.y);
            dx.min(dy)
        } else {
            let cx = p.x.clamp(self.x_min, self.x_max);
            let cy = p.y.clamp(self.y_min, self.y_max);
            Vec2::new(p.x - cx, p.y - cy).length()
        }
    }
}

/// Terminal-state tag for a projectile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileLifecycle {
    InFlight,
    GroundImpact,
    OutOfBounds,
    Expired,
}

/// Ballistic projectile state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub launcher_id: AgentId,
    pub pos: Vec3,
    pub vel: Vec3,
    pub lifecycle: ProjectileLifecycle,
    pub impact: Option<Vec3>,
    pub trajectory: Vec<Vec3>,
}

/// Governs how much trajectory history a projectile retains. Never affects
/// `state_hash`: trajectory samples are excluded from the canonical hash
/// input by construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrajectoryPolicy {
    /// Keep every sample (fine for short episodes, unbounded growth otherwise).
    Unbounded,
    /// Keep only the most recent `n` samples, oldest dropped first.
    Capped(usize),
    /// Record no samples at all.
    Disabled,
}

impl Default for TrajectoryPolicy {
    fn default() -> Self {
        TrajectoryPolicy::Capped(512)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn normalize_unit_length() {
        let v = Vec2::new(3.0, 4.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn infantry_block_contains_boundary_inclusive() {
        let block = InfantryBlock {
            id: InfantryBlockId(0),
            team: Team(0),
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        };
        assert!(block.contains(Vec2::new(0.0, 0.0)));
        assert!(block.contains(Vec2::new(10.0, 10.0)));
        assert!(!block.contains(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn infantry_block_nearest_boundary_distance_outside() {
        let block = InfantryBlock {
            id: InfantryBlockId(0),
            team: Team(0),
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 10.0,
        };
        let d = block.nearest_boundary_distance(Vec2::new(13.0, 4.0));
        assert!((d - 3.0).abs() < 1e-9);
    }
}
