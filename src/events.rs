//! Append-only event stream. Events are short-lived: created during a step,
//! drained by one consumer, then gone. Back-references to agents/projectiles
//! are by id only, never by pointer, so the buffer carries no lifetime
//! entanglement with the rest of the world.

use serde::{Deserialize, Serialize};

use crate::domain::{AgentId, ProjectileId, Vec2, Vec3};

/// The event kinds this kernel emits. Additional kinds are reserved for
/// future phases (reward shaping, morale, etc.) and must be ignored by
/// consumers that don't recognize them — this crate never emits them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    AgentCollision,
    ProjectileLaunched,
    ProjectileImpact,
}

/// Position payload of an event: a 2D arena position or a 3D projectile
/// position (z = 0 at ground impact).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventPosition {
    Plane(Vec2),
    Space(Vec3),
}

/// A single, compact, append-only event record.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub step: u64,
    pub kind: EventKind,
    pub actor: Option<AgentId>,
    pub target: Option<AgentId>,
    pub projectile: Option<ProjectileId>,
    pub position: Option<EventPosition>,
    pub value: Option<f64>,
}

impl Event {
    pub(crate) fn agent_collision(step: u64, a: AgentId, b: AgentId, midpoint: Vec2) -> Self {
        Event {
            step,
            kind: EventKind::AgentCollision,
            actor: Some(a),
            target: Some(b),
            projectile: None,
            position: Some(EventPosition::Plane(midpoint)),
            value: None,
        }
    }

    pub(crate) fn projectile_launched(
        step: u64,
        launcher: AgentId,
        projectile: ProjectileId,
        pos: Vec2,
    ) -> Self {
        Event {
            step,
            kind: EventKind::ProjectileLaunched,
            actor: Some(launcher),
            target: None,
            projectile: Some(projectile),
            position: Some(EventPosition::Plane(pos)),
            value: None,
        }
    }

    pub(crate) fn projectile_impact(
        step: u64,
        launcher: AgentId,
        projectile: ProjectileId,
        pos: Vec3,
    ) -> Self {
        Event {
            step,
            kind: EventKind::ProjectileImpact,
            actor: Some(launcher),
            target: None,
            projectile: Some(projectile),
            position: Some(EventPosition::Space(pos)),
            value: None,
        }
    }
}

/// Owns the current step's events, in emission order, until drained.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventBuffer {
    events: Vec<Event>,
}

impl EventBuffer {
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Returns everything recorded since the last drain, and clears the
    /// buffer in place (it is not reallocated — an arena reset each step).
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }
}
