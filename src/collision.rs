//! Collision resolver (§4.4): pair enumeration (naive below the crossover,
//! grid-based above it), squared-distance culling, symmetric elastic
//! response along the collision normal, and positional overlap separation.

use crate::domain::{Agent, AgentId, Vec2};
use crate::events::{Event, EventBuffer};
use crate::grid::SpatialGrid;
use crate::params::Parameters;

/// Fixed numerical slack for the non-penetration invariant (§8). The spec
/// leaves open whether this should be configurable; treated as fixed per
/// the open-question resolution in DESIGN.md.
pub const COLLISION_EPSILON: f64 = 0.05;

/// Per-step diagnostics. Never influence state transitions (§4.2).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CollisionStats {
    pub pairs_checked: u64,
    pub pairs_colliding: u64,
    pub cells_occupied: usize,
}

/// Naive O(n^2) i<j enumeration over live agents, by ascending id.
fn naive_pairs(agents: &[Agent]) -> Vec<(AgentId, AgentId)> {
    let mut pairs = Vec::new();
    for i in 0..agents.len() {
        if !agents[i].alive {
            continue;
        }
        for j in (i + 1)..agents.len() {
            if !agents[j].alive {
                continue;
            }
            pairs.push((agents[i].id, agents[j].id));
        }
    }
    pairs
}

fn select_pairs(agents: &[Agent], grid: &SpatialGrid, params: &Parameters) -> Vec<(AgentId, AgentId)> {
    let live_count = agents.iter().filter(|a| a.alive).count();
    if live_count <= params.naive_grid_crossover() {
        naive_pairs(agents)
    } else {
        grid.unordered_neighbor_pairs()
    }
}

pub(crate) fn resolve(
    agents: &mut [Agent],
    grid: &SpatialGrid,
    params: &Parameters,
    events: &mut EventBuffer,
    step: u64,
) -> CollisionStats {
    let pairs = select_pairs(agents, grid, params);
    let r_sum = 2.0 * params.agent_radius();
    let r_sum_sq = r_sum * r_sum;

    let mut stats = CollisionStats {
        pairs_checked: pairs.len() as u64,
        pairs_colliding: 0,
        cells_occupied: grid.cells_occupied(),
    };

    for (a_id, b_id) in pairs {
        let a_idx = a_id.0 as usize;
        let b_idx = b_id.0 as usize;
        debug_assert!(a_idx < b_idx, "pairs must be canonicalized ascending by id");

        let (lower, upper) = agents.split_at_mut(b_idx);
        let a = &mut lower[a_idx];
        let b = &mut upper[0];

        let mut delta = b.pos.sub(a.pos);
        let mut d_sq = delta.length_sq();

        if d_sq >= r_sum_sq {
            continue;
        }

        if d_sq == 0.0 {
            // Deterministic tie-break (§7.3): two agents at identical
            // position. Offset b along +x and treat the pair as exactly
            // touching before applying the usual response.
            b.pos.x += r_sum;
            delta = Vec2::new(r_sum, 0.0);
            d_sq = r_sum_sq;
        }

        let d = d_sq.sqrt();
        let normal = delta.scale(1.0 / d);

        let overlap = r_sum - d;
        let push = normal.scale(overlap / 2.0);
        a.pos = a.pos.sub(push);
        b.pos = b.pos.add(push);

        let rel_vel = b.vel.sub(a.vel);
        let v_n = rel_vel.dot(normal);
        if v_n < 0.0 {
            let impulse = normal.scale((1.0 + params.restitution()) / 2.0 * v_n);
            a.vel = a.vel.add(impulse);
            b.vel = b.vel.sub(impulse);
        }

        let midpoint = a.pos.add(b.pos).scale(0.5);
        events.push(Event::agent_collision(step, a.id, b.id, midpoint));
        stats.pairs_colliding += 1;
    }

    stats
}
