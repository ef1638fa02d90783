//! Agent kinematics phase (§4.3): heading slew, acceleration-limited
//! velocity update, Euler position update, arena clamp. Runs after actions
//! have been bound to each agent's desired state, before the spatial index
//! is rebuilt.

use std::f64::consts::PI;

use crate::domain::Agent;
use crate::params::Parameters;

/// Below this desired-velocity magnitude, the previous desired heading is
/// retained rather than recomputed from a near-zero vector (which would be
/// numerically unstable to turn toward).
const DESIRED_HEADING_MIN_SPEED: f64 = 1e-6;

/// Wraps an angular difference into (-pi, pi].
fn wrap_angle(mut delta: f64) -> f64 {
    delta %= 2.0 * PI;
    if delta <= -PI {
        delta += 2.0 * PI;
    } else if delta > PI {
        delta -= 2.0 * PI;
    }
    delta
}

pub(crate) fn run(agents: &mut [Agent], params: &Parameters) {
    let dt = params.dt();
    let radius = params.agent_radius();
    let width = params.arena_width();
    let height = params.arena_height();

    for agent in agents.iter_mut() {
        if !agent.alive {
            continue;
        }

        if agent.desired_vel.length() > DESIRED_HEADING_MIN_SPEED {
            agent.desired_heading = agent.desired_vel.y.atan2(agent.desired_vel.x);
        }

        let max_turn = agent.attrs.agility * dt;
        let diff = wrap_angle(agent.desired_heading - agent.heading);
        agent.heading = wrap_angle(agent.heading + diff.clamp(-max_turn, max_turn));

        let max_accel = agent.attrs.acceleration * dt;
        let dv_x = (agent.desired_vel.x - agent.vel.x).clamp(-max_accel, max_accel);
        let dv_y = (agent.desired_vel.y - agent.vel.y).clamp(-max_accel, max_accel);
        agent.vel.x += dv_x;
        agent.vel.y += dv_y;

        let speed = agent.vel.length();
        if speed > agent.attrs.max_speed && speed > 0.0 {
            let scale = agent.attrs.max_speed / speed;
            agent.vel.x *= scale;
            agent.vel.y *= scale;
        }

        agent.pos.x += agent.vel.x * dt;
        agent.pos.y += agent.vel.y * dt;

        if agent.pos.x < radius {
            agent.pos.x = radius;
            agent.vel.x = 0.0;
        } else if agent.pos.x > width - radius {
            agent.pos.x = width - radius;
            agent.vel.x = 0.0;
        }
        if agent.pos.y < radius {
            agent.pos.y = radius;
            agent.vel.y = 0.0;
        } else if agent.pos.y > height - radius {
            agent.pos.y = height - radius;
            agent.vel.y = 0.0;
        }
    }
}
