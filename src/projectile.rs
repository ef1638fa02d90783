//! Projectile subsystem (§4.5): ballistic integration under constant
//! gravity, analytic ground-crossing detection, terminal-state bookkeeping.

use crate::domain::{Projectile, ProjectileId, AgentId, ProjectileLifecycle, TrajectoryPolicy, Vec3};
use crate::events::{Event, EventBuffer};
use crate::params::Parameters;

/// Height above ground a projectile is launched from.
pub const LAUNCH_HEIGHT: f64 = 1.5;

pub(crate) fn launch(
    id: ProjectileId,
    launcher_id: AgentId,
    launch_xy: crate::domain::Vec2,
    azimuth: f64,
    loft: f64,
    speed: f64,
) -> Projectile {
    let vx = speed * loft.cos() * azimuth.cos();
    let vy = speed * loft.cos() * azimuth.sin();
    let vz = speed * loft.sin();
    Projectile {
        id,
        launcher_id,
        pos: Vec3::new(launch_xy.x, launch_xy.y, LAUNCH_HEIGHT),
        vel: Vec3::new(vx, vy, vz),
        lifecycle: ProjectileLifecycle::InFlight,
        impact: None,
        trajectory: vec![Vec3::new(launch_xy.x, launch_xy.y, LAUNCH_HEIGHT)],
    }
}

fn record_sample(projectile: &mut Projectile, sample: Vec3, policy: TrajectoryPolicy) {
    match policy {
        TrajectoryPolicy::Disabled => {}
        TrajectoryPolicy::Unbounded => projectile.trajectory.push(sample),
        TrajectoryPolicy::Capped(cap) => {
            if cap == 0 {
                return;
            }
            if projectile.trajectory.len() >= cap {
                projectile.trajectory.remove(0);
            }
            projectile.trajectory.push(sample);
        }
    }
}

/// Smallest positive root in (0, dt] of z + vz*t - 1/2*g*t^2 = 0. The
/// discriminant is non-negative whenever z >= 0 and the next z < 0 (the only
/// case this is called from); dt is a defensive clamp for numerical edge
/// cases, never expected to trigger in practice.
fn ground_crossing_time(z: f64, vz: f64, g: f64, dt: f64) -> f64 {
    let a = -0.5 * g;
    let b = vz;
    let c = z;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 || a == 0.0 {
        return dt;
    }
    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    let t2 = (-b - sqrt_disc) / (2.0 * a);
    let mut candidates = [t1, t2];
    candidates.sort_by(|x, y| x.partial_cmp(y).unwrap());
    for t in candidates {
        if t > 0.0 && t <= dt {
            return t;
        }
    }
    dt
}

fn out_of_arena(x: f64, y: f64, width: f64, height: f64) -> bool {
    x < 0.0 || x > width || y < 0.0 || y > height
}

pub(crate) fn run(
    projectiles: &mut [Projectile],
    params: &Parameters,
    events: &mut EventBuffer,
    step: u64,
    policy: TrajectoryPolicy,
) {
    let dt = params.dt();
    let g = params.gravity();
    let width = params.arena_width();
    let height = params.arena_height();

    for p in projectiles.iter_mut() {
        if p.lifecycle != ProjectileLifecycle::InFlight {
            continue;
        }

        let z_next = p.pos.z + p.vel.z * dt - 0.5 * g * dt * dt;

        if z_next > 0.0 {
            p.pos.x += p.vel.x * dt;
            p.pos.y += p.vel.y * dt;
            p.pos.z = z_next;
            p.vel.z -= g * dt;

            if out_of_arena(p.pos.x, p.pos.y, width, height) {
                p.lifecycle = ProjectileLifecycle::OutOfBounds;
                continue;
            }
            record_sample(p, p.pos, policy);
        } else {
            let t = ground_crossing_time(p.pos.z, p.vel.z, g, dt);
            p.pos.x += p.vel.x * t;
            p.pos.y += p.vel.y * t;
            p.pos.z = 0.0;

            if out_of_arena(p.pos.x, p.pos.y, width, height) {
                p.lifecycle = ProjectileLifecycle::OutOfBounds;
                continue;
            }

            p.lifecycle = ProjectileLifecycle::GroundImpact;
            p.impact = Some(p.pos);
            record_sample(p, p.pos, policy);
            events.push(Event::projectile_impact(step, p.launcher_id, p.id, p.pos));
        }
    }
}
