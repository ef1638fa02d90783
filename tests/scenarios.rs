//! End-to-end scenarios from SPEC_FULL §8.

use std::collections::HashMap;

use combat_core::{
    Agent, AgentAction, AgentAttributes, AgentId, AgentSpec, Parameters, Team, Vec2, World,
};

fn agent_spec(x: f64, y: f64, attrs: AgentAttributes) -> AgentSpec {
    AgentSpec {
        team: Team(0),
        x,
        y,
        heading: 0.0,
        attrs,
    }
}

fn fast_attrs() -> AgentAttributes {
    AgentAttributes {
        max_speed: 200.0,
        acceleration: 200.0,
        agility: std::f64::consts::PI * 4.0,
        ..AgentAttributes::default()
    }
}

fn action(vx: f64, vy: f64) -> AgentAction {
    AgentAction {
        desired_vel: Vec2::new(vx, vy),
    }
}

fn agent_at(world: &World, id: AgentId) -> &Agent {
    world.agent(id).expect("agent must exist")
}

#[test]
fn scenario_1_single_agent_cruises_in_a_straight_line() {
    let mut world = World::construct(Parameters::default(), 1).unwrap();
    let attrs = AgentAttributes {
        max_speed: 5.0,
        acceleration: 50.0,
        agility: std::f64::consts::PI * 4.0,
        ..AgentAttributes::default()
    };
    let id = world.add_agent(agent_spec(10.0, 50.0, attrs));

    for _ in 0..100 {
        let mut actions = HashMap::new();
        actions.insert(id, action(5.0, 0.0));
        world.step(&actions).unwrap();
    }

    let agent = agent_at(&world, id);
    assert!((agent.pos.x - 60.0).abs() < 1e-6, "x={}", agent.pos.x);
    assert_eq!(agent.vel.y, 0.0);
}

#[test]
fn scenario_2_two_agents_collide_head_on_and_separate() {
    let mut world = World::construct(Parameters::default(), 2).unwrap();
    let attrs = fast_attrs();
    let left = world.add_agent(agent_spec(40.0, 50.0, attrs));
    let right = world.add_agent(agent_spec(60.0, 50.0, attrs));

    let mut total_collision_events = 0usize;
    let mut ke_history = Vec::new();

    for _ in 0..40 {
        let mut actions = HashMap::new();
        actions.insert(left, action(5.0, 0.0));
        actions.insert(right, action(-5.0, 0.0));
        world.step(&actions).unwrap();
        let events = world.drain_events();
        total_collision_events += events
            .iter()
            .filter(|e| e.kind == combat_core::EventKind::AgentCollision)
            .count();

        let a = agent_at(&world, left);
        let b = agent_at(&world, right);
        let ke = 0.5 * a.vel.length_sq() + 0.5 * b.vel.length_sq();
        ke_history.push(ke);
    }

    assert!(total_collision_events >= 1);

    let a = agent_at(&world, left);
    let b = agent_at(&world, right);
    let r_sum = 2.0 * world.params().agent_radius();
    let sep = b.pos.sub(a.pos).length();
    assert!(
        sep >= r_sum - combat_core::COLLISION_EPSILON,
        "sep={sep} r_sum={r_sum}"
    );

    // Elastic, equal-mass collisions never increase total kinetic energy.
    for window in ke_history.windows(2) {
        assert!(window[1] <= window[0] + 1e-6, "{:?}", window);
    }
}

#[test]
fn scenario_3_corner_stress_clamps_exactly_to_radius() {
    let params = Parameters::default();
    let mut world = World::construct(params, 3).unwrap();
    let id = world.add_agent(agent_spec(0.5, 0.5, fast_attrs()));

    for _ in 0..20 {
        let mut actions = HashMap::new();
        actions.insert(id, action(-100.0, -100.0));
        world.step(&actions).unwrap();
    }

    let agent = agent_at(&world, id);
    let radius = world.params().agent_radius();
    assert!((agent.pos.x - radius).abs() < 1e-9);
    assert!((agent.pos.y - radius).abs() < 1e-9);
    assert_eq!(agent.vel.x, 0.0);
    assert_eq!(agent.vel.y, 0.0);
}

#[test]
fn scenario_4_projectile_loft_quarter_pi_lands_near_analytic_range() {
    let params = Parameters::default();
    let mut world = World::construct(params, 4).unwrap();
    let launcher = world.add_agent(agent_spec(50.0, 50.0, AgentAttributes::default()));

    let speed = 20.0_f64;
    let loft = std::f64::consts::FRAC_PI_4;
    world
        .launch_projectile(launcher, 0.0, loft, speed)
        .unwrap();

    let mut impact_events = 0usize;
    for _ in 0..500 {
        world.step(&HashMap::new()).unwrap();
        let events = world.drain_events();
        impact_events += events
            .iter()
            .filter(|e| e.kind == combat_core::EventKind::ProjectileImpact)
            .count();
        if impact_events > 0 {
            break;
        }
    }

    assert_eq!(impact_events, 1);
    let projectile = world.projectile(combat_core::ProjectileId(0)).unwrap();
    let impact = projectile.impact.expect("must have impacted");
    let expected_dx = speed * speed * (2.0 * loft).sin() / world.params().gravity();
    assert!(
        (impact.x - 50.0 - expected_dx).abs() < 0.2,
        "impact.x={} expected ~{}",
        impact.x,
        50.0 + expected_dx
    );
    assert_eq!(impact.z, 0.0);
}

#[test]
fn scenario_5_determinism_across_300_steps_with_random_actions() {
    use rand::{Rng, SeedableRng};

    fn build_and_run(seed: u64, steps: u64) -> Vec<combat_core::StateHash> {
        let mut world = World::construct(Parameters::default(), seed).unwrap();
        let mut ids = Vec::new();
        for row in 0..5 {
            for col in 0..10 {
                let x = 5.0 + col as f64 * 9.0;
                let y = 5.0 + row as f64 * 18.0;
                ids.push(world.add_agent(agent_spec(x, y, fast_attrs())));
            }
        }

        let mut action_rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
        let mut hashes = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            let mut actions = HashMap::new();
            for &id in &ids {
                let vx = action_rng.gen_range(-5.0..5.0);
                let vy = action_rng.gen_range(-5.0..5.0);
                actions.insert(id, action(vx, vy));
            }
            world.step(&actions).unwrap();
            hashes.push(world.state_hash());
        }
        hashes
    }

    let baseline = build_and_run(42, 300);
    let replay = build_and_run(42, 300);
    assert_eq!(baseline.len(), 300);
    for (step, (a, b)) in baseline.iter().zip(replay.iter()).enumerate() {
        assert_eq!(a, b, "state hash diverged at step {step}");
    }
}

#[test]
fn drain_events_idempotent_with_no_intervening_step() {
    let mut world = World::construct(Parameters::default(), 9).unwrap();
    world.add_agent(agent_spec(10.0, 10.0, AgentAttributes::default()));
    world.step(&HashMap::new()).unwrap();
    let _first = world.drain_events();
    assert!(world.drain_events().is_empty());
}
