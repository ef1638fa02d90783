//! Quantified invariants from SPEC_FULL §8, exercised with `proptest` over
//! randomized agent placements, attributes and action sequences.

use std::collections::HashMap;

use combat_core::{
    AgentAction, AgentAttributes, AgentSpec, Parameters, Team, Vec2, World, COLLISION_EPSILON,
};
use proptest::prelude::*;

fn attrs_strategy() -> impl Strategy<Value = AgentAttributes> {
    (1.0..20.0f64, 1.0..20.0f64, 0.1..10.0f64).prop_map(|(max_speed, acceleration, agility)| {
        AgentAttributes {
            max_speed,
            acceleration,
            agility,
            ..AgentAttributes::default()
        }
    })
}

fn build_world_with_agents(
    positions: &[(f64, f64)],
    attrs: &[AgentAttributes],
    seed: u64,
) -> (World, Vec<combat_core::AgentId>) {
    let params = Parameters::default();
    let mut world = World::construct(params, seed).unwrap();
    let mut ids = Vec::new();
    for (&(x, y), &a) in positions.iter().zip(attrs.iter()) {
        ids.push(world.add_agent(AgentSpec {
            team: Team(0),
            x,
            y,
            heading: 0.0,
            attrs: a,
        }));
    }
    (world, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn arena_containment_holds_after_every_step(
        x in 1.0..99.0f64,
        y in 1.0..99.0f64,
        vx in -50.0..50.0f64,
        vy in -50.0..50.0f64,
        attrs in attrs_strategy(),
        steps in 1..30u32,
    ) {
        let (mut world, ids) = build_world_with_agents(&[(x, y)], &[attrs], 1);
        let id = ids[0];
        let radius = world.params().agent_radius();
        let width = world.params().arena_width();
        let height = world.params().arena_height();

        for _ in 0..steps {
            let mut actions = HashMap::new();
            actions.insert(id, AgentAction { desired_vel: Vec2::new(vx, vy) });
            world.step(&actions).unwrap();
            let agent = world.agent(id).unwrap();
            prop_assert!(agent.pos.x >= radius - 1e-9 && agent.pos.x <= width - radius + 1e-9);
            prop_assert!(agent.pos.y >= radius - 1e-9 && agent.pos.y <= height - radius + 1e-9);
        }
    }

    #[test]
    fn speed_never_exceeds_max_speed_after_any_step(
        x in 1.0..99.0f64,
        y in 1.0..99.0f64,
        vx in -100.0..100.0f64,
        vy in -100.0..100.0f64,
        attrs in attrs_strategy(),
        steps in 1..30u32,
    ) {
        let (mut world, ids) = build_world_with_agents(&[(x, y)], &[attrs], 2);
        let id = ids[0];
        for _ in 0..steps {
            let mut actions = HashMap::new();
            actions.insert(id, AgentAction { desired_vel: Vec2::new(vx, vy) });
            world.step(&actions).unwrap();
            let agent = world.agent(id).unwrap();
            prop_assert!(agent.vel.length() <= attrs.max_speed + 1e-6);
        }
    }

    #[test]
    fn heading_slew_bounded_by_agility_each_step(
        x in 1.0..99.0f64,
        y in 1.0..99.0f64,
        vx in -10.0..10.0f64,
        vy in -10.0..10.0f64,
        attrs in attrs_strategy(),
    ) {
        let (mut world, ids) = build_world_with_agents(&[(x, y)], &[attrs], 3);
        let id = ids[0];
        let dt = world.params().dt();
        let mut prev_heading = world.agent(id).unwrap().heading;

        for _ in 0..10 {
            let mut actions = HashMap::new();
            actions.insert(id, AgentAction { desired_vel: Vec2::new(vx, vy) });
            world.step(&actions).unwrap();
            let heading = world.agent(id).unwrap().heading;
            let mut delta = (heading - prev_heading) % (2.0 * std::f64::consts::PI);
            if delta <= -std::f64::consts::PI {
                delta += 2.0 * std::f64::consts::PI;
            } else if delta > std::f64::consts::PI {
                delta -= 2.0 * std::f64::consts::PI;
            }
            prop_assert!(delta.abs() <= attrs.agility * dt + 1e-6);
            prev_heading = heading;
        }
    }

    #[test]
    fn non_penetration_holds_for_colliding_pairs(
        gap in -0.2..0.5f64,
        vx in 0.5..10.0f64,
        steps in 1..20u32,
    ) {
        // Two agents on a collision course, `gap` controls initial overlap
        // (negative = already overlapping, exercising the separation path).
        let attrs = AgentAttributes {
            max_speed: 20.0,
            acceleration: 100.0,
            agility: 100.0,
            ..AgentAttributes::default()
        };
        let r_sum = 2.0 * Parameters::default().agent_radius();
        let half = (r_sum + gap) / 2.0;
        let (mut world, ids) = build_world_with_agents(
            &[(50.0 - half, 50.0), (50.0 + half, 50.0)],
            &[attrs, attrs],
            4,
        );
        let (left, right) = (ids[0], ids[1]);

        for _ in 0..steps {
            let mut actions = HashMap::new();
            actions.insert(left, AgentAction { desired_vel: Vec2::new(vx, 0.0) });
            actions.insert(right, AgentAction { desired_vel: Vec2::new(-vx, 0.0) });
            world.step(&actions).unwrap();
            let a = world.agent(left).unwrap();
            let b = world.agent(right).unwrap();
            let dist = b.pos.sub(a.pos).length();
            prop_assert!(dist >= r_sum - COLLISION_EPSILON - 1e-6, "dist={dist} r_sum={r_sum}");
        }
    }

    #[test]
    fn determinism_holds_for_arbitrary_action_sequences(
        seed in any::<u64>(),
        vx in -10.0..10.0f64,
        vy in -10.0..10.0f64,
        steps in 1..15u32,
    ) {
        let attrs = AgentAttributes::default();
        let (mut a, ids_a) = build_world_with_agents(&[(20.0, 20.0), (80.0, 80.0)], &[attrs, attrs], seed);
        let (mut b, ids_b) = build_world_with_agents(&[(20.0, 20.0), (80.0, 80.0)], &[attrs, attrs], seed);

        for _ in 0..steps {
            let mut actions_a = HashMap::new();
            actions_a.insert(ids_a[0], AgentAction { desired_vel: Vec2::new(vx, vy) });
            actions_a.insert(ids_a[1], AgentAction { desired_vel: Vec2::new(-vx, -vy) });
            let mut actions_b = HashMap::new();
            actions_b.insert(ids_b[0], AgentAction { desired_vel: Vec2::new(vx, vy) });
            actions_b.insert(ids_b[1], AgentAction { desired_vel: Vec2::new(-vx, -vy) });

            a.step(&actions_a).unwrap();
            b.step(&actions_b).unwrap();
            prop_assert_eq!(a.state_hash(), b.state_hash());
        }
    }
}
