//! The world: owns every mutable piece of simulation state and orchestrates
//! the fixed phase order each tick (§4.6, §5).

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::collision::{self, CollisionStats};
use crate::domain::{
    Agent, AgentAction, AgentId, AgentSpec, InfantryBlock, InfantryBlockId, InfantryBlockSpec,
    Projectile, ProjectileId, TrajectoryPolicy,
};
use crate::error::{ConstructError, ContractError};
use crate::events::{Event, EventBuffer};
use crate::grid::SpatialGrid;
use crate::hash::StateHash;
use crate::kinematics;
use crate::params::Parameters;
use crate::projectile as projectile_phase;
use crate::rng::WorldRng;

/// Owns agents, infantry blocks, projectiles, the spatial index, the event
/// buffer and the RNG stream for one simulation instance.
pub struct World {
    pub(crate) params: Parameters,
    pub(crate) rng: WorldRng,
    pub(crate) agents: Vec<Agent>,
    pub(crate) infantry: Vec<InfantryBlock>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) grid: SpatialGrid,
    pub(crate) events: EventBuffer,
    pub(crate) step_index: u64,
    pub(crate) trajectory_policy: TrajectoryPolicy,
    pub(crate) last_collision_stats: CollisionStats,
}

/// Complete, serializable world state for replay (§6 persisted state layout).
#[derive(serde::Serialize, serde::Deserialize)]
pub struct WorldSnapshot {
    pub params: Parameters,
    pub seed: u64,
    pub rng_draws: u64,
    pub step_index: u64,
    pub agents: Vec<Agent>,
    pub infantry: Vec<InfantryBlock>,
    pub projectiles: Vec<Projectile>,
    pub pending_events: Vec<Event>,
}

impl World {
    /// `construct(params, seed)`: empty world, RNG initialized. Fails fast
    /// on invalid parameters (§7.1) rather than returning a half-usable world.
    pub fn construct(params: Parameters, seed: u64) -> Result<World, ConstructError> {
        // Parameters::new already validates on the caller's path; re-validate
        // here too since params may have been built via Default or from_kv
        // and handed in directly.
        let reparsed = Parameters::new(
            params.arena_width(),
            params.arena_height(),
            params.dt(),
            params.gravity(),
            params.agent_radius(),
            params.grid_cell_size(),
            params.naive_grid_crossover(),
            params.restitution(),
        )?;
        let grid = SpatialGrid::new(reparsed.arena_width(), reparsed.arena_height(), reparsed.grid_cell_size());
        Ok(World {
            params: reparsed,
            rng: WorldRng::new(seed),
            agents: Vec::new(),
            infantry: Vec::new(),
            projectiles: Vec::new(),
            grid,
            events: EventBuffer::default(),
            step_index: 0,
            trajectory_policy: TrajectoryPolicy::default(),
            last_collision_stats: CollisionStats::default(),
        })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn step_index(&self) -> u64 {
        self.step_index
    }

    pub fn set_trajectory_policy(&mut self, policy: TrajectoryPolicy) {
        self.trajectory_policy = policy;
    }

    pub fn collision_stats(&self) -> CollisionStats {
        self.last_collision_stats
    }

    /// Assigns a new id and adds an agent. Ids are vector indices: never
    /// reused, stable across the agent's lifetime including after death.
    pub fn add_agent(&mut self, spec: AgentSpec) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(Agent::new(id, spec));
        id
    }

    pub fn add_infantry_block(&mut self, spec: InfantryBlockSpec) -> InfantryBlockId {
        let id = InfantryBlockId(self.infantry.len() as u32);
        self.infantry.push(InfantryBlock {
            id,
            team: spec.team,
            x_min: spec.x_min,
            x_max: spec.x_max,
            y_min: spec.y_min,
            y_max: spec.y_max,
        });
        id
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0 as usize)
    }

    pub fn infantry_blocks(&self) -> &[InfantryBlock] {
        &self.infantry
    }

    pub fn projectile(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.get(id.0 as usize)
    }

    /// Clears agents, projectiles, events; resets the step counter and
    /// reseeds the RNG. Infantry blocks are not cleared — they are not part
    /// of the entities the distilled external-interface table lists as
    /// reset by this call.
    pub fn reset(&mut self, seed: u64) {
        self.agents.clear();
        self.projectiles.clear();
        self.events.drain();
        self.step_index = 0;
        self.rng = WorldRng::new(seed);
        self.last_collision_stats = CollisionStats::default();
    }

    fn validate_actions(&self, actions: &HashMap<AgentId, AgentAction>) -> Result<(), ContractError> {
        for &id in actions.keys() {
            match self.agents.get(id.0 as usize) {
                None => return Err(ContractError::UnknownAgent(id)),
                Some(agent) if !agent.alive => return Err(ContractError::DeadAgent(id)),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Advances the world by one tick. Fixed phase order: bind actions,
    /// kinematics, spatial index rebuild, collision resolution, projectile
    /// integration, step counter increment. Atomic from the caller's
    /// perspective: an invalid action rejects the whole call, untouched.
    pub fn step(&mut self, actions: &HashMap<AgentId, AgentAction>) -> Result<(), ContractError> {
        self.validate_actions(actions)?;
        let this_step = self.step_index;

        for (&id, action) in actions {
            let agent = &mut self.agents[id.0 as usize];
            agent.desired_vel = action.desired_vel;
        }

        kinematics::run(&mut self.agents, &self.params);
        self.grid.rebuild(&self.agents);
        self.last_collision_stats =
            collision::resolve(&mut self.agents, &self.grid, &self.params, &mut self.events, this_step);
        projectile_phase::run(
            &mut self.projectiles,
            &self.params,
            &mut self.events,
            this_step,
            self.trajectory_policy,
        );

        trace!(
            step = this_step,
            pairs_checked = self.last_collision_stats.pairs_checked,
            pairs_colliding = self.last_collision_stats.pairs_colliding,
            "step complete"
        );
        self.step_index = this_step + 1;
        Ok(())
    }

    /// Launches a projectile from a live agent. Rejects (leaving world state
    /// untouched, no events emitted) if the launcher is unknown/dead or any
    /// parameter is non-finite (§7.2).
    pub fn launch_projectile(
        &mut self,
        launcher_id: AgentId,
        azimuth: f64,
        loft: f64,
        speed: f64,
    ) -> Result<ProjectileId, ContractError> {
        let launcher = match self.agents.get(launcher_id.0 as usize) {
            None => return Err(ContractError::UnknownAgent(launcher_id)),
            Some(a) if !a.alive => return Err(ContractError::DeadAgent(launcher_id)),
            Some(a) => a,
        };
        if !azimuth.is_finite() || !loft.is_finite() || !speed.is_finite() {
            warn!(?launcher_id, "rejected launch with non-finite parameters");
            return Err(ContractError::NonFiniteLaunchParameters);
        }
        let launch_pos = launcher.pos;
        let id = ProjectileId(self.projectiles.len() as u32);
        let projectile = projectile_phase::launch(id, launcher_id, launch_pos, azimuth, loft, speed);
        self.projectiles.push(projectile);
        self.events.push(Event::projectile_launched(
            self.step_index,
            launcher_id,
            id,
            launch_pos,
        ));
        debug!(?launcher_id, projectile = id.0, "projectile launched");
        Ok(id)
    }

    /// Ordered sequence of events since the last drain; clears the buffer.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    pub fn state_hash(&self) -> StateHash {
        crate::hash::compute(self)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            params: self.params,
            seed: self.rng.seed(),
            rng_draws: self.rng.draws(),
            step_index: self.step_index,
            agents: self.agents.clone(),
            infantry: self.infantry.clone(),
            projectiles: self.projectiles.clone(),
            pending_events: self.events.as_slice().to_vec(),
        }
    }

    pub fn from_snapshot(snapshot: WorldSnapshot) -> Result<World, ConstructError> {
        let mut world = World::construct(snapshot.params, snapshot.seed)?;
        world.rng = WorldRng::from_fingerprint(snapshot.seed, snapshot.rng_draws);
        world.agents = snapshot.agents;
        world.infantry = snapshot.infantry;
        world.projectiles = snapshot.projectiles;
        world.step_index = snapshot.step_index;
        for event in snapshot.pending_events {
            world.events.push(event);
        }
        world.grid.rebuild(&world.agents);
        Ok(world)
    }
}
