//! Immutable configuration bundle for a simulation instance.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ConstructError;

/// Centralized, immutable simulation constants. Validated once at
/// construction time; every field is a read-only accessor thereafter.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    arena_width: f64,
    arena_height: f64,
    dt: f64,
    gravity: f64,
    agent_radius: f64,
    grid_cell_size: f64,
    naive_grid_crossover: usize,
    restitution: f64,
}

impl Parameters {
    /// Builds a validated parameter bundle. Fails fast (§7 construction
    /// errors) rather than producing a world that would misbehave later.
    pub fn new(
        arena_width: f64,
        arena_height: f64,
        dt: f64,
        gravity: f64,
        agent_radius: f64,
        grid_cell_size: f64,
        naive_grid_crossover: usize,
        restitution: f64,
    ) -> Result<Self, ConstructError> {
        let params = Parameters {
            arena_width,
            arena_height,
            dt,
            gravity,
            agent_radius,
            grid_cell_size,
            naive_grid_crossover,
            restitution,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), ConstructError> {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(ConstructError::NonPositiveDimension {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.dt <= 0.0 {
            return Err(ConstructError::NonPositiveTimestep { dt: self.dt });
        }
        if self.agent_radius <= 0.0 {
            return Err(ConstructError::NonPositiveRadius {
                radius: self.agent_radius,
            });
        }
        let min_dim = self.arena_width.min(self.arena_height);
        if self.grid_cell_size <= 0.0 || self.grid_cell_size > min_dim {
            return Err(ConstructError::InvalidCellSize {
                cell_size: self.grid_cell_size,
                min_arena_dim: min_dim,
                agent_radius: self.agent_radius,
            });
        }
        if self.grid_cell_size < 2.0 * self.agent_radius {
            return Err(ConstructError::InvalidCellSize {
                cell_size: self.grid_cell_size,
                min_arena_dim: min_dim,
                agent_radius: self.agent_radius,
            });
        }
        Ok(())
    }

    pub fn arena_width(&self) -> f64 {
        self.arena_width
    }
    pub fn arena_height(&self) -> f64 {
        self.arena_height
    }
    pub fn dt(&self) -> f64 {
        self.dt
    }
    pub fn gravity(&self) -> f64 {
        self.gravity
    }
    pub fn agent_radius(&self) -> f64 {
        self.agent_radius
    }
    pub fn grid_cell_size(&self) -> f64 {
        self.grid_cell_size
    }
    pub fn naive_grid_crossover(&self) -> usize {
        self.naive_grid_crossover
    }
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Stable key/value provenance form, independent of the YAML scenario
    /// format the surrounding tooling uses. Intended for logging/debugging,
    /// not the binary replay path (§6).
    pub fn to_kv(&self) -> Value {
        json!({
            "arena_width": self.arena_width,
            "arena_height": self.arena_height,
            "dt": self.dt,
            "gravity": self.gravity,
            "agent_radius": self.agent_radius,
            "grid_cell_size": self.grid_cell_size,
            "naive_grid_crossover": self.naive_grid_crossover,
            "restitution": self.restitution,
        })
    }

    pub fn from_kv(value: &Value) -> Result<Self, ConstructError> {
        let field = |name: &str| -> Result<f64, ConstructError> {
            value
                .get(name)
                .and_then(Value::as_f64)
                .ok_or_else(|| ConstructError::MalformedProvenance {
                    field: name.to_string(),
                })
        };
        let crossover = value
            .get("naive_grid_crossover")
            .and_then(Value::as_u64)
            .ok_or_else(|| ConstructError::MalformedProvenance {
                field: "naive_grid_crossover".to_string(),
            })? as usize;
        Parameters::new(
            field("arena_width")?,
            field("arena_height")?,
            field("dt")?,
            field("gravity")?,
            field("agent_radius")?,
            field("grid_cell_size")?,
            crossover,
            field("restitution")?,
        )
    }
}

impl Default for Parameters {
    fn default() -> Self {
        // Reference configuration from the spec: 100x100 arena, ~1 agent per
        // occupied cell at radius 0.3m.
        Parameters {
            arena_width: 100.0,
            arena_height: 100.0,
            dt: 0.1,
            gravity: 9.81,
            agent_radius: 0.3,
            grid_cell_size: 1.0,
            naive_grid_crossover: 150,
            restitution: 1.0,
        }
    }
}
