//! Error taxonomy (§7). Three categories, each its own `thiserror` enum:
//! construction errors fail `World::construct` fast; contract violations
//! reject a single operation and leave world state untouched. Numerical
//! degeneracies (§4.4 zero-distance tie-break, §4.5 time-of-flight clamp)
//! are handled defensively in place and never appear here.

use crate::domain::AgentId;
use thiserror::Error;

/// Invalid parameters at `World::construct` time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstructError {
    #[error("arena dimensions must be positive, got width={width}, height={height}")]
    NonPositiveDimension { width: f64, height: f64 },

    #[error("timestep must be positive, got dt={dt}")]
    NonPositiveTimestep { dt: f64 },

    #[error("agent radius must be positive, got radius={radius}")]
    NonPositiveRadius { radius: f64 },

    #[error(
        "grid cell size {cell_size} is invalid: must be in (0, {min_arena_dim}] and >= 2*radius ({})",
        2.0 * agent_radius
    )]
    InvalidCellSize {
        cell_size: f64,
        min_arena_dim: f64,
        agent_radius: f64,
    },

    #[error("malformed provenance value: missing or non-numeric field {field}")]
    MalformedProvenance { field: String },
}

/// Rejection of a single operation that references world state it cannot
/// legally touch. The world is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContractError {
    #[error("unknown agent id {0:?}")]
    UnknownAgent(AgentId),

    #[error("agent {0:?} is dead")]
    DeadAgent(AgentId),

    #[error("launch parameters are not finite")]
    NonFiniteLaunchParameters,
}

/// Unified result alias for public, fallible world operations.
pub type ConstructResult<T> = Result<T, ConstructError>;
pub type ContractResult<T> = Result<T, ContractError>;
