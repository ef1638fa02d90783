//! Uniform spatial grid (§4.2). Rebuilt each step from the current set of
//! live agents; reused in place across steps rather than reallocated.
//!
//! Pair identity is canonicalized as `(min_id, max_id)` so the grid path and
//! the naive path agree bit-for-bit on *which* pairs exist (§8 property 6),
//! even though they visit cells in different orders.

use crate::domain::{Agent, AgentId};

pub struct SpatialGrid {
    cell_size: f64,
    rows: usize,
    cols: usize,
    cells: Vec<Vec<AgentId>>,
}

/// Forward half of the 3x3 neighborhood stencil: a cell pairs with neighbors
/// whose (row, col) is lexicographically greater than its own. Combined with
/// intra-cell i<j enumeration this visits every unordered pair of agents in
/// cells within one cell of each other exactly once.
const FORWARD_NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, 1), (1, -1), (1, 0), (1, 1)];

impl SpatialGrid {
    pub fn new(arena_width: f64, arena_height: f64, cell_size: f64) -> Self {
        let cols = ((arena_width / cell_size).ceil() as usize).max(1);
        let rows = ((arena_height / cell_size).ceil() as usize).max(1);
        SpatialGrid {
            cell_size,
            rows,
            cols,
            cells: vec![Vec::new(); rows * cols],
        }
    }

    fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
        let col = (x / self.cell_size).floor();
        let row = (y / self.cell_size).floor();
        let col = (col.max(0.0) as usize).min(self.cols - 1);
        let row = (row.max(0.0) as usize).min(self.rows - 1);
        (row, col)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Clears prior contents and reinserts every live agent by cell.
    pub fn rebuild(&mut self, agents: &[Agent]) {
        for cell in &mut self.cells {
            cell.clear();
        }
        for agent in agents {
            if !agent.alive {
                continue;
            }
            let (row, col) = self.cell_of(agent.pos.x, agent.pos.y);
            let idx = self.index(row, col);
            self.cells[idx].push(agent.id);
        }
    }

    pub fn cells_occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Every unordered pair of agent ids whose cells lie within a 3x3
    /// neighborhood, each produced exactly once, in cell-row-major order.
    pub fn unordered_neighbor_pairs(&self) -> Vec<(AgentId, AgentId)> {
        let mut pairs = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let here = &self.cells[self.index(row, col)];
                if here.is_empty() {
                    continue;
                }
                for i in 0..here.len() {
                    for j in (i + 1)..here.len() {
                        pairs.push(canonical_pair(here[i], here[j]));
                    }
                }
                for &(dr, dc) in &FORWARD_NEIGHBOR_OFFSETS {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    if nr < 0 || nc < 0 || nr >= self.rows as isize || nc >= self.cols as isize {
                        continue;
                    }
                    let neighbor = &self.cells[self.index(nr as usize, nc as usize)];
                    if neighbor.is_empty() {
                        continue;
                    }
                    for &a in here {
                        for &b in neighbor {
                            pairs.push(canonical_pair(a, b));
                        }
                    }
                }
            }
        }
        pairs
    }
}

fn canonical_pair(a: AgentId, b: AgentId) -> (AgentId, AgentId) {
    if a.0 <= b.0 {
        (a, b)
    } else {
        (b, a)
    }
}
