//! Neighbor queries
//!
//! A piranha's neighbors are every *other* live piranha strictly closer than
//! the neighbor radius. Two implementations with identical membership and
//! ordering (ascending index, i.e. creation order):
//! - brute force, O(n²), plenty for a ~30 fish swarm
//! - a uniform grid with cell size equal to the radius

use std::collections::HashMap;

use glam::Vec2;

use super::piranha::Piranha;
use crate::settings::NeighborIndex;

/// Indices of `agents[idx]`'s neighbors within `radius`
pub fn neighbors_of(agents: &[Piranha], idx: usize, radius: f32) -> Vec<usize> {
    let me = agents[idx].pos;
    agents
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != idx && is_neighbor(me, other, radius))
        .map(|(j, _)| j)
        .collect()
}

/// Pure distance test, symmetric in its two positions
#[inline]
fn is_neighbor(me: Vec2, other: &Piranha, radius: f32) -> bool {
    !other.destroyed && (other.pos - me).length() < radius
}

/// Uniform grid over piranha positions
///
/// Positions outside the world (rule 4 is soft) land in negative cells.
#[derive(Debug, Default)]
pub struct NeighborGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl NeighborGrid {
    pub fn build(agents: &[Piranha], cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "grid cell size must be positive");
        let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (i, p) in agents.iter().enumerate() {
            cells.entry(cell_of(p.pos, cell_size)).or_default().push(i);
        }
        Self { cell_size, cells }
    }

    /// Same contract as [`neighbors_of`]; `radius` must not exceed the cell size
    pub fn neighbors_of(&self, agents: &[Piranha], idx: usize, radius: f32) -> Vec<usize> {
        debug_assert!(radius <= self.cell_size);
        let me = agents[idx].pos;
        let (cx, cy) = cell_of(me, self.cell_size);
        let mut found = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                found.extend(
                    bucket
                        .iter()
                        .copied()
                        .filter(|&j| j != idx && is_neighbor(me, &agents[j], radius)),
                );
            }
        }
        // Sum order feeds the rules' float math; keep it identical to brute force
        found.sort_unstable();
        found
    }
}

#[inline]
fn cell_of(pos: Vec2, cell_size: f32) -> (i32, i32) {
    (
        (pos.x / cell_size).floor() as i32,
        (pos.y / cell_size).floor() as i32,
    )
}

/// Neighbor lists for every agent, computed from one snapshot
pub fn all_neighbors(agents: &[Piranha], radius: f32, index: NeighborIndex) -> Vec<Vec<usize>> {
    match index {
        NeighborIndex::BruteForce => (0..agents.len())
            .map(|i| neighbors_of(agents, i, radius))
            .collect(),
        NeighborIndex::Grid => {
            let grid = NeighborGrid::build(agents, radius);
            (0..agents.len())
                .map(|i| grid.neighbors_of(agents, i, radius))
                .collect()
        }
    }
}
