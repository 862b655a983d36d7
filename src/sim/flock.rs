//! Flock simulator
//!
//! Synchronous update in three passes:
//! 1. snapshot the swarm
//! 2. steer every piranha against the snapshot (pure)
//! 3. integrate positions with the new velocities

use super::bounds::WorldBounds;
use super::neighbors::all_neighbors;
use super::piranha::Piranha;
use crate::assert_finite;
use crate::settings::NeighborIndex;

/// Advance every live piranha by one tick
pub fn advance(piranhas: &mut [Piranha], bounds: WorldBounds, index: NeighborIndex) {
    let snapshot = piranhas.to_vec();
    let radius = bounds.neighbor_distance();
    let neighbor_lists = all_neighbors(&snapshot, radius, index);

    let steered: Vec<_> = snapshot
        .iter()
        .zip(&neighbor_lists)
        .map(|(p, ns)| {
            let neighbors: Vec<&Piranha> = ns.iter().map(|&j| &snapshot[j]).collect();
            p.steered_velocity(&neighbors)
        })
        .collect();

    for (p, vel) in piranhas.iter_mut().zip(steered) {
        if p.destroyed {
            continue;
        }
        assert_finite(vel, "piranha velocity");
        p.vel = vel;
    }
    for p in piranhas.iter_mut().filter(|p| !p.destroyed) {
        p.integrate();
    }
}

/// Propagate new world extents to every piranha (no repositioning)
pub fn resize(piranhas: &mut [Piranha], bounds: WorldBounds) {
    for p in piranhas.iter_mut() {
        p.max = bounds.max();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn spawn_swarm(n: usize, bounds: WorldBounds, seed: u64) -> Vec<Piranha> {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..n as u32)
            .map(|id| Piranha::spawn(id, bounds, &mut rng))
            .collect()
    }

    #[test]
    fn test_update_is_simultaneous() {
        // Result must not depend on iteration order: reverse the swarm and compare
        let bounds = WorldBounds::new(600.0, 600.0);
        let mut forward = spawn_swarm(12, bounds, 3);
        let mut reversed: Vec<_> = forward.iter().rev().cloned().collect();

        advance(&mut forward, bounds, NeighborIndex::BruteForce);
        advance(&mut reversed, bounds, NeighborIndex::BruteForce);

        for p in &forward {
            let q = reversed.iter().find(|q| q.id == p.id).unwrap();
            assert!((p.vel - q.vel).length() < 1e-4);
            assert!((p.pos - q.pos).length() < 1e-4);
        }
    }

    #[test]
    fn test_steering_reads_pre_tick_state() {
        let bounds = WorldBounds::new(1000.0, 700.0);
        let a = Piranha::at(0, Vec2::new(100.0, 100.0), Vec2::new(5.0, 0.0), bounds);
        let b = Piranha::at(1, Vec2::new(120.0, 100.0), Vec2::new(-5.0, 0.0), bounds);
        let expected_b = b.steered_velocity(&[&a]);

        let mut swarm = vec![a, b];
        advance(&mut swarm, bounds, NeighborIndex::BruteForce);
        assert_eq!(swarm[1].vel, expected_b);
        assert_eq!(swarm[1].pos, Vec2::new(120.0, 100.0) + expected_b);
    }

    #[test]
    fn test_grid_and_brute_force_agree() {
        let bounds = WorldBounds::new(1000.0, 700.0);
        let mut brute = spawn_swarm(SWARM_SIZE, bounds, 11);
        let mut grid = brute.clone();
        for _ in 0..100 {
            advance(&mut brute, bounds, NeighborIndex::BruteForce);
            advance(&mut grid, bounds, NeighborIndex::Grid);
        }
        for (a, b) in brute.iter().zip(&grid) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.vel, b.vel);
        }
    }

    #[test]
    fn test_resize_keeps_positions() {
        let bounds = WorldBounds::new(1000.0, 700.0);
        let mut swarm = spawn_swarm(5, bounds, 1);
        let before: Vec<_> = swarm.iter().map(|p| p.pos).collect();
        resize(&mut swarm, WorldBounds::new(400.0, 300.0));
        for (p, pos) in swarm.iter().zip(before) {
            assert_eq!(p.pos, pos);
            assert_eq!(p.max, Vec2::new(400.0, 300.0));
        }
    }

    #[test]
    fn test_swarm_stays_near_world_for_long_runs() {
        // Rule 4 decelerates at ~0.3/tick against a max speed of 6, so a fish
        // heading straight out overshoots the edge by roughly 60-130 units
        const MARGIN: f32 = 200.0;
        let bounds = WorldBounds::new(1000.0, 700.0);
        let mut swarm = spawn_swarm(SWARM_SIZE, bounds, 42);
        for _ in 0..1000 {
            advance(&mut swarm, bounds, NeighborIndex::BruteForce);
            for p in &swarm {
                assert!(p.pos.x >= -MARGIN && p.pos.x <= 1000.0 + MARGIN, "x escaped: {:?}", p.pos);
                assert!(p.pos.y >= -MARGIN && p.pos.y <= 700.0 + MARGIN, "y escaped: {:?}", p.pos);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_speed_never_exceeds_max(seed in any::<u64>(), ticks in 1usize..60, startled in any::<bool>()) {
            let bounds = WorldBounds::new(800.0, 500.0);
            let mut swarm = spawn_swarm(SWARM_SIZE, bounds, seed);
            for p in &mut swarm {
                p.startled = startled;
            }
            for _ in 0..ticks {
                advance(&mut swarm, bounds, NeighborIndex::BruteForce);
                for p in &swarm {
                    prop_assert!(p.vel.length() <= SWARM_MAX_SPEED + 1e-4);
                }
            }
        }
    }
}
