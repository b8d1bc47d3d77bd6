//! Procedural world: terrain, the winding path, and vegetation.

use glam::Vec3;
use rand::Rng;
use thiserror::Error;

use crate::config::PATH_LENGTH;
use crate::scene::Scene;

pub mod path;
pub mod terrain;
pub mod vegetation;

use path::generate_path;
use terrain::generate_terrain;
use vegetation::generate_vegetation;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("path creation failed: no waypoints generated")]
    EmptyPath,
}

/// Layout the frame loop needs after generation. The blocks themselves live in the scene.
#[derive(Debug, Clone)]
pub struct World {
    waypoints: Vec<Vec3>,
    spawn_candidates: Vec<Vec3>,
}

impl World {
    pub fn new(waypoints: Vec<Vec3>, spawn_candidates: Vec<Vec3>) -> Result<Self, WorldError> {
        if waypoints.is_empty() {
            return Err(WorldError::EmptyPath);
        }
        Ok(Self {
            waypoints,
            spawn_candidates,
        })
    }

    /// Build the whole world into `scene`. The path is laid first so terrain and
    /// vegetation can keep clear of it.
    pub fn generate<R: Rng>(rng: &mut R, scene: &mut Scene) -> Result<Self, WorldError> {
        let layout = generate_path(rng, scene, PATH_LENGTH);
        let world = Self::new(layout.waypoints, layout.spawn_candidates)?;

        let raised = generate_terrain(rng, scene, &world.waypoints);
        let vegetation = generate_vegetation(rng, scene, &world.waypoints);

        log::info!(
            "World built: {} waypoints, {} spawn points, {} terrain bumps, {} trees, {} bushes",
            world.waypoints.len(),
            world.spawn_candidates.len(),
            raised,
            vegetation.trees,
            vegetation.bushes
        );
        Ok(world)
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    pub fn spawn_candidates(&self) -> &[Vec3] {
        &self.spawn_candidates
    }

    pub fn start(&self) -> Vec3 {
        self.waypoints[0]
    }

    /// Horizontal direction from the first waypoint toward the second, or `-Z` for a
    /// single-point path.
    pub fn initial_direction(&self) -> Vec3 {
        match self.waypoints.get(1) {
            Some(next) => {
                let d = *next - self.waypoints[0];
                Vec3::new(d.x, 0.0, d.z).normalize_or(Vec3::NEG_Z)
            }
            None => Vec3::NEG_Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn empty_path_is_fatal() {
        assert_eq!(World::new(Vec::new(), Vec::new()).unwrap_err(), WorldError::EmptyPath);
    }

    #[test]
    fn generated_world_is_deterministic_per_seed() {
        let a = World::generate(&mut SmallRng::seed_from_u64(42), &mut Scene::new()).unwrap();
        let b = World::generate(&mut SmallRng::seed_from_u64(42), &mut Scene::new()).unwrap();
        assert_eq!(a.waypoints(), b.waypoints());
        assert_eq!(a.spawn_candidates(), b.spawn_candidates());
    }

    #[test]
    fn initial_direction_follows_first_segment() {
        let world = World::new(
            vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(world.initial_direction(), Vec3::X);
    }
}
