use glam::Vec3;
use rand::Rng;

use crate::config::*;
use crate::scene::{Block, Scene, SceneObject, rgb};

/// Waypoints and spawn candidates produced by one random walk.
pub struct PathLayout {
    pub waypoints: Vec<Vec3>,
    pub spawn_candidates: Vec<Vec3>,
}

/// Walk `length` steps from near the west edge of the world. The heading drifts by a small
/// random delta now and then, so the path winds without doubling back.
pub fn generate_path<R: Rng>(rng: &mut R, scene: &mut Scene, length: usize) -> PathLayout {
    let mut position = Vec3::new(-WORLD_SIZE / 2.0 + PATH_START_INSET, 0.0, 0.0);
    let mut heading = 0.0_f32;

    let mut waypoints = Vec::with_capacity(length);
    let mut spawn_candidates = Vec::with_capacity(length / SPAWN_STRIDE + 1);

    for i in 0..length {
        waypoints.push(position);
        scene.add(path_slab(position));

        if rng.random_bool(PATH_TURN_CHANCE) {
            heading += (rng.random::<f32>() - 0.5) * PATH_MAX_TURN;
        }

        position.x += heading.cos() * PATH_STEP;
        position.z += heading.sin() * PATH_STEP;

        if i % SPAWN_STRIDE == 0 {
            spawn_candidates.push(position);
        }
    }

    PathLayout {
        waypoints,
        spawn_candidates,
    }
}

/// Slabs stay axis-aligned even where the heading has turned.
fn path_slab(center: Vec3) -> SceneObject {
    let block = Block::cuboid(
        Vec3::ZERO,
        Vec3::new(PATH_WIDTH, PATH_SLAB_HEIGHT, PATH_SLAB_LENGTH),
        rgb(PATH_COLOR),
    )
    .with_emissive(0.4);
    SceneObject::single(center, block)
}

/// Horizontal distance test against every waypoint.
pub fn is_near_path(waypoints: &[Vec3], x: f32, z: f32) -> bool {
    waypoints.iter().any(|point| {
        let dx = x - point.x;
        let dz = z - point.z;
        (dx * dx + dz * dz).sqrt() < PATH_WIDTH
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn walk_has_fixed_step_and_candidate_stride() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut scene = Scene::new();
        let layout = generate_path(&mut rng, &mut scene, PATH_LENGTH);

        assert_eq!(layout.waypoints.len(), PATH_LENGTH);
        assert_eq!(layout.spawn_candidates.len(), PATH_LENGTH.div_ceil(SPAWN_STRIDE));
        assert_eq!(scene.len(), PATH_LENGTH);

        for pair in layout.waypoints.windows(2) {
            assert!((pair[0].distance(pair[1]) - PATH_STEP).abs() < 1e-4);
        }
    }

    #[test]
    fn starts_near_west_edge() {
        let mut rng = SmallRng::seed_from_u64(1);
        let layout = generate_path(&mut rng, &mut Scene::new(), PATH_LENGTH);
        assert_eq!(layout.waypoints[0], Vec3::new(-15.0, 0.0, 0.0));
    }

    #[test]
    fn spawn_candidates_sit_one_step_past_their_waypoint() {
        let mut rng = SmallRng::seed_from_u64(99);
        let layout = generate_path(&mut rng, &mut Scene::new(), PATH_LENGTH);

        // Candidate k is recorded after advancing from waypoint k * SPAWN_STRIDE.
        for (k, candidate) in layout.spawn_candidates.iter().enumerate() {
            let next = k * SPAWN_STRIDE + 1;
            if next < layout.waypoints.len() {
                assert!(candidate.distance(layout.waypoints[next]) < 1e-4);
            }
        }
    }

    #[test]
    fn near_path_uses_path_width() {
        let waypoints = [Vec3::ZERO];
        assert!(is_near_path(&waypoints, 3.9, 0.0));
        assert!(!is_near_path(&waypoints, 4.0, 0.0));
        assert!(!is_near_path(&[], 0.0, 0.0));
    }
}
