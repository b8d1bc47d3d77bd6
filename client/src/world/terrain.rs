use glam::Vec3;
use rand::Rng;

use crate::config::*;
use crate::scene::{Block, Scene, SceneObject, rgb};

use super::path::is_near_path;

/// Ground slab plus a sweep of randomly raised blocks. Purely cosmetic; cells under the
/// path corridor stay flat so bumps never poke through the path slabs.
pub fn generate_terrain<R: Rng>(rng: &mut R, scene: &mut Scene, waypoints: &[Vec3]) -> usize {
    scene.add(SceneObject::single(
        Vec3::new(0.0, -0.5, 0.0),
        Block::cuboid(
            Vec3::ZERO,
            Vec3::new(WORLD_SIZE, 1.0, WORLD_SIZE),
            rgb(GROUND_COLOR),
        ),
    ));

    let half = WORLD_SIZE / 2.0;
    let cells = (WORLD_SIZE / TERRAIN_STRIDE) as usize;
    let mut raised = 0;

    for ix in 0..cells {
        for iz in 0..cells {
            let x = -half + ix as f32 * TERRAIN_STRIDE;
            let z = -half + iz as f32 * TERRAIN_STRIDE;
            let height = rng.random::<f32>() * TERRAIN_MAX_HEIGHT;
            if height > TERRAIN_HEIGHT_THRESHOLD && !is_near_path(waypoints, x, z) {
                scene.add(SceneObject::single(
                    Vec3::new(x, height - 0.5, z),
                    Block::cube(Vec3::ZERO, BLOCK_SIZE, rgb(TERRAIN_COLOR)),
                ));
                raised += 1;
            }
        }
    }

    raised
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn raised_blocks_stay_inside_grid_and_height_band() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut scene = Scene::new();
        let raised = generate_terrain(&mut rng, &mut scene, &[]);

        assert_eq!(scene.len(), raised + 1);
        assert!(raised <= 400);
        for object in scene.objects().skip(1) {
            assert!(object.position.x >= -20.0 && object.position.x < 20.0);
            assert!(object.position.z >= -20.0 && object.position.z < 20.0);
            assert!(object.position.y > 0.0 && object.position.y < 1.5);
        }
    }

    #[test]
    fn path_corridor_stays_flat() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut scene = Scene::new();
        let waypoints = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 0.0)];
        generate_terrain(&mut rng, &mut scene, &waypoints);

        for object in scene.objects().skip(1) {
            assert!(!is_near_path(&waypoints, object.position.x, object.position.z));
        }
    }
}
