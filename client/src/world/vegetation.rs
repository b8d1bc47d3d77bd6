use glam::Vec3;
use rand::Rng;

use crate::config::*;
use crate::scene::{Block, Scene, SceneObject, rgb};

use super::path::is_near_path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VegetationCounts {
    pub trees: usize,
    pub bushes: usize,
}

/// Scatter trees and bushes. Spots that land on the path corridor are skipped, not
/// resampled, so the placed counts can fall short of the attempt counts.
pub fn generate_vegetation<R: Rng>(
    rng: &mut R,
    scene: &mut Scene,
    waypoints: &[Vec3],
) -> VegetationCounts {
    let mut counts = VegetationCounts::default();

    for _ in 0..TREE_ATTEMPTS {
        let (x, z) = random_spot(rng);
        if !is_near_path(waypoints, x, z) {
            let trunk_height = TRUNK_MIN_HEIGHT + rng.random::<f32>() * TRUNK_HEIGHT_JITTER;
            scene.add(SceneObject::new(Vec3::new(x, 0.0, z), tree_blocks(trunk_height)));
            counts.trees += 1;
        }
    }

    for _ in 0..BUSH_ATTEMPTS {
        let (x, z) = random_spot(rng);
        if !is_near_path(waypoints, x, z) {
            let size = 1.0 + rng.random::<f32>();
            scene.add(SceneObject::new(Vec3::new(x, 0.0, z), bush_blocks(size)));
            counts.bushes += 1;
        }
    }

    counts
}

fn random_spot<R: Rng>(rng: &mut R) -> (f32, f32) {
    (
        (rng.random::<f32>() - 0.5) * WORLD_SIZE,
        (rng.random::<f32>() - 0.5) * WORLD_SIZE,
    )
}

/// Stacked trunk topped by three shrinking diamond layers.
pub fn tree_blocks(trunk_height: f32) -> Vec<Block> {
    let trunk = rgb(TRUNK_COLOR);
    let leaves = rgb(LEAF_COLOR);

    let trunk_blocks = trunk_height.ceil() as i32;
    let mut blocks: Vec<Block> = (0..trunk_blocks)
        .map(|i| Block::cube(Vec3::new(0.0, i as f32, 0.0), BLOCK_SIZE, trunk))
        .collect();

    for layer in 0..CANOPY_LAYERS {
        let radius = CANOPY_LAYERS - layer;
        let y = trunk_height + layer as f32;
        blocks.extend(
            diamond(radius, radius as f32)
                .map(|(dx, dz)| Block::cube(Vec3::new(dx as f32, y, dz as f32), BLOCK_SIZE, leaves)),
        );
    }

    blocks
}

/// 3x3 footprint trimmed to a diamond when `size` is below 2.
pub fn bush_blocks(size: f32) -> Vec<Block> {
    let color = rgb(BUSH_COLOR);
    diamond(1, size)
        .map(|(dx, dz)| Block::cube(Vec3::new(dx as f32, 0.0, dz as f32), BLOCK_SIZE, color))
        .collect()
}

/// Cells of a `(2r+1)^2` square whose Manhattan distance from the centre is within `limit`.
fn diamond(radius: i32, limit: f32) -> impl Iterator<Item = (i32, i32)> {
    (-radius..=radius)
        .flat_map(move |dx| (-radius..=radius).map(move |dz| (dx, dz)))
        .filter(move |(dx, dz)| (dx.abs() + dz.abs()) as f32 <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn tree_has_trunk_and_three_canopy_layers() {
        let blocks = tree_blocks(4.5);
        let trunk = blocks.iter().filter(|b| b.color == rgb(TRUNK_COLOR)).count();
        assert_eq!(trunk, 5);
        // Diamonds of radius 3, 2, 1 hold 25, 13 and 5 cells.
        assert_eq!(blocks.len() - trunk, 25 + 13 + 5);
        let top = blocks.iter().map(|b| b.offset.y).fold(f32::MIN, f32::max);
        assert!((top - 6.5).abs() < 1e-6);
    }

    #[test]
    fn bush_footprint_depends_on_size() {
        assert_eq!(bush_blocks(1.0).len(), 5);
        assert_eq!(bush_blocks(1.99).len(), 5);
        assert_eq!(bush_blocks(2.0).len(), 9);
    }

    #[test]
    fn placement_is_best_effort_and_avoids_path() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut scene = Scene::new();
        let waypoints: Vec<Vec3> = (0..14).map(|i| Vec3::new(-20.0 + i as f32 * 3.0, 0.0, 0.0)).collect();
        let counts = generate_vegetation(&mut rng, &mut scene, &waypoints);

        assert!(counts.trees <= TREE_ATTEMPTS);
        assert!(counts.bushes <= BUSH_ATTEMPTS);
        assert_eq!(scene.len(), counts.trees + counts.bushes);
        for object in scene.objects() {
            assert!(!is_near_path(&waypoints, object.position.x, object.position.z));
        }
    }
}
