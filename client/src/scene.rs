//! Block scene graph shared by the world generators, monsters, particles and the renderer.
//!
//! Everything in the game is drawn as axis-aligned boxes. A [`SceneObject`] is a group of
//! boxes placed relative to a common origin and rotated around Y as a whole.

use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;

/// Split a `0xRRGGBB` sRGB color into channels in `0.0..=1.0`.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// One box of a scene object, in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub offset: Vec3,
    pub size: Vec3,
    pub color: [f32; 3],
    /// Extra self-illumination added on top of lighting (eyes, path glow).
    pub emissive: f32,
}

impl Block {
    pub fn cube(offset: Vec3, size: f32, color: [f32; 3]) -> Self {
        Self {
            offset,
            size: Vec3::splat(size),
            color,
            emissive: 0.0,
        }
    }

    pub fn cuboid(offset: Vec3, size: Vec3, color: [f32; 3]) -> Self {
        Self {
            offset,
            size,
            color,
            emissive: 0.0,
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }
}

pub struct SceneObject {
    pub position: Vec3,
    pub yaw: f32,
    pub opacity: f32,
    pub blocks: Vec<Block>,
}

impl SceneObject {
    pub fn new(position: Vec3, blocks: Vec<Block>) -> Self {
        Self {
            position,
            yaw: 0.0,
            opacity: 1.0,
            blocks,
        }
    }

    /// A single box centred on `position`.
    pub fn single(position: Vec3, block: Block) -> Self {
        Self::new(position, vec![block])
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_y(self.yaw), self.position)
    }
}

slotmap::new_key_type! {
    /// Handle to an object in the [`Scene`]. Stale handles resolve to nothing.
    pub struct ObjectId;
}

/// A box ready to draw: world transform and RGBA color.
#[derive(Clone, Copy, Debug)]
pub struct BlockInstance {
    pub model: Mat4,
    pub color: [f32; 4],
    pub emissive: f32,
}

#[derive(Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Detach an object. Returns `None` if the handle is stale.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Flatten every object into drawable boxes, opaque boxes first so translucent ones
    /// blend over finished geometry.
    pub fn instances(&self) -> Vec<BlockInstance> {
        let mut opaque = Vec::new();
        let mut translucent = Vec::new();
        for object in self.objects() {
            let model = object.model_matrix();
            let target = if object.opacity < 1.0 {
                &mut translucent
            } else {
                &mut opaque
            };
            for block in &object.blocks {
                let [r, g, b] = block.color;
                target.push(BlockInstance {
                    model: model
                        * Mat4::from_translation(block.offset)
                        * Mat4::from_scale(block.size),
                    color: [r, g, b, object.opacity.clamp(0.0, 1.0)],
                    emissive: block.emissive,
                });
            }
        }
        opaque.append(&mut translucent);
        opaque
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(position: Vec3) -> SceneObject {
        SceneObject::single(position, Block::cube(Vec3::ZERO, 1.0, rgb(0xffffff)))
    }

    #[test]
    fn rgb_splits_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x0000ff), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut scene = Scene::new();
        let first = scene.add(unit(Vec3::ZERO));
        assert!(scene.remove(first).is_some());

        let second = scene.add(unit(Vec3::X));
        assert!(scene.get(first).is_none());
        assert!(scene.remove(first).is_none());
        assert_eq!(scene.get(second).map(|o| o.position), Some(Vec3::X));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn translucent_instances_come_last() {
        let mut scene = Scene::new();
        let faded = scene.add(unit(Vec3::ZERO));
        scene.add(unit(Vec3::Y));
        if let Some(object) = scene.get_mut(faded) {
            object.opacity = 0.5;
        }

        let instances = scene.instances();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].color[3], 1.0);
        assert_eq!(instances[1].color[3], 0.5);
    }
}
