use glam::Vec3;
use rand::Rng;

use crate::config::*;
use crate::scene::{Block, ObjectId, Scene, SceneObject};

pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// 1.0 at birth, removed once it reaches zero.
    pub life: f32,
    object: ObjectId,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

#[derive(Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// One particle flying out of `origin` with a random sideways push and a little lift.
    pub fn spawn<R: Rng>(&mut self, origin: Vec3, color: [f32; 3], rng: &mut R, scene: &mut Scene) {
        let velocity = Vec3::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            rng.random::<f32>() * PARTICLE_LIFT,
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        let object = scene.add(SceneObject::single(
            origin,
            Block::cube(Vec3::ZERO, PARTICLE_SIZE, color),
        ));
        self.particles.push(Particle {
            position: origin,
            velocity,
            life: 1.0,
            object,
        });
    }

    pub fn burst<R: Rng>(
        &mut self,
        origin: Vec3,
        color: [f32; 3],
        count: usize,
        rng: &mut R,
        scene: &mut Scene,
    ) {
        for _ in 0..count {
            self.spawn(origin, color, rng, scene);
        }
    }

    /// Integrate one tick. Particles whose life drops to zero are detached this tick.
    pub fn update(&mut self, scene: &mut Scene) {
        self.particles.retain_mut(|particle| {
            particle.position += particle.velocity;
            particle.velocity.y -= PARTICLE_GRAVITY;
            particle.life -= PARTICLE_DECAY;

            if !particle.is_alive() {
                scene.remove(particle.object);
                return false;
            }
            if let Some(object) = scene.get_mut(particle.object) {
                object.position = particle.position;
                object.opacity = particle.life;
            }
            true
        });
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
