use std::time::Duration;

// World layout
pub const WORLD_SIZE: f32 = 40.0;
pub const BLOCK_SIZE: f32 = 1.0;
pub const TERRAIN_STRIDE: f32 = 2.0;
pub const TERRAIN_MAX_HEIGHT: f32 = 2.0;
pub const TERRAIN_HEIGHT_THRESHOLD: f32 = 0.5;

// Path
pub const PATH_LENGTH: usize = 30;
pub const PATH_STEP: f32 = 3.0;
pub const PATH_START_INSET: f32 = 5.0;
pub const PATH_TURN_CHANCE: f64 = 0.15;
pub const PATH_MAX_TURN: f32 = std::f32::consts::FRAC_PI_4; // full width of the heading delta
pub const PATH_WIDTH: f32 = 4.0;
pub const PATH_SLAB_HEIGHT: f32 = 0.5;
pub const PATH_SLAB_LENGTH: f32 = 3.0;
pub const SPAWN_STRIDE: usize = 5;

// Vegetation
pub const TREE_ATTEMPTS: usize = 20;
pub const BUSH_ATTEMPTS: usize = 30;
pub const TRUNK_MIN_HEIGHT: f32 = 4.0;
pub const TRUNK_HEIGHT_JITTER: f32 = 2.0;
pub const CANOPY_LAYERS: i32 = 3;

// Colors
pub const SKY_COLOR: u32 = 0x87ceeb;
pub const GROUND_COLOR: u32 = 0x2d5a27;
pub const TERRAIN_COLOR: u32 = 0x3a6a34;
pub const PATH_COLOR: u32 = 0x8b4513;
pub const TRUNK_COLOR: u32 = 0x4a2f10;
pub const LEAF_COLOR: u32 = 0x2d5a27;
pub const BUSH_COLOR: u32 = 0x3a6a34;
pub const EASY_MONSTER_COLOR: u32 = 0xff0000;
pub const HARD_MONSTER_COLOR: u32 = 0x800000;
pub const EYE_COLOR: u32 = 0xffff00;
pub const GAME_OVER_PARTICLE_COLOR: u32 = 0xff0000;

// Lighting and fog
pub const AMBIENT_LIGHT: f32 = 0.6;
pub const DIRECTIONAL_LIGHT: f32 = 0.8;
pub const LIGHT_POSITION: [f32; 3] = [10.0, 20.0, 10.0];
pub const FOG_NEAR: f32 = 20.0;
pub const FOG_FAR: f32 = 40.0;

// Camera
pub const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

// Player movement (per tick)
pub const EYE_HEIGHT: f32 = 1.8;
pub const MOVE_SPEED: f32 = 0.1;
pub const GRAVITY: f32 = 0.002;
pub const JUMP_FORCE: f32 = 0.15;
pub const FRICTION: f32 = 0.9;
pub const MOUSE_SENSITIVITY: f32 = 0.002;
pub const MAX_PITCH: f32 = 1.5;

// Monsters
pub const MONSTER_SPAWN_INTERVAL: Duration = Duration::from_millis(5000);
pub const SPAWN_MIN_DISTANCE: f32 = 10.0;
pub const SPAWN_MAX_DISTANCE: f32 = 30.0;
pub const MONSTER_SPAWN_HEIGHT: f32 = 1.0;
pub const ROTATION_BLEND: f32 = 0.1;
pub const COMBAT_DISTANCE: f32 = 4.0;

// Combat
pub const ANSWERS_TO_DEFEAT: u32 = 4;
pub const MISTAKES_ALLOWED: u32 = 2;
pub const VICTORY_NOTICE_DURATION: Duration = Duration::from_secs(2);
pub const RESTART_DELAY: Duration = Duration::from_secs(2);

// Particles
pub const PARTICLE_SIZE: f32 = 0.2;
pub const PARTICLE_GRAVITY: f32 = 0.01;
pub const PARTICLE_DECAY: f32 = 0.02;
pub const PARTICLE_SPREAD: f32 = 0.3;
pub const PARTICLE_LIFT: f32 = 0.2;
pub const DEFEAT_PARTICLES: usize = 50;
pub const GAME_OVER_PARTICLES: usize = 100;

// Camera shake after game over
pub const SHAKE_INTENSITY: f32 = 0.5;
pub const SHAKE_DECAY: f32 = 0.95;
pub const SHAKE_CUTOFF: f32 = 0.001;
