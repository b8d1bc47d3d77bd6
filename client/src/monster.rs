use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::config::*;
use crate::scene::{Block, ObjectId, Scene, SceneObject, rgb};

/// Stable identifier for a monster. Combat refers to its target through this, never
/// through a reference into the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonsterId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterKind {
    Easy,
    Hard,
}

impl MonsterKind {
    pub fn color(&self) -> [f32; 3] {
        match self {
            MonsterKind::Easy => rgb(EASY_MONSTER_COLOR),
            MonsterKind::Hard => rgb(HARD_MONSTER_COLOR),
        }
    }
}

pub struct Monster {
    pub id: MonsterId,
    pub position: Vec3,
    pub kind: MonsterKind,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub current_rotation: f32,
    pub target_rotation: f32,
    object: ObjectId,
}

impl Monster {
    pub fn spawn(id: MonsterId, position: Vec3, kind: MonsterKind, scene: &mut Scene) -> Self {
        let object = scene.add(SceneObject::new(position, monster_blocks(kind)));
        Self {
            id,
            position,
            kind,
            correct_answers: 0,
            incorrect_answers: 0,
            current_rotation: 0.0,
            target_rotation: 0.0,
            object,
        }
    }

    /// Turn a little further toward the player, taking the short way around.
    pub fn update_face_orientation(&mut self, player_position: Vec3, scene: &mut Scene) {
        let to_player = player_position - self.position;
        self.target_rotation = to_player.x.atan2(to_player.z);
        self.current_rotation = step_toward(self.current_rotation, self.target_rotation);

        if let Some(object) = scene.get_mut(self.object) {
            object.yaw = self.current_rotation;
        }
    }

    pub fn is_in_reach(&self, player_position: Vec3) -> bool {
        player_position.distance(self.position) < COMBAT_DISTANCE
    }

    pub fn is_defeated(&self) -> bool {
        self.correct_answers >= ANSWERS_TO_DEFEAT
    }

    pub fn has_won(&self) -> bool {
        self.incorrect_answers >= MISTAKES_ALLOWED
    }

    pub fn lives_left(&self) -> u32 {
        MISTAKES_ALLOWED.saturating_sub(self.incorrect_answers)
    }

    /// Detach the visuals. Consumes the monster so it cannot be updated afterwards.
    pub fn remove(self, scene: &mut Scene) {
        scene.remove(self.object);
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }
}

/// One blend step from `current` toward `target`. `current` is first shifted by a full
/// turn when the raw difference exceeds half a turn.
pub fn step_toward(current: f32, target: f32) -> f32 {
    let mut current = current;
    let diff = target - current;
    if diff > PI {
        current += TAU;
    } else if diff < -PI {
        current -= TAU;
    }
    current + (target - current) * ROTATION_BLEND
}

fn monster_blocks(kind: MonsterKind) -> Vec<Block> {
    let body = kind.color();
    let eye = rgb(EYE_COLOR);
    let eye_size = Vec3::new(0.1, 0.3, 0.3);

    vec![
        Block::cube(Vec3::ZERO, 1.5, body).with_emissive(0.2),
        Block::cube(Vec3::new(0.0, 1.5, 0.0), 1.2, body).with_emissive(0.2),
        Block::cuboid(Vec3::new(-0.4, 1.7, 0.6), eye_size, eye).with_emissive(2.0),
        Block::cuboid(Vec3::new(0.4, 1.7, 0.6), eye_size, eye).with_emissive(2.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arc(a: f32, b: f32) -> f32 {
        ((a - b + PI).rem_euclid(TAU) - PI).abs()
    }

    #[test]
    fn faces_player_on_positive_z() {
        let mut scene = Scene::new();
        let mut monster = Monster::spawn(MonsterId(0), Vec3::ZERO, MonsterKind::Easy, &mut scene);
        monster.current_rotation = 1.0;

        for _ in 0..300 {
            monster.update_face_orientation(Vec3::new(0.0, 1.8, 10.0), &mut scene);
        }
        assert!(monster.target_rotation.abs() < 1e-6);
        assert!(monster.current_rotation.abs() < 1e-4);
        let yaw = scene.get(monster.object()).map(|o| o.yaw);
        assert_eq!(yaw, Some(monster.current_rotation));
    }

    #[test]
    fn crosses_the_seam_the_short_way() {
        // 3.0 and -3.0 are 0.28 rad apart through PI, 6 rad apart through zero.
        let next = step_toward(3.0, -3.0);
        assert!(next < -PI);
        assert!(arc(next, -3.0) < arc(3.0, -3.0));
    }

    #[test]
    fn counters_drive_outcome_checks() {
        let mut scene = Scene::new();
        let mut monster = Monster::spawn(MonsterId(3), Vec3::ONE, MonsterKind::Hard, &mut scene);
        assert_eq!(monster.lives_left(), 2);
        monster.incorrect_answers = 1;
        assert_eq!(monster.lives_left(), 1);
        assert!(!monster.has_won());
        monster.correct_answers = ANSWERS_TO_DEFEAT;
        assert!(monster.is_defeated());
    }

    #[test]
    fn remove_detaches_visuals() {
        let mut scene = Scene::new();
        let monster = Monster::spawn(MonsterId(1), Vec3::ZERO, MonsterKind::Hard, &mut scene);
        let object = monster.object();
        assert_eq!(scene.get(object).map(|o| o.blocks.len()), Some(4));

        monster.remove(&mut scene);
        assert!(scene.get(object).is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn reach_is_strictly_inside_combat_distance() {
        let mut scene = Scene::new();
        let monster = Monster::spawn(MonsterId(2), Vec3::ZERO, MonsterKind::Easy, &mut scene);
        assert!(monster.is_in_reach(Vec3::new(3.9, 0.0, 0.0)));
        assert!(!monster.is_in_reach(Vec3::new(4.0, 0.0, 0.0)));
    }
}
