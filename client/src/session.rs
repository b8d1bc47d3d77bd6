//! Session state and the per-frame update loop.
//!
//! Everything the frame callback mutates lives in [`Session`]. The front end feeds it
//! input and a timestamp every frame, draws `session.scene`, and reacts to the
//! [`GameEvent`]s it drains afterwards.

use std::time::Duration;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::combat::{AnswerOutcome, Combat, status_line};
use crate::config::*;
use crate::input::{InputAction, InputState};
use crate::monster::{Monster, MonsterId, MonsterKind};
use crate::particles::ParticleSystem;
use crate::player::Player;
use crate::scene::{Scene, rgb};
use crate::world::{World, WorldError};

/// Things the UI layer has to show or do.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// `seq` is the number answers typed for this problem must carry.
    ProblemPresented {
        seq: u64,
        question: String,
        status: String,
    },
    CombatEnded,
    VictoryNoticeShown,
    VictoryNoticeExpired,
    GameOver,
    /// The game-over delay elapsed; start a brand new session.
    Restart,
}

struct CameraShake {
    origin: Vec3,
    intensity: f32,
}

pub struct Session {
    pub scene: Scene,
    pub player: Player,
    world: World,
    monsters: Vec<Monster>,
    next_monster_id: u32,
    combat: Combat,
    particles: ParticleSystem,
    last_spawn: Option<Duration>,
    victory_notice_until: Option<Duration>,
    restart_at: Option<Duration>,
    shake: Option<CameraShake>,
    events: Vec<GameEvent>,
    now: Duration,
    rng: SmallRng,
}

impl Session {
    pub fn new(seed: u64) -> Result<Self, WorldError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut scene = Scene::new();
        let world = World::generate(&mut rng, &mut scene)?;
        Ok(Self::with_world(world, scene, rng))
    }

    /// Start a session on an already built world. The player stands on the first
    /// waypoint looking down the path.
    pub fn with_world(world: World, scene: Scene, rng: SmallRng) -> Self {
        let mut player = Player::new(world.start());
        player.face(world.initial_direction());
        log::info!("Starting position: {:?}", player.position);

        Self {
            scene,
            player,
            world,
            monsters: Vec::new(),
            next_monster_id: 0,
            combat: Combat::new(),
            particles: ParticleSystem::new(),
            last_spawn: None,
            victory_notice_until: None,
            restart_at: None,
            shake: None,
            events: Vec::new(),
            now: Duration::ZERO,
            rng,
        }
    }

    /// Advance one frame. `now` is the time since the session started.
    pub fn tick(&mut self, now: Duration, input: &mut InputState) {
        self.now = now;

        for action in input.take_actions() {
            self.handle_action(action, input);
        }

        self.update_player(input);
        self.spawn_monster(now);
        self.update_monsters();
        self.check_monster_collision(input);
        self.particles.update(&mut self.scene);
        self.update_effects(now);
    }

    fn handle_action(&mut self, action: InputAction, input: &mut InputState) {
        match action {
            InputAction::Jump => {
                if self.can_move(input) {
                    self.player.jump();
                }
            }
            InputAction::ShowProblem => {
                if self.combat.present_new_problem(&mut self.rng).is_some() {
                    self.announce_problem();
                }
            }
            InputAction::SubmitAnswer { seq, raw } => {
                if seq == self.combat.problem_seq() {
                    self.submit_answer(&raw);
                } else {
                    log::debug!("Dropping answer {raw:?} typed for problem {seq}");
                }
            }
        }
    }

    fn can_move(&self, input: &InputState) -> bool {
        input.cursor_grabbed() && !self.combat.is_in_combat() && !self.combat.is_game_over()
    }

    /// Mouse look stays live during combat; walking does not. The delta is drained every
    /// tick either way.
    fn update_player(&mut self, input: &mut InputState) {
        let (dx, dy) = input.consume_mouse_delta();
        if !input.cursor_grabbed() || self.combat.is_game_over() {
            return;
        }
        self.player.look(dx, dy);
        if self.can_move(input) {
            self.player.update(input.movement());
        }
    }

    fn spawn_monster(&mut self, now: Duration) {
        if self.combat.is_game_over() {
            return;
        }
        if let Some(last) = self.last_spawn
            && now.saturating_sub(last) < MONSTER_SPAWN_INTERVAL
        {
            return;
        }

        let player = self.player.position;
        let eligible: Vec<Vec3> = self
            .world
            .spawn_candidates()
            .iter()
            .copied()
            .filter(|point| {
                let distance = player.distance(*point);
                distance > SPAWN_MIN_DISTANCE && distance < SPAWN_MAX_DISTANCE
            })
            .collect();
        if eligible.is_empty() {
            return;
        }

        let point = eligible[self.rng.random_range(0..eligible.len())];
        let kind = if self.rng.random_bool(0.5) {
            MonsterKind::Easy
        } else {
            MonsterKind::Hard
        };
        let id = MonsterId(self.next_monster_id);
        self.next_monster_id += 1;

        log::info!("Spawning {:?} monster at {:?}", kind, point);
        let position = Vec3::new(point.x, MONSTER_SPAWN_HEIGHT, point.z);
        self.monsters
            .push(Monster::spawn(id, position, kind, &mut self.scene));
        self.last_spawn = Some(now);
    }

    fn update_monsters(&mut self) {
        let player = self.player.position;
        for monster in &mut self.monsters {
            monster.update_face_orientation(player, &mut self.scene);
        }
    }

    fn check_monster_collision(&mut self, input: &mut InputState) {
        if self.combat.is_in_combat() || self.combat.is_game_over() {
            return;
        }
        let player = self.player.position;
        let Some(target) = self
            .monsters
            .iter()
            .find(|monster| monster.is_in_reach(player))
            .map(|monster| monster.id)
        else {
            return;
        };

        if self.combat.engage(target, &mut self.rng) {
            log::info!("Combat started with monster {:?}", target);
            input.clear_movement();
            self.player.halt();
            self.announce_problem();
        }
    }

    fn update_effects(&mut self, now: Duration) {
        if let Some(until) = self.victory_notice_until
            && now >= until
        {
            self.victory_notice_until = None;
            self.events.push(GameEvent::VictoryNoticeExpired);
        }

        if let Some(shake) = &mut self.shake {
            if shake.intensity > SHAKE_CUTOFF {
                let jitter = Vec3::new(
                    self.rng.random::<f32>() - 0.5,
                    self.rng.random::<f32>() - 0.5,
                    self.rng.random::<f32>() - 0.5,
                );
                self.player.position = shake.origin + jitter * shake.intensity;
                shake.intensity *= SHAKE_DECAY;
            } else {
                self.player.position = shake.origin;
                self.shake = None;
            }
        }

        if let Some(at) = self.restart_at
            && now >= at
        {
            self.restart_at = None;
            log::info!("Restarting session");
            self.events.push(GameEvent::Restart);
        }
    }

    /// Score an answer for the monster currently in combat.
    pub fn submit_answer(&mut self, raw: &str) -> AnswerOutcome {
        let Some(target) = self.combat.target() else {
            return AnswerOutcome::Ignored;
        };
        let Some(index) = self.monsters.iter().position(|m| m.id == target) else {
            self.combat.disengage();
            self.events.push(GameEvent::CombatEnded);
            return AnswerOutcome::Ignored;
        };

        let outcome = self
            .combat
            .submit(raw, &mut self.monsters[index], &mut self.rng);

        match &outcome {
            AnswerOutcome::Ignored => {}
            AnswerOutcome::Correct { .. } | AnswerOutcome::Incorrect { .. } => {
                self.announce_problem();
            }
            AnswerOutcome::MonsterDefeated { .. } => {
                let monster = self.monsters.remove(index);
                self.defeat_monster(monster);
            }
            AnswerOutcome::PlayerDefeated => self.game_over(),
        }
        outcome
    }

    fn defeat_monster(&mut self, monster: Monster) {
        log::info!("Monster {:?} defeated!", monster.id);
        self.particles.burst(
            monster.position,
            monster.kind.color(),
            DEFEAT_PARTICLES,
            &mut self.rng,
            &mut self.scene,
        );
        monster.remove(&mut self.scene);

        self.events.push(GameEvent::CombatEnded);
        self.events.push(GameEvent::VictoryNoticeShown);
        self.victory_notice_until = Some(self.now + VICTORY_NOTICE_DURATION);
    }

    fn game_over(&mut self) {
        log::info!("Game over");
        let origin = self.player.position;
        self.particles.burst(
            origin,
            rgb(GAME_OVER_PARTICLE_COLOR),
            GAME_OVER_PARTICLES,
            &mut self.rng,
            &mut self.scene,
        );
        self.shake = Some(CameraShake {
            origin,
            intensity: SHAKE_INTENSITY,
        });

        self.events.push(GameEvent::CombatEnded);
        self.events.push(GameEvent::GameOver);
        self.restart_at = Some(self.now + RESTART_DELAY);
    }

    fn announce_problem(&mut self) {
        let Some(problem) = self.combat.problem() else {
            return;
        };
        let Some(monster) = self
            .combat
            .target()
            .and_then(|id| self.monsters.iter().find(|m| m.id == id))
        else {
            return;
        };
        self.events.push(GameEvent::ProblemPresented {
            seq: self.combat.problem_seq(),
            question: problem.question.clone(),
            status: status_line(monster),
        });
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_game_over(&self) -> bool {
        self.combat.is_game_over()
    }
}
