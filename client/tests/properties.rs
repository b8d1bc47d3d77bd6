//! Property tests for the invariants the game loop relies on.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use math_monsters::combat::{AnswerOutcome, Combat};
use math_monsters::config::*;
use math_monsters::math::{MathProblem, Operation, sample_operands};
use math_monsters::monster::{Monster, MonsterId, MonsterKind, step_toward};
use math_monsters::scene::Scene;
use math_monsters::world::World;
use math_monsters::world::path::generate_path;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn arc(a: f32, b: f32) -> f32 {
    ((a - b + PI).rem_euclid(TAU) - PI).abs()
}

// ============================================================
// World generation
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_path_has_waypoints_at_fixed_spacing(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = generate_path(&mut rng, &mut Scene::new(), PATH_LENGTH);

        prop_assert_eq!(layout.waypoints.len(), PATH_LENGTH);
        for pair in layout.waypoints.windows(2) {
            let step = pair[0].distance(pair[1]);
            prop_assert!((step - PATH_STEP).abs() < 1e-3, "step {} for seed {}", step, seed);
        }
    }

    #[test]
    fn prop_world_generation_always_succeeds(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let world = World::generate(&mut rng, &mut Scene::new());
        prop_assert!(world.is_ok());
        prop_assert!(!world.unwrap().waypoints().is_empty());
    }
}

// ============================================================
// Math problems
// ============================================================

proptest! {
    #[test]
    fn prop_subtraction_is_never_negative(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (a, b) = sample_operands(Operation::Subtract, &mut rng);
        prop_assert!(a - b >= 0);

        let problem = MathProblem::generate_for(Operation::Subtract, &mut rng);
        prop_assert!(problem.answer >= 0);
    }

    #[test]
    fn prop_subtraction_operand_grid_is_non_negative(a in 10i32..=20, b in 1i32..=6) {
        prop_assert!(Operation::Subtract.apply(a, b) >= 0);
    }
}

// ============================================================
// Monster orientation
// ============================================================

proptest! {
    #[test]
    fn prop_orientation_steps_along_shorter_arc(current in -PI..PI, target in -PI..PI) {
        prop_assume!(arc(current, target) > 1e-3);
        let next = step_toward(current, target);
        prop_assert!(arc(next, target) < arc(current, target));
    }

    #[test]
    fn prop_orientation_converges(
        current in -PI..PI,
        x in -50.0f32..50.0,
        z in -50.0f32..50.0,
    ) {
        prop_assume!(x.abs() > 0.1 || z.abs() > 0.1);
        let mut scene = Scene::new();
        let mut monster = Monster::spawn(MonsterId(0), Vec3::ZERO, MonsterKind::Easy, &mut scene);
        monster.current_rotation = current;
        let player = Vec3::new(x, EYE_HEIGHT, z);

        for _ in 0..400 {
            monster.update_face_orientation(player, &mut scene);
        }
        prop_assert!(arc(monster.current_rotation, monster.target_rotation) < 1e-3);
    }
}

// ============================================================
// Combat counters
// ============================================================

proptest! {
    #[test]
    fn prop_counters_are_bounded_and_monotone(
        seed in any::<u64>(),
        answers in proptest::collection::vec(prop_oneof![
            Just(0u8), // right
            Just(1u8), // wrong
            Just(2u8), // garbage
        ], 0..20),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut scene = Scene::new();
        let mut monster = Monster::spawn(MonsterId(1), Vec3::ZERO, MonsterKind::Hard, &mut scene);
        let mut combat = Combat::new();
        combat.engage(monster.id, &mut rng);

        let mut defeats = 0;
        let mut game_overs = 0;
        for kind in answers {
            let (correct, incorrect) = (monster.correct_answers, monster.incorrect_answers);
            let raw = match (kind, combat.problem()) {
                (0, Some(p)) => p.answer.to_string(),
                (1, Some(p)) => (p.answer + 100).to_string(),
                _ => "??".to_string(),
            };
            match combat.submit(&raw, &mut monster, &mut rng) {
                AnswerOutcome::MonsterDefeated { .. } => defeats += 1,
                AnswerOutcome::PlayerDefeated => game_overs += 1,
                _ => {}
            }
            prop_assert!(monster.correct_answers >= correct);
            prop_assert!(monster.incorrect_answers >= incorrect);
            prop_assert!(monster.correct_answers <= ANSWERS_TO_DEFEAT);
            prop_assert!(monster.incorrect_answers <= MISTAKES_ALLOWED);
        }
        prop_assert!(defeats <= 1);
        prop_assert!(game_overs <= 1);
        prop_assert!(defeats + game_overs <= 1);
    }
}
