//! Exploring / InCombat / GameOver state machine.
//!
//! Combat holds only the target's [`MonsterId`]. The monster itself stays in the
//! session's collection, which is also the only place it is removed from.

use rand::Rng;

use crate::config::{ANSWERS_TO_DEFEAT, MISTAKES_ALLOWED};
use crate::math::{MathProblem, parse_answer};
use crate::monster::{Monster, MonsterId};

#[derive(Clone, Debug, PartialEq)]
pub enum CombatPhase {
    Exploring,
    /// A problem is on screen, waiting for an answer.
    InCombat {
        target: MonsterId,
        problem: MathProblem,
    },
    GameOver,
}

/// Result of evaluating one submitted answer.
#[derive(Clone, Debug, PartialEq)]
pub enum AnswerOutcome {
    /// Not a number, not in combat, or the target is gone. Nothing changed.
    Ignored,
    /// Right answer; a fresh problem is presented.
    Correct { remaining: u32 },
    /// Wrong answer; a fresh problem is presented.
    Incorrect { lives: u32 },
    /// Fourth right answer. The caller removes the monster; combat is back to exploring.
    MonsterDefeated { target: MonsterId },
    /// Second wrong answer. Terminal.
    PlayerDefeated,
}

pub struct Combat {
    phase: CombatPhase,
    /// Bumped every time a problem is put on screen.
    problem_seq: u64,
}

impl Combat {
    pub fn new() -> Self {
        Self {
            phase: CombatPhase::Exploring,
            problem_seq: 0,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> &CombatPhase {
        &self.phase
    }

    pub fn is_in_combat(&self) -> bool {
        matches!(self.phase, CombatPhase::InCombat { .. })
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, CombatPhase::GameOver)
    }

    pub fn target(&self) -> Option<MonsterId> {
        match &self.phase {
            CombatPhase::InCombat { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn problem(&self) -> Option<&MathProblem> {
        match &self.phase {
            CombatPhase::InCombat { problem, .. } => Some(problem),
            _ => None,
        }
    }

    /// Number of the problem currently on screen. Answers typed for an older problem
    /// carry an older number.
    pub fn problem_seq(&self) -> u64 {
        self.problem_seq
    }

    /// Enter combat with `target` and present the first problem. Returns `false` when
    /// already fighting or the game is over.
    pub fn engage<R: Rng>(&mut self, target: MonsterId, rng: &mut R) -> bool {
        if !matches!(self.phase, CombatPhase::Exploring) {
            return false;
        }
        self.phase = CombatPhase::InCombat {
            target,
            problem: MathProblem::generate(rng),
        };
        self.problem_seq += 1;
        true
    }

    /// Replace the problem on screen with a fresh one.
    pub fn present_new_problem<R: Rng>(&mut self, rng: &mut R) -> Option<&MathProblem> {
        match &mut self.phase {
            CombatPhase::InCombat { problem, .. } => {
                *problem = MathProblem::generate(rng);
                self.problem_seq += 1;
                Some(problem)
            }
            _ => None,
        }
    }

    /// Score `raw` against the current problem and move the state machine on. `monster`
    /// must be the current target; counters are updated in place.
    pub fn submit<R: Rng>(&mut self, raw: &str, monster: &mut Monster, rng: &mut R) -> AnswerOutcome {
        let CombatPhase::InCombat { target, problem } = &self.phase else {
            return AnswerOutcome::Ignored;
        };
        if *target != monster.id {
            return AnswerOutcome::Ignored;
        }
        let Some(value) = parse_answer(raw) else {
            return AnswerOutcome::Ignored;
        };

        let outcome = if problem.is_correct(value) {
            monster.correct_answers = (monster.correct_answers + 1).min(ANSWERS_TO_DEFEAT);
            log::debug!("Correct answers: {}", monster.correct_answers);
            if monster.is_defeated() {
                AnswerOutcome::MonsterDefeated { target: monster.id }
            } else {
                AnswerOutcome::Correct {
                    remaining: ANSWERS_TO_DEFEAT - monster.correct_answers,
                }
            }
        } else {
            monster.incorrect_answers = (monster.incorrect_answers + 1).min(MISTAKES_ALLOWED);
            log::debug!("Incorrect answers: {}", monster.incorrect_answers);
            if monster.has_won() {
                AnswerOutcome::PlayerDefeated
            } else {
                AnswerOutcome::Incorrect {
                    lives: monster.lives_left(),
                }
            }
        };

        match outcome {
            AnswerOutcome::MonsterDefeated { .. } => self.phase = CombatPhase::Exploring,
            AnswerOutcome::PlayerDefeated => self.phase = CombatPhase::GameOver,
            _ => {
                self.present_new_problem(rng);
            }
        }
        outcome
    }

    /// Leave combat without resolving it, e.g. when the target vanished.
    pub fn disengage(&mut self) {
        if self.is_in_combat() {
            self.phase = CombatPhase::Exploring;
        }
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new()
    }
}

/// `"Correct: 2/4 | Lives: 1"`
pub fn status_line(monster: &Monster) -> String {
    format!(
        "Correct: {}/{} | Lives: {}",
        monster.correct_answers,
        ANSWERS_TO_DEFEAT,
        monster.lives_left()
    )
}
