use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// One-shot actions queued by event handlers and consumed on the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputAction {
    Jump,
    ShowProblem,
    /// Text typed for the problem numbered `seq`.
    SubmitAnswer { seq: u64, raw: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveFlags {
    #[cfg(test)]
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Whether a keydown in the answer field submits it. Autorepeat from a held key does not.
pub fn is_answer_submit(key: &str, repeat: bool) -> bool {
    key == "Enter" && !repeat
}

pub struct InputState {
    pressed_keys: HashSet<KeyCode>,
    mouse_delta: (f32, f32),
    actions: Vec<InputAction>,
    cursor_grabbed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            actions: Vec::new(),
            cursor_grabbed: false,
        }
    }

    /// Keys only count while the pointer is locked.
    pub fn handle_key_press(&mut self, key: KeyCode) {
        if !self.cursor_grabbed {
            return;
        }
        if self.pressed_keys.insert(key) {
            match key {
                KeyCode::Space => self.actions.push(InputAction::Jump),
                KeyCode::KeyE => self.actions.push(InputAction::ShowProblem),
                _ => {}
            }
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.pressed_keys.remove(&key);
    }

    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.cursor_grabbed {
            return;
        }
        self.mouse_delta.0 += dx;
        self.mouse_delta.1 += dy;
    }

    pub fn consume_mouse_delta(&mut self) -> (f32, f32) {
        let delta = self.mouse_delta;
        self.mouse_delta = (0.0, 0.0);
        delta
    }

    pub fn submit_answer(&mut self, seq: u64, raw: impl Into<String>) {
        self.actions.push(InputAction::SubmitAnswer {
            seq,
            raw: raw.into(),
        });
    }

    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn cursor_grabbed(&self) -> bool {
        self.cursor_grabbed
    }

    /// Losing the pointer lock drops every held key, so the player stops drifting.
    pub fn set_cursor_grabbed(&mut self, grabbed: bool) {
        self.cursor_grabbed = grabbed;
        if !grabbed {
            self.clear_movement();
            self.mouse_delta = (0.0, 0.0);
        }
    }

    pub fn clear_movement(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn movement(&self) -> MoveFlags {
        MoveFlags {
            forward: self.is_pressed(KeyCode::KeyW) || self.is_pressed(KeyCode::ArrowUp),
            backward: self.is_pressed(KeyCode::KeyS) || self.is_pressed(KeyCode::ArrowDown),
            left: self.is_pressed(KeyCode::KeyA) || self.is_pressed(KeyCode::ArrowLeft),
            right: self.is_pressed(KeyCode::KeyD) || self.is_pressed(KeyCode::ArrowRight),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignored_until_pointer_locked() {
        let mut input = InputState::new();
        input.handle_key_press(KeyCode::KeyW);
        assert!(!input.movement().any());

        input.set_cursor_grabbed(true);
        input.handle_key_press(KeyCode::ArrowUp);
        assert!(input.movement().forward);
    }

    #[test]
    fn unlocking_clears_held_keys() {
        let mut input = InputState::new();
        input.set_cursor_grabbed(true);
        input.handle_key_press(KeyCode::KeyA);
        input.handle_key_press(KeyCode::KeyD);
        input.set_cursor_grabbed(false);
        assert_eq!(input.movement(), MoveFlags::default());
    }

    #[test]
    fn key_repeat_queues_one_action() {
        let mut input = InputState::new();
        input.set_cursor_grabbed(true);
        input.handle_key_press(KeyCode::Space);
        input.handle_key_press(KeyCode::Space);
        input.handle_key_press(KeyCode::KeyE);
        input.submit_answer(3, "12");
        assert_eq!(
            input.take_actions(),
            vec![
                InputAction::Jump,
                InputAction::ShowProblem,
                InputAction::SubmitAnswer {
                    seq: 3,
                    raw: "12".into()
                }
            ]
        );
        assert!(input.take_actions().is_empty());
    }

    #[test]
    fn held_enter_submits_once() {
        assert!(is_answer_submit("Enter", false));
        assert!(!is_answer_submit("Enter", true));
        assert!(!is_answer_submit("5", false));
    }
}
