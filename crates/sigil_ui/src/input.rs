//! Input snapshot for one frame.
//!
//! The host fills an `InputState` from its platform layer (mouse, touch,
//! keyboard, gamepad), then hands it to `Ui::run`, which only reads it.
//! Positions are physical pixels in canvas space.

use sigil_shared::{Vec2, Vec2i};

/// Logical key. The host maps keyboard and gamepad buttons onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move focus to the next interactive element (Tab, gamepad shoulder).
    Next,
    /// Move focus to the previous interactive element (Shift+Tab).
    Previous,
    /// Activate the focused element (gamepad A).
    Select,
    /// Arrow up / d-pad up.
    Up,
    /// Arrow down / d-pad down.
    Down,
    /// Arrow left / d-pad left.
    Left,
    /// Arrow right / d-pad right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
}

/// An ordered text-editing input: a typed character or an editing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    /// A typed character.
    Char(char),
    /// A key press, in the order it happened relative to typed text.
    Key(Key),
}

/// One pointer (mouse, touch point, or gamepad-emulated cursor).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    /// Current position.
    pub position: Vec2i,
    /// Position at the end of the previous frame.
    pub prev_position: Vec2i,
    /// Pressed this frame.
    pub went_down: bool,
    /// Released this frame.
    pub went_up: bool,
    /// Currently held.
    pub is_down: bool,
}

impl PointerState {
    /// Movement since the previous frame.
    #[must_use]
    pub fn delta(&self) -> Vec2i {
        self.position - self.prev_position
    }
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Pointers by index.
    pointers: Vec<PointerState>,
    /// Keys pressed this frame.
    keys_pressed: Vec<Key>,
    /// Keys released this frame.
    keys_released: Vec<Key>,
    /// Keys currently held.
    keys_down: Vec<Key>,
    /// Typed text and editing keys in arrival order.
    text_input: Vec<TextInput>,
    /// Wheel delta in notches (x, y). Positive y scrolls up.
    pub scroll_delta: Vec2,
    /// Seconds since the previous frame.
    pub delta_time: f32,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self, delta_time: f32) {
        for pointer in &mut self.pointers {
            pointer.prev_position = pointer.position;
            pointer.went_down = false;
            pointer.went_up = false;
        }
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.text_input.clear();
        self.scroll_delta = Vec2::ZERO;
        self.delta_time = delta_time.max(0.0);
    }

    fn pointer_mut(&mut self, index: usize) -> &mut PointerState {
        if index >= self.pointers.len() {
            self.pointers.resize(index + 1, PointerState::default());
        }
        &mut self.pointers[index]
    }

    /// Updates a pointer position.
    pub fn set_pointer_pos(&mut self, index: usize, position: Vec2i) {
        let pointer = self.pointer_mut(index);
        if !pointer.is_down && !pointer.went_up && pointer.prev_position == Vec2i::ZERO {
            // first sighting: no phantom movement
            pointer.prev_position = position;
        }
        pointer.position = position;
    }

    /// Records a pointer press.
    pub fn pointer_down(&mut self, index: usize) {
        let pointer = self.pointer_mut(index);
        pointer.went_down = true;
        pointer.is_down = true;
    }

    /// Records a pointer release.
    pub fn pointer_up(&mut self, index: usize) {
        let pointer = self.pointer_mut(index);
        pointer.went_up = true;
        pointer.is_down = false;
    }

    /// Records scroll wheel input.
    pub fn scroll(&mut self, dx: f32, dy: f32) {
        self.scroll_delta += Vec2::new(dx, dy);
    }

    /// Records a key press.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_down.push(key);
            self.text_input.push(TextInput::Key(key));
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        self.keys_released.push(key);
        self.keys_down.retain(|&k| k != key);
    }

    /// Records typed text.
    pub fn text(&mut self, text: &str) {
        self.text_input.extend(text.chars().map(TextInput::Char));
    }

    /// Number of tracked pointers.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns a pointer by index.
    #[must_use]
    pub fn pointer(&self, index: usize) -> Option<&PointerState> {
        self.pointers.get(index)
    }

    /// All pointers, by index.
    #[must_use]
    pub fn pointers(&self) -> &[PointerState] {
        &self.pointers
    }

    /// Returns true if any pointer was pressed this frame.
    #[must_use]
    pub fn any_pointer_went_down(&self) -> bool {
        self.pointers.iter().any(|p| p.went_down)
    }

    /// Returns true if any pointer moved or changed button state this frame.
    #[must_use]
    pub fn any_pointer_activity(&self) -> bool {
        self.pointers
            .iter()
            .any(|p| p.went_down || p.went_up || p.position != p.prev_position)
    }

    /// Returns true if the key was pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the key was released this frame.
    #[must_use]
    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if any key was pressed this frame.
    #[must_use]
    pub fn any_key_pressed(&self) -> bool {
        !self.keys_pressed.is_empty()
    }

    /// Typed text and editing keys in arrival order.
    #[must_use]
    pub fn text_input(&self) -> &[TextInput] {
        &self.text_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_click() {
        let mut input = InputState::new();

        input.set_pointer_pos(0, Vec2i::new(5, 5));
        input.pointer_down(0);
        let p = input.pointer(0).unwrap();
        assert!(p.went_down && p.is_down);

        input.begin_frame(0.016);
        let p = input.pointer(0).unwrap();
        assert!(!p.went_down && p.is_down);

        input.pointer_up(0);
        let p = input.pointer(0).unwrap();
        assert!(p.went_up && !p.is_down);
    }

    #[test]
    fn test_pointer_delta() {
        let mut input = InputState::new();
        input.set_pointer_pos(0, Vec2i::new(10, 10));
        assert_eq!(input.pointer(0).unwrap().delta(), Vec2i::ZERO);

        input.begin_frame(0.016);
        input.set_pointer_pos(0, Vec2i::new(14, 7));
        assert_eq!(input.pointer(0).unwrap().delta(), Vec2i::new(4, -3));
    }

    #[test]
    fn test_second_touch_grows_pointer_list() {
        let mut input = InputState::new();
        input.set_pointer_pos(2, Vec2i::new(1, 1));
        assert_eq!(input.pointer_count(), 3);
        assert!(!input.any_pointer_went_down());
    }

    #[test]
    fn test_key_order_preserved_with_text() {
        let mut input = InputState::new();
        input.text("ab");
        input.key_down(Key::Backspace);
        input.text("c");
        assert_eq!(
            input.text_input(),
            &[
                TextInput::Char('a'),
                TextInput::Char('b'),
                TextInput::Key(Key::Backspace),
                TextInput::Char('c'),
            ]
        );
        assert!(input.key_pressed(Key::Backspace));
        assert!(input.key_held(Key::Backspace));
    }
}
