use super::Point;

/// Keys the game can query. Codes are stable and index the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Space,
    A,
    D,
    S,
    W,
    Right,
    Left,
    Down,
    Up,
}

impl Key {
    pub const fn code(self) -> usize {
        match self {
            Key::Enter => 13,
            Key::Escape => 27,
            Key::Space => 32,
            Key::A => 97,
            Key::D => 100,
            Key::S => 115,
            Key::W => 119,
            Key::Right => 129,
            Key::Left => 130,
            Key::Down => 131,
            Key::Up => 132,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

pub const MOUSE_BUTTON_COUNT: usize = 5;

impl MouseButton {
    const fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
        }
    }
}

/// Current key, mouse and window-focus state, mutated by event polling
/// and read synchronously by ticks and renders.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: Vec<bool>,
    mouse_buttons: [bool; MOUSE_BUTTON_COUNT],
    cursor: Point,
    focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            mouse_buttons: [false; MOUSE_BUTTON_COUNT],
            cursor: Point::default(),
            focused: true,
        }
    }

    /// Grows the key table on demand so it always covers the largest code seen.
    pub fn set_key(&mut self, key: Key, is_down: bool) {
        let code = key.code();
        if code >= self.keys.len() {
            self.keys.resize(code + 1, false);
        }
        self.keys[code] = is_down;
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.get(key.code()).copied().unwrap_or(false)
    }

    pub fn key_table_len(&self) -> usize {
        self.keys.len()
    }

    pub fn set_mouse_button(&mut self, button: MouseButton, is_down: bool) {
        self.mouse_buttons[button.index()] = is_down;
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons[button.index()]
    }

    pub fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn with_key_down(mut self, key: Key) -> Self {
        self.set_key(key, true);
        self
    }

    pub fn with_mouse_down(mut self, button: MouseButton) -> Self {
        self.set_mouse_button(button, true);
        self
    }

    pub fn with_cursor(mut self, x: i32, y: i32) -> Self {
        self.cursor = Point::new(x, y);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_keys_read_as_released() {
        let input = InputState::new();
        assert_eq!(input.key_table_len(), 0);
        assert!(!input.is_key_down(Key::Up));
    }

    #[test]
    fn key_table_grows_to_largest_code_seen() {
        let mut input = InputState::new();
        input.set_key(Key::Space, true);
        assert_eq!(input.key_table_len(), Key::Space.code() + 1);

        input.set_key(Key::Up, false);
        assert_eq!(input.key_table_len(), Key::Up.code() + 1);

        input.set_key(Key::Enter, true);
        assert_eq!(input.key_table_len(), Key::Up.code() + 1);
        assert!(input.is_key_down(Key::Space));
        assert!(input.is_key_down(Key::Enter));
        assert!(!input.is_key_down(Key::Up));
    }

    #[test]
    fn key_release_clears_state() {
        let mut input = InputState::new().with_key_down(Key::Left);
        input.set_key(Key::Left, false);
        assert!(!input.is_key_down(Key::Left));
    }

    #[test]
    fn mouse_buttons_are_independent() {
        let mut input = InputState::new()
            .with_mouse_down(MouseButton::Left)
            .with_mouse_down(MouseButton::Forward);
        input.set_mouse_button(MouseButton::Left, false);

        assert!(!input.is_mouse_down(MouseButton::Left));
        assert!(input.is_mouse_down(MouseButton::Forward));
        assert!(!input.is_mouse_down(MouseButton::Right));
    }

    #[test]
    fn starts_focused_with_cursor_at_origin() {
        let input = InputState::default();
        assert!(input.is_focused());
        assert_eq!(input.cursor(), Point::new(0, 0));
        assert_eq!(input.with_cursor(12, 34).cursor(), Point::new(12, 34));
    }
}
