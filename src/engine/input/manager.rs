// Input manager - tracks held keys in press order

use super::action::Action;
use super::config::InputBindings;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys currently held down, oldest press first, plus the bindings that give
/// them meaning
#[derive(Debug, Default)]
pub struct InputManager {
    bindings: InputBindings,
    held: Vec<KeyCode>,
}

impl InputManager {
    /// Create an input manager with default bindings
    pub fn new() -> Self {
        Self::with_bindings(InputBindings::default())
    }

    pub fn with_bindings(bindings: InputBindings) -> Self {
        Self {
            bindings,
            held: Vec::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            match event.state {
                ElementState::Pressed => self.press(key),
                ElementState::Released => self.release(key),
            }
        }
    }

    /// Register a key press; a key already held keeps its original position
    pub fn press(&mut self, key: KeyCode) {
        if !self.held.contains(&key) {
            self.held.push(key);
        }
    }

    /// Register a key release
    pub fn release(&mut self, key: KeyCode) {
        self.held.retain(|k| *k != key);
    }

    /// The movement action of the most recently pressed bound key, if any
    pub fn movement(&self) -> Option<Action> {
        self.held
            .iter()
            .rev()
            .find_map(|key| self.bindings.action(*key))
    }

    /// Release every key (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
impl InputManager {
    fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    fn held_keys(&self) -> &[KeyCode] {
        &self.held
    }
}
