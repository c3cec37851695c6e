// Input handling system
//
// The movement core only needs to know which keys are held and in what order
// they were pressed; the most recently pressed movement key decides where the
// player walks.
//
// ## Architecture
//
// - `action`: Movement actions and default key bindings
// - `config`: Key binding configuration and remapping
// - `manager`: Held-key tracking fed by winit keyboard events
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Action};
//
// let mut input = InputManager::new();
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Query the active movement
// if input.movement() == Some(Action::MoveLeft) {
//     // Walk left
// }
// ```

pub mod action;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
