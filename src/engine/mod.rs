// Engine modules: timing, input, tile collision, render boundary

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
