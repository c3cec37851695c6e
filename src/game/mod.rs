// Game-side entities built on the engine

pub mod characters;
