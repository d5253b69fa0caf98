//! Snake simulation core.
//!
//! The host shell owns rendering, audio and input devices. It calls
//! [`game::SimulationEngine::tick`] once per tick with a requested direction
//! (read from a player, or produced by [`auto::AutoController`]) and draws the
//! [`game::Snapshot`] it gets back.

pub mod auto;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
