//! Application orchestration: state, event loop, and input handling.

pub mod deck;
pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
