//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the slider positions computed by the core and turns them
//! into cells on the terminal.

pub mod layout;
pub mod motion;
pub mod popup;
pub mod quote;
pub mod theme;
pub mod track;
