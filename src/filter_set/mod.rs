//! Stateful filter editing module

mod state;

pub use state::*;
