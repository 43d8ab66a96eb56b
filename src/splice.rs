//! The splice pass: drives the editor through each track of the playlist.

mod orchestrator;
mod state;

pub use orchestrator::*;
pub use state::*;
