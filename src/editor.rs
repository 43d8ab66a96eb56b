//! Scripted control of the external waveform editor.
//!
//! The editor (Audacity with `mod-script-pipe`) is driven over a pair of named
//! pipes, one line-oriented command at a time. `EditorSession` wraps the
//! transport and the human operator behind the small vocabulary the splice
//! pass needs.

mod operator;
mod session;
mod transport;
mod types;

pub use operator::*;
pub use session::*;
pub use transport::*;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
