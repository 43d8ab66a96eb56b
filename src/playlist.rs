//! Playlist manifests.
//!
//! This module owns the `Track` record, the M3U manifest grammar (parse and
//! serialize) and the writer that emits the success/failure manifests at the
//! end of a run.

mod manifest;
mod model;
mod writer;

pub use manifest::*;
pub use model::*;
pub use writer::*;
