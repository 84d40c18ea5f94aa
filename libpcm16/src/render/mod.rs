//! reference render host
//!
//! drives a processor block by block the way an audio graph would, on the
//! calling thread or on a dedicated render thread
mod host;
mod source;
mod types;

pub use host::{RenderHandle, RenderHost};
pub use source::RenderSource;
pub use types::{RenderOptions, RenderReport};
