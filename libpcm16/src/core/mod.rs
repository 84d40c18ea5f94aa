pub mod audio_constants;
pub mod types;

pub use audio_constants::*;
pub use types::*;
