//! Render options and results

use std::time::Duration;

use serde::Serialize;

use crate::core::{Pcm16Error, Pcm16Result, DEFAULT_RENDER_QUANTUM};

/// How the host schedules callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Sample rate in Hz, used for realtime pacing
    pub sample_rate: u32,
    /// Frames per callback
    pub block_size: usize,
    /// Pace callbacks to wall-clock time instead of running flat out
    pub realtime: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            block_size: DEFAULT_RENDER_QUANTUM,
            realtime: false,
        }
    }
}

impl RenderOptions {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Default::default()
        }
    }

    /// Set frames per callback
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Enable or disable wall-clock pacing
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn validate(&self) -> Pcm16Result<()> {
        if self.block_size == 0 {
            return Err(Pcm16Error::InvalidBlockSize);
        }
        if self.sample_rate == 0 {
            return Err(Pcm16Error::InvalidSampleRate);
        }
        Ok(())
    }

    /// Wall-clock length of one full block
    pub fn block_duration(&self) -> Duration {
        Duration::from_secs_f64(self.block_size as f64 / self.sample_rate.max(1) as f64)
    }

    /// Callbacks needed to cover `frames`
    pub fn blocks_for(&self, frames: usize) -> usize {
        frames.div_ceil(self.block_size.max(1))
    }
}

/// What a render pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    /// Callbacks made
    pub blocks: u64,
    /// Frames covered by those callbacks
    pub frames: u64,
    /// The processor asked to stop before the source ran out
    pub stopped_by_processor: bool,
}
