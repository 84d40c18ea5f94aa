use crate::core::{Pcm16Error, Pcm16Result};

/// Planar audio fed to a processor, one Vec per channel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSource {
    channels: Vec<Vec<f32>>,
    frames: usize,
}

impl RenderSource {
    /// Single channel source
    pub fn mono(samples: Vec<f32>) -> Self {
        let frames = samples.len();
        Self {
            channels: vec![samples],
            frames,
        }
    }

    /// Split interleaved samples into channels
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channels: usize) -> Pcm16Result<Self> {
        if channels == 0 {
            return Err(Pcm16Error::InvalidChannelCount);
        }
        let frames = samples.len() / channels;
        let mut planar = vec![Vec::with_capacity(frames); channels];
        for frame in samples.chunks_exact(channels) {
            for (ch, &s) in frame.iter().enumerate() {
                planar[ch].push(s);
            }
        }
        Ok(Self {
            channels: planar,
            frames,
        })
    }

    /// Build from per-channel buffers; length is the shortest channel
    pub fn from_planar(channels: Vec<Vec<f32>>) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        Self { channels, frames }
    }

    /// An input with no channels that still spans `frames` frames
    ///
    /// Models a disconnected source: the host keeps calling, the processor
    /// sees an input connection with zero channels.
    pub fn disconnected(frames: usize) -> Self {
        Self {
            channels: Vec::new(),
            frames,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(|c| &c[..self.frames])
    }

    pub(crate) fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }
}
