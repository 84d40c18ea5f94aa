//! common types for pcm16 conversion

use thiserror::Error;

// types

/// one block of converted 16-bit samples
///
/// Move-only: there is no `Clone`, so once a block is sent through a port the
/// sender has nothing left to read or write. Storage is native-endian `i16`.
#[derive(Debug, PartialEq, Eq)]
pub struct ConvertedBlock {
    samples: Vec<i16>,
}

impl ConvertedBlock {
    pub fn new(samples: Vec<i16>) -> Self {
        ConvertedBlock { samples }
    }

    /// number of samples (frames, since blocks are mono)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// raw native-endian bytes, no copy
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.samples)
    }

    /// size of the byte view
    pub fn byte_len(&self) -> usize {
        self.samples.len() * std::mem::size_of::<i16>()
    }

    /// take the sample buffer
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

impl From<ConvertedBlock> for Vec<i16> {
    fn from(block: ConvertedBlock) -> Self {
        block.into_samples()
    }
}

/// errors from the registry and the render host
///
/// The converter itself never fails; these cover the plumbing around it.
#[derive(Debug, Error)]
pub enum Pcm16Error {
    #[error("processor name must not be empty")]
    EmptyProcessorName,
    #[error("processor '{0}' is already registered")]
    AlreadyRegistered(String),
    #[error("no processor registered under '{0}'")]
    UnknownProcessor(String),
    #[error("block size must be greater than zero")]
    InvalidBlockSize,
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("channel count must be greater than zero")]
    InvalidChannelCount,
    #[error("failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("render thread panicked")]
    RenderThreadPanicked,
    #[error("listener thread panicked")]
    ListenerPanicked,
}

/// result type for pcm16 stuff
pub type Pcm16Result<T> = Result<T, Pcm16Error>;
