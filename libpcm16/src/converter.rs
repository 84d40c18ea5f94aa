//! float to 16-bit PCM block conversion

use crate::core::{f32_to_pcm16, ConvertedBlock};
use crate::port::BlockSender;
use crate::processor::{AudioProcessor, Inputs};

/// Convert one sample
#[inline]
pub fn convert_sample(sample: f32) -> i16 {
    f32_to_pcm16(sample)
}

/// Convert a whole block into a new owned buffer of the same length
pub fn convert_block(block: &[f32]) -> ConvertedBlock {
    ConvertedBlock::new(block.iter().copied().map(f32_to_pcm16).collect())
}

/// Convert into a caller-provided buffer
///
/// Converts `min(block.len(), out.len())` samples and returns that count.
pub fn convert_into(block: &[f32], out: &mut [i16]) -> usize {
    let n = block.len().min(out.len());
    for (dst, &src) in out[..n].iter_mut().zip(&block[..n]) {
        *dst = f32_to_pcm16(src);
    }
    n
}

/// The `pcm16` processor
///
/// Reads the first channel of the first input, converts it and moves the
/// result into its port. Other channels and inputs are ignored. Holds nothing
/// between calls except the port itself.
pub struct SampleConverter {
    port: BlockSender,
}

impl SampleConverter {
    pub fn new(port: BlockSender) -> Self {
        Self { port }
    }

    /// The channel this processor would consume, if any
    pub fn select_channel<'a>(inputs: &Inputs<'a>) -> Option<&'a [f32]> {
        let input: &'a [&'a [f32]] = inputs.first().copied()?;
        input.first().copied()
    }

    pub fn port(&self) -> &BlockSender {
        &self.port
    }
}

impl AudioProcessor for SampleConverter {
    fn process(&mut self, inputs: &Inputs<'_>) -> bool {
        if let Some(channel) = Self::select_channel(inputs) {
            // a full or closed port drops the block; silence here is intended
            let _ = self.port.post(convert_block(channel));
        }
        true
    }
}
