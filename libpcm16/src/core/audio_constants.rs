/// Maximum positive value for 16-bit signed integer (2^15 - 1)
pub const I16_MAX_F64: f64 = 32767.0;

/// Magnitude of the minimum 16-bit signed integer (2^15)
pub const I16_MIN_MAGNITUDE_F64: f64 = 32768.0;

/// Lower bound of a nominal float sample
pub const SAMPLE_MIN: f32 = -1.0;

/// Upper bound of a nominal float sample
pub const SAMPLE_MAX: f32 = 1.0;

/// Frames per render callback when the host does not say otherwise
pub const DEFAULT_RENDER_QUANTUM: usize = 128;

/// Blocks the hand-off port holds before dropping
pub const DEFAULT_PORT_CAPACITY: usize = 256;

/// Convert one f32 sample to 16-bit PCM
///
/// Clamps to [-1.0, 1.0], scales negatives by 32768 and the rest by 32767,
/// then truncates toward zero. The product is formed in f64 so it is exact
/// and the truncation never sees a rounded value. NaN maps to 0.
#[inline]
pub fn f32_to_pcm16(sample: f32) -> i16 {
    let s = sample.clamp(SAMPLE_MIN, SAMPLE_MAX) as f64;
    let scaled = if s < 0.0 {
        s * I16_MIN_MAGNITUDE_F64
    } else {
        s * I16_MAX_F64
    };
    scaled as i16
}

/// Convert a 16-bit PCM sample back to f32
///
/// Inverse of [`f32_to_pcm16`] up to truncation error.
#[inline]
pub fn pcm16_to_f32(sample: i16) -> f32 {
    if sample < 0 {
        (sample as f64 / I16_MIN_MAGNITUDE_F64) as f32
    } else {
        (sample as f64 / I16_MAX_F64) as f32
    }
}
