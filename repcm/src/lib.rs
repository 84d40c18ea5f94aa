//! repcm - render audio through the pcm16 processor
//!
//! Decodes audio files, feeds them block by block to a processor from the
//! global registry (the built-in `pcm16` converter by default), collects the
//! converted blocks on a listener and writes 16-bit WAV or raw PCM.
//! It works on native targets and can be compiled to WebAssembly.
//!

pub mod audio;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;

use anyhow::{Context, Result};
use libpcm16_audio::{
    port, registry, AudioProcessor, BlockReceiver, RenderHost, RenderOptions, RenderSource,
    DEFAULT_RENDER_QUANTUM,
};

/// Re-export libpcm16 types
pub use libpcm16_audio::{PortStats, RenderReport, PCM16_PROCESSOR_NAME};

/// Options for a capture run
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Frames per render callback
    pub block_size: usize,
    /// Port capacity in blocks; None picks the default for the target
    pub queue_capacity: Option<usize>,
    /// Pace the render thread to wall-clock time
    pub realtime: bool,
    /// Registered processor to render through
    pub processor: String,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_RENDER_QUANTUM,
            queue_capacity: None,
            realtime: false,
            processor: PCM16_PROCESSOR_NAME.to_string(),
        }
    }
}

impl CaptureOptions {
    /// Set frames per render callback
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Bound the hand-off queue; a listener that falls behind loses blocks
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Render at real-time speed instead of as fast as possible
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Render through a different registered processor
    pub fn with_processor(mut self, name: impl Into<String>) -> Self {
        self.processor = name.into();
        self
    }
}

/// Result of a capture run
#[derive(Debug, Clone)]
pub struct Capture {
    /// Converted mono 16-bit samples in arrival order
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    /// Channels in the source before mono reduction
    pub source_channels: usize,
    /// Blocks the listener received
    pub blocks_received: u64,
    /// Capacity of the hand-off queue used for the run
    pub queue_capacity: usize,
    pub port: PortStats,
    pub report: RenderReport,
    pub processor: String,
    /// ISO-8601 time the capture finished
    pub captured_at: String,
}

/// Serializable overview of a capture
#[derive(Debug, Clone, serde::Serialize)]
pub struct CaptureSummary {
    pub processor: String,
    pub sample_rate: u32,
    pub source_channels: usize,
    pub blocks_rendered: u64,
    pub blocks_received: u64,
    pub blocks_dropped: u64,
    pub queue_capacity: usize,
    pub frames_rendered: u64,
    pub samples: usize,
    pub duration_secs: f32,
    pub stopped_by_processor: bool,
    pub captured_at: String,
}

impl Capture {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.samples.len() as f32 / self.sample_rate as f32
        }
    }

    pub fn summary(&self) -> CaptureSummary {
        CaptureSummary {
            processor: self.processor.clone(),
            sample_rate: self.sample_rate,
            source_channels: self.source_channels,
            blocks_rendered: self.report.blocks,
            blocks_received: self.blocks_received,
            blocks_dropped: self.port.dropped,
            queue_capacity: self.queue_capacity,
            frames_rendered: self.report.frames,
            samples: self.samples.len(),
            duration_secs: self.duration_secs(),
            stopped_by_processor: self.report.stopped_by_processor,
            captured_at: self.captured_at.clone(),
        }
    }
}

/// Information about a decoded audio file
#[derive(Debug, Clone)]
pub struct AudioInfo {
    pub sample_rate: u32,
    pub channels: usize,
    pub duration_secs: f32,
    pub source_format: Option<String>,
}

/// Render audio file bytes through the configured processor
///
/// # Arguments
/// * `audio_bytes` - Raw bytes of an audio file (MP3, WAV, FLAC, OGG, etc.)
/// * `options` - Capture options
pub fn capture_from_audio(audio_bytes: &[u8], options: &CaptureOptions) -> Result<Capture> {
    let decoded =
        audio::read_audio_from_bytes(audio_bytes).context("Failed to read audio file")?;

    capture_from_samples(
        &decoded.samples,
        decoded.sample_rate,
        decoded.channels,
        options,
    )
}

/// Render raw samples through the configured processor
///
/// # Arguments
/// * `samples` - Interleaved f32 samples, nominally in [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `channels` - Number of interleaved channels
/// * `options` - Capture options
///
/// # Returns
/// Every block the listener received, concatenated
pub fn capture_from_samples(
    samples: &[f32],
    sample_rate: u32,
    channels: usize,
    options: &CaptureOptions,
) -> Result<Capture> {
    let source =
        RenderSource::from_interleaved(samples, channels).context("Invalid channel layout")?;
    let render_options = RenderOptions::new(sample_rate)
        .with_block_size(options.block_size)
        .with_realtime(options.realtime);
    let host = RenderHost::new(render_options).context("Invalid render options")?;

    let capacity = options
        .queue_capacity
        .unwrap_or_else(|| default_queue_capacity(&render_options, source.frames()));
    let (sender, receiver) = port::channel(capacity);
    let processor = registry::global()
        .create(&options.processor, sender)
        .with_context(|| format!("Failed to create processor '{}'", options.processor))?;

    log::info!(
        "capturing {} frames x {} channels at {} Hz through '{}' (block {}, queue {})",
        source.frames(),
        channels,
        sample_rate,
        options.processor,
        options.block_size,
        capacity
    );

    let (report, collected) = render(host, processor, source, receiver)?;

    if collected.port.dropped > 0 {
        log::warn!(
            "{} blocks dropped; the listener fell behind the render thread",
            collected.port.dropped
        );
    }

    Ok(Capture {
        samples: collected.samples,
        sample_rate,
        source_channels: channels,
        blocks_received: collected.blocks,
        queue_capacity: capacity.max(1),
        port: collected.port,
        report,
        processor: options.processor.clone(),
        captured_at: now_iso8601(),
    })
}

/// The listener drains while the render thread runs
#[cfg(not(target_arch = "wasm32"))]
fn default_queue_capacity(_options: &RenderOptions, _frames: usize) -> usize {
    libpcm16_audio::DEFAULT_PORT_CAPACITY
}

/// Inline render: every block is queued before the first one is read
#[cfg(target_arch = "wasm32")]
fn default_queue_capacity(options: &RenderOptions, frames: usize) -> usize {
    options.blocks_for(frames)
}

/// What the listener side saw
struct Collected {
    samples: Vec<i16>,
    blocks: u64,
    port: PortStats,
}

fn collect(receiver: BlockReceiver) -> Collected {
    let mut samples = Vec::new();
    let mut blocks = 0u64;
    for block in receiver.iter() {
        blocks += 1;
        samples.extend_from_slice(block.samples());
    }
    Collected {
        samples,
        blocks,
        port: receiver.stats(),
    }
}

/// Render thread plus listener thread
#[cfg(not(target_arch = "wasm32"))]
fn render(
    host: RenderHost,
    processor: Box<dyn AudioProcessor>,
    source: RenderSource,
    receiver: BlockReceiver,
) -> Result<(RenderReport, Collected)> {
    let listener = std::thread::Builder::new()
        .name("pcm16-listener".to_string())
        .spawn(move || collect(receiver))
        .context("Failed to spawn listener thread")?;

    let report = host.spawn(processor, source)?.join()?;
    let collected = listener
        .join()
        .map_err(|_| libpcm16_audio::Pcm16Error::ListenerPanicked)?;
    Ok((report, collected))
}

/// No threads on wasm: render inline, then drain
#[cfg(target_arch = "wasm32")]
fn render(
    host: RenderHost,
    mut processor: Box<dyn AudioProcessor>,
    source: RenderSource,
    receiver: BlockReceiver,
) -> Result<(RenderReport, Collected)> {
    let report = host.run(processor.as_mut(), &source);
    // closes the port so collect() stops after the queued blocks
    drop(processor);
    Ok((report, collect(receiver)))
}

fn now_iso8601() -> String {
    // use js_sys for WASM, chrono for native
    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    {
        let date = js_sys::Date::new_0();
        date.to_iso_string().as_string().unwrap_or_default()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
    {
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

/// Encode a capture as a mono 16-bit WAV file
pub fn encode_wav(capture: &Capture) -> Result<Vec<u8>> {
    audio::write_pcm16_wav_to_bytes(&capture.samples, capture.sample_rate)
        .context("Failed to write WAV data")
}

/// Raw native-endian PCM bytes of a capture
pub fn encode_raw(capture: &Capture) -> Vec<u8> {
    audio::pcm16_to_raw_bytes(&capture.samples)
}

/// Get information about an audio file
///
/// # Arguments
/// * `audio_bytes` - Raw bytes of an audio file (MP3, WAV, FLAC, OGG, etc.)
pub fn get_audio_info(audio_bytes: &[u8]) -> Result<AudioInfo> {
    let decoded =
        audio::read_audio_from_bytes(audio_bytes).context("Failed to read audio file")?;

    Ok(AudioInfo {
        sample_rate: decoded.sample_rate,
        channels: decoded.channels,
        duration_secs: decoded.duration_secs(),
        source_format: decoded.source_format,
    })
}

/// Names of every processor in the global registry
pub fn processor_names() -> Vec<String> {
    registry::global()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}
