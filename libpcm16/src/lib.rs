use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod converter;
pub mod core;
pub mod port;
pub mod processor;
pub mod registry;
pub mod render;

pub use converter::{convert_block, convert_into, convert_sample, SampleConverter};
pub use crate::core::{
    f32_to_pcm16, pcm16_to_f32, ConvertedBlock, Pcm16Error, Pcm16Result, DEFAULT_PORT_CAPACITY,
    DEFAULT_RENDER_QUANTUM,
};
pub use port::{BlockReceiver, BlockSender, PortStats};
pub use processor::{factory, process_single_channel, AudioProcessor, Inputs, ProcessorFactory};
pub use registry::{ProcessorRegistry, PCM16_PROCESSOR_NAME};
pub use render::{RenderHandle, RenderHost, RenderOptions, RenderReport, RenderSource};

// result helpers

/// turn an error into js
fn to_js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// api functions

/// convert f32 samples to 16-bit pcm
///
/// # Arguments
/// * `samples` - Mono f32 samples, nominally -1.0 to 1.0 (out of range is clamped)
///
/// # Returns
/// Int16Array of the same length
#[wasm_bindgen]
pub fn convert(samples: &[f32]) -> Vec<i16> {
    convert_block(samples).into_samples()
}

/// convert f32 samples to raw pcm16 bytes (native endian, little on wasm)
#[wasm_bindgen]
pub fn convert_to_bytes(samples: &[f32]) -> Vec<u8> {
    convert_block(samples).as_bytes().to_vec()
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// names of the processors in the global registry
#[wasm_bindgen]
pub fn processor_names() -> Vec<String> {
    registry::global()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// install a panic hook that reports to the browser console
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

// worklet processor wasm api

/// A registered processor plus the listener end of its port
///
/// Call `process` from `AudioWorkletProcessor.process` with `inputs[0]`, then
/// drain converted blocks with `next_block` and post them to the main thread.
#[wasm_bindgen]
pub struct WasmPcm16Processor {
    processor: Box<dyn AudioProcessor>,
    receiver: BlockReceiver,
    // channel 0 copied out of JS, reused across callbacks
    scratch: Vec<f32>,
}

#[wasm_bindgen]
impl WasmPcm16Processor {
    /// new processor from the global registry
    ///
    /// `name` defaults to "pcm16", `capacity` to the default port capacity.
    #[wasm_bindgen(constructor)]
    pub fn new(name: Option<String>, capacity: Option<usize>) -> Result<WasmPcm16Processor, JsValue> {
        let name = name.as_deref().unwrap_or(PCM16_PROCESSOR_NAME);
        let (sender, receiver) = port::channel(capacity.unwrap_or(DEFAULT_PORT_CAPACITY));
        let processor = registry::global().create(name, sender).map_err(to_js_err)?;
        Ok(Self {
            processor,
            receiver,
            scratch: Vec::with_capacity(DEFAULT_RENDER_QUANTUM),
        })
    }

    /// process one input connection (an array of Float32Array channels)
    ///
    /// Only channel 0 is read; a missing or non-Float32Array entry there counts
    /// as no channel. Always returns true so the worklet stays alive.
    #[wasm_bindgen]
    pub fn process(&mut self, input: &js_sys::Array) -> bool {
        match input.get(0).dyn_into::<js_sys::Float32Array>() {
            Ok(channel) => {
                self.scratch.resize(channel.length() as usize, 0.0);
                channel.copy_to(&mut self.scratch);
                let samples = Some(self.scratch.as_slice());
                process_single_channel(self.processor.as_mut(), samples)
            }
            Err(_) => process_single_channel(self.processor.as_mut(), None),
        }
    }

    /// next converted block as an Int16Array, or undefined
    #[wasm_bindgen]
    pub fn next_block(&mut self) -> Option<Vec<i16>> {
        self.receiver.try_recv().map(ConvertedBlock::into_samples)
    }

    /// next converted block as raw bytes, or undefined
    #[wasm_bindgen]
    pub fn next_block_bytes(&mut self) -> Option<Vec<u8>> {
        self.receiver
            .try_recv()
            .map(|block| block.as_bytes().to_vec())
    }

    /// blocks waiting to be taken
    #[wasm_bindgen]
    pub fn pending_blocks(&self) -> usize {
        self.receiver.pending()
    }

    /// posted / dropped counters as a plain object
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.receiver.stats()).map_err(to_js_err)
    }
}
