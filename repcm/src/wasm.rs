use wasm_bindgen::prelude::*;

use crate::CaptureOptions;

fn to_js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

fn options_for(block_size: Option<usize>) -> CaptureOptions {
    let options = CaptureOptions::default();
    match block_size {
        Some(size) => options.with_block_size(size),
        None => options,
    }
}

/// Render an audio file through the pcm16 processor and return a mono 16-bit WAV
///
/// # Arguments
/// * `audio_bytes` - Raw bytes of an audio file (MP3, WAV, FLAC, OGG, etc.)
/// * `block_size` - Frames per render callback (default 128)
#[wasm_bindgen]
pub fn encode_audio_to_pcm16_wav(
    audio_bytes: &[u8],
    block_size: Option<usize>,
) -> Result<Vec<u8>, JsValue> {
    let capture =
        crate::capture_from_audio(audio_bytes, &options_for(block_size)).map_err(to_js_err)?;
    crate::encode_wav(&capture).map_err(to_js_err)
}

/// Same as `encode_audio_to_pcm16_wav` but headerless little-endian PCM
#[wasm_bindgen]
pub fn encode_audio_to_pcm16_raw(
    audio_bytes: &[u8],
    block_size: Option<usize>,
) -> Result<Vec<u8>, JsValue> {
    let capture =
        crate::capture_from_audio(audio_bytes, &options_for(block_size)).map_err(to_js_err)?;
    Ok(crate::encode_raw(&capture))
}

/// Capture summary for an audio file, as a JSON string
#[wasm_bindgen]
pub fn capture_summary_json(
    audio_bytes: &[u8],
    block_size: Option<usize>,
) -> Result<String, JsValue> {
    let capture =
        crate::capture_from_audio(audio_bytes, &options_for(block_size)).map_err(to_js_err)?;
    serde_json::to_string(&capture.summary()).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn get_audio_file_info(audio_bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = crate::get_audio_info(audio_bytes).map_err(to_js_err)?;

    let obj = js_sys::Object::new();
    js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("sampleRate"),
        &JsValue::from_f64(info.sample_rate as f64),
    )?;
    js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("channels"),
        &JsValue::from_f64(info.channels as f64),
    )?;
    js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("durationSecs"),
        &JsValue::from_f64(info.duration_secs as f64),
    )?;
    if let Some(format) = info.source_format {
        js_sys::Reflect::set(
            &obj,
            &JsValue::from_str("sourceFormat"),
            &JsValue::from_str(&format),
        )?;
    }
    Ok(obj.into())
}

// Initialize wasm-bindgen panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
