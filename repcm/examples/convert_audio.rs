//! Example: Drive the pcm16 processor by hand and save WAV + raw PCM
//!
//! Run with: cargo run --example convert_audio input.mp3 output.wav

use libpcm16_audio::{port, registry, RenderHost, RenderOptions, RenderSource};
use std::env;
use std::fs;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <input-audio> <output-wav>", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    println!("Reading {}...", input_path);
    let decoded = repcm::audio::read_audio_file(input_path.as_ref())?;
    println!("  Sample rate: {} Hz", decoded.sample_rate);
    println!("  Channels: {}", decoded.channels);
    println!("  Duration: {:.2}s", decoded.duration_secs());

    let source = RenderSource::from_interleaved(&decoded.samples, decoded.channels)?;
    let options = RenderOptions::new(decoded.sample_rate);

    // queue big enough for the whole file so nothing is dropped
    let (sender, receiver) = port::channel(options.blocks_for(source.frames()));
    let processor = registry::global().create(repcm::PCM16_PROCESSOR_NAME, sender)?;

    let listener = thread::spawn(move || {
        let mut samples = Vec::new();
        for block in receiver.iter() {
            samples.extend(block.into_samples());
        }
        (samples, receiver.stats())
    });

    println!("\nRendering through '{}'...", repcm::PCM16_PROCESSOR_NAME);
    let report = RenderHost::new(options)?.spawn(processor, source)?.join()?;
    let (samples, stats) = listener
        .join()
        .map_err(|_| "listener thread panicked")?;

    println!("  Blocks: {} rendered, {} posted", report.blocks, stats.posted);
    println!("  Samples: {}", samples.len());

    repcm::audio::write_pcm16_wav(output_path.as_ref(), &samples, decoded.sample_rate)?;
    println!("\nWrote WAV to {}", output_path);

    let pcm_path = if let Some(stem) = output_path.strip_suffix(".wav") {
        format!("{}.pcm", stem)
    } else {
        format!("{}.pcm", output_path)
    };
    fs::write(&pcm_path, repcm::audio::pcm16_to_raw_bytes(&samples))?;
    println!("Wrote raw PCM to {}", pcm_path);

    Ok(())
}
