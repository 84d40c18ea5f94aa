use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use repcm::CaptureOptions;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "repcm")]
#[command(author = "NellowTCS")]
#[command(version)]
#[command(about = "Render audio through the pcm16 worklet processor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an audio file to 16-bit mono PCM (WAV or raw)
    Convert {
        /// Input audio file (mp3, wav, flac, ogg, etc.)
        input: PathBuf,
        /// Output file (.wav, or raw PCM with --raw / .pcm extension)
        output: PathBuf,
        /// Frames per render callback
        #[arg(short, long, default_value = "128")]
        block_size: usize,
        /// Hand-off queue capacity in blocks (default: 256)
        #[arg(short, long)]
        queue: Option<usize>,
        /// Render at real-time speed
        #[arg(long)]
        realtime: bool,
        /// Write headerless native-endian PCM instead of WAV
        #[arg(long)]
        raw: bool,
        /// Registered processor to render through
        #[arg(short, long, default_value = repcm::PCM16_PROCESSOR_NAME)]
        processor: String,
        /// Print the capture summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show information about an audio file
    Info {
        /// Input audio file
        input: PathBuf,
    },
    /// List registered processors
    Processors,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            block_size,
            queue,
            realtime,
            raw,
            processor,
            json,
        } => {
            let mut options = CaptureOptions::default()
                .with_block_size(block_size)
                .with_realtime(realtime)
                .with_processor(processor);
            if let Some(q) = queue {
                options = options.with_queue_capacity(q);
            }
            let raw = raw || has_extension(&output, "pcm");
            convert(&input, &output, &options, raw, json)?;
        }
        Commands::Info { input } => {
            info(&input)?;
        }
        Commands::Processors => {
            for name in repcm::processor_names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn convert(
    input: &Path,
    output: &Path,
    options: &CaptureOptions,
    raw: bool,
    json: bool,
) -> Result<()> {
    if options.block_size == 0 {
        bail!("Block size must be at least 1");
    }

    let audio_bytes = fs::read(input).context("Failed to read input file")?;
    let decoded =
        repcm::audio::read_audio_from_bytes(&audio_bytes).context("Failed to read audio file")?;

    if !json {
        println!("Reading {}...", input.display());
        println!("  Sample rate: {} Hz", decoded.sample_rate);
        println!("  Channels: {}", decoded.channels);
        println!("  Duration: {:.2}s", decoded.duration_secs());
        println!(
            "Rendering through '{}' ({} frames per block{})...",
            options.processor,
            options.block_size,
            if options.realtime { ", real time" } else { "" }
        );
    }

    let capture = repcm::capture_from_samples(
        &decoded.samples,
        decoded.sample_rate,
        decoded.channels,
        options,
    )
    .context("Failed to capture audio")?;

    let bytes = if raw {
        repcm::encode_raw(&capture)
    } else {
        repcm::encode_wav(&capture)?
    };
    fs::write(output, &bytes).context("Failed to write output file")?;

    let summary = capture.summary();
    if json {
        let json_str =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("Done!");
    println!("  Output:   {}", output.display());
    println!(
        "  Format:   {}",
        if raw {
            "raw PCM16 (native endian)"
        } else {
            "WAV PCM16 mono"
        }
    );
    println!(
        "  Blocks:   {} rendered, {} received, {} dropped",
        summary.blocks_rendered, summary.blocks_received, summary.blocks_dropped
    );
    println!(
        "  Samples:  {} ({:.2}s)",
        summary.samples, summary.duration_secs
    );
    println!("  Size:     {} bytes", bytes.len());

    Ok(())
}

fn info(input: &Path) -> Result<()> {
    let audio_bytes = fs::read(input).context("Failed to read input file")?;
    let info = repcm::get_audio_info(&audio_bytes).context("Failed to read audio file")?;

    println!("Audio File");
    println!("───────────────────────────────");
    println!(
        "  Format:      {}",
        info.source_format.as_deref().unwrap_or("unknown")
    );
    println!("  Sample rate: {} Hz", info.sample_rate);
    println!("  Channels:    {}", info.channels);
    println!("  Duration:    {:.2}s", info.duration_secs);
    if info.channels > 1 {
        println!("  Note:        only channel 1 is converted");
    }

    Ok(())
}
