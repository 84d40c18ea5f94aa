use std::thread::{self, JoinHandle};
use std::time::Instant;

use super::{RenderOptions, RenderReport, RenderSource};
use crate::core::{Pcm16Error, Pcm16Result};
use crate::processor::AudioProcessor;

/// Name given to spawned render threads
pub const RENDER_THREAD_NAME: &str = "pcm16-render";

/// Calls a processor once per block over a source
#[derive(Debug, Clone, Copy)]
pub struct RenderHost {
    options: RenderOptions,
}

impl RenderHost {
    /// Create a host; fails on a zero block size or sample rate
    pub fn new(options: RenderOptions) -> Pcm16Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the whole source on the current thread
    ///
    /// Every callback gets one input connection holding each source channel's
    /// slice for that block. The last block may be short. Stops early if the
    /// processor returns false.
    pub fn run(&self, processor: &mut dyn AudioProcessor, source: &RenderSource) -> RenderReport {
        let block_size = self.options.block_size;
        let frames = source.frames();
        let period = self.options.block_duration();

        log::debug!(
            "render start: {} frames, {} channels, block size {}, realtime {}",
            frames,
            source.channel_count(),
            block_size,
            self.options.realtime
        );

        // reused every callback so the loop itself does not allocate
        let mut views: Vec<&[f32]> = Vec::with_capacity(source.channel_count());
        let mut report = RenderReport::default();
        let started = Instant::now();
        let mut start = 0;

        while start < frames {
            let end = (start + block_size).min(frames);
            views.clear();
            views.extend(source.channels().iter().map(|ch| &ch[start..end]));

            let inputs = [views.as_slice()];
            let keep_going = processor.process(&inputs);
            report.blocks += 1;
            report.frames += (end - start) as u64;

            if !keep_going {
                report.stopped_by_processor = true;
                break;
            }
            start = end;

            // no pacing after the final block
            if self.options.realtime && start < frames {
                let deadline = started + period.mul_f64(report.blocks as f64);
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                }
            }
        }

        log::debug!(
            "render done: {} blocks, {} frames, stopped by processor: {}",
            report.blocks,
            report.frames,
            report.stopped_by_processor
        );
        report
    }

    /// Render on a dedicated thread
    ///
    /// The processor moves onto the render thread and is dropped there when
    /// rendering ends, which also closes its output port.
    pub fn spawn(
        self,
        mut processor: Box<dyn AudioProcessor>,
        source: RenderSource,
    ) -> Pcm16Result<RenderHandle> {
        let handle = thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || self.run(processor.as_mut(), &source))?;
        Ok(RenderHandle { handle })
    }
}

/// A render pass running on its own thread
pub struct RenderHandle {
    handle: JoinHandle<RenderReport>,
}

impl RenderHandle {
    /// Wait for the pass to finish
    pub fn join(self) -> Pcm16Result<RenderReport> {
        self.handle
            .join()
            .map_err(|_| Pcm16Error::RenderThreadPanicked)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
