//! the capability a host drives once per render block

use std::sync::Arc;

use crate::port::BlockSender;

/// Input connections for one callback
///
/// Outer slice: connections. Middle: channels of a connection. Inner: the
/// channel's samples for this block. Everything is borrowed from the host and
/// only valid for the duration of the call.
pub type Inputs<'a> = [&'a [&'a [f32]]];

/// A processing unit held by a host
pub trait AudioProcessor: Send {
    /// Handle one render block
    ///
    /// Runs on the render thread, so implementations must not block, do I/O
    /// or allocate without bound. Returning false tells the host to stop
    /// calling this processor.
    fn process(&mut self, inputs: &Inputs<'_>) -> bool;
}

/// Builds a processor wired to the given output port
pub type ProcessorFactory = Arc<dyn Fn(BlockSender) -> Box<dyn AudioProcessor> + Send + Sync>;

/// Wrap a closure as a [`ProcessorFactory`]
pub fn factory<F>(f: F) -> ProcessorFactory
where
    F: Fn(BlockSender) -> Box<dyn AudioProcessor> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Call `processor` with a single input connection
///
/// The connection holds `channel` as its only channel, or no channels at all
/// when `channel` is None (a disconnected input).
pub fn process_single_channel(
    processor: &mut dyn AudioProcessor,
    channel: Option<&[f32]>,
) -> bool {
    match channel {
        Some(samples) => {
            let channels = [samples];
            processor.process(&[&channels[..]])
        }
        None => {
            let channels: &[&[f32]] = &[];
            processor.process(&[channels])
        }
    }
}
