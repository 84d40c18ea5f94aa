//! name → processor factory table
//!
//! Hosts look processors up by name when they build a graph. The process-wide
//! table is written once: either installed explicitly before first use or
//! created on demand with the built-ins.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::OnceCell;

use crate::converter::SampleConverter;
use crate::core::{Pcm16Error, Pcm16Result};
use crate::port::BlockSender;
use crate::processor::{factory, AudioProcessor, ProcessorFactory};

/// Name the conversion processor is registered under
pub const PCM16_PROCESSOR_NAME: &str = "pcm16";

static GLOBAL: OnceCell<ProcessorRegistry> = OnceCell::new();

#[derive(Default)]
pub struct ProcessorRegistry {
    factories: HashMap<String, ProcessorFactory>,
}

impl ProcessorRegistry {
    /// empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// table with every built-in processor
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_builtins();
        registry
    }

    fn register_builtins(&mut self) {
        self.factories.insert(
            PCM16_PROCESSOR_NAME.to_string(),
            factory(|port| -> Box<dyn AudioProcessor> { Box::new(SampleConverter::new(port)) }),
        );
    }

    /// Add a processor under `name`
    pub fn register(&mut self, name: &str, factory: ProcessorFactory) -> Pcm16Result<()> {
        if name.is_empty() {
            return Err(Pcm16Error::EmptyProcessorName);
        }
        if self.factories.contains_key(name) {
            return Err(Pcm16Error::AlreadyRegistered(name.to_string()));
        }
        self.factories.insert(name.to_string(), factory);
        log::debug!("registered processor '{}'", name);
        Ok(())
    }

    /// Instantiate the processor registered under `name`, wired to `port`
    pub fn create(&self, name: &str, port: BlockSender) -> Pcm16Result<Box<dyn AudioProcessor>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Pcm16Error::UnknownProcessor(name.to_string()))?;
        Ok(factory(port))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// The process-wide table, built with the built-ins on first use
pub fn global() -> &'static ProcessorRegistry {
    GLOBAL.get_or_init(|| {
        log::debug!("initializing global processor registry with built-ins");
        ProcessorRegistry::with_builtins()
    })
}

/// Install a custom table as the process-wide one
///
/// Only succeeds before anything has read or installed the global table;
/// otherwise the table is handed back.
pub fn install(registry: ProcessorRegistry) -> Result<(), ProcessorRegistry> {
    GLOBAL.set(registry)?;
    log::debug!("installed custom global processor registry");
    Ok(())
}
