use std::path::Path;

use tracing::{debug, info, warn};

use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::opener::{ChannelOpener, SystemOpener};
use crate::pool::ChannelPool;
use crate::specifier::{Direction, PoolKey, Specifier, SERIAL_PREFIX};

/// Resolver settings.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Prefix that marks a specifier as a serial device.
    pub serial_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            serial_prefix: SERIAL_PREFIX.to_string(),
        }
    }
}

/// Turns specifier text into endpoints, opening channels through the pool.
///
/// The pool is passed in per call so its lifetime stays with the caller.
#[derive(Debug)]
pub struct Resolver<O = SystemOpener> {
    config: ResolverConfig,
    opener: O,
}

impl Resolver<SystemOpener> {
    /// Resolver that opens real files and serial devices.
    pub fn new() -> Self {
        Self::with_opener(SystemOpener::default())
    }
}

impl Default for Resolver<SystemOpener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ChannelOpener> Resolver<O> {
    pub fn with_opener(opener: O) -> Self {
        Self::with_config(opener, ResolverConfig::default())
    }

    pub fn with_config(opener: O, config: ResolverConfig) -> Self {
        Self { config, opener }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Classify `spec` without touching the pool.
    pub fn classify<'a>(&self, spec: &'a str, force_file: bool) -> Result<Specifier<'a>> {
        Specifier::parse_with_prefix(spec, force_file, &self.config.serial_prefix)
    }

    /// Resolve `spec` for `direction`.
    ///
    /// - `-` maps to stdin/stdout and is never pooled.
    /// - Serial devices are opened once per device name; a baud-rate suffix only takes
    ///   effect on the resolution that opens the device.
    /// - Anything else is a file, opened once per direction and path.
    ///
    /// With `force_file` set, `spec` is always a path.
    pub fn resolve(
        &mut self,
        pool: &mut ChannelPool,
        spec: &str,
        direction: Direction,
        force_file: bool,
    ) -> Result<Endpoint> {
        let specifier = self
            .classify(spec, force_file)
            .inspect_err(|err| warn!(spec, error = %err, "cannot resolve specifier"))?;

        match specifier {
            Specifier::Standard => {
                debug!(%direction, "using standard stream");
                Ok(match direction {
                    Direction::Input => Endpoint::Stdin,
                    Direction::Output => Endpoint::Stdout,
                })
            }
            Specifier::Serial { device, baud_rate } => {
                info!(spec, %direction, "resolving serial device");
                let key = PoolKey::Serial(device.to_string());
                if let Some(handle) = pool.get(&key) {
                    if baud_rate.is_some() && baud_rate != handle.baud_rate() {
                        debug!(
                            device,
                            requested = ?baud_rate,
                            applied = ?handle.baud_rate(),
                            "device already open, baud rate suffix ignored"
                        );
                    }
                    return Ok(Endpoint::Channel(handle));
                }
                let opener = &mut self.opener;
                pool.get_or_create(key, || opener.open_serial(device, baud_rate))
                    .map(Endpoint::Channel)
                    .inspect_err(|err| warn!(spec, error = %err, "cannot open serial device"))
            }
            Specifier::File(path) => {
                info!(spec, %direction, "resolving file");
                let key = PoolKey::File {
                    direction,
                    path: path.to_string(),
                };
                let opener = &mut self.opener;
                pool.get_or_create(key, || opener.open_file(Path::new(path), direction))
                    .map(Endpoint::Channel)
                    .inspect_err(|err| warn!(spec, error = %err, "cannot open file"))
            }
        }
    }

    /// Resolve `spec` for reading.
    pub fn resolve_input(&mut self, pool: &mut ChannelPool, spec: &str) -> Result<Endpoint> {
        self.resolve(pool, spec, Direction::Input, false)
    }

    /// Resolve `spec` for writing.
    pub fn resolve_output(&mut self, pool: &mut ChannelPool, spec: &str) -> Result<Endpoint> {
        self.resolve(pool, spec, Direction::Output, false)
    }
}
