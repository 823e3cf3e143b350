//! Stream specifier resolution with a deduplicating channel pool.
//!
//! A specifier names an endpoint as text:
//! - `-` for standard input/output
//! - a serial device (`/dev/tty*` or `COM*`), optionally with `:<baud>`
//! - any other text as a file path
//!
//! The [`Resolver`] classifies specifiers and asks the [`ChannelPool`] for a channel,
//! opening one only on first use. This is the lowest layer of navprims.

pub mod channel;
pub mod endpoint;
pub mod error;
pub mod opener;
pub mod pool;
pub mod resolver;
pub mod specifier;

pub use channel::{Channel, ChannelHandle, ChannelIo, ChannelKind};
pub use endpoint::Endpoint;
pub use error::{Result, StreamError};
pub use opener::{apply_baud_rate, BaudControl, ChannelOpener, SystemOpener, DEFAULT_BAUD_RATE};
pub use pool::ChannelPool;
pub use resolver::{Resolver, ResolverConfig};
pub use specifier::{Direction, PoolKey, Specifier, SERIAL_PREFIX, STANDARD_TOKEN};
