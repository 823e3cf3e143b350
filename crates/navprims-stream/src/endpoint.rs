use std::io::{self, Read, Write};

use crate::channel::ChannelHandle;

/// A resolved stream: one of the process's standard streams or a pooled channel.
///
/// Standard streams are never pooled and never closed by the pool.
#[derive(Debug, Clone)]
pub enum Endpoint {
    Stdin,
    Stdout,
    Channel(ChannelHandle),
}

impl Endpoint {
    pub fn is_standard(&self) -> bool {
        matches!(self, Endpoint::Stdin | Endpoint::Stdout)
    }

    /// The pooled channel behind this endpoint, if any.
    pub fn channel(&self) -> Option<&ChannelHandle> {
        match self {
            Endpoint::Channel(handle) => Some(handle),
            _ => None,
        }
    }

    /// True when both endpoints write to or read from the same underlying stream.
    pub fn same_target(&self, other: &Endpoint) -> bool {
        match (self, other) {
            (Endpoint::Stdin, Endpoint::Stdin) | (Endpoint::Stdout, Endpoint::Stdout) => true,
            (Endpoint::Channel(a), Endpoint::Channel(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Endpoint::Stdin => "[stdin]".to_string(),
            Endpoint::Stdout => "[stdout]".to_string(),
            Endpoint::Channel(handle) => handle.label(),
        }
    }
}

fn wrong_direction(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Unsupported, format!("{what} is not supported"))
}

impl Read for Endpoint {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Endpoint::Stdin => io::stdin().lock().read(buf),
            Endpoint::Stdout => Err(wrong_direction("reading from stdout")),
            Endpoint::Channel(handle) => handle.read(buf),
        }
    }
}

impl Write for Endpoint {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Endpoint::Stdin => Err(wrong_direction("writing to stdin")),
            Endpoint::Stdout => io::stdout().lock().write(buf),
            Endpoint::Channel(handle) => handle.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Endpoint::Stdin => Ok(()),
            Endpoint::Stdout => io::stdout().lock().flush(),
            Endpoint::Channel(handle) => handle.flush(),
        }
    }
}
