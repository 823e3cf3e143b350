use std::cell::RefCell;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::rc::Rc;

use serialport::SerialPort;

/// Any byte stream a channel can carry.
pub trait ChannelIo: Read + Write {}

impl<T: Read + Write> ChannelIo for T {}

/// What a channel is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    File,
    Serial,
    Stream,
}

/// An open byte stream bound to one specifier.
///
/// Channels are owned by the [`ChannelPool`](crate::ChannelPool); callers reach them
/// through a [`ChannelHandle`].
pub struct Channel {
    label: String,
    baud_rate: Option<u32>,
    inner: ChannelInner,
}

enum ChannelInner {
    File(File),
    Serial(Box<dyn SerialPort>),
    Stream(Box<dyn ChannelIo>),
    /// A file that could not be opened. Every read and write reports `error`.
    Failed(io::ErrorKind),
}

impl Channel {
    /// Wrap an open file.
    pub fn from_file(label: impl Into<String>, file: File) -> Self {
        Self {
            label: label.into(),
            baud_rate: None,
            inner: ChannelInner::File(file),
        }
    }

    /// Wrap an open serial port.
    pub fn from_serial(label: impl Into<String>, port: Box<dyn SerialPort>) -> Self {
        Self {
            label: label.into(),
            baud_rate: None,
            inner: ChannelInner::Serial(port),
        }
    }

    /// Wrap an arbitrary stream (sockets, pipes, in-memory buffers).
    pub fn from_stream(label: impl Into<String>, stream: impl ChannelIo + 'static) -> Self {
        Self {
            label: label.into(),
            baud_rate: None,
            inner: ChannelInner::Stream(Box::new(stream)),
        }
    }

    /// A file channel whose open failed with `error`.
    ///
    /// Nothing can be written to it, so flushing succeeds; reads and writes fail.
    pub fn failed(label: impl Into<String>, error: io::ErrorKind) -> Self {
        Self {
            label: label.into(),
            baud_rate: None,
            inner: ChannelInner::Failed(error),
        }
    }

    /// Record the baud rate applied when the channel was opened.
    pub fn with_baud_rate(mut self, baud_rate: Option<u32>) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ChannelKind {
        match self.inner {
            ChannelInner::File(_) | ChannelInner::Failed(_) => ChannelKind::File,
            ChannelInner::Serial(_) => ChannelKind::Serial,
            ChannelInner::Stream(_) => ChannelKind::Stream,
        }
    }

    /// Baud rate applied at open time, if one was requested.
    pub fn baud_rate(&self) -> Option<u32> {
        self.baud_rate
    }

    /// Why the channel could not be opened, for channels created with [`Channel::failed`].
    pub fn open_error(&self) -> Option<io::ErrorKind> {
        match self.inner {
            ChannelInner::Failed(kind) => Some(kind),
            _ => None,
        }
    }

    fn io(&mut self) -> io::Result<&mut dyn ChannelIo> {
        match &mut self.inner {
            ChannelInner::File(file) => Ok(file),
            ChannelInner::Serial(port) => Ok(port),
            ChannelInner::Stream(stream) => Ok(stream),
            ChannelInner::Failed(kind) => Err(io::Error::new(
                *kind,
                format!("{}: channel was never opened", self.label),
            )),
        }
    }
}

impl Read for Channel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.io()?.read(buf)
    }
}

impl Write for Channel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.io()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if let ChannelInner::Failed(_) = self.inner {
            return Ok(());
        }
        self.io()?.flush()
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("label", &self.label)
            .field("kind", &self.kind())
            .field("baud_rate", &self.baud_rate)
            .field("open_error", &self.open_error())
            .finish()
    }
}

/// Shared, single-threaded handle to a pooled channel.
///
/// Cloning the handle never reopens anything; all clones refer to the same channel.
#[derive(Clone)]
pub struct ChannelHandle(Rc<RefCell<Channel>>);

impl ChannelHandle {
    pub(crate) fn new(channel: Channel) -> Self {
        Self(Rc::new(RefCell::new(channel)))
    }

    /// True when both handles refer to the same pooled channel.
    pub fn ptr_eq(&self, other: &ChannelHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn label(&self) -> String {
        self.0.borrow().label().to_string()
    }

    pub fn kind(&self) -> ChannelKind {
        self.0.borrow().kind()
    }

    pub fn baud_rate(&self) -> Option<u32> {
        self.0.borrow().baud_rate()
    }

    pub fn open_error(&self) -> Option<io::ErrorKind> {
        self.0.borrow().open_error()
    }
}

impl Read for ChannelHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.borrow_mut().read(buf)
    }
}

impl Write for ChannelHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

impl fmt::Debug for ChannelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChannelHandle").field(&self.0.borrow()).finish()
    }
}
