use std::io::Write;

use tracing::trace;

use crate::dump;
use crate::error::{PacketError, Result};
use crate::n0::encode_n0;
use crate::nav::NavigationState;

/// How navigation states are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Binary N0 packets.
    NPacket,
    /// One comma-separated text line per state, prefixed with the time of week.
    #[default]
    Csv,
}

/// Writes navigation states to any `Write` stream.
pub struct PacketWriter<T> {
    inner: T,
    encoding: Encoding,
    written: u64,
}

impl<T: Write> PacketWriter<T> {
    pub fn new(inner: T, encoding: Encoding) -> Self {
        Self {
            inner,
            encoding,
            written: 0,
        }
    }

    /// Write the column header line. N0 streams have no header.
    pub fn write_header(&mut self) -> Result<()> {
        if self.encoding == Encoding::Csv {
            let mut line = Vec::with_capacity(128);
            line.extend_from_slice(b"itow, ");
            dump::write_label(&mut line)?;
            line.push(b'\n');
            self.write_bytes(&line)?;
        }
        Ok(())
    }

    /// Write one state stamped with `time_of_week` seconds.
    pub fn write_state(&mut self, time_of_week: f64, nav: &impl NavigationState) -> Result<()> {
        match self.encoding {
            Encoding::NPacket => {
                let packet = encode_n0(time_of_week, nav);
                self.write_bytes(&packet)?;
            }
            Encoding::Csv => {
                let mut line = Vec::with_capacity(192);
                write!(line, "{time_of_week}, ")?;
                dump::write_state(&mut line, nav)?;
                line.push(b'\n');
                self.write_bytes(&line)?;
            }
        }
        self.written += 1;
        trace!(time_of_week, written = self.written, "state written");
        Ok(())
    }

    fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        self.inner.write_all(buf).map_err(PacketError::Io)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(PacketError::Io)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Number of states written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::n0::{N0_MARKER, N0_SIZE};
    use crate::nav::NavSnapshot;

    #[test]
    fn n_packet_stream_has_no_header() {
        let mut writer = PacketWriter::new(Vec::new(), Encoding::NPacket);
        writer.write_header().unwrap();
        writer.write_state(1.0, &NavSnapshot::default()).unwrap();
        writer.write_state(2.0, &NavSnapshot::default()).unwrap();

        let out = writer.into_inner();
        assert_eq!(out.len(), 2 * N0_SIZE);
        assert_eq!(out[0], N0_MARKER);
        assert_eq!(out[N0_SIZE], N0_MARKER);
    }

    #[test]
    fn csv_stream_has_header_and_time_column() {
        let mut writer = PacketWriter::new(Vec::new(), Encoding::Csv);
        writer.write_header().unwrap();
        writer.write_state(0.5, &NavSnapshot::default()).unwrap();
        assert_eq!(writer.written(), 1);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("itow, longitude, latitude"));
        assert_eq!(lines[1], "0.5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, ");
    }
}
