//! Serial byte-stream transport
//!
//! The player driver needs three things from the line: write a frame,
//! ask whether anything has been received, and take what has been
//! received without waiting for more.

use embedded_io::{Read, ReadReady, Write};

/// Serial transport used by the player driver
///
/// Reads are non-blocking: an implementation returns only the bytes that are
/// already buffered and never waits for the line to produce more.
pub trait SerialPort {
    /// Error type for transport operations
    type Error;

    /// Write all bytes to the line
    ///
    /// Returns once every byte has been handed to the transmitter.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Number of received bytes ready to be read
    ///
    /// Implementations that cannot count report `1` when anything is pending.
    /// Zero always means nothing is buffered.
    fn bytes_available(&mut self) -> Result<usize, Self::Error>;

    /// Read up to `buf.len()` already-buffered bytes
    ///
    /// Returns the number of bytes copied, which may be zero.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: SerialPort + ?Sized> SerialPort for &mut T {
    type Error = T::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_all(self, data)
    }

    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        T::bytes_available(self)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read(self, buf)
    }
}

/// [`SerialPort`] adapter for `embedded-io` ports
///
/// Works with any buffered UART that implements blocking `Read`/`Write`
/// plus `ReadReady`. `ReadReady` is consulted before every read so that
/// the adapter never blocks on an empty receive buffer.
pub struct IoSerial<T> {
    inner: T,
}

impl<T> IoSerial<T> {
    /// Wrap an `embedded-io` port
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Consume the adapter and return the wrapped port
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write + ReadReady> SerialPort for IoSerial<T> {
    type Error = T::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)?;
        self.inner.flush()
    }

    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        Ok(usize::from(self.inner.read_ready()?))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut filled = 0;
        while filled < buf.len() && self.inner.read_ready()? {
            let n = self.inner.read(&mut buf[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}
