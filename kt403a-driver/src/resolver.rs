//! Command link and query resolution
//!
//! [`CommandLink`] owns the serial line and the delay. Every send is
//! followed by the command's settle delay. Queries then drain the receive
//! buffer in 10-byte chunks until nothing is buffered, and the last decoded
//! frame is the answer. A chunk that does not decode is dropped up to the
//! next start byte, so stray bytes on the line cost at most the frame they
//! land in. The module may repeat itself or leave stale frames behind, so
//! only the most recent one counts.

use kt403a_hal::{DelayNs, SerialPort};
use kt403a_protocol::frame::FRAME_START;
use kt403a_protocol::{decode, Command, Response, RESPONSE_FRAME_SIZE};

/// Upper bound on reads performed by a single drain
pub const MAX_DRAIN_FRAMES: usize = 32;

/// Drain the receive buffer and return the most recent valid frame
///
/// Never waits for bytes: it stops as soon as the port reports nothing
/// buffered, or after [`MAX_DRAIN_FRAMES`] reads. Undecodable bytes are
/// discarded until the next start byte. A trailing partial frame is
/// consumed and dropped.
pub fn drain_last<S: SerialPort>(serial: &mut S) -> Result<Option<Response>, S::Error> {
    let mut last = None;
    let mut buf = [0u8; RESPONSE_FRAME_SIZE];
    let mut filled = 0;

    for _ in 0..MAX_DRAIN_FRAMES {
        if serial.bytes_available()? == 0 {
            break;
        }

        let n = serial.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
        if filled < RESPONSE_FRAME_SIZE {
            continue;
        }

        match decode(&buf) {
            Some(response) => {
                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "RX opcode={=u8:#x} data={=u16:#x}",
                    response.opcode,
                    response.data
                );
                last = Some(response);
                filled = 0;
            }
            None => {
                filled = resync(&mut buf);
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "Discarding {} undecodable bytes",
                    RESPONSE_FRAME_SIZE - filled
                );
            }
        }
    }

    Ok(last)
}

/// Shift the chunk so it starts at the next start byte after offset 0
///
/// Returns the number of bytes kept.
fn resync(buf: &mut [u8; RESPONSE_FRAME_SIZE]) -> usize {
    match buf[1..].iter().position(|&b| b == FRAME_START) {
        Some(pos) => {
            buf.copy_within(pos + 1.., 0);
            RESPONSE_FRAME_SIZE - (pos + 1)
        }
        None => 0,
    }
}

/// Serial line plus settle-delay discipline
pub struct CommandLink<S, D> {
    serial: S,
    delay: D,
}

impl<S: SerialPort, D: DelayNs> CommandLink<S, D> {
    /// Create a link over a serial port and a delay provider
    pub fn new(serial: S, delay: D) -> Self {
        Self { serial, delay }
    }

    /// Send a command and wait for its settle delay
    ///
    /// Data bits beyond the command's width are dropped.
    pub fn send(&mut self, command: Command, data: u16) -> Result<(), S::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("TX {:?} data={=u16:#x}", command, data);

        self.serial.write_all(&command.encode(data))?;
        self.delay.delay_ms(command.settle_delay_ms());
        Ok(())
    }

    /// Send a query and resolve it to the most recent response
    ///
    /// `Ok(None)` means the module did not answer with a valid frame.
    pub fn query(&mut self, command: Command, data: u16) -> Result<Option<Response>, S::Error> {
        self.send(command, data)?;
        drain_last(&mut self.serial)
    }

    /// Get a mutable reference to the serial port
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Consume the link and return the serial port and delay
    pub fn release(self) -> (S, D) {
        (self.serial, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{response, MockDelay, MockSerial};

    #[test]
    fn test_drain_empty_returns_none() {
        let mut serial = MockSerial::new();
        assert_eq!(drain_last(&mut serial).unwrap(), None);
    }

    #[test]
    fn test_drain_keeps_most_recent_frame() {
        let mut serial = MockSerial::new();
        serial.push_rx(&response(0x42, 0x0201));
        serial.push_rx(&response(0x42, 0x0202));

        let last = drain_last(&mut serial).unwrap().unwrap();
        assert_eq!(last.data, 0x0202);
        assert_eq!(serial.pending_rx(), 0);
    }

    #[test]
    fn test_drain_skips_malformed_chunk() {
        let mut serial = MockSerial::new();
        serial.push_rx(&response(0x43, 12));
        let mut bad = response(0x43, 20);
        bad[0] = 0x7D;
        serial.push_rx(&bad);
        serial.push_rx(&response(0x43, 25));

        let last = drain_last(&mut serial).unwrap().unwrap();
        assert_eq!(last.data, 25);
        assert_eq!(serial.pending_rx(), 0);
    }

    #[test]
    fn test_drain_resyncs_after_noise_byte() {
        let mut serial = MockSerial::new();
        serial.push_rx(&[0x00]);
        serial.push_rx(&response(0x42, 0x0201));

        let last = drain_last(&mut serial).unwrap().unwrap();
        assert_eq!(last.opcode, 0x42);
        assert_eq!(last.data, 0x0201);
        assert_eq!(serial.pending_rx(), 0);
    }

    #[test]
    fn test_drain_resyncs_after_truncated_frame() {
        let mut serial = MockSerial::new();
        serial.push_rx(&response(0x42, 0x0200)[..4]);
        serial.push_rx(&response(0x42, 0x0202));

        let last = drain_last(&mut serial).unwrap().unwrap();
        assert_eq!(last.data, 0x0202);
        assert_eq!(serial.pending_rx(), 0);
    }

    #[test]
    fn test_noise_does_not_poison_later_queries() {
        let mut serial = MockSerial::new();
        serial.push_rx(&[0x00]);
        let mut link = CommandLink::new(serial, MockDelay::new());

        for _ in 0..5 {
            link.serial_mut().reply_to(0x42, response(0x42, 0x0201));
            let reply = link.query(Command::QueryState, 0).unwrap();
            assert_eq!(reply.map(|r| r.data), Some(0x0201));
        }
        assert_eq!(link.serial_mut().pending_rx(), 0);
    }

    #[test]
    fn test_drain_partial_frame_is_discarded() {
        let mut serial = MockSerial::new();
        serial.push_rx(&response(0x42, 0x0200)[..6]);

        assert_eq!(drain_last(&mut serial).unwrap(), None);
        assert_eq!(serial.pending_rx(), 0);
    }

    #[test]
    fn test_drain_is_bounded() {
        let mut serial = MockSerial::new();
        for i in 0..(MAX_DRAIN_FRAMES as u16 + 3) {
            serial.push_rx(&response(0x48, i));
        }

        let last = drain_last(&mut serial).unwrap().unwrap();
        assert_eq!(last.data, MAX_DRAIN_FRAMES as u16 - 1);
        assert_eq!(serial.pending_rx(), 3 * RESPONSE_FRAME_SIZE);
    }

    #[test]
    fn test_send_waits_settle_delay() {
        let mut link = CommandLink::new(MockSerial::new(), MockDelay::new());
        link.send(Command::Play, 0).unwrap();
        link.send(Command::SelectDevice, 2).unwrap();
        link.send(Command::Reset, 0).unwrap();

        let (serial, delay) = link.release();
        assert_eq!(serial.sent_count(), 3);
        assert_eq!(&delay.waits_ms[..], &[30, 200, 1000]);
    }

    #[test]
    fn test_query_resolves_reply() {
        let mut serial = MockSerial::new();
        serial.reply_to(0x43, response(0x43, 21));
        let mut link = CommandLink::new(serial, MockDelay::new());

        let reply = link.query(Command::QueryVolume, 0).unwrap().unwrap();
        assert_eq!(reply.opcode, 0x43);
        assert_eq!(reply.data, 21);

        // No second reply scripted
        assert_eq!(link.query(Command::QueryVolume, 0).unwrap(), None);
    }

    #[test]
    fn test_query_drains_stale_frames() {
        let mut serial = MockSerial::new();
        // Left over from an earlier exchange
        serial.push_rx(&response(0x42, 0x0201));
        serial.reply_to(0x42, response(0x42, 0x0200));
        let mut link = CommandLink::new(serial, MockDelay::new());

        let reply = link.query(Command::QueryState, 0).unwrap().unwrap();
        assert_eq!(reply.data, 0x0200);
    }

    #[test]
    fn test_send_error_propagates() {
        let mut serial = MockSerial::new();
        serial.fail_writes = true;
        let mut link = CommandLink::new(serial, MockDelay::new());

        assert!(link.send(Command::Play, 0).is_err());
        let (_, delay) = link.release();
        assert!(delay.waits_ms.is_empty());
    }
}
