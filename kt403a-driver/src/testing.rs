//! Host-side test doubles for the serial line and delay

use heapless::{Deque, Vec};
use kt403a_hal::{DelayNs, SerialPort};
use kt403a_protocol::{RESPONSE_FRAME_SIZE, TX_FRAME_SIZE};

/// Error returned by [`MockSerial`] when writes are set to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Build a 10-byte response frame
pub fn response(opcode: u8, data: u16) -> [u8; RESPONSE_FRAME_SIZE] {
    let [high, low] = data.to_be_bytes();
    [0x7E, 0xFF, 0x06, opcode, 0x00, high, low, 0x00, 0x00, 0xEF]
}

/// Serial line that records writes and plays back scripted replies
///
/// A reply registered with [`MockSerial::reply_to`] is placed in the receive
/// buffer when a frame with the matching opcode is written.
pub struct MockSerial {
    tx: Vec<u8, 512>,
    rx: Deque<u8, 512>,
    replies: Vec<(u8, [u8; RESPONSE_FRAME_SIZE]), 16>,
    pub fail_writes: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self {
            tx: Vec::new(),
            rx: Deque::new(),
            replies: Vec::new(),
            fail_writes: false,
        }
    }

    /// Queue raw bytes in the receive buffer
    pub fn push_rx(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.rx.push_back(b).unwrap();
        }
    }

    /// Answer the next write of `opcode` with `frame`
    pub fn reply_to(&mut self, opcode: u8, frame: [u8; RESPONSE_FRAME_SIZE]) {
        self.replies.push((opcode, frame)).unwrap();
    }

    /// Frames written so far
    pub fn sent(&self) -> impl Iterator<Item = &[u8]> {
        self.tx.chunks(TX_FRAME_SIZE)
    }

    /// Number of frames written so far
    pub fn sent_count(&self) -> usize {
        self.tx.len() / TX_FRAME_SIZE
    }

    /// Most recent frame written
    pub fn last_sent(&self) -> &[u8] {
        let start = self.tx.len() - TX_FRAME_SIZE;
        &self.tx[start..]
    }

    /// Bytes still waiting in the receive buffer
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }
}

impl SerialPort for MockSerial {
    type Error = MockError;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockError);
        }
        self.tx.extend_from_slice(data).unwrap();

        if let Some(&opcode) = data.get(3) {
            if let Some(pos) = self.replies.iter().position(|(op, _)| *op == opcode) {
                let (_, frame) = self.replies.remove(pos);
                self.push_rx(&frame);
            }
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize, Self::Error> {
        Ok(self.rx.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

/// Delay that records every requested wait in milliseconds
pub struct MockDelay {
    pub waits_ms: Vec<u32, 64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            waits_ms: Vec::new(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000).unwrap();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms).unwrap();
    }
}
