//! Frame encoding and decoding for the KT403A serial protocol.
//!
//! Command frame (8 bytes, host → module):
//! - START (1 byte): 0x7E
//! - VERSION (1 byte): 0xFF
//! - LENGTH (1 byte): 0x06, length of the command section
//! - CMD (1 byte): opcode
//! - FEEDBACK (1 byte): 0x00, acknowledgements are never requested
//! - DATA LOW, DATA HIGH (2 bytes)
//! - END (1 byte): 0xEF
//!
//! Response frame (10 bytes, module → host):
//! - START, VERSION, LENGTH, CMD, FLAG as above
//! - DATA HIGH, DATA LOW (2 bytes, big-endian)
//! - 2 trailing bytes that are not inspected
//! - END (1 byte): 0xEF
//!
//! No checksum is generated or verified.

/// Frame start delimiter
pub const FRAME_START: u8 = 0x7E;

/// Version / address byte
pub const FRAME_VERSION: u8 = 0xFF;

/// Length of the command section
pub const FRAME_LENGTH: u8 = 0x06;

/// Frame end delimiter
pub const FRAME_END: u8 = 0xEF;

/// Feedback flag sent with every command (no acknowledgement)
pub const NO_FEEDBACK: u8 = 0x00;

/// Size of an outbound command frame
pub const TX_FRAME_SIZE: usize = 8;

/// Size of an inbound response frame
pub const RESPONSE_FRAME_SIZE: usize = 10;

// Response byte indices
const INDEX_START: usize = 0;
const INDEX_VERSION: usize = 1;
const INDEX_LENGTH: usize = 2;
const INDEX_CMD: usize = 3;
const INDEX_DATA_H: usize = 5;
const INDEX_DATA_L: usize = 6;
const INDEX_END: usize = 9;

/// Reasons a received buffer is not a response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Buffer is not exactly [`RESPONSE_FRAME_SIZE`] bytes
    InvalidLength,
    /// First byte is not 0x7E
    InvalidStart,
    /// Version byte is not 0xFF
    InvalidVersion,
    /// Length byte is not 0x06
    InvalidCommandLength,
    /// Last byte is not 0xEF
    InvalidEnd,
}

/// Encode a command frame
///
/// Total over its input: any opcode and data word produce a frame. Range
/// checks on the data belong to the caller.
pub fn encode(opcode: u8, data: u16) -> [u8; TX_FRAME_SIZE] {
    let [data_low, data_high] = data.to_le_bytes();
    [
        FRAME_START,
        FRAME_VERSION,
        FRAME_LENGTH,
        opcode,
        NO_FEEDBACK,
        data_low,
        data_high,
        FRAME_END,
    ]
}

/// A decoded response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Opcode the module is answering
    pub opcode: u8,
    /// 16-bit data word (big-endian on the wire)
    pub data: u16,
}

impl Response {
    /// Parse a response frame
    ///
    /// The whole buffer must be exactly one frame. Any mismatch rejects the
    /// frame as a whole; nothing is partially accepted.
    pub fn parse(buf: &[u8]) -> Result<Self, FrameError> {
        let frame: &[u8; RESPONSE_FRAME_SIZE] =
            buf.try_into().map_err(|_| FrameError::InvalidLength)?;

        if frame[INDEX_START] != FRAME_START {
            return Err(FrameError::InvalidStart);
        }
        if frame[INDEX_VERSION] != FRAME_VERSION {
            return Err(FrameError::InvalidVersion);
        }
        if frame[INDEX_LENGTH] != FRAME_LENGTH {
            return Err(FrameError::InvalidCommandLength);
        }
        if frame[INDEX_END] != FRAME_END {
            return Err(FrameError::InvalidEnd);
        }

        Ok(Self {
            opcode: frame[INDEX_CMD],
            data: u16::from_be_bytes([frame[INDEX_DATA_H], frame[INDEX_DATA_L]]),
        })
    }
}

/// Decode a response frame, discarding the reason for a rejection
pub fn decode(buf: &[u8]) -> Option<Response> {
    Response::parse(buf).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STOPPED_RESPONSE: [u8; 10] = [0x7E, 0xFF, 0x06, 0x42, 0x00, 0x02, 0x00, 0x00, 0x00, 0xEF];

    #[test]
    fn test_encode_no_data() {
        assert_eq!(
            encode(0x0D, 0),
            [0x7E, 0xFF, 0x06, 0x0D, 0x00, 0x00, 0x00, 0xEF]
        );
    }

    #[test]
    fn test_encode_splits_track_index() {
        // 300 = 0x012C: low byte first on transmit
        assert_eq!(
            encode(0x03, 300),
            [0x7E, 0xFF, 0x06, 0x03, 0x00, 0x2C, 0x01, 0xEF]
        );
    }

    #[test]
    fn test_decode_state_response() {
        let response = decode(&STOPPED_RESPONSE).unwrap();

        assert_eq!(response.opcode, 0x42);
        assert_eq!(response.data, 0x0200);
    }

    #[test]
    fn test_decode_ignores_flag_and_trailing_bytes() {
        let mut frame = STOPPED_RESPONSE;
        frame[4] = 0x01;
        frame[7] = 0xFE;
        frame[8] = 0xB9;

        assert_eq!(decode(&frame).unwrap().data, 0x0200);
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        assert_eq!(
            Response::parse(&STOPPED_RESPONSE[..9]),
            Err(FrameError::InvalidLength)
        );
        assert_eq!(decode(&[]), None);
    }

    #[test]
    fn test_decode_rejects_long_buffer() {
        let mut long = [0u8; 11];
        long[..10].copy_from_slice(&STOPPED_RESPONSE);
        long[10] = 0xEF;

        assert_eq!(Response::parse(&long), Err(FrameError::InvalidLength));
    }

    #[test]
    fn test_decode_rejects_bad_delimiters() {
        let mut bad_start = STOPPED_RESPONSE;
        bad_start[0] = 0x7D;
        assert_eq!(Response::parse(&bad_start), Err(FrameError::InvalidStart));

        let mut bad_version = STOPPED_RESPONSE;
        bad_version[1] = 0xFE;
        assert_eq!(
            Response::parse(&bad_version),
            Err(FrameError::InvalidVersion)
        );

        let mut bad_length = STOPPED_RESPONSE;
        bad_length[2] = 0x08;
        assert_eq!(
            Response::parse(&bad_length),
            Err(FrameError::InvalidCommandLength)
        );

        let mut bad_end = STOPPED_RESPONSE;
        bad_end[9] = 0xEE;
        assert_eq!(Response::parse(&bad_end), Err(FrameError::InvalidEnd));
    }

    proptest! {
        #[test]
        fn encode_always_delimited(opcode in any::<u8>(), data in any::<u16>()) {
            let frame = encode(opcode, data);
            prop_assert_eq!(frame[0], FRAME_START);
            prop_assert_eq!(frame[1], FRAME_VERSION);
            prop_assert_eq!(frame[2], FRAME_LENGTH);
            prop_assert_eq!(frame[3], opcode);
            prop_assert_eq!(frame[4], NO_FEEDBACK);
            prop_assert_eq!(frame[7], FRAME_END);
            prop_assert_eq!(u16::from(frame[5]) | (u16::from(frame[6]) << 8), data);
        }

        #[test]
        fn decode_never_accepts_wrong_length(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
            prop_assume!(bytes.len() != RESPONSE_FRAME_SIZE);
            prop_assert_eq!(decode(&bytes), None);
        }

        #[test]
        fn decode_reads_data_big_endian(opcode in any::<u8>(), flag in any::<u8>(), data in any::<u16>()) {
            let [high, low] = data.to_be_bytes();
            let frame = [0x7E, 0xFF, 0x06, opcode, flag, high, low, 0x00, 0x00, 0xEF];
            prop_assert_eq!(decode(&frame), Some(Response { opcode, data }));
        }
    }
}
