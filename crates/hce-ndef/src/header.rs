use crate::ndef_type::NdefType;

const MESSAGE_BEGIN: u8 = 0b1000_0000;
const MESSAGE_END: u8 = 0b0100_0000;
const CHUNKED: u8 = 0b0010_0000;
const SHORT_RECORD: u8 = 0b0001_0000;
const HAS_ID_LENGTH: u8 = 0b0000_1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefHeader {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunked: bool,
    pub short_record: bool,
    pub has_id_length: bool,
    pub type_name_format: NdefType,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// Header with the flags of `byte` set, lengths are left for the caller to read
    pub(crate) fn from_flags_byte(byte: u8) -> Self {
        Self {
            message_begin: byte & MESSAGE_BEGIN != 0,
            message_end: byte & MESSAGE_END != 0,
            chunked: byte & CHUNKED != 0,
            short_record: byte & SHORT_RECORD != 0,
            has_id_length: byte & HAS_ID_LENGTH != 0,
            type_name_format: NdefType::from(byte),
            type_length: 0,
            payload_length: 0,
            id_length: None,
        }
    }

    /// The flags byte: MB ME CF SR IL followed by the 3 bit TNF
    pub fn flags_byte(&self) -> u8 {
        let mut byte = self.type_name_format.tnf();

        if self.message_begin {
            byte |= MESSAGE_BEGIN;
        }
        if self.message_end {
            byte |= MESSAGE_END;
        }
        if self.chunked {
            byte |= CHUNKED;
        }
        if self.short_record {
            byte |= SHORT_RECORD;
        }
        if self.has_id_length {
            byte |= HAS_ID_LENGTH;
        }

        byte
    }

    /// Serialize the header: flags, type length, payload length (1 or 4 bytes), optional id length
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.flags_byte());
        out.push(self.type_length);

        if self.short_record {
            out.push(self.payload_length as u8);
        } else {
            out.extend_from_slice(&self.payload_length.to_be_bytes());
        }

        if let Some(id_length) = self.id_length {
            out.push(id_length);
        }
    }

    /// Number of bytes [`NdefHeader::write_to`] produces
    pub fn encoded_len(&self) -> usize {
        let payload_length_len = if self.short_record { 1 } else { 4 };
        2 + payload_length_len + usize::from(self.id_length.is_some())
    }
}
