use tracing::debug;

use crate::{payload::DEFAULT_LANGUAGE, record::NdefRecord};

/// Mime type that is encoded as a well known text record instead of a MIME media record
pub const TEXT_PLAIN: &str = "text/plain";

/// Largest message the 2 byte length prefix can describe
pub const MAX_MESSAGE_LENGTH: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdefEncodeError {
    #[error("message is {0} bytes, the length prefix holds at most 65535")]
    MessageTooLong(usize),

    #[error("record type is {0} bytes, at most 255 are allowed")]
    TypeTooLong(usize),

    #[error("record id is {0} bytes, at most 255 are allowed")]
    IdTooLong(usize),

    #[error("record payload is {0} bytes, too long for a 4 byte payload length")]
    PayloadTooLong(usize),

    #[error("mime type must be ASCII: {0}")]
    NonAsciiMimeType(String),

    #[error("an NDEF message needs at least one record")]
    NoRecords,
}

pub type Error = NdefEncodeError;
pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

/// An NDEF message, the first record carries message begin and the last one message end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefMessage {
    records: Vec<NdefRecord>,
}

impl NdefMessage {
    pub fn new(mut records: Vec<NdefRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::NoRecords);
        }

        let last = records.len() - 1;
        for (index, record) in records.iter_mut().enumerate() {
            record.header.message_begin = index == 0;
            record.header.message_end = index == last;
        }

        Ok(Self { records })
    }

    pub fn single(record: NdefRecord) -> Self {
        let mut record = record;
        record.header.message_begin = true;
        record.header.message_end = true;

        Self { records: vec![record] }
    }

    pub fn records(&self) -> &[NdefRecord] {
        &self.records
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for record in &self.records {
            record.write_to(&mut out);
        }
        out
    }
}

/// A serialized message together with its big endian length prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    length_prefix: [u8; 2],
    message: Vec<u8>,
}

impl EncodedMessage {
    pub fn try_from_message(message: &NdefMessage) -> Result<Self> {
        let message = message.to_bytes();
        let length = u16::try_from(message.len()).map_err(|_| Error::MessageTooLong(message.len()))?;

        Ok(Self {
            length_prefix: length.to_be_bytes(),
            message,
        })
    }

    pub fn length_prefix(&self) -> [u8; 2] {
        self.length_prefix
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn message_len(&self) -> u16 {
        u16::from_be_bytes(self.length_prefix)
    }

    /// Length prefix followed by the message, the layout of a Type 4 Tag NDEF file
    pub fn to_file_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(2 + self.message.len());
        bytes.extend_from_slice(&self.length_prefix);
        bytes.extend_from_slice(&self.message);
        bytes
    }
}

/// Encode `content` as a single record message without a record id
pub fn encode(content: &str, mime_type: &str) -> Result<EncodedMessage> {
    encode_with_id(content, mime_type, None)
}

/// Encode `content` as a single record message
///
/// `text/plain` becomes a well known text record in English, any other mime type becomes a MIME
/// media record whose payload is the UTF-8 content
pub fn encode_with_id(content: &str, mime_type: &str, id: Option<&[u8]>) -> Result<EncodedMessage> {
    let id = id.map(<[u8]>::to_vec);

    let record = if mime_type == TEXT_PLAIN {
        NdefRecord::text(DEFAULT_LANGUAGE, content, id)?
    } else {
        NdefRecord::mime(mime_type, content.as_bytes(), id)?
    };

    let encoded = EncodedMessage::try_from_message(&NdefMessage::single(record))?;
    debug!("encoded {mime_type} message, length: {}", encoded.message_len());

    Ok(encoded)
}
