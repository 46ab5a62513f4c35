use crate::{
    header::NdefHeader,
    message::{Error, Result},
    ndef_type::NdefType,
    payload::{NdefPayload, TextPayload},
};

/// Record type of a well known text record
pub const RTD_TEXT: &[u8] = b"T";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    pub header: NdefHeader,
    pub type_: Vec<u8>,
    pub id: Option<Vec<u8>>,
    pub payload: NdefPayload,
}

impl NdefRecord {
    /// Build a standalone record, message begin/end flags are set when it is put in a message
    pub fn new(
        type_name_format: NdefType,
        type_: Vec<u8>,
        id: Option<Vec<u8>>,
        payload: NdefPayload,
    ) -> Result<Self> {
        let type_length =
            u8::try_from(type_.len()).map_err(|_| Error::TypeTooLong(type_.len()))?;

        let id_length = match &id {
            Some(id) => Some(u8::try_from(id.len()).map_err(|_| Error::IdTooLong(id.len()))?),
            None => None,
        };

        let payload_len = payload.to_bytes().len();
        let payload_length =
            u32::try_from(payload_len).map_err(|_| Error::PayloadTooLong(payload_len))?;

        let header = NdefHeader {
            message_begin: false,
            message_end: false,
            chunked: false,
            short_record: payload_length <= u8::MAX as u32,
            has_id_length: id_length.is_some(),
            type_name_format,
            type_length,
            payload_length,
            id_length,
        };

        Ok(Self { header, type_, id, payload })
    }

    /// Well known text record (`T`), UTF-8 encoded
    pub fn text(language: &str, text: &str, id: Option<Vec<u8>>) -> Result<Self> {
        let payload = NdefPayload::Text(TextPayload::utf8(language, text));
        Self::new(NdefType::WellKnown, RTD_TEXT.to_vec(), id, payload)
    }

    /// MIME media record, the record type is the mime type itself
    pub fn mime(mime_type: &str, data: &[u8], id: Option<Vec<u8>>) -> Result<Self> {
        if !mime_type.is_ascii() {
            return Err(Error::NonAsciiMimeType(mime_type.to_string()));
        }

        let payload = NdefPayload::Data(data.to_vec());
        Self::new(NdefType::Mime, mime_type.as_bytes().to_vec(), id, payload)
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        self.header.write_to(out);
        out.extend_from_slice(&self.type_);

        if let Some(id) = &self.id {
            out.extend_from_slice(id);
        }

        out.extend_from_slice(&self.payload.to_bytes());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.header.encoded_len()
                + self.type_.len()
                + self.id.as_ref().map_or(0, Vec::len)
                + self.header.payload_length as usize,
        );

        self.write_to(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_text_record_without_id() {
        let record = NdefRecord::text("en", "hello", None).unwrap();

        assert_eq!(record.header.type_name_format, NdefType::WellKnown);
        assert!(record.header.short_record);
        assert!(!record.header.has_id_length);
        assert_eq!(
            record.to_bytes(),
            vec![0x11, 0x01, 0x08, b'T', 0x02, b'e', b'n', b'h', b'e', b'l', b'l', b'o']
        );
    }

    #[test]
    fn test_mime_record_with_id() {
        let record =
            NdefRecord::mime("application/json", b"{}", Some(vec![0xE1, 0x04])).unwrap();

        let bytes = record.to_bytes();
        assert_eq!(bytes[0], 0x1A);
        assert_eq!(bytes[1], 16);
        assert_eq!(bytes[2], 2);
        assert_eq!(bytes[3], 2);
        assert_eq!(&bytes[4..20], b"application/json");
        assert_eq!(&bytes[20..22], &[0xE1, 0x04]);
        assert_eq!(&bytes[22..], b"{}");
    }

    #[test]
    fn test_long_payload_switches_off_short_record() {
        let data = vec![0x42; 256];
        let record = NdefRecord::mime("application/octet-stream", &data, None).unwrap();

        assert!(!record.header.short_record);
        assert_eq!(record.header.payload_length, 256);

        let bytes = record.to_bytes();
        assert_eq!(&bytes[2..6], &[0x00, 0x00, 0x01, 0x00]);
        assert_eq!(bytes.len(), 6 + 24 + 256);
    }

    #[test]
    fn test_non_ascii_mime_type_is_rejected() {
        let error = NdefRecord::mime("text/ünicode", b"", None).unwrap_err();
        assert_eq!(error, Error::NonAsciiMimeType("text/ünicode".to_string()));
    }

    #[test]
    fn test_type_longer_than_255_is_rejected() {
        let mime_type = format!("application/{}", "x".repeat(250));
        let error = NdefRecord::mime(&mime_type, b"", None).unwrap_err();
        assert_eq!(error, Error::TypeTooLong(262));
    }
}
