pub mod stream;

use stream::{Stream, StreamExt as _};
use winnow::{
    ModalResult, Parser,
    binary::{be_u16, be_u32},
    error::{ContextError, ErrMode},
    token::{any, take},
};

use crate::{
    header::NdefHeader,
    payload::{LANGUAGE_LENGTH_MASK, NdefPayload, TextPayload, UTF16_FLAG},
    record::{NdefRecord, RTD_TEXT},
};

/// Parse the contents of a Type 4 Tag NDEF file: a big endian length and the records it covers
pub fn parse_ndef_file(input: &mut Stream<'_>) -> ModalResult<Vec<NdefRecord>> {
    let message_length = be_u16.parse_next(input)?;
    parse_ndef_records(input, message_length)
}

pub fn parse_ndef_records(input: &mut Stream<'_>, message_length: u16) -> ModalResult<Vec<NdefRecord>> {
    let mut records = Vec::new();
    let message_length = message_length as usize;
    let mut total_parsed_bytes = 0;

    while total_parsed_bytes < message_length {
        let input_start_bytes = input.len();
        let record = parse_ndef_record.parse_next(input)?;
        let message_end = record.header.message_end;
        records.push(record);

        total_parsed_bytes += input_start_bytes - input.len();

        if message_end {
            break;
        }
    }

    if total_parsed_bytes != message_length {
        tracing::warn!(
            "message length mismatch, reported: {message_length}, parsed: {total_parsed_bytes}"
        );
    }

    Ok(records)
}

pub fn parse_ndef_record(input: &mut Stream<'_>) -> ModalResult<NdefRecord> {
    let header = parse_header.parse_next(input)?;
    let type_ = take_vec(input, header.type_length as usize)?;
    let id = match header.id_length {
        Some(id_length) => Some(take_vec(input, id_length as usize)?),
        None => None,
    };
    let payload = parse_payload(input, header.payload_length, &type_)?;

    Ok(NdefRecord { header, type_, id, payload })
}

fn parse_header(input: &mut Stream<'_>) -> ModalResult<NdefHeader> {
    let mut header = NdefHeader::from_flags_byte(any.parse_next(input)?);
    header.type_length = any.parse_next(input)?;

    header.payload_length = if header.short_record {
        any.map(u32::from).parse_next(input)?
    } else {
        be_u32.parse_next(input)?
    };

    if header.has_id_length {
        header.id_length = Some(any.parse_next(input)?);
    }

    Ok(header)
}

fn take_vec(input: &mut Stream<'_>, length: usize) -> ModalResult<Vec<u8>> {
    take(length).map(|bytes: &[u8]| bytes.to_vec()).parse_next(input)
}

fn parse_payload(
    input: &mut Stream<'_>,
    payload_length: u32,
    type_: &[u8],
) -> ModalResult<NdefPayload> {
    if type_ == RTD_TEXT {
        parse_text_payload(input, payload_length).map(NdefPayload::Text)
    } else {
        take_vec(input, payload_length as usize).map(NdefPayload::Data)
    }
}

/// UTF-8 text payloads only, a UTF-16 status byte is rejected
fn parse_text_payload(input: &mut Stream<'_>, payload_length: u32) -> ModalResult<TextPayload> {
    let status: u8 = any.parse_next(input)?;
    if status & UTF16_FLAG != 0 {
        return Err(ErrMode::Cut(ContextError::new()));
    }

    // status byte and language code must fit in the payload
    let language_length = status & LANGUAGE_LENGTH_MASK;
    let Some(text_length) = payload_length.checked_sub(u32::from(language_length) + 1) else {
        return Err(ErrMode::Cut(ContextError::new()));
    };

    let language = take_vec(input, language_length as usize)?;
    let text = take_vec(input, text_length as usize)?;

    Ok(TextPayload::utf8(
        String::from_utf8_lossy(&language),
        String::from_utf8_lossy(&text),
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use winnow::error::{ErrMode, Needed};

    use super::*;
    use crate::ndef_type::NdefType;
    use crate::message::{TEXT_PLAIN, encode, encode_with_id};

    #[test]
    fn known_header_parse() {
        let mut header_bytes = stream::new(&[0xD1, 0x01, 0x0D, 0x55, 0x02]);
        let header: NdefHeader = parse_header(&mut header_bytes).unwrap();

        assert!(header.message_begin);
        assert!(header.message_end);
        assert!(!header.chunked);
        assert!(header.short_record);
        assert!(!header.has_id_length);
        assert_eq!(header.type_name_format, NdefType::WellKnown);
        assert_eq!(header.type_length, 1);
        assert_eq!(header.payload_length, 13);
    }

    #[test]
    fn test_header_with_id_length() {
        let mut header_bytes = stream::new(&[0xD9, 0x01, 0x08, 0x02]);
        let header = parse_header(&mut header_bytes).unwrap();

        assert!(header.has_id_length);
        assert_eq!(header.id_length, Some(2));
        assert_eq!(header.payload_length, 8);
        assert!(header_bytes.is_empty());
    }

    #[test]
    fn test_parse_encoded_text_file() {
        let encoded = encode_with_id("hello", TEXT_PLAIN, Some(&[0xE1, 0x04])).unwrap();
        let file = encoded.to_file_bytes();

        let mut data = stream::new(&file);
        let records = parse_ndef_file(&mut data).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.type_, b"T");
        assert_eq!(record.id, Some(vec![0xE1, 0x04]));

        let NdefPayload::Text(text) = &record.payload else {
            panic!("payload is not text")
        };

        assert_eq!(text.language, "en");
        assert_eq!(text.text, "hello");
    }

    #[test]
    fn test_parse_encoded_mime_file() {
        let content = "x".repeat(600);
        let encoded = encode(&content, "application/octet-stream").unwrap();
        let file = encoded.to_file_bytes();

        let mut data = stream::new(&file);
        let records = parse_ndef_file(&mut data).unwrap();

        let record = &records[0];
        assert!(!record.header.short_record);
        assert_eq!(record.header.type_name_format, NdefType::Mime);
        assert_eq!(record.type_, b"application/octet-stream");
        assert_eq!(record.payload, NdefPayload::Data(content.into_bytes()));
        assert_eq!(record.to_bytes(), encoded.message());
    }

    #[test]
    fn test_utf16_text_is_rejected() {
        let payload = [0x82, b'e', b'n', 0x00, b'h', 0x00, b'i'];
        let mut bytes = vec![0xD1, 0x01, payload.len() as u8, b'T'];
        bytes.extend_from_slice(&payload);

        let result = parse_ndef_record(&mut stream::new(&bytes));
        assert!(matches!(result, Err(ErrMode::Cut(_))));
    }

    #[test]
    fn test_text_payload_shorter_than_language_code_is_an_error() {
        // payload length 1 but language code length 2
        let bytes = [0xD1, 0x01, 0x01, b'T', 0x02, b'e', b'n'];
        let result = parse_ndef_record(&mut stream::new(&bytes));

        assert!(matches!(result, Err(ErrMode::Cut(_))));
    }

    #[test]
    fn test_partial_file_needs_more_data() {
        let encoded = encode("hello world", TEXT_PLAIN).unwrap();
        let file = encoded.to_file_bytes();
        let truncated = &file[..file.len() - 3];

        let result = parse_ndef_file(&mut stream::new(truncated));
        assert!(matches!(result, Err(ErrMode::Incomplete(Needed::Size(_)))));
    }

    #[test]
    fn test_empty_message_has_no_records() {
        let records = parse_ndef_file(&mut stream::new(&[0x00, 0x00])).unwrap();
        assert!(records.is_empty());
    }
}
