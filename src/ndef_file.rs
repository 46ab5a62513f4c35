//! The files the emulated tag serves: the capability container and the NDEF file

use hce_ndef::{EncodedMessage, NdefEncodeError};

use crate::capability::{self, CC_LENGTH};

/// File identifier of the capability container
pub const CC_FILE_ID: [u8; 2] = [0xE1, 0x03];

/// File identifier of the NDEF file, also written as the record id
pub const NDEF_FILE_ID: [u8; 2] = [0xE1, 0x04];

/// Which file a READ BINARY addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum TargetFile {
    CapabilityContainer,
    Ndef,
}

impl TargetFile {
    /// Offset 0 (P1 = P2 = 0) reads the capability container, every other offset the NDEF file
    pub fn for_offset(p1: u8, p2: u8) -> Self {
        if p1 == 0 && p2 == 0 {
            TargetFile::CapabilityContainer
        } else {
            TargetFile::Ndef
        }
    }
}

/// Capability container plus the length prefixed NDEF message, built once per configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefFile {
    capability_container: [u8; CC_LENGTH],

    /// length prefix followed by the message, the byte range READ BINARY offsets address
    ndef: Vec<u8>,
}

impl NdefFile {
    pub fn new(content: &str, mime_type: &str) -> Result<Self, NdefEncodeError> {
        let encoded = hce_ndef::encode_with_id(content, mime_type, Some(&NDEF_FILE_ID))?;
        Ok(Self::from_encoded(&encoded))
    }

    pub fn from_encoded(encoded: &EncodedMessage) -> Self {
        Self {
            capability_container: capability::build_cc(NDEF_FILE_ID),
            ndef: encoded.to_file_bytes(),
        }
    }

    pub fn capability_container(&self) -> &[u8] {
        &self.capability_container
    }

    pub fn ndef_length_prefix(&self) -> [u8; 2] {
        [self.ndef[0], self.ndef[1]]
    }

    pub fn ndef_message(&self) -> &[u8] {
        &self.ndef[2..]
    }

    /// Length prefix and message together
    pub fn ndef_bytes(&self) -> &[u8] {
        &self.ndef
    }

    pub fn get(&self, target: TargetFile) -> &[u8] {
        match target {
            TargetFile::CapabilityContainer => self.capability_container(),
            TargetFile::Ndef => self.ndef_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_text_file_layout() {
        let file = NdefFile::new("hello", "text/plain").unwrap();

        assert_eq!(file.capability_container(), &capability::build_cc(NDEF_FILE_ID));
        assert_eq!(file.ndef_length_prefix(), [0x00, 0x0F]);
        assert_eq!(file.ndef_message().len(), 15);
        assert_eq!(&file.ndef_bytes()[2..], file.ndef_message());
    }

    #[test]
    fn test_length_prefix_matches_message() {
        let file = NdefFile::new(&"z".repeat(1000), "application/octet-stream").unwrap();
        let prefix = u16::from_be_bytes(file.ndef_length_prefix()) as usize;

        assert_eq!(prefix, file.ndef_message().len());
        assert_eq!(file.ndef_bytes().len(), prefix + 2);
    }

    #[test]
    fn test_oversized_content_is_rejected() {
        let error = NdefFile::new(&"z".repeat(70_000), "text/plain").unwrap_err();
        assert!(matches!(error, NdefEncodeError::MessageTooLong(_)));
    }

    #[test]
    fn test_target_file_for_offset() {
        assert_eq!(TargetFile::for_offset(0x00, 0x00), TargetFile::CapabilityContainer);
        assert_eq!(TargetFile::for_offset(0x00, 0x01), TargetFile::Ndef);
        assert_eq!(TargetFile::for_offset(0x00, 0x0F), TargetFile::Ndef);
        assert_eq!(TargetFile::for_offset(0x01, 0x00), TargetFile::Ndef);
    }

    #[test]
    fn test_get_by_target() {
        let file = NdefFile::new("hi", "text/plain").unwrap();

        assert_eq!(file.get(TargetFile::CapabilityContainer).len(), CC_LENGTH);
        assert_eq!(file.get(TargetFile::Ndef), file.ndef_bytes());
    }
}
