/// Language code written into every text record
pub const DEFAULT_LANGUAGE: &str = "en";

/// Status byte bit marking UTF-16 text, never set by this encoder
pub(crate) const UTF16_FLAG: u8 = 0b1000_0000;

/// Low 6 bits of the status byte, bit 6 is reserved
pub(crate) const LANGUAGE_LENGTH_MASK: u8 = 0b0011_1111;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdefPayload {
    Text(TextPayload),
    Data(Vec<u8>),
}

/// A well known text record payload, always UTF-8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    pub language: String,
    pub text: String,
}

impl TextPayload {
    pub fn utf8(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self { language: language.into(), text: text.into() }
    }

    /// Status byte (language code length), language code, then the text
    pub fn to_bytes(&self) -> Vec<u8> {
        let language = self.language.as_bytes();
        let text = self.text.as_bytes();

        let mut bytes = Vec::with_capacity(1 + language.len() + text.len());
        bytes.push(language.len() as u8 & LANGUAGE_LENGTH_MASK);
        bytes.extend_from_slice(language);
        bytes.extend_from_slice(text);
        bytes
    }
}

impl NdefPayload {
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            NdefPayload::Text(text) => text.to_bytes(),
            NdefPayload::Data(data) => data.clone(),
        }
    }
}
