//! NDEF records and messages: building them for a tag to serve and parsing them back

pub mod header;
pub mod message;
pub mod ndef_type;
pub mod parser;
pub mod payload;
pub mod record;

pub use message::{EncodedMessage, NdefEncodeError, NdefMessage, encode, encode_with_id};
pub use record::NdefRecord;
