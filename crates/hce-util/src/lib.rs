pub mod result_ext;

#[macro_export]
macro_rules! impl_default_for {
    ($name:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Uppercase hex with a space between bytes, the way APDUs are usually written down
///
/// `[0x00, 0xA4, 0x04, 0x00]` becomes `"00 A4 04 00"`
pub fn apdu_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| hex::encode_upper([*byte])).collect::<Vec<_>>().join(" ")
}
