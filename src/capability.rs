//! Capability container of an NFC Forum Type 4 Tag

/// Size of the capability container file, also its CCLEN field
pub const CC_LENGTH: usize = 15;

/// Mapping version 2.0
pub const MAPPING_VERSION: u8 = 0x20;

/// MLe, largest READ BINARY response a reader should ask for
pub const MAX_READ_LENGTH: u16 = 0x003B;

/// MLc, largest UPDATE BINARY command a reader should send
pub const MAX_WRITE_LENGTH: u16 = 0x0034;

/// Tag of the NDEF File Control TLV
pub const NDEF_FILE_CONTROL_TAG: u8 = 0x04;

/// Maximum NDEF file size advertised in the NDEF File Control TLV
pub const MAX_NDEF_FILE_SIZE: u16 = 0x00FF;

pub const READ_ACCESS: u8 = 0x00;

/// Advisory only, UPDATE BINARY is always rejected
pub const WRITE_ACCESS: u8 = 0xFF;

/// Build the capability container describing the NDEF file `ndef_file_id`
pub fn build_cc(ndef_file_id: [u8; 2]) -> [u8; CC_LENGTH] {
    let [cc_len_hi, cc_len_lo] = (CC_LENGTH as u16).to_be_bytes();
    let [mle_hi, mle_lo] = MAX_READ_LENGTH.to_be_bytes();
    let [mlc_hi, mlc_lo] = MAX_WRITE_LENGTH.to_be_bytes();
    let [max_size_hi, max_size_lo] = MAX_NDEF_FILE_SIZE.to_be_bytes();

    [
        cc_len_hi,
        cc_len_lo,
        MAPPING_VERSION,
        mle_hi,
        mle_lo,
        mlc_hi,
        mlc_lo,
        // NDEF File Control TLV
        NDEF_FILE_CONTROL_TAG,
        0x06,
        ndef_file_id[0],
        ndef_file_id[1],
        max_size_hi,
        max_size_lo,
        READ_ACCESS,
        WRITE_ACCESS,
    ]
}
