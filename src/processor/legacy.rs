//! Fixed command templates for readers that do not negotiate ISO7816 properly
//!
//! No session state is kept: the three SELECT templates always succeed and READ BINARY is served
//! without a selection gate.

use tracing::{info, warn};

use super::read_file;
use crate::{
    apdu::{CommandApdu, Instruction, ResponseApdu, StatusWord},
    ndef_file::NdefFile,
};

pub const SELECT_NDEF_APPLICATION: [u8; 13] =
    [0x00, 0xA4, 0x04, 0x00, 0x07, 0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01, 0x00];

pub const SELECT_CC_FILE: [u8; 7] = [0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x03];

pub const SELECT_NDEF_FILE: [u8; 7] = [0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x04];

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LegacyCommand {
    SelectApplication,
    SelectCapabilityContainer,
    SelectNdefFile,
    ReadBinary,
    Unrecognized,
}

impl LegacyCommand {
    pub fn classify(raw: &[u8]) -> Self {
        if raw == SELECT_NDEF_APPLICATION {
            LegacyCommand::SelectApplication
        } else if raw == SELECT_CC_FILE {
            LegacyCommand::SelectCapabilityContainer
        } else if raw == SELECT_NDEF_FILE {
            LegacyCommand::SelectNdefFile
        } else if raw.len() >= 2 && raw[0] == 0x00 && raw[1] == Instruction::READ_BINARY {
            LegacyCommand::ReadBinary
        } else {
            LegacyCommand::Unrecognized
        }
    }
}

pub fn process_legacy(file: Option<&NdefFile>, raw: &[u8]) -> ResponseApdu {
    let command = LegacyCommand::classify(raw);

    match command {
        LegacyCommand::SelectApplication
        | LegacyCommand::SelectCapabilityContainer
        | LegacyCommand::SelectNdefFile => {
            info!("legacy {command}");
            ResponseApdu::success(Vec::new())
        }

        LegacyCommand::ReadBinary => CommandApdu::parse(raw)
            .and_then(|apdu| read_file(file, &apdu))
            .unwrap_or_else(ResponseApdu::from),

        LegacyCommand::Unrecognized => {
            warn!("legacy mode does not recognize the command");
            StatusWord::InsNotSupported.into()
        }
    }
}
