//! Command APDU processing for the emulated Type 4 Tag

pub mod legacy;

use hce_util::apdu_hex;
use tracing::{debug, info, warn};

use crate::{
    apdu::{CLA_ISO7816, CommandApdu, Instruction, ResponseApdu, StatusWord},
    ndef_file::{NdefFile, TargetFile},
    session::{EmulationMode, SessionState},
};

/// AID of the NFC Forum NDEF tag application
pub const NDEF_APPLICATION_AID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

pub const P1_SELECT_BY_DF_NAME: u8 = 0x04;
pub const P2_SELECT_BY_DF_NAME: u8 = 0x00;

type Result<T, E = StatusWord> = std::result::Result<T, E>;

/// Answer one command APDU in the session's mode
pub fn process_command(
    file: Option<&NdefFile>,
    session: &mut SessionState,
    raw: &[u8],
) -> ResponseApdu {
    if raw.is_empty() {
        return StatusWord::WrongLength.into();
    }

    debug!("received apdu: {}", apdu_hex(raw));

    match session.mode() {
        EmulationMode::Iso7816 => CommandProcessor::new(file, session).process(raw),
        EmulationMode::Legacy => legacy::process_legacy(file, raw),
    }
}

/// ISO/IEC 7816-4 processing: SELECT, READ BINARY and a rejecting UPDATE BINARY
#[derive(Debug)]
pub struct CommandProcessor<'a> {
    file: Option<&'a NdefFile>,
    session: &'a mut SessionState,
}

impl<'a> CommandProcessor<'a> {
    pub fn new(file: Option<&'a NdefFile>, session: &'a mut SessionState) -> Self {
        Self { file, session }
    }

    /// Every input gets a response, failures are reported as status words
    pub fn process(&mut self, raw: &[u8]) -> ResponseApdu {
        self.dispatch(raw).unwrap_or_else(|status| {
            debug!("command rejected: {status} ({})", apdu_hex(&status.to_bytes()));
            ResponseApdu::from(status)
        })
    }

    fn dispatch(&mut self, raw: &[u8]) -> Result<ResponseApdu> {
        let apdu = CommandApdu::parse(raw)?;

        if apdu.cla() != CLA_ISO7816 {
            warn!("invalid CLA byte: {:02X}", apdu.cla());
            return Err(StatusWord::ClaNotSupported);
        }

        match apdu.instruction() {
            Instruction::Select => self.select(&apdu),
            Instruction::ReadBinary => self.read_binary(&apdu),
            Instruction::UpdateBinary => self.update_binary(&apdu),
            Instruction::Unknown(ins) => {
                warn!("unsupported INS byte: {ins:02X}");
                Err(StatusWord::InsNotSupported)
            }
        }
    }

    fn select(&mut self, apdu: &CommandApdu<'_>) -> Result<ResponseApdu> {
        let aid = apdu.data()?;

        if apdu.p1() != P1_SELECT_BY_DF_NAME || apdu.p2() != P2_SELECT_BY_DF_NAME {
            warn!("invalid P1P2 for SELECT: {:02X}{:02X}", apdu.p1(), apdu.p2());
            return Err(StatusWord::IncorrectP1P2);
        }

        if aid != NDEF_APPLICATION_AID {
            warn!("invalid AID selection: {}", apdu_hex(aid));
            return Err(StatusWord::FileNotFound);
        }

        self.session.select(aid);
        info!("NDEF AID selected");

        Ok(ResponseApdu::success(Vec::new()))
    }

    fn read_binary(&self, apdu: &CommandApdu<'_>) -> Result<ResponseApdu> {
        if !self.session.is_selected() {
            warn!("READ BINARY without a selected application");
            return Err(StatusWord::ConditionsNotSatisfied);
        }

        read_file(self.file, apdu)
    }

    fn update_binary(&self, apdu: &CommandApdu<'_>) -> Result<ResponseApdu> {
        if !self.session.is_selected() {
            warn!("UPDATE BINARY without a selected application");
            return Err(StatusWord::ConditionsNotSatisfied);
        }

        apdu.data()?;

        let ndef_len = self.file.map_or(0, |file| file.ndef_bytes().len());
        if apdu.offset() >= ndef_len {
            return Err(StatusWord::IncorrectP1P2);
        }

        info!("UPDATE BINARY rejected, the tag is read only");
        Err(StatusWord::ConditionsNotSatisfied)
    }
}

/// READ BINARY against the served files, shared by both modes
///
/// Offset 0 reads the capability container, any other offset reads the NDEF file (length prefix
/// then message). At most `Le` bytes are returned.
pub(crate) fn read_file(file: Option<&NdefFile>, apdu: &CommandApdu<'_>) -> Result<ResponseApdu> {
    let target = TargetFile::for_offset(apdu.p1(), apdu.p2());

    let Some(file) = file else {
        warn!("READ BINARY of {target} before any content was configured");
        return Err(StatusWord::FileNotFound);
    };

    let data = file.get(target);
    let offset = apdu.offset();

    if offset >= data.len() {
        warn!("READ BINARY offset {offset} past the end of {target} ({} bytes)", data.len());
        return Err(StatusWord::IncorrectP1P2);
    }

    let length = apdu.le().min(data.len() - offset);
    debug!("READ BINARY {target}, offset: {offset}, length: {length}");

    Ok(ResponseApdu::success(data[offset..offset + length].to_vec()))
}
