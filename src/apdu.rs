//! Command and response APDUs, ISO/IEC 7816-4 short form

pub mod status;

pub use status::StatusWord;

/// The only class byte this tag accepts
pub const CLA_ISO7816: u8 = 0x00;

/// CLA INS P1 P2
pub const HEADER_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Instruction {
    Select,
    ReadBinary,
    UpdateBinary,
    Unknown(u8),
}

impl Instruction {
    pub const SELECT: u8 = 0xA4;
    pub const READ_BINARY: u8 = 0xB0;
    pub const UPDATE_BINARY: u8 = 0xD6;
}

impl From<u8> for Instruction {
    fn from(ins: u8) -> Self {
        match ins {
            Self::SELECT => Instruction::Select,
            Self::READ_BINARY => Instruction::ReadBinary,
            Self::UPDATE_BINARY => Instruction::UpdateBinary,
            other => Instruction::Unknown(other),
        }
    }
}

/// Borrowed view over a raw command APDU with at least a complete header
///
/// The byte after the header is `Lc` for commands carrying data and `Le` for READ BINARY, so it
/// is exposed as [`CommandApdu::p3`] and each handler decides how to read it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandApdu<'a> {
    raw: &'a [u8],
}

impl<'a> CommandApdu<'a> {
    pub fn parse(raw: &'a [u8]) -> Result<Self, StatusWord> {
        if raw.len() < HEADER_LENGTH {
            return Err(StatusWord::WrongLength);
        }

        Ok(Self { raw })
    }

    pub fn cla(&self) -> u8 {
        self.raw[0]
    }

    pub fn ins(&self) -> u8 {
        self.raw[1]
    }

    pub fn instruction(&self) -> Instruction {
        Instruction::from(self.ins())
    }

    pub fn p1(&self) -> u8 {
        self.raw[2]
    }

    pub fn p2(&self) -> u8 {
        self.raw[3]
    }

    /// `(P1 << 8) | P2`, the file offset of READ BINARY and UPDATE BINARY
    pub fn offset(&self) -> usize {
        u16::from_be_bytes([self.p1(), self.p2()]) as usize
    }

    pub fn p3(&self) -> Option<u8> {
        self.raw.get(HEADER_LENGTH).copied()
    }

    /// Expected response length, a missing `Le` is read as 0
    pub fn le(&self) -> usize {
        self.p3().map_or(0, usize::from)
    }

    /// Command data, `Lc` bytes following the `Lc` byte
    pub fn data(&self) -> Result<&'a [u8], StatusWord> {
        let lc = self.p3().ok_or(StatusWord::WrongLength)? as usize;
        let start = HEADER_LENGTH + 1;

        self.raw.get(start..start + lc).ok_or(StatusWord::WrongLength)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }
}

/// Response payload followed by the status word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseApdu {
    payload: Vec<u8>,
    status: StatusWord,
}

impl ResponseApdu {
    pub fn new(payload: Vec<u8>, status: StatusWord) -> Self {
        Self { payload, status }
    }

    pub fn success(payload: Vec<u8>) -> Self {
        Self::new(payload, StatusWord::NoError)
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn status(&self) -> StatusWord {
        self.status
    }

    /// Payload length plus the 2 status word bytes
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + 2
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        bytes.extend_from_slice(&self.payload);
        bytes.extend_from_slice(&self.status.to_bytes());
        bytes
    }
}

impl From<StatusWord> for ResponseApdu {
    fn from(status: StatusWord) -> Self {
        Self::new(Vec::new(), status)
    }
}

impl From<ResponseApdu> for Vec<u8> {
    fn from(response: ResponseApdu) -> Self {
        let ResponseApdu { mut payload, status } = response;
        payload.extend_from_slice(&status.to_bytes());
        payload
    }
}
