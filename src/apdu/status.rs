/// Status words this tag answers with, the last two bytes of every response APDU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum StatusWord {
    /// 90 00
    NoError,

    /// 6A 82, file or application not found
    FileNotFound,

    /// 6A 86
    IncorrectP1P2,

    /// 6D 00
    InsNotSupported,

    /// 6E 00
    ClaNotSupported,

    /// 67 00
    WrongLength,

    /// 69 82, part of the catalogue but never returned
    SecurityStatusNotSatisfied,

    /// 69 85, nothing selected or a write was attempted
    ConditionsNotSatisfied,
}

impl StatusWord {
    pub const fn code(self) -> u16 {
        match self {
            StatusWord::NoError => 0x9000,
            StatusWord::FileNotFound => 0x6A82,
            StatusWord::IncorrectP1P2 => 0x6A86,
            StatusWord::InsNotSupported => 0x6D00,
            StatusWord::ClaNotSupported => 0x6E00,
            StatusWord::WrongLength => 0x6700,
            StatusWord::SecurityStatusNotSatisfied => 0x6982,
            StatusWord::ConditionsNotSatisfied => 0x6985,
        }
    }

    pub const fn to_bytes(self) -> [u8; 2] {
        self.code().to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Option<Self> {
        use strum::IntoEnumIterator as _;

        let code = u16::from_be_bytes(bytes);
        Self::iter().find(|status| status.code() == code)
    }

    pub fn is_success(self) -> bool {
        self == StatusWord::NoError
    }
}

impl From<StatusWord> for [u8; 2] {
    fn from(status: StatusWord) -> Self {
        status.to_bytes()
    }
}
