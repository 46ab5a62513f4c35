/// Type Name Format, the 3 low bits of a record header
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NdefType {
    Empty,
    WellKnown,
    Mime,
    AbsoluteUri,
    External,
    Unknown,
    Unchanged,
    Reserved,
}

impl NdefType {
    pub const fn tnf(self) -> u8 {
        match self {
            NdefType::Empty => 0,
            NdefType::WellKnown => 1,
            NdefType::Mime => 2,
            NdefType::AbsoluteUri => 3,
            NdefType::External => 4,
            NdefType::Unknown => 5,
            NdefType::Unchanged => 6,
            NdefType::Reserved => 7,
        }
    }
}

impl From<u8> for NdefType {
    fn from(tnf: u8) -> Self {
        match tnf & 0b111 {
            0 => NdefType::Empty,
            1 => NdefType::WellKnown,
            2 => NdefType::Mime,
            3 => NdefType::AbsoluteUri,
            4 => NdefType::External,
            5 => NdefType::Unknown,
            6 => NdefType::Unchanged,
            _ => NdefType::Reserved,
        }
    }
}
