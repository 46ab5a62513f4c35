use derive_more::Display;

/// How command APDUs are interpreted, fixed for the lifetime of a configuration
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Display, uniffi::Enum)]
pub enum EmulationMode {
    /// Full ISO/IEC 7816-4 handling with a selection gate
    Iso7816,

    /// Fixed command templates, for readers that skip the ISO7816 negotiation
    #[default]
    Legacy,
}

impl EmulationMode {
    pub fn from_iso7816_flag(iso7816_mode: bool) -> Self {
        if iso7816_mode { EmulationMode::Iso7816 } else { EmulationMode::Legacy }
    }
}

/// Per link state: the active mode and the selected application, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    mode: EmulationMode,
    selected_aid: Option<Vec<u8>>,
}

impl SessionState {
    pub fn new(mode: EmulationMode) -> Self {
        Self { mode, selected_aid: None }
    }

    pub fn mode(&self) -> EmulationMode {
        self.mode
    }

    pub fn selected_aid(&self) -> Option<&[u8]> {
        self.selected_aid.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected_aid.is_some()
    }

    pub fn select(&mut self, aid: &[u8]) {
        self.selected_aid = Some(aid.to_vec());
    }

    pub fn deselect(&mut self) {
        self.selected_aid = None;
    }
}
