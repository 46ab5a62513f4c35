use crate::session::EmulationMode;

/// What the host asks the tag to serve, as passed to `start`
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct EmulationConfig {
    pub content: String,
    pub mime_type: String,
    pub mode: EmulationMode,

    /// Save `content` so it can be restored on the next launch
    pub persist_message: bool,
}

impl EmulationConfig {
    pub fn new(
        content: impl Into<String>,
        mime_type: impl Into<String>,
        persist_message: bool,
        iso7816_mode: bool,
    ) -> Self {
        Self {
            content: content.into(),
            mime_type: mime_type.into(),
            mode: EmulationMode::from_iso7816_flag(iso7816_mode),
            persist_message,
        }
    }
}
