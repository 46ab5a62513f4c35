//! The emulated tag: the one owner of the served files and the link session

use std::sync::Arc;

use hce_ndef::NdefEncodeError;
use hce_util::impl_default_for;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    ndef_file::NdefFile,
    processor,
    session::{EmulationMode, SessionState},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmulatorError {
    #[error("unable to build the NDEF file: {0}")]
    Encode(#[from] NdefEncodeError),
}

/// Why the contactless link went away, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DeactivationReason {
    LinkLoss,
    Deselected,
    Other(i32),
}

impl From<i32> for DeactivationReason {
    fn from(reason: i32) -> Self {
        match reason {
            0 => DeactivationReason::LinkLoss,
            1 => DeactivationReason::Deselected,
            other => DeactivationReason::Other(other),
        }
    }
}

#[derive(Debug, Default)]
struct EmulatorState {
    file: Option<Arc<NdefFile>>,
    session: SessionState,
}

/// Configuration and command processing both go through the same lock, so a command never
/// sees a file from one configuration paired with the session of another
#[derive(Debug, Clone)]
pub struct TagEmulator(Arc<Mutex<EmulatorState>>);

impl_default_for!(TagEmulator);
impl TagEmulator {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(EmulatorState::default())))
    }

    /// Build the files for `content` and start a fresh session in `mode`
    ///
    /// Encoding happens before the lock is taken, on failure the previous configuration stays
    pub fn configure(
        &self,
        content: &str,
        mime_type: &str,
        mode: EmulationMode,
    ) -> Result<(), EmulatorError> {
        let file = Arc::new(NdefFile::new(content, mime_type)?);
        let message_len = file.ndef_message().len();

        {
            let mut state = self.0.lock();
            state.file = Some(file);
            state.session = SessionState::new(mode);
        }

        info!("emulation configured, mode: {mode}, mime type: {mime_type}, length: {message_len}");
        Ok(())
    }

    /// Drop the served files, the tag answers as unconfigured until the next configure
    pub fn clear(&self) {
        let mut state = self.0.lock();
        let mode = state.session.mode();

        state.file = None;
        state.session = SessionState::new(mode);
        debug!("emulation cleared");
    }

    /// The link is gone, forget the selected application
    pub fn deactivate(&self, reason: impl Into<DeactivationReason>) {
        let reason = reason.into();
        self.0.lock().session.deselect();
        info!("connection deactivated, reason: {reason}");
    }

    /// Answer one raw command APDU with a raw response APDU
    pub fn process_command(&self, raw: &[u8]) -> Vec<u8> {
        let mut guard = self.0.lock();
        let EmulatorState { file, session } = &mut *guard;

        processor::process_command(file.as_deref(), session, raw).into()
    }

    pub fn is_configured(&self) -> bool {
        self.0.lock().file.is_some()
    }

    pub fn mode(&self) -> EmulationMode {
        self.0.lock().session.mode()
    }

    pub fn is_selected(&self) -> bool {
        self.0.lock().session.is_selected()
    }

    /// The files currently served, if any
    pub fn file(&self) -> Option<Arc<NdefFile>> {
        self.0.lock().file.clone()
    }
}
