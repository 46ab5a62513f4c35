//! The surface the host app calls: start and stop emulation, feed command APDUs, report link loss

use hce_util::result_ext::ResultExt as _;
use tracing::{info, warn};

use crate::{
    config::EmulationConfig,
    emulator::TagEmulator,
    store::{MessageStore, MessageStoreError},
};

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Error, thiserror::Error)]
pub enum HceError {
    #[error("message store error: {0}")]
    Store(String),

    #[error("unable to configure emulation: {0}")]
    Configure(String),
}

impl From<MessageStoreError> for HceError {
    fn from(error: MessageStoreError) -> Self {
        HceError::Store(error.to_string())
    }
}

type Result<T, E = HceError> = std::result::Result<T, E>;

#[derive(Debug, uniffi::Object)]
pub struct HceService {
    emulator: TagEmulator,
    store: MessageStore,
}

#[uniffi::export]
impl HceService {
    #[uniffi::constructor]
    pub fn new(database_path: String) -> Result<Self> {
        crate::logging::init();

        let store = MessageStore::open(&database_path)?;
        Ok(Self { emulator: TagEmulator::new(), store })
    }

    /// Persist the content if asked to, then serve it
    pub fn start(
        &self,
        content: String,
        mime_type: String,
        persist_message: bool,
        iso7816_mode: bool,
    ) -> Result<()> {
        let config = EmulationConfig::new(content, mime_type, persist_message, iso7816_mode);
        self.start_with_config(config)
    }

    pub fn start_with_config(&self, config: EmulationConfig) -> Result<()> {
        self.emulator
            .configure(&config.content, &config.mime_type, config.mode)
            .map_err_str(HceError::Configure)?;

        // only content the tag can serve is worth restoring
        if config.persist_message {
            self.store.write(&config.content)?;
        }

        info!("emulation started, mode: {}", config.mode);
        Ok(())
    }

    pub fn stop(&self) {
        self.emulator.deactivate(crate::emulator::DeactivationReason::Deselected);
        self.emulator.clear();
        info!("emulation stopped");
    }

    pub fn process_command_apdu(&self, apdu: Vec<u8>) -> Vec<u8> {
        self.emulator.process_command(&apdu)
    }

    pub fn deactivate(&self, reason: i32) {
        self.emulator.deactivate(reason);
    }

    pub fn is_started(&self) -> bool {
        self.emulator.is_configured()
    }

    /// The persisted content, `Hello world` when nothing was saved or the store can't be read
    pub fn saved_message(&self) -> String {
        match self.store.read_or_default() {
            Ok(message) => message,
            Err(error) => {
                warn!("unable to read saved message: {error}");
                crate::store::DEFAULT_MESSAGE.to_string()
            }
        }
    }

    pub fn delete_saved_message(&self) -> Result<()> {
        self.store.delete()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::session::EmulationMode;

    const SELECT_NDEF_AID: [u8; 12] =
        [0x00, 0xA4, 0x04, 0x00, 0x07, 0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];

    fn service() -> (tempfile::TempDir, HceService) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hce.db").to_string_lossy().to_string();
        let service = HceService::new(path).unwrap();
        (dir, service)
    }

    #[test]
    fn test_start_serves_content() {
        let (_dir, service) = service();
        assert!(!service.is_started());

        service.start("hello".into(), "text/plain".into(), false, true).unwrap();
        assert!(service.is_started());

        assert_eq!(service.process_command_apdu(SELECT_NDEF_AID.to_vec()), vec![0x90, 0x00]);
        let response = service.process_command_apdu(vec![0x00, 0xB0, 0x00, 0x01, 0x01]);
        assert_eq!(response, vec![0x0F, 0x90, 0x00]);
    }

    #[test]
    fn test_persist_flag_controls_store() {
        let (_dir, service) = service();

        service.start("not saved".into(), "text/plain".into(), false, false).unwrap();
        assert_eq!(service.saved_message(), "Hello world");

        service.start("saved".into(), "text/plain".into(), true, false).unwrap();
        assert_eq!(service.saved_message(), "saved");

        service.delete_saved_message().unwrap();
        assert_eq!(service.saved_message(), "Hello world");
    }

    #[test]
    fn test_stop_and_deactivate() {
        let (_dir, service) = service();
        service.start("hello".into(), "text/plain".into(), false, true).unwrap();

        service.process_command_apdu(SELECT_NDEF_AID.to_vec());
        service.deactivate(0);
        let response = service.process_command_apdu(vec![0x00, 0xB0, 0x00, 0x00, 0x0F]);
        assert_eq!(response, vec![0x69, 0x85]);

        service.stop();
        assert!(!service.is_started());

        service.process_command_apdu(SELECT_NDEF_AID.to_vec());
        let response = service.process_command_apdu(vec![0x00, 0xB0, 0x00, 0x00, 0x0F]);
        assert_eq!(response, vec![0x6A, 0x82]);
    }

    #[test]
    fn test_start_with_oversized_content_fails() {
        let (_dir, service) = service();

        let config = EmulationConfig {
            content: "x".repeat(70_000),
            mime_type: "text/plain".into(),
            mode: EmulationMode::Iso7816,
            persist_message: false,
        };

        let error = service.start_with_config(config).unwrap_err();
        assert!(matches!(error, HceError::Configure(_)));
        assert!(!service.is_started());
    }

    #[test]
    fn test_rejected_content_is_not_persisted() {
        let (_dir, service) = service();
        service.start("kept".into(), "text/plain".into(), true, true).unwrap();

        let error =
            service.start("x".repeat(70_000), "text/plain".into(), true, true).unwrap_err();
        assert!(matches!(error, HceError::Configure(_)));

        assert_eq!(service.saved_message(), "kept");
        assert!(service.is_started());
    }

    #[test]
    fn test_error_message_names_the_cause() {
        let error = HceError::Store("disk full".into());
        assert_eq!(error.to_string(), "message store error: disk full");
    }
}
