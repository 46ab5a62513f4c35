pub mod apdu;
pub mod capability;
pub mod config;
pub mod emulator;
pub mod ffi;
pub mod ndef_file;
pub mod processor;
pub mod session;
pub mod store;

pub(crate) mod logging;

pub use apdu::{CommandApdu, ResponseApdu, StatusWord};
pub use emulator::{DeactivationReason, EmulatorError, TagEmulator};
pub use session::EmulationMode;

uniffi::setup_scaffolding!();
