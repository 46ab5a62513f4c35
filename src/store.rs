//! Keeps the last configured message across app launches, backed by redb

use std::{path::Path, sync::Arc};

use hce_util::result_ext::ResultExt as _;
use redb::TableDefinition;
use tracing::{debug, info};

pub const TABLE: TableDefinition<&'static str, String> = TableDefinition::new("ndef_message");

/// Served when nothing was ever persisted
pub const DEFAULT_MESSAGE: &str = "Hello world";

#[derive(Debug, Clone, Copy, strum::IntoStaticStr)]
enum MessageKey {
    #[strum(serialize = "content")]
    Content,
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, thiserror::Error)]
pub enum MessageStoreError {
    #[error("failed to open database: {0}")]
    DatabaseAccess(String),

    #[error("failed to open table: {0}")]
    TableAccess(String),

    #[error("failed to save message: {0}")]
    Save(String),

    #[error("failed to read message: {0}")]
    Read(String),
}

type Error = MessageStoreError;
type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
pub struct MessageStore {
    db: Arc<redb::Database>,
}

impl MessageStore {
    /// Open the database at `path`, creating it and the table when missing
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = redb::Database::create(path).map_err_str(Error::DatabaseAccess)?;

        // create table if it doesn't exist
        let write_txn = db.begin_write().map_err_str(Error::DatabaseAccess)?;
        write_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;
        write_txn.commit().map_err_str(Error::DatabaseAccess)?;

        info!("opened message store at {}", path.display());
        Ok(Self { db: Arc::new(db) })
    }

    pub fn read(&self) -> Result<Option<String>> {
        let read_txn = self.db.begin_read().map_err_str(Error::DatabaseAccess)?;
        let table = read_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;

        let key: &'static str = MessageKey::Content.into();
        let value = table.get(key).map_err_str(Error::Read)?.map(|value| value.value());

        Ok(value)
    }

    /// The persisted message, or [`DEFAULT_MESSAGE`] when there is none
    pub fn read_or_default(&self) -> Result<String> {
        let message = self.read()?.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        Ok(message)
    }

    pub fn write(&self, message: &str) -> Result<()> {
        let write_txn = self.db.begin_write().map_err_str(Error::DatabaseAccess)?;

        {
            let mut table = write_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;

            let key: &'static str = MessageKey::Content.into();
            table.insert(key, message.to_string()).map_err_str(Error::Save)?;
        }

        write_txn.commit().map_err_str(Error::DatabaseAccess)?;
        debug!("saved message, length: {}", message.len());

        Ok(())
    }

    pub fn delete(&self) -> Result<()> {
        let write_txn = self.db.begin_write().map_err_str(Error::DatabaseAccess)?;

        {
            let mut table = write_txn.open_table(TABLE).map_err_str(Error::TableAccess)?;

            let key: &'static str = MessageKey::Content.into();
            table.remove(key).map_err_str(Error::Save)?;
        }

        write_txn.commit().map_err_str(Error::DatabaseAccess)?;
        debug!("deleted saved message");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, MessageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = MessageStore::open(dir.path().join("hce.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_empty_store_reads_default() {
        let (_dir, store) = temp_store();

        assert_eq!(store.read().unwrap(), None);
        assert_eq!(store.read_or_default().unwrap(), DEFAULT_MESSAGE);
    }

    #[test]
    fn test_write_read_delete() {
        let (_dir, store) = temp_store();

        store.write("first").unwrap();
        store.write("second").unwrap();
        assert_eq!(store.read().unwrap(), Some("second".to_string()));

        store.delete().unwrap();
        assert_eq!(store.read().unwrap(), None);

        // deleting twice is fine
        store.delete().unwrap();
    }

    #[test]
    fn test_message_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hce.db");

        {
            let store = MessageStore::open(&path).unwrap();
            store.write("persisted").unwrap();
        }

        let store = MessageStore::open(&path).unwrap();
        assert_eq!(store.read_or_default().unwrap(), "persisted");
    }

    #[test]
    fn test_key_name() {
        let key: &'static str = MessageKey::Content.into();
        assert_eq!(key, "content");
    }
}
