use std::fmt;

use anyhow::Context;
use rusqlite::Connection;

use crate::config::{ClientConfig, SessionPersistence};
use crate::db;
use crate::db::queries;

pub const SESSION_STORAGE_KEY: &str = "session_id";

const SESSION_PREFIX: &str = "sess_";
const SESSION_SUFFIX_LEN: usize = 9;

/// Opaque token correlating every turn of one conversation on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{SESSION_PREFIX}{}", &random[..SESSION_SUFFIX_LEN]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reuses the id kept in local storage, or creates and stores a new one.
pub fn persistent_session(conn: &Connection) -> anyhow::Result<SessionId> {
    if let Some(existing) = queries::get_item(conn, SESSION_STORAGE_KEY)? {
        if !existing.trim().is_empty() {
            tracing::debug!(session_id = %existing, "resumed stored session");
            return Ok(SessionId(existing));
        }
    }

    let id = SessionId::generate();
    queries::set_item(conn, SESSION_STORAGE_KEY, id.as_str())
        .context("failed to store session id")?;
    tracing::debug!(session_id = %id, "created persistent session");
    Ok(id)
}

pub fn open_session(config: &ClientConfig) -> anyhow::Result<SessionId> {
    match config.session_persistence {
        SessionPersistence::Ephemeral => Ok(SessionId::generate()),
        SessionPersistence::Persistent => {
            let conn = db::init_db(&config.storage_path)?;
            persistent_session(&conn)
        }
    }
}
