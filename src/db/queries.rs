use rusqlite::{params, Connection, OptionalExtension};

// ── Local storage ──

pub fn get_item(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let value = conn
        .query_row(
            "SELECT value FROM local_storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn set_item(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    #[test]
    fn test_get_missing_item() {
        let conn = setup_db();
        assert_eq!(get_item(&conn, "session_id").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let conn = setup_db();
        set_item(&conn, "session_id", "sess_abc").unwrap();
        assert_eq!(
            get_item(&conn, "session_id").unwrap().as_deref(),
            Some("sess_abc")
        );
    }

    #[test]
    fn test_set_overwrites() {
        let conn = setup_db();
        set_item(&conn, "session_id", "sess_one").unwrap();
        set_item(&conn, "session_id", "sess_two").unwrap();
        assert_eq!(
            get_item(&conn, "session_id").unwrap().as_deref(),
            Some("sess_two")
        );
    }
}
