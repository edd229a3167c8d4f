//! Shared SQLite connection tuning

use rusqlite::Connection;

/// Apply WAL journaling and the usual durability/performance trade-offs.
///
/// Safe to call on every open; each PRAGMA is idempotent.
pub fn apply_optimized_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;
    conn.pragma_update(None, "foreign_keys", "OFF")?;
    conn.pragma_update(None, "wal_autocheckpoint", 1000)?;
    Ok(())
}
