use rusqlite::Connection;

use crate::error::Result;

/// Initialise the punch schema in `conn`. Safe to call on every startup.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS employees (
            emp_code    TEXT NOT NULL PRIMARY KEY,
            name        TEXT NOT NULL
        ) STRICT;

        CREATE TABLE IF NOT EXISTS punch_data (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            emp_code    TEXT NOT NULL REFERENCES employees(emp_code),
            punch_time  TEXT NOT NULL,      -- 'YYYY-MM-DD HH:MM:SS', local civil time
            flag        TEXT,               -- upstream in/out marker, diagnostic only
            synced_at   TEXT NOT NULL,      -- when this row was first written
            UNIQUE(emp_code, punch_time)
        ) STRICT;

        -- Cursor query: SELECT MAX(punch_time) ... scans this index.
        CREATE INDEX IF NOT EXISTS idx_punch_time ON punch_data (punch_time);
        ",
    )?;
    Ok(())
}
