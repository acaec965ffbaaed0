//! v002: FTS5 virtual table over the organic fields, with sync triggers.
//!
//! The update trigger fires only when an indexed column changes, so writes to
//! `learned_triggers` never touch the lexical index.

use rusqlite::Connection;

use recall_core::errors::RecallResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RecallResult<()> {
    conn.execute_batch(
        "
        CREATE VIRTUAL TABLE IF NOT EXISTS memory_fts USING fts5(
            title,
            trigger_phrases,
            spec_folder,
            content_text,
            content='memory_index',
            content_rowid='id'
        );

        CREATE TRIGGER IF NOT EXISTS memory_fts_insert AFTER INSERT ON memory_index BEGIN
            INSERT INTO memory_fts(rowid, title, trigger_phrases, spec_folder, content_text)
            VALUES (new.id, new.title, new.trigger_phrases, new.spec_folder, new.content_text);
        END;

        CREATE TRIGGER IF NOT EXISTS memory_fts_delete BEFORE DELETE ON memory_index BEGIN
            INSERT INTO memory_fts(memory_fts, rowid, title, trigger_phrases, spec_folder, content_text)
            VALUES ('delete', old.id, old.title, old.trigger_phrases, old.spec_folder, old.content_text);
        END;

        CREATE TRIGGER IF NOT EXISTS memory_fts_update
        AFTER UPDATE OF title, trigger_phrases, spec_folder, content_text ON memory_index BEGIN
            INSERT INTO memory_fts(memory_fts, rowid, title, trigger_phrases, spec_folder, content_text)
            VALUES ('delete', old.id, old.title, old.trigger_phrases, old.spec_folder, old.content_text);
            INSERT INTO memory_fts(rowid, title, trigger_phrases, spec_folder, content_text)
            VALUES (new.id, new.title, new.trigger_phrases, new.spec_folder, new.content_text);
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
