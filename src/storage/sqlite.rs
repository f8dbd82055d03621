//! SQLite storage backend.
//!
//! Both tables live in a single database file in the user's data directory.
//! Every mutation runs inside a `BEGIN IMMEDIATE` transaction: the write lock
//! is taken before the first read of a read-modify-write sequence, so two
//! processes sharing the file can never interleave, for example, the
//! "read max position, then insert" steps of [`Storage::add_item`].
//!
//! # Schema
//!
//! ```sql
//! lists(id INTEGER PRIMARY KEY, title TEXT, created_at INTEGER, updated_at INTEGER)
//! items(id INTEGER PRIMARY KEY, list_id INTEGER REFERENCES lists(id),
//!       text TEXT, checked INTEGER, sort_order INTEGER)
//! ```
//!
//! Timestamps are Unix milliseconds.

use crate::domain::error::{LystError, Result};
use crate::domain::ordering::{self, Direction};
use crate::domain::{is_blank, Checklist, Id, Item};
use crate::storage::backend::Storage;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS lists (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY,
    list_id INTEGER NOT NULL,
    text TEXT NOT NULL,
    checked INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER NOT NULL,
    FOREIGN KEY(list_id) REFERENCES lists(id)
);
";

/// How long a writer waits for another process to release the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed [`Storage`].
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the event loop and used
/// from a single thread.
pub struct SqliteStorage {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens (or creates) the database file at `path`.
    ///
    /// Parent directories are created automatically and the schema is
    /// initialised if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot be
    /// opened as a SQLite database, or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        let _span = tracing::debug_span!("sqlite_open", path = %path.display()).entered();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tracing::debug!(parent = %parent.display(), "creating data directory");
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let storage = Self::init(conn, Some(path.to_path_buf()))?;
        tracing::debug!("database opened");
        Ok(storage)
    }

    /// Opens a private in-memory database. Used by tests.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, path })
    }

    /// Starts a transaction that holds the write lock from its first statement.
    fn write_tx(&mut self) -> Result<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Next `updated_at` value: the current time, but always strictly newer than
/// every existing list so recency order is total.
fn next_stamp(conn: &Connection) -> Result<i64> {
    let latest: Option<i64> =
        conn.query_row("SELECT MAX(updated_at) FROM lists", [], |row| row.get(0))?;
    let now = now_ms();
    Ok(latest.map_or(now, |latest| now.max(latest + 1)))
}

fn touch_list(conn: &Connection, list_id: Id) -> Result<()> {
    let stamp = next_stamp(conn)?;
    let changed = conn.execute(
        "UPDATE lists SET updated_at = ?1 WHERE id = ?2",
        params![stamp, list_id],
    )?;
    if changed == 0 {
        return Err(LystError::list_not_found(list_id));
    }
    Ok(())
}

fn list_exists(conn: &Connection, list_id: Id) -> Result<bool> {
    Ok(conn
        .query_row("SELECT 1 FROM lists WHERE id = ?1", params![list_id], |_| Ok(()))
        .optional()?
        .is_some())
}

fn owning_list(conn: &Connection, item_id: Id) -> Result<Id> {
    conn.query_row(
        "SELECT list_id FROM items WHERE id = ?1",
        params![item_id],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| LystError::item_not_found(item_id))
}

fn map_list(row: &rusqlite::Row<'_>) -> rusqlite::Result<Checklist> {
    Ok(Checklist {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

fn map_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        list_id: row.get(1)?,
        text: row.get(2)?,
        checked: row.get(3)?,
        sort_order: row.get(4)?,
    })
}

fn load_items(conn: &Connection, list_id: Id) -> Result<Vec<Item>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, list_id, text, checked, sort_order
         FROM items
         WHERE list_id = ?1
         ORDER BY sort_order ASC, id ASC",
    )?;
    let items = stmt
        .query_map(params![list_id], map_item)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

/// Persists the positions carried by `items`.
fn rewrite_order(conn: &Connection, items: &[Item]) -> Result<()> {
    let mut stmt = conn.prepare_cached("UPDATE items SET sort_order = ?1 WHERE id = ?2")?;
    for item in items {
        stmt.execute(params![item.sort_order, item.id])?;
    }
    Ok(())
}

fn require_text(what: &str, text: &str) -> Result<()> {
    if is_blank(text) {
        return Err(LystError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

impl Storage for SqliteStorage {
    fn list_all(&self) -> Result<Vec<Checklist>> {
        let _span = tracing::debug_span!("sqlite_list_all").entered();

        let mut stmt = self.conn.prepare_cached(
            "SELECT id, title, created_at, updated_at
             FROM lists
             ORDER BY updated_at DESC, id DESC",
        )?;
        let lists = stmt
            .query_map([], map_list)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(count = lists.len(), "retrieved lists");
        Ok(lists)
    }

    fn find_list_by_title(&self, title: &str) -> Result<Option<Checklist>> {
        let _span = tracing::debug_span!("sqlite_find_list_by_title", title = %title).entered();

        let list = self
            .conn
            .query_row(
                "SELECT id, title, created_at, updated_at FROM lists WHERE title = ?1
                 ORDER BY updated_at DESC, id DESC LIMIT 1",
                params![title],
                map_list,
            )
            .optional()?;

        tracing::debug!(found = list.is_some(), "list lookup complete");
        Ok(list)
    }

    fn get_list(&self, id: Id) -> Result<Option<Checklist>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, title, created_at, updated_at FROM lists WHERE id = ?1",
                params![id],
                map_list,
            )
            .optional()?)
    }

    fn create_list(&mut self, title: &str) -> Result<Id> {
        let _span = tracing::debug_span!("sqlite_create_list", title = %title).entered();
        require_text("list title", title)?;

        let tx = self.write_tx()?;
        let stamp = next_stamp(&tx)?;
        tx.execute(
            "INSERT INTO lists (title, created_at, updated_at) VALUES (?1, ?2, ?3)",
            params![title, stamp, stamp],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(list_id = id, "list created");
        Ok(id)
    }

    fn rename_list(&mut self, id: Id, title: &str) -> Result<()> {
        let _span = tracing::debug_span!("sqlite_rename_list", list_id = id).entered();
        require_text("list title", title)?;

        let tx = self.write_tx()?;
        let stamp = next_stamp(&tx)?;
        let changed = tx.execute(
            "UPDATE lists SET title = ?1, updated_at = ?2 WHERE id = ?3",
            params![title, stamp, id],
        )?;
        if changed == 0 {
            return Err(LystError::list_not_found(id));
        }
        tx.commit()?;

        tracing::debug!("list renamed");
        Ok(())
    }

    fn delete_list(&mut self, id: Id) -> Result<()> {
        let _span = tracing::debug_span!("sqlite_delete_list", list_id = id).entered();

        let tx = self.write_tx()?;
        let items_removed = tx.execute("DELETE FROM items WHERE list_id = ?1", params![id])?;
        let changed = tx.execute("DELETE FROM lists WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(LystError::list_not_found(id));
        }
        tx.commit()?;

        tracing::debug!(items_removed, "list deleted");
        Ok(())
    }

    fn list_items(&self, list_id: Id) -> Result<Vec<Item>> {
        let _span = tracing::debug_span!("sqlite_list_items", list_id).entered();

        let items = load_items(&self.conn, list_id)?;

        tracing::debug!(count = items.len(), "retrieved items");
        Ok(items)
    }

    fn add_item(&mut self, list_id: Id, text: &str) -> Result<Id> {
        let _span = tracing::debug_span!("sqlite_add_item", list_id).entered();
        require_text("item text", text)?;

        let tx = self.write_tx()?;
        if !list_exists(&tx, list_id)? {
            return Err(LystError::list_not_found(list_id));
        }
        let max: Option<i64> = tx.query_row(
            "SELECT MAX(sort_order) FROM items WHERE list_id = ?1",
            params![list_id],
            |row| row.get(0),
        )?;
        let position = ordering::append_position(max);
        tx.execute(
            "INSERT INTO items (list_id, text, checked, sort_order) VALUES (?1, ?2, 0, ?3)",
            params![list_id, text, position],
        )?;
        let id = tx.last_insert_rowid();
        touch_list(&tx, list_id)?;
        tx.commit()?;

        tracing::debug!(item_id = id, position, "item added");
        Ok(id)
    }

    fn update_item_text(&mut self, id: Id, text: &str) -> Result<()> {
        let _span = tracing::debug_span!("sqlite_update_item_text", item_id = id).entered();
        require_text("item text", text)?;

        let tx = self.write_tx()?;
        let list_id = owning_list(&tx, id)?;
        tx.execute("UPDATE items SET text = ?1 WHERE id = ?2", params![text, id])?;
        touch_list(&tx, list_id)?;
        tx.commit()?;

        tracing::debug!("item text updated");
        Ok(())
    }

    fn toggle_item(&mut self, id: Id) -> Result<()> {
        let _span = tracing::debug_span!("sqlite_toggle_item", item_id = id).entered();

        let tx = self.write_tx()?;
        let list_id = owning_list(&tx, id)?;
        tx.execute(
            "UPDATE items SET checked = CASE checked WHEN 0 THEN 1 ELSE 0 END WHERE id = ?1",
            params![id],
        )?;
        touch_list(&tx, list_id)?;
        tx.commit()?;

        tracing::debug!("item toggled");
        Ok(())
    }

    fn delete_item(&mut self, list_id: Id, id: Id) -> Result<()> {
        let _span = tracing::debug_span!("sqlite_delete_item", list_id, item_id = id).entered();

        let tx = self.write_tx()?;
        let changed = tx.execute(
            "DELETE FROM items WHERE id = ?1 AND list_id = ?2",
            params![id, list_id],
        )?;
        if changed == 0 {
            return Err(LystError::item_not_found(id));
        }
        let remaining = ordering::renumber(load_items(&tx, list_id)?);
        rewrite_order(&tx, &remaining)?;
        touch_list(&tx, list_id)?;
        tx.commit()?;

        tracing::debug!(remaining = remaining.len(), "item deleted and list renumbered");
        Ok(())
    }

    fn move_item(&mut self, list_id: Id, id: Id, direction: Direction) -> Result<()> {
        let _span =
            tracing::debug_span!("sqlite_move_item", list_id, item_id = id, ?direction).entered();

        let tx = self.write_tx()?;
        let items = load_items(&tx, list_id)?;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| LystError::item_not_found(id))?;

        let Some(reordered) = ordering::move_by(items, index, direction) else {
            tracing::debug!(index, "move would leave the list, ignoring");
            return Ok(());
        };
        rewrite_order(&tx, &reordered)?;
        touch_list(&tx, list_id)?;
        tx.commit()?;

        tracing::debug!(from = index, "item moved");
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ordering::is_dense;

    fn storage() -> SqliteStorage {
        SqliteStorage::open_in_memory().expect("in-memory database")
    }

    fn texts(storage: &SqliteStorage, list_id: Id) -> Vec<String> {
        storage
            .list_items(list_id)
            .unwrap()
            .into_iter()
            .map(|item| item.text)
            .collect()
    }

    #[test]
    fn create_list_sets_both_timestamps() {
        let mut storage = storage();
        let id = storage.create_list("Groceries").unwrap();

        let list = storage.get_list(id).unwrap().unwrap();
        assert_eq!(list.title, "Groceries");
        assert_eq!(list.created_at, list.updated_at);
    }

    #[test]
    fn blank_titles_and_texts_are_rejected() {
        let mut storage = storage();
        assert!(storage.create_list("").unwrap_err().is_validation());
        assert!(storage.create_list("   ").unwrap_err().is_validation());

        let id = storage.create_list("Errands").unwrap();
        assert!(storage.add_item(id, "").unwrap_err().is_validation());
        assert!(storage.rename_list(id, "").unwrap_err().is_validation());
        assert!(storage.list_items(id).unwrap().is_empty());
        assert_eq!(storage.list_all().unwrap().len(), 1);
    }

    #[test]
    fn text_is_stored_verbatim() {
        let mut storage = storage();
        let id = storage.create_list("  padded  ").unwrap();
        assert_eq!(storage.get_list(id).unwrap().unwrap().title, "  padded  ");
    }

    #[test]
    fn list_all_orders_by_most_recent_touch() {
        let mut storage = storage();
        let first = storage.create_list("first").unwrap();
        let second = storage.create_list("second").unwrap();
        let third = storage.create_list("third").unwrap();

        let order: Vec<Id> = storage.list_all().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(order, vec![third, second, first]);

        storage.add_item(first, "bump").unwrap();
        let order: Vec<Id> = storage.list_all().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(order, vec![first, third, second]);

        storage.rename_list(second, "renamed").unwrap();
        let order: Vec<Id> = storage.list_all().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(order, vec![second, first, third]);
    }

    #[test]
    fn find_by_title_is_exact() {
        let mut storage = storage();
        storage.create_list("Today").unwrap();

        assert!(storage.find_list_by_title("today").unwrap().is_none());
        assert!(storage.find_list_by_title("Today ").unwrap().is_none());
        assert_eq!(
            storage.find_list_by_title("Today").unwrap().unwrap().title,
            "Today"
        );
    }

    #[test]
    fn duplicate_titles_are_allowed() {
        let mut storage = storage();
        let a = storage.create_list("Dup").unwrap();
        let b = storage.create_list("Dup").unwrap();
        assert_ne!(a, b);

        let found = storage.find_list_by_title("Dup").unwrap().unwrap();
        assert!(found.id == a || found.id == b);
    }

    #[test]
    fn rename_missing_list_is_not_found() {
        let mut storage = storage();
        assert!(storage.rename_list(99, "x").unwrap_err().is_not_found());
        assert!(storage.delete_list(99).unwrap_err().is_not_found());
    }

    #[test]
    fn add_item_appends_positions() {
        let mut storage = storage();
        let list = storage.create_list("Groceries").unwrap();
        for text in ["Milk", "Eggs", "Bread"] {
            storage.add_item(list, text).unwrap();
        }

        let items = storage.list_items(list).unwrap();
        let positions: Vec<i64> = items.iter().map(|i| i.sort_order).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert!(items.iter().all(|i| !i.checked));
    }

    #[test]
    fn add_item_to_missing_list_writes_nothing() {
        let mut storage = storage();
        assert!(storage.add_item(5, "orphan").unwrap_err().is_not_found());

        let count: i64 = storage
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn delete_list_cascades_to_items() {
        let mut storage = storage();
        let doomed = storage.create_list("doomed").unwrap();
        let kept = storage.create_list("kept").unwrap();
        storage.add_item(doomed, "a").unwrap();
        storage.add_item(doomed, "b").unwrap();
        storage.add_item(kept, "c").unwrap();

        storage.delete_list(doomed).unwrap();

        assert!(storage.list_items(doomed).unwrap().is_empty());
        assert!(storage.get_list(doomed).unwrap().is_none());
        assert_eq!(texts(&storage, kept), vec!["c"]);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut storage = storage();
        let list = storage.create_list("l").unwrap();
        let item = storage.add_item(list, "x").unwrap();

        storage.toggle_item(item).unwrap();
        assert!(storage.list_items(list).unwrap()[0].checked);
        storage.toggle_item(item).unwrap();
        assert!(!storage.list_items(list).unwrap()[0].checked);

        assert!(storage.toggle_item(item + 100).unwrap_err().is_not_found());
    }

    #[test]
    fn update_item_text_replaces_text() {
        let mut storage = storage();
        let list = storage.create_list("l").unwrap();
        let item = storage.add_item(list, "old").unwrap();

        storage.update_item_text(item, "new").unwrap();
        assert_eq!(texts(&storage, list), vec!["new"]);
        assert!(storage.update_item_text(item, " ").unwrap_err().is_validation());
        assert!(storage.update_item_text(404, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn delete_item_renumbers_remaining() {
        let mut storage = storage();
        let list = storage.create_list("l").unwrap();
        let ids: Vec<Id> = ["a", "b", "c", "d"]
            .iter()
            .map(|t| storage.add_item(list, t).unwrap())
            .collect();

        storage.delete_item(list, ids[1]).unwrap();

        let items = storage.list_items(list).unwrap();
        assert_eq!(texts(&storage, list), vec!["a", "c", "d"]);
        assert!(is_dense(&items));
    }

    #[test]
    fn delete_item_from_wrong_list_is_rejected() {
        let mut storage = storage();
        let a = storage.create_list("a").unwrap();
        let b = storage.create_list("b").unwrap();
        let item = storage.add_item(a, "x").unwrap();

        assert!(storage.delete_item(b, item).unwrap_err().is_not_found());
        assert_eq!(texts(&storage, a), vec!["x"]);
    }

    #[test]
    fn move_at_edges_is_a_noop() {
        let mut storage = storage();
        let list = storage.create_list("l").unwrap();
        let first = storage.add_item(list, "first").unwrap();
        let last = storage.add_item(list, "last").unwrap();
        let before = storage.list_items(list).unwrap();

        storage.move_item(list, first, Direction::Up).unwrap();
        storage.move_item(list, last, Direction::Down).unwrap();

        assert_eq!(storage.list_items(list).unwrap(), before);
    }

    #[test]
    fn move_swaps_neighbours() {
        let mut storage = storage();
        let list = storage.create_list("l").unwrap();
        let a = storage.add_item(list, "a").unwrap();
        storage.add_item(list, "b").unwrap();
        storage.add_item(list, "c").unwrap();

        storage.move_item(list, a, Direction::Down).unwrap();
        assert_eq!(texts(&storage, list), vec!["b", "a", "c"]);
        assert!(is_dense(&storage.list_items(list).unwrap()));

        assert!(storage
            .move_item(list, 12345, Direction::Up)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn positions_stay_dense_under_mixed_operations() {
        let mut storage = storage();
        let list = storage.create_list("stress").unwrap();
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for step in 0..200 {
            let items = storage.list_items(list).unwrap();
            match next() % 4 {
                0 | 1 => {
                    storage.add_item(list, &format!("item {step}")).unwrap();
                }
                2 if !items.is_empty() => {
                    let victim = &items[(next() as usize) % items.len()];
                    storage.delete_item(list, victim.id).unwrap();
                }
                _ if !items.is_empty() => {
                    let target = &items[(next() as usize) % items.len()];
                    let direction = if next() % 2 == 0 {
                        Direction::Up
                    } else {
                        Direction::Down
                    };
                    storage.move_item(list, target.id, direction).unwrap();
                }
                _ => {}
            }
            assert!(is_dense(&storage.list_items(list).unwrap()), "step {step}");
        }
    }

    fn positions(storage: &SqliteStorage, list_id: Id) -> Vec<(String, i64)> {
        storage
            .list_items(list_id)
            .unwrap()
            .into_iter()
            .map(|item| (item.text, item.sort_order))
            .collect()
    }

    fn fail_on(storage: &SqliteStorage, event: &str) {
        storage
            .conn
            .execute_batch(&format!(
                "CREATE TRIGGER fail_write BEFORE {event} BEGIN SELECT RAISE(ABORT, 'boom'); END;"
            ))
            .unwrap();
    }

    #[test]
    fn failed_renumber_rolls_back_delete_and_move() {
        let mut storage = storage();
        let list = storage.create_list("l").unwrap();
        let ids: Vec<Id> = ["a", "b", "c"]
            .iter()
            .map(|t| storage.add_item(list, t).unwrap())
            .collect();
        let before = positions(&storage, list);
        let touched = storage.get_list(list).unwrap().unwrap().updated_at;

        fail_on(&storage, "UPDATE OF sort_order ON items");

        let err = storage.delete_item(list, ids[0]).unwrap_err();
        assert!(matches!(err, LystError::Storage(_)), "{err:?}");
        assert_eq!(positions(&storage, list), before);

        let err = storage.move_item(list, ids[2], Direction::Up).unwrap_err();
        assert!(matches!(err, LystError::Storage(_)), "{err:?}");
        assert_eq!(positions(&storage, list), before);

        assert_eq!(storage.get_list(list).unwrap().unwrap().updated_at, touched);
    }

    #[test]
    fn failed_list_delete_keeps_its_items() {
        let mut storage = storage();
        let list = storage.create_list("keep me").unwrap();
        storage.add_item(list, "only").unwrap();

        fail_on(&storage, "DELETE ON lists");

        let err = storage.delete_list(list).unwrap_err();
        assert!(matches!(err, LystError::Storage(_)), "{err:?}");
        assert!(storage.get_list(list).unwrap().is_some());
        assert_eq!(positions(&storage, list), vec![("only".to_string(), 1)]);
    }
}
