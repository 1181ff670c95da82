//! Game repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `games` table.
//! - Keep SQL details inside the persistence boundary.
//! - Make batch mutations atomic (all rows or none).
//!
//! # Invariants
//! - Write paths must call `Game::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Listing is deterministic: `id ASC` always.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::game::{Game, GameId, GameValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const GAME_SELECT_SQL: &str = "SELECT
    id,
    title
FROM games";

const GAMES_TABLE: &str = "games";
const REQUIRED_GAME_COLUMNS: [&str; 2] = ["id", "title"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for game persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(GameValidationError),
    Db(DbError),
    NotFound(GameId),
    /// Operation requires a persisted record but `id` was `None`.
    Unpersisted,
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "game not found: {id}"),
            Self::Unpersisted => write!(f, "game has no id; it was never persisted"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it via db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GameValidationError> for RepoError {
    fn from(value: GameValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing games.
///
/// Results are always ordered `id ASC`; filters narrow, never reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameListQuery {
    /// Optional exact-title filter, matched case-insensitively.
    pub title: Option<String>,
    /// Maximum rows to return. `None` returns all rows.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

/// Repository interface for game CRUD operations.
pub trait GameRepository {
    /// Inserts one game and returns its database-assigned id.
    fn insert_game(&self, game: &Game) -> RepoResult<GameId>;
    /// Inserts all games inside one transaction; no rows persist on failure.
    fn insert_games(&mut self, games: &[Game]) -> RepoResult<Vec<GameId>>;
    /// Gets one game by id.
    fn get_game(&self, id: GameId) -> RepoResult<Option<Game>>;
    /// Lists games using filter and pagination options, ordered by id.
    fn list_games(&self, query: &GameListQuery) -> RepoResult<Vec<Game>>;
    /// Replaces the title of an already-persisted game.
    fn update_game(&self, game: &Game) -> RepoResult<()>;
    /// Hard-deletes one game by id.
    fn delete_game(&self, id: GameId) -> RepoResult<()>;
    /// Deletes every row inside one transaction; returns the removed count.
    fn delete_all_games(&mut self) -> RepoResult<usize>;
    /// Clears the table and inserts the given games in one transaction.
    fn replace_all_games(&mut self, games: &[Game]) -> RepoResult<Vec<GameId>>;
    /// Counts all rows.
    fn count_games(&self) -> RepoResult<u64>;
}

/// SQLite-backed game repository.
pub struct SqliteGameRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteGameRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when `PRAGMA user_version`
    ///   does not match the latest migration known by this binary.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   when the `games` schema is incomplete.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl GameRepository for SqliteGameRepository<'_> {
    fn insert_game(&self, game: &Game) -> RepoResult<GameId> {
        game.validate()?;
        insert_row(self.conn, game)
    }

    fn insert_games(&mut self, games: &[Game]) -> RepoResult<Vec<GameId>> {
        for game in games {
            game.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut ids = Vec::with_capacity(games.len());
        for game in games {
            ids.push(insert_row(&tx, game)?);
        }
        tx.commit()?;

        Ok(ids)
    }

    fn get_game(&self, id: GameId) -> RepoResult<Option<Game>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GAME_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(decode_game_row(row)?));
        }

        Ok(None)
    }

    fn list_games(&self, query: &GameListQuery) -> RepoResult<Vec<Game>> {
        let mut sql = format!("{GAME_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = query.title.as_ref() {
            sql.push_str(" AND title = ? COLLATE NOCASE");
            bind_values.push(Value::Text(title.clone()));
        }

        sql.push_str(" ORDER BY id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut games = Vec::new();

        while let Some(row) = rows.next()? {
            games.push(decode_game_row(row)?);
        }

        Ok(games)
    }

    fn update_game(&self, game: &Game) -> RepoResult<()> {
        game.validate()?;
        let id = match game.id {
            Some(id) => id,
            None => return Err(RepoError::Unpersisted),
        };

        let changed = self.conn.execute(
            "UPDATE games SET title = ?1 WHERE id = ?2;",
            params![game.title.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_game(&self, id: GameId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM games WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_all_games(&mut self) -> RepoResult<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = tx.execute("DELETE FROM games;", [])?;
        tx.commit()?;

        Ok(removed)
    }

    fn replace_all_games(&mut self, games: &[Game]) -> RepoResult<Vec<GameId>> {
        for game in games {
            game.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM games;", [])?;
        let mut ids = Vec::with_capacity(games.len());
        for game in games {
            ids.push(insert_row(&tx, game)?);
        }
        tx.commit()?;

        Ok(ids)
    }

    fn count_games(&self) -> RepoResult<u64> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM games;", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// Inserts one validated row, honoring an explicit id when present.
///
/// Explicit ids serve import flows where identity already exists externally;
/// otherwise SQLite assigns the next rowid.
fn insert_row(conn: &Connection, game: &Game) -> RepoResult<GameId> {
    match game.id {
        Some(id) => {
            conn.execute(
                "INSERT INTO games (id, title) VALUES (?1, ?2);",
                params![id, game.title.as_str()],
            )?;
            Ok(id)
        }
        None => {
            conn.execute(
                "INSERT INTO games (title) VALUES (?1);",
                [game.title.as_str()],
            )?;
            Ok(conn.last_insert_rowid())
        }
    }
}

fn decode_game_row(row: &Row<'_>) -> RepoResult<Game> {
    let id: GameId = row.get("id")?;
    let title: String = row.get("title")?;

    let game = Game::with_id(id, title);
    game.validate()?;
    Ok(game)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, GAMES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(GAMES_TABLE));
    }

    for column in REQUIRED_GAME_COLUMNS {
        if !table_has_column(conn, GAMES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: GAMES_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
