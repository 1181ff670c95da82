//! Game use-case service.
//!
//! # Responsibility
//! - Provide add/rename/remove/list entry points over the repository.
//! - Normalize incoming titles before persistence.
//! - Read written rows back so callers receive persisted state.
//!
//! # Invariants
//! - Stored titles are trimmed with inner whitespace runs collapsed, so they
//!   always satisfy the trim-based validation window.
//! - Batch entry points (`add_games`, `replace_shelf`) are atomic.

use crate::model::game::{Game, GameId, GameValidationError};
use crate::repo::game_repo::{GameListQuery, GameRepository, RepoError, RepoResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Service error for game use-cases.
#[derive(Debug)]
pub enum GameServiceError {
    /// Input failed model validation.
    InvalidGame(GameValidationError),
    /// Target game does not exist.
    GameNotFound(GameId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for GameServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGame(err) => write!(f, "invalid game: {err}"),
            Self::GameNotFound(id) => write!(f, "game not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent catalog state: {details}"),
        }
    }
}

impl Error for GameServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidGame(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for GameServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::GameNotFound(id),
            RepoError::Validation(err) => Self::InvalidGame(err),
            other => Self::Repo(other),
        }
    }
}

/// Use-case facade over repository implementations.
pub struct GameService<R: GameRepository> {
    repo: R,
}

impl<R: GameRepository> GameService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one game from raw title input.
    ///
    /// # Contract
    /// - Title is normalized (trim + whitespace collapse) before validation.
    /// - Returns the persisted record including its assigned id.
    pub fn add_game(&self, title: impl Into<String>) -> Result<Game, GameServiceError> {
        let game = Game::new(normalize_title(&title.into()));
        let id = self.repo.insert_game(&game)?;
        self.read_back(id, "created game not found in read-back")
    }

    /// Adds many games atomically; either every title persists or none.
    pub fn add_games(&mut self, titles: Vec<String>) -> Result<Vec<Game>, GameServiceError> {
        let games = normalized_games(titles);
        let ids = self.repo.insert_games(&games)?;
        ids.into_iter()
            .map(|id| self.read_back(id, "batch-created game not found in read-back"))
            .collect()
    }

    /// Gets one game by id.
    pub fn get_game(&self, id: GameId) -> RepoResult<Option<Game>> {
        self.repo.get_game(id)
    }

    /// Lists games using filter and pagination options, ordered by id.
    pub fn list_games(&self, query: &GameListQuery) -> RepoResult<Vec<Game>> {
        self.repo.list_games(query)
    }

    /// Finds games whose title matches exactly, case-insensitively.
    pub fn find_games_by_title(&self, title: &str) -> RepoResult<Vec<Game>> {
        self.repo.list_games(&GameListQuery {
            title: Some(normalize_title(title)),
            ..GameListQuery::default()
        })
    }

    /// Counts all games on the shelf.
    pub fn count_games(&self) -> RepoResult<u64> {
        self.repo.count_games()
    }

    /// Replaces the title of an existing game.
    pub fn rename_game(
        &self,
        id: GameId,
        new_title: impl Into<String>,
    ) -> Result<Game, GameServiceError> {
        let game = Game::with_id(id, normalize_title(&new_title.into()));
        self.repo.update_game(&game)?;
        self.read_back(id, "renamed game not found in read-back")
    }

    /// Removes one game by id.
    pub fn remove_game(&self, id: GameId) -> Result<(), GameServiceError> {
        self.repo.delete_game(id)?;
        Ok(())
    }

    /// Removes every game; returns how many rows were deleted.
    pub fn clear_shelf(&mut self) -> Result<usize, GameServiceError> {
        let removed = self.repo.delete_all_games()?;
        Ok(removed)
    }

    /// Atomically replaces the whole shelf with the given titles.
    ///
    /// Returns the persisted records in id order. On any failure the previous
    /// shelf contents remain untouched.
    pub fn replace_shelf(&mut self, titles: Vec<String>) -> Result<Vec<Game>, GameServiceError> {
        let games = normalized_games(titles);
        let ids = self.repo.replace_all_games(&games)?;

        let replaced = self.repo.list_games(&GameListQuery::default())?;
        if replaced.len() != ids.len() {
            return Err(GameServiceError::InconsistentState(
                "replaced shelf read-back count mismatch",
            ));
        }
        Ok(replaced)
    }

    fn read_back(&self, id: GameId, missing: &'static str) -> Result<Game, GameServiceError> {
        self.repo
            .get_game(id)?
            .ok_or(GameServiceError::InconsistentState(missing))
    }
}

/// Normalizes raw title input: trim plus inner whitespace-run collapse.
///
/// Normalization never makes a valid title invalid; validation runs on the
/// trimmed value with the same rules.
pub fn normalize_title(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

fn normalized_games(titles: Vec<String>) -> Vec<Game> {
    titles
        .into_iter()
        .map(|title| Game::new(normalize_title(&title)))
        .collect()
}
