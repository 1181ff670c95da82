//! Game domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record (id + title).
//! - Provide title validation shared by repository write and read paths.
//!
//! # Invariants
//! - `id` is assigned by the database on insert and never reused.
//! - A valid title is 3..=50 characters after trimming, never blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum title length in characters, counted after trimming.
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length in characters, counted after trimming.
pub const TITLE_MAX_CHARS: usize = 50;

/// Stable identifier assigned by the database on insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type GameId = i64;

/// Validation failures for catalog records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameValidationError {
    /// Title is empty or whitespace-only.
    BlankTitle,
    /// Trimmed title is shorter than [`TITLE_MIN_CHARS`].
    TitleTooShort { chars: usize },
    /// Trimmed title is longer than [`TITLE_MAX_CHARS`].
    TitleTooLong { chars: usize },
    /// Persisted identifiers must be positive rowids.
    NonPositiveId { id: GameId },
}

impl Display for GameValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::TitleTooShort { chars } => write!(
                f,
                "title has {chars} characters; at least {TITLE_MIN_CHARS} required"
            ),
            Self::TitleTooLong { chars } => write!(
                f,
                "title has {chars} characters; at most {TITLE_MAX_CHARS} allowed"
            ),
            Self::NonPositiveId { id } => write!(f, "game id must be positive, got {id}"),
        }
    }
}

impl Error for GameValidationError {}

/// Canonical catalog record.
///
/// `id` stays `None` until the row is persisted; repositories return the
/// database-assigned id and read paths rehydrate it via [`Game::with_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Database-assigned identifier. `None` for unpersisted records.
    pub id: Option<GameId>,
    /// Display title, 3..=50 characters after trimming.
    pub title: String,
}

impl Game {
    /// Creates an unpersisted game with the given title.
    ///
    /// The title is stored as provided; call [`Game::validate`] (repositories
    /// do this on every write) to enforce the length window.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }

    /// Creates a game with a known identifier.
    ///
    /// Used by read paths rehydrating stored rows and by import flows where
    /// identity already exists externally.
    pub fn with_id(id: GameId, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
        }
    }

    /// Returns whether this record carries a database identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Validates identity and title rules.
    ///
    /// # Errors
    /// - [`GameValidationError::NonPositiveId`] when `id` is zero or negative.
    /// - [`GameValidationError::BlankTitle`] when the title is whitespace-only.
    /// - [`GameValidationError::TitleTooShort`] / [`GameValidationError::TitleTooLong`]
    ///   when the trimmed character count is outside 3..=50.
    pub fn validate(&self) -> Result<(), GameValidationError> {
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(GameValidationError::NonPositiveId { id });
            }
        }

        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            return Err(GameValidationError::BlankTitle);
        }

        let chars = trimmed.chars().count();
        if chars < TITLE_MIN_CHARS {
            return Err(GameValidationError::TitleTooShort { chars });
        }
        if chars > TITLE_MAX_CHARS {
            return Err(GameValidationError::TitleTooLong { chars });
        }

        Ok(())
    }
}

impl Display for Game {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "Game[id={id}, title={}]", self.title),
            None => write!(f, "Game[id=unsaved, title={}]", self.title),
        }
    }
}
