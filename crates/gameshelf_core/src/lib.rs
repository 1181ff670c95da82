//! Core domain logic for GameShelf.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::game::{Game, GameId, GameValidationError, TITLE_MAX_CHARS, TITLE_MIN_CHARS};
pub use repo::game_repo::{
    GameListQuery, GameRepository, RepoError, RepoResult, SqliteGameRepository,
};
pub use service::game_service::{normalize_title, GameService, GameServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
