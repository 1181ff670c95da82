//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `gameshelf_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use gameshelf_core::db::open_db_in_memory;
use gameshelf_core::{GameListQuery, GameService, SqliteGameRepository};
use std::error::Error;

const SEED_TITLES: [&str; 3] = ["Super Mario Brothers", "Mario Kart", "F-Zero"];

fn main() {
    println!("gameshelf_core version={}", gameshelf_core::core_version());

    if let Err(err) = run_smoke() {
        eprintln!("gameshelf smoke failed: {err}");
        std::process::exit(1);
    }
}

/// Seeds an in-memory shelf and lists it back in id order.
fn run_smoke() -> Result<(), Box<dyn Error>> {
    let mut conn = open_db_in_memory()?;
    let repo = SqliteGameRepository::try_new(&mut conn)?;
    let mut service = GameService::new(repo);

    let seeded = service.replace_shelf(
        SEED_TITLES
            .iter()
            .map(|title| title.to_string())
            .collect(),
    )?;
    println!("seeded {} games", seeded.len());

    for game in service.list_games(&GameListQuery::default())? {
        println!("{game}");
    }

    Ok(())
}
