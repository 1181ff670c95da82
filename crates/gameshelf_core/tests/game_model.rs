use gameshelf_core::{Game, GameValidationError, TITLE_MAX_CHARS, TITLE_MIN_CHARS};

#[test]
fn game_new_sets_defaults() {
    let game = Game::new("Mario Kart");

    assert_eq!(game.id, None);
    assert_eq!(game.title, "Mario Kart");
    assert!(!game.is_persisted());
}

#[test]
fn with_id_sets_identity() {
    let game = Game::with_id(7, "F-Zero");

    assert_eq!(game.id, Some(7));
    assert_eq!(game.title, "F-Zero");
    assert!(game.is_persisted());
}

#[test]
fn validate_accepts_boundary_title_lengths() {
    assert!(Game::new("a".repeat(TITLE_MIN_CHARS)).validate().is_ok());
    assert!(Game::new("a".repeat(TITLE_MAX_CHARS)).validate().is_ok());
}

#[test]
fn validate_rejects_blank_title() {
    assert_eq!(
        Game::new("").validate().unwrap_err(),
        GameValidationError::BlankTitle
    );
    assert_eq!(
        Game::new(" \t ").validate().unwrap_err(),
        GameValidationError::BlankTitle
    );
}

#[test]
fn validate_rejects_short_title() {
    let err = Game::new("ab").validate().unwrap_err();
    assert_eq!(err, GameValidationError::TitleTooShort { chars: 2 });
}

#[test]
fn validate_rejects_long_title() {
    let err = Game::new("a".repeat(TITLE_MAX_CHARS + 1))
        .validate()
        .unwrap_err();
    assert_eq!(
        err,
        GameValidationError::TitleTooLong {
            chars: TITLE_MAX_CHARS + 1
        }
    );
}

#[test]
fn validate_counts_characters_not_bytes() {
    // 3 characters, 9 bytes
    assert!(Game::new("ゼルダ").validate().is_ok());

    let err = Game::new("ポケ").validate().unwrap_err();
    assert_eq!(err, GameValidationError::TitleTooShort { chars: 2 });
}

#[test]
fn validate_trims_before_counting() {
    let err = Game::new(" ab ").validate().unwrap_err();
    assert_eq!(err, GameValidationError::TitleTooShort { chars: 2 });

    assert!(Game::new("  abc  ").validate().is_ok());
}

#[test]
fn validate_rejects_non_positive_id() {
    let err = Game::with_id(0, "Mario Kart").validate().unwrap_err();
    assert_eq!(err, GameValidationError::NonPositiveId { id: 0 });

    let err = Game::with_id(-5, "Mario Kart").validate().unwrap_err();
    assert_eq!(err, GameValidationError::NonPositiveId { id: -5 });
}

#[test]
fn game_serialization_uses_expected_wire_fields() {
    let game = Game::with_id(3, "Mario Kart");

    let json = serde_json::to_value(&game).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["title"], "Mario Kart");

    let decoded: Game = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, game);
}

#[test]
fn unpersisted_game_serializes_null_id() {
    let json = serde_json::to_value(Game::new("F-Zero")).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["title"], "F-Zero");
}

#[test]
fn display_includes_identity_and_title() {
    assert_eq!(
        Game::with_id(12, "F-Zero").to_string(),
        "Game[id=12, title=F-Zero]"
    );
    assert_eq!(
        Game::new("F-Zero").to_string(),
        "Game[id=unsaved, title=F-Zero]"
    );
}
