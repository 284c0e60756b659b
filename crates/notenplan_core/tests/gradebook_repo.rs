use notenplan_core::db::open_db_in_memory;
use notenplan_core::{
    Gradebook, GradebookError, GradebookRepository, RepoError, SqliteGradebookRepository,
    STORAGE_KEY,
};

#[test]
fn missing_key_loads_empty_gradebook() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGradebookRepository::new(&conn);

    assert_eq!(repo.key(), STORAGE_KEY);
    assert!(repo.load_gradebook().unwrap().is_empty());
}

#[test]
fn saved_document_has_expected_wire_shape() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGradebookRepository::new(&conn);

    let mut book = Gradebook::new();
    book.add_subject("Mathe").unwrap();
    book.add_note(0, "Klassenarbeit 1", 2.0).unwrap();
    book.add_note(0, "Test", 1.7).unwrap();
    repo.save_gradebook(&book).unwrap();

    let raw = repo.get_item("notenplan-data").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "subjects": [{
                "name": "Mathe",
                "notes": [
                    { "label": "Klassenarbeit 1", "grade": 2.0 },
                    { "label": "Test", "grade": 1.7 }
                ]
            }]
        })
    );
    assert_eq!(repo.load_gradebook().unwrap(), book);
}

#[test]
fn loads_document_written_by_hand() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGradebookRepository::new(&conn);
    repo.set_item(
        STORAGE_KEY,
        r#"{"subjects":[{"name":"Deutsch","notes":[{"label":"Aufsatz","grade":3}]}]}"#,
    )
    .unwrap();

    let book = repo.load_gradebook().unwrap();
    assert_eq!(book.subjects()[0].name(), "Deutsch");
    assert_eq!(book.subjects()[0].notes()[0].grade().value(), 3.0);
}

#[test]
fn save_replaces_previous_document() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGradebookRepository::new(&conn);

    let mut book = Gradebook::new();
    book.add_subject("Mathe").unwrap();
    repo.save_gradebook(&book).unwrap();
    book.delete_subject(0).unwrap();
    repo.save_gradebook(&book).unwrap();

    assert!(repo.load_gradebook().unwrap().is_empty());
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM local_storage;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn malformed_json_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGradebookRepository::new(&conn);
    repo.set_item(STORAGE_KEY, "{not json").unwrap();

    let err = repo.load_gradebook().unwrap_err();
    assert!(matches!(err, RepoError::Json { ref key, .. } if key == STORAGE_KEY));
}

#[test]
fn out_of_range_grade_in_storage_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGradebookRepository::new(&conn);
    repo.set_item(
        STORAGE_KEY,
        r#"{"subjects":[{"name":"Mathe","notes":[{"label":"Test","grade":9.5}]}]}"#,
    )
    .unwrap();

    assert!(matches!(
        repo.load_gradebook().unwrap_err(),
        RepoError::Json { .. }
    ));
}

#[test]
fn duplicate_subjects_in_storage_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGradebookRepository::new(&conn);
    repo.set_item(
        STORAGE_KEY,
        r#"{"subjects":[{"name":"Mathe","notes":[]},{"name":"MATHE","notes":[]}]}"#,
    )
    .unwrap();

    match repo.load_gradebook().unwrap_err() {
        RepoError::InvalidData { source, .. } => {
            assert_eq!(source, GradebookError::DuplicateSubject("MATHE".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn custom_keys_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let default_repo = SqliteGradebookRepository::new(&conn);
    let other_repo = SqliteGradebookRepository::with_key(&conn, "notenplan-test");

    let mut book = Gradebook::new();
    book.add_subject("Chemie").unwrap();
    other_repo.save_gradebook(&book).unwrap();

    assert!(default_repo.load_gradebook().unwrap().is_empty());
    assert_eq!(other_repo.load_gradebook().unwrap().len(), 1);
    assert!(other_repo.remove_item("notenplan-test").unwrap());
    assert!(!other_repo.remove_item("notenplan-test").unwrap());
}
