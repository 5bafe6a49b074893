// ABOUTME: Integration tests for program storage
// ABOUTME: Listing filters, uniqueness per department, and partial updates

use archive_core::Department;
use archive_programs::{ProgramCreateInput, ProgramStorage, ProgramUpdateInput};
use archive_storage::test_utils::memory_pool;
use archive_storage::StorageError;

async fn setup() -> ProgramStorage {
    ProgramStorage::new(memory_pool().await)
}

#[tokio::test]
async fn test_create_and_list_programs() {
    let storage = setup().await;

    storage
        .create_program(ProgramCreateInput::new("STEM", Department::SeniorHigh))
        .await
        .unwrap();
    let nursing = storage
        .create_program(ProgramCreateInput::new("BS Nursing", Department::College))
        .await
        .unwrap();
    storage
        .create_program(ProgramCreateInput::new("BS Accountancy", Department::College))
        .await
        .unwrap();

    assert!(nursing.id.starts_with("program-"));
    assert!(nursing.is_active);

    let all = storage.list_programs(None, false).await.unwrap();
    let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["BS Accountancy", "BS Nursing", "STEM"]);

    let college = storage
        .list_programs(Some(Department::College), false)
        .await
        .unwrap();
    assert_eq!(college.len(), 2);
}

#[tokio::test]
async fn test_inactive_programs_are_hidden_by_default() {
    let storage = setup().await;
    let program = storage
        .create_program(ProgramCreateInput::new("ABM", Department::SeniorHigh))
        .await
        .unwrap();

    storage
        .update_program(
            &program.id,
            ProgramUpdateInput {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(storage.list_programs(None, false).await.unwrap().is_empty());
    let all = storage.list_programs(None, true).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].is_active);
}

#[tokio::test]
async fn test_name_is_unique_within_department() {
    let storage = setup().await;
    storage
        .create_program(ProgramCreateInput::new("General Studies", Department::College))
        .await
        .unwrap();

    let duplicate = storage
        .create_program(ProgramCreateInput::new("General Studies", Department::College))
        .await;
    assert!(matches!(duplicate, Err(StorageError::Duplicate(_))));

    // Same name in the other department is fine
    assert!(storage
        .create_program(ProgramCreateInput::new("General Studies", Department::SeniorHigh))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_update_clears_description() {
    let storage = setup().await;
    let mut input = ProgramCreateInput::new("HUMSS", Department::SeniorHigh);
    input.description = Some("Humanities and Social Sciences".to_string());
    let program = storage.create_program(input).await.unwrap();
    assert!(program.description.is_some());

    let updated = storage
        .update_program(
            &program.id,
            ProgramUpdateInput {
                description: Some(String::new()),
                name: Some("HUMSS Strand".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "HUMSS Strand");
    assert!(updated.description.is_none());
}

#[tokio::test]
async fn test_missing_program_is_not_found() {
    let storage = setup().await;
    assert!(matches!(
        storage.get_program("program-missing").await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        storage.delete_program("program-missing").await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        storage
            .update_program("program-missing", ProgramUpdateInput::default())
            .await,
        Err(StorageError::NotFound)
    ));
}
