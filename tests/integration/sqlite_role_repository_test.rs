use admin_service::domain::repositories::{RepositoryError, RoleRepository};
use admin_service::domain::role::Role;
use admin_service::infrastructure::sqlite_role_repository::SqliteRoleRepository;
use sqlx::{Pool, Sqlite};

#[sqlx::test(migrations = "./migrations")]
async fn it_seeds_default_roles(pool: Pool<Sqlite>) {
    let repository = SqliteRoleRepository::new(pool);

    let roles = repository.get_all().await.unwrap();

    assert_eq!(
        roles.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        vec!["admin", "user"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn it_can_add_and_update_role(pool: Pool<Sqlite>) {
    let repository = SqliteRoleRepository::new(pool);

    let mut role = repository
        .create(&Role::now("auditor".to_string(), None))
        .await
        .unwrap();
    role.description = "Read only".to_string();
    repository.update(&role).await.unwrap();

    let row = repository.get_by_id(role.id).await.unwrap();
    assert_eq!(row.name, "auditor");
    assert_eq!(row.description, "Read only");
}

#[sqlx::test(migrations = "./migrations")]
async fn it_rejects_duplicate_role_name(pool: Pool<Sqlite>) {
    let repository = SqliteRoleRepository::new(pool);

    let result = repository.create(&Role::now("admin".to_string(), None)).await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn it_soft_deletes_role(pool: Pool<Sqlite>) {
    let repository = SqliteRoleRepository::new(pool);
    let role = repository
        .create(&Role::now("auditor".to_string(), None))
        .await
        .unwrap();

    repository.delete(role.id).await.unwrap();

    assert!(matches!(
        repository.get_by_id(role.id).await,
        Err(RepositoryError::NotFound(_))
    ));
    assert_eq!(repository.get_all().await.unwrap().len(), 2);
}
