use admin_service::domain::menu::Menu;
use admin_service::domain::repositories::{MenuRepository, RepositoryError};
use admin_service::infrastructure::sqlite_menu_repository::SqliteMenuRepository;
use sqlx::{Pool, Sqlite};

fn menu(name: &str, sort: i32) -> Menu {
    let mut menu = Menu::now(name.to_string());
    menu.sort = sort;
    menu
}

#[sqlx::test(migrations = "./migrations")]
async fn it_lists_menus_by_sort_order(pool: Pool<Sqlite>) {
    let repository = SqliteMenuRepository::new(pool);
    for (name, sort) in [("settings", 3), ("dashboard", 1), ("users", 2)] {
        repository.create(&menu(name, sort)).await.unwrap();
    }

    let menus = repository.get_all().await.unwrap();

    assert_eq!(
        menus.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        vec!["dashboard", "users", "settings"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn it_keeps_parent_reference(pool: Pool<Sqlite>) {
    let repository = SqliteMenuRepository::new(pool);
    let parent = repository.create(&menu("system", 1)).await.unwrap();

    let mut child = menu("roles", 1);
    child.parent_id = Some(parent.id);
    child.path = "/system/roles".to_string();
    let child = repository.create(&child).await.unwrap();

    let row = repository.get_by_id(child.id).await.unwrap();
    assert_eq!(row.parent_id, Some(parent.id));
    assert_eq!(row.path, "/system/roles");
}

#[sqlx::test(migrations = "./migrations")]
async fn it_reports_missing_menu_on_update(pool: Pool<Sqlite>) {
    let repository = SqliteMenuRepository::new(pool);
    let mut missing = menu("ghost", 1);
    missing.id = 404;

    assert!(matches!(
        repository.update(&missing).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn it_soft_deletes_menu(pool: Pool<Sqlite>) {
    let repository = SqliteMenuRepository::new(pool);
    let created = repository.create(&menu("dashboard", 1)).await.unwrap();

    repository.delete(created.id).await.unwrap();

    assert!(repository.get_all().await.unwrap().is_empty());
}
