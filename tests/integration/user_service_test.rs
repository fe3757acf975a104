use crate::utils::runners::run_acceptance_test_with_default;
use admin_service::application::service::user_service::{NewUser, UserServiceError};
use admin_service::domain::user::UserChanges;
use std::sync::{Arc, Mutex};

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "p1".to_string(),
        email: format!("{}@example.test", username),
        nickname: Some(username.to_uppercase()),
        avatar: None,
        role_id: None,
        status: None,
    }
}

#[tokio::test]
async fn it_creates_user_with_default_role_and_emits_event() {
    run_acceptance_test_with_default(|c| async move {
        let user = c.user_service.create_user(new_user("bob")).await.unwrap();

        assert!(user.id > 0);
        assert_eq!(user.role_id, 2);
        assert_eq!(user.nickname, "BOB");

        let event = c
            .wait_for_user_event(1000, |e| e.event_type == "user_register")
            .await
            .unwrap();
        assert_eq!(event.data["user_id"], user.id);
        assert_eq!(event.data["email"], "bob@example.test");
    })
    .await;
}

#[tokio::test]
async fn it_rejects_duplicate_username() {
    run_acceptance_test_with_default(|c| async move {
        c.user_service.create_user(new_user("bob")).await.unwrap();

        let mut duplicate = new_user("bob");
        duplicate.email = "other@example.test".to_string();
        let result = c.user_service.create_user(duplicate).await;

        assert!(matches!(result, Err(UserServiceError::UsernameTaken)));
    })
    .await;
}

#[tokio::test]
async fn it_rejects_missing_fields() {
    run_acceptance_test_with_default(|c| async move {
        let mut blank = new_user("bob");
        blank.password = String::new();

        let result = c.user_service.create_user(blank).await;

        assert!(matches!(result, Err(UserServiceError::InvalidInput(_))));
    })
    .await;
}

#[tokio::test]
async fn it_updates_user_and_reports_changed_fields() {
    run_acceptance_test_with_default(|c| async move {
        let user = c.user_service.create_user(new_user("bob")).await.unwrap();

        let updated = c
            .user_service
            .update_user(
                user.id,
                UserChanges {
                    nickname: Some("Bobby".to_string()),
                    ..UserChanges::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.nickname, "Bobby");
        assert_eq!(c.user_service.get_user(user.id).await.unwrap().nickname, "Bobby");

        let event = c
            .wait_for_user_event(1000, |e| e.event_type == "user_update")
            .await
            .unwrap();
        assert_eq!(event.data["fields"]["nickname"], "Bobby");
    })
    .await;
}

#[tokio::test]
async fn it_deletes_user() {
    run_acceptance_test_with_default(|c| async move {
        let user = c.user_service.create_user(new_user("bob")).await.unwrap();

        c.user_service.delete_user(user.id).await.unwrap();

        assert!(matches!(
            c.user_service.get_user(user.id).await,
            Err(UserServiceError::NotFound)
        ));
        assert!(matches!(
            c.user_service.delete_user(user.id).await,
            Err(UserServiceError::NotFound)
        ));
        c.wait_for_user_event(1000, |e| e.event_type == "user_delete")
            .await
            .unwrap();
    })
    .await;
}

#[tokio::test]
async fn it_pages_and_searches_users() {
    run_acceptance_test_with_default(|c| async move {
        for name in ["anna", "annika", "bob", "carl"] {
            c.user_service.create_user(new_user(name)).await.unwrap();
        }

        let (page, total) = c.user_service.list_users(1, 2, None).await.unwrap();
        assert_eq!(total, 4);
        assert_eq!(page.len(), 2);

        let (page, total) = c.user_service.list_users(2, 3, None).await.unwrap();
        assert_eq!(total, 4);
        assert_eq!(page.len(), 1);

        let (found, total) = c.user_service.list_users(1, 10, Some("ann")).await.unwrap();
        assert_eq!(total, 2);
        assert!(found.iter().all(|u| u.username.starts_with("ann")));

        let (all, _) = c.user_service.list_users(0, 0, Some("  ")).await.unwrap();
        assert_eq!(all.len(), 4);
    })
    .await;
}

#[tokio::test]
async fn it_batch_processes_users_and_reports_missing_ones() {
    run_acceptance_test_with_default(|c| async move {
        let mut ids = vec![];
        for name in ["anna", "bob", "carl"] {
            ids.push(c.user_service.create_user(new_user(name)).await.unwrap().id);
        }
        ids.push(9999);

        let seen = Arc::new(Mutex::new(vec![]));
        let processed = seen.clone();
        let result = c
            .user_service
            .batch_process_users(ids, move |user| {
                let processed = processed.clone();
                async move {
                    processed.lock().unwrap().push(user.username);
                    Ok(())
                }
            })
            .await;

        assert!(matches!(result, Err(UserServiceError::NotFound)));
        let mut seen = seen.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec!["anna", "bob", "carl"]);
    })
    .await;
}

#[tokio::test]
async fn it_reports_batch_processor_panic() {
    run_acceptance_test_with_default(|c| async move {
        let user = c.user_service.create_user(new_user("anna")).await.unwrap();

        let result = c
            .user_service
            .batch_process_users(vec![user.id], |user| async move {
                if user.username == "anna" {
                    panic!("cannot process {}", user.username);
                }
                Ok(())
            })
            .await;

        match result {
            Err(UserServiceError::BatchItem(aborted)) => {
                assert_eq!(aborted.0, "cannot process anna");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    })
    .await;
}
