use admin_service::domain::crypto::{HashingScheme, SchemeAwareHasher};
use admin_service::domain::error::UserError;
use admin_service::domain::user::{STATUS_DISABLED, STATUS_ENABLED, User, UserChanges};
use serde_json::Value;

fn hasher() -> SchemeAwareHasher {
    SchemeAwareHasher::with_scheme(HashingScheme::BcryptLow)
}

fn alice() -> User {
    User::now_with_credentials(
        "alice".to_string(),
        "p1",
        "alice@example.test".to_string(),
        2,
        &hasher(),
    )
    .unwrap()
}

#[test]
fn it_can_be_created() {
    let user = alice();

    assert_eq!(user.username, "alice");
    assert_eq!(user.status, STATUS_ENABLED);
    assert_eq!(user.role_id, 2);
    assert!(user.is_enabled());
    assert_ne!(user.password_hash, "p1");
    assert!(user.verify_password(&hasher(), "p1"));
    assert!(!user.verify_password(&hasher(), "p2"));
}

#[test]
fn it_cannot_be_created_with_invalid_input() {
    let create = |username: &str, password: &str, email: &str| {
        User::now_with_credentials(
            username.to_string(),
            password,
            email.to_string(),
            2,
            &hasher(),
        )
    };

    assert!(matches!(
        create("", "p1", "a@example.test"),
        Err(UserError::InvalidUsername { .. })
    ));
    assert!(matches!(
        create(&"a".repeat(51), "p1", "a@example.test"),
        Err(UserError::InvalidUsername { .. })
    ));
    assert!(matches!(
        create("alice", "p1", "not-an-email"),
        Err(UserError::InvalidEmail { .. })
    ));
    assert_eq!(
        create("alice", "", "a@example.test").unwrap_err(),
        UserError::EmptyPassword
    );
}

#[test]
fn it_hides_password_hash_when_serialized() {
    let json = serde_json::to_value(alice()).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "alice");
}

#[test]
fn it_applies_changes_and_reports_touched_fields() {
    let mut user = alice();
    let fields = user
        .apply(
            UserChanges {
                nickname: Some("Al".to_string()),
                status: Some(STATUS_DISABLED),
                ..UserChanges::default()
            },
            &hasher(),
        )
        .unwrap();

    assert_eq!(user.nickname, "Al");
    assert!(!user.is_enabled());
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["nickname"], Value::from("Al"));
    assert_eq!(fields["status"], Value::from(STATUS_DISABLED));
}

#[test]
fn it_changes_password_without_reporting_it() {
    let mut user = alice();
    let fields = user
        .apply(
            UserChanges {
                password: Some("p2".to_string()),
                ..UserChanges::default()
            },
            &hasher(),
        )
        .unwrap();

    assert!(fields.is_empty());
    assert!(user.verify_password(&hasher(), "p2"));
    assert!(!user.verify_password(&hasher(), "p1"));
}

#[test]
fn it_rejects_invalid_email_change() {
    let mut user = alice();
    let result = user.apply(
        UserChanges {
            email: Some("broken".to_string()),
            ..UserChanges::default()
        },
        &hasher(),
    );

    assert!(matches!(result, Err(UserError::InvalidEmail { .. })));
    assert_eq!(user.email, "alice@example.test");
}
