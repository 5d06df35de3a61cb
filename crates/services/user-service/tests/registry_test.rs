//! End-to-end tests of the registry against the in-memory store.

use std::sync::Arc;

use chrono::NaiveDateTime;

use domain::{DomainError, NewUser, PlainPassword, UserRole};
use user_service_lib::build_service;
use user_service_lib::config::UserServiceConfig;
use user_service_lib::service::UserService;
use user_service_lib::{AccessGate, LookupTarget};

fn birthdate() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2002-04-22T20:30:00", "%Y-%m-%dT%H:%M:%S").unwrap()
}

fn new_user(username: &str, password: &str) -> NewUser {
    NewUser::new(username, "Test User", birthdate(), password)
}

fn service() -> Arc<dyn UserService> {
    build_service(&UserServiceConfig::default())
}

#[tokio::test]
async fn test_alice_scenario() {
    let service = service();

    let alice = service
        .register(new_user("alice", "longenough1"))
        .await
        .unwrap();
    assert_eq!(alice.uid, 1);
    assert_eq!(alice.role(), UserRole::Regular);

    let again = service
        .register(new_user("alice", "longenough1"))
        .await
        .unwrap_err();
    assert_eq!(again, DomainError::duplicate_user("alice"));

    let wrong = service
        .authenticate("alice", &PlainPassword::new("wrong"))
        .await
        .unwrap_err();
    assert_eq!(wrong, DomainError::Unauthorized);

    service.grant_admin(1).await.unwrap();
    let promoted = service.get_by_username("alice").await.unwrap().unwrap();
    assert_eq!(promoted.role(), UserRole::Admin);
}

#[tokio::test]
async fn test_short_passwords_are_rejected() {
    let service = service();

    for password in ["", "1", "1234567", "12345678"] {
        let err = service
            .register(new_user("bob", password))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPassword(_)), "{:?}", password);
    }
    assert_eq!(service.user_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_uids_strictly_increase_across_failures() {
    let service = service();
    let mut last = 0;

    for (i, username) in ["u1", "u2", "u3", "u4"].iter().enumerate() {
        let entity = service
            .register(new_user(username, "longenough1"))
            .await
            .unwrap();
        assert!(entity.uid > last);
        last = entity.uid;

        // Rejected registrations in between must not disturb the sequence
        let _ = service.register(new_user(username, "longenough1")).await;
        let _ = service.register(new_user("weak", "short")).await;
        assert_eq!(entity.uid, i as u64 + 1);
    }
}

#[tokio::test]
async fn test_duplicate_keeps_first_entity() {
    let service = service();

    let first = service
        .register(new_user("carol", "firstpass1"))
        .await
        .unwrap();
    let _ = service.register(new_user("carol", "secondpass2")).await;

    let stored = service.get_by_username("carol").await.unwrap().unwrap();
    assert_eq!(stored, first);
    assert_eq!(service.user_count().await.unwrap(), 1);
    assert!(service
        .authenticate("carol", &PlainPassword::new("firstpass1"))
        .await
        .is_ok());
    assert!(service
        .authenticate("carol", &PlainPassword::new("secondpass2"))
        .await
        .is_err());
}

#[tokio::test]
async fn test_seeded_admin_keeps_admin_role() {
    let service = service();

    let admin = service
        .register(new_user("admin", "superSecretAdminPassword123").with_role(UserRole::Admin))
        .await
        .unwrap();
    assert!(admin.is_admin());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_of_same_username() {
    let service = service();

    let attempts = (0..8).map(|_| {
        let service = service.clone();
        tokio::spawn(async move { service.register(new_user("dave", "longenough1")).await })
    });
    let results = futures::future::join_all(attempts).await;

    let successes = results
        .iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();
    assert_eq!(successes, 1);
    assert!(results
        .iter()
        .all(|r| matches!(r, Ok(Ok(_)) | Ok(Err(DomainError::DuplicateUser(_))))));
    assert_eq!(service.user_count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_get_distinct_uids() {
    let service = service();

    let attempts = (0..8).map(|i| {
        let service = service.clone();
        tokio::spawn(async move {
            service
                .register(new_user(&format!("user{}", i), "longenough1"))
                .await
        })
    });

    let mut uids: Vec<u64> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap().uid)
        .collect();
    uids.sort_unstable();

    assert_eq!(uids, (1..=8).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_gate_lookup_rules() {
    let service = service();
    let gate = AccessGate::new(service.clone());

    let admin = service
        .register(new_user("admin", "superSecret123").with_role(UserRole::Admin))
        .await
        .unwrap();
    let alice = service
        .register(new_user("alice", "longenough1"))
        .await
        .unwrap();

    // Regular user: self only, Forbidden before existence
    assert_eq!(
        gate.lookup(&alice, &LookupTarget::Uid(alice.uid)).await.unwrap(),
        alice
    );
    assert_eq!(
        gate.lookup(&alice, &LookupTarget::Uid(admin.uid)).await,
        Err(DomainError::Forbidden)
    );
    assert_eq!(
        gate.lookup(&alice, &LookupTarget::Username("ghost".into())).await,
        Err(DomainError::Forbidden)
    );

    // Admin: anyone, NotFound for missing
    assert_eq!(
        gate.lookup(&admin, &LookupTarget::Username("alice".into()))
            .await
            .unwrap(),
        alice
    );
    assert!(matches!(
        gate.lookup(&admin, &LookupTarget::Username("ghost".into())).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_gate_promotion_rules() {
    let service = service();
    let gate = AccessGate::new(service.clone());

    let admin = service
        .register(new_user("admin", "superSecret123").with_role(UserRole::Admin))
        .await
        .unwrap();
    let alice = service
        .register(new_user("alice", "longenough1"))
        .await
        .unwrap();

    // Regular caller is refused even for a valid or unknown target
    assert_eq!(gate.promote(&alice, alice.uid).await, Err(DomainError::Forbidden));
    assert_eq!(gate.promote(&alice, 999).await, Err(DomainError::Forbidden));

    assert!(matches!(
        gate.promote(&admin, 999).await,
        Err(DomainError::BadRequest(_))
    ));

    gate.promote(&admin, alice.uid).await.unwrap();
    let alice = service.get_by_id(alice.uid).await.unwrap().unwrap();
    assert!(alice.is_admin());
}
