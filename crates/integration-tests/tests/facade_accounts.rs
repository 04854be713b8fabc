//! Account flows across the combined user/host email namespace.

mod common;

use std::sync::Arc;

use auth_adapters::ArgonCredentialHasher;
use common::{facade, facade_with_hasher, new_account, new_booking, new_place, unique_email};
use domains::error::DomainError;
use domains::models::{PricingPolicy, UserPatch};
use uuid::Uuid;

#[tokio::test]
async fn email_uniqueness_spans_users_and_hosts() {
    let facade = facade();
    let mut input = new_account("dup");
    input.email = "taken@example.com".into();
    facade.create_user(input.clone()).await.unwrap();

    // same email as a host, different case
    input.email = "TAKEN@example.com".into();
    let err = facade.create_host(input).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn host_email_blocks_later_user() {
    let facade = facade();
    let mut input = new_account("dup");
    input.email = "owner@example.com".into();
    facade.create_host(input.clone()).await.unwrap();

    let err = facade.create_user(input).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}

#[tokio::test]
async fn update_rejects_someone_elses_email_but_allows_own() {
    let facade = facade();
    let first = facade.create_user(new_account("a")).await.unwrap();
    let second = facade.create_user(new_account("b")).await.unwrap();

    let err = facade
        .update_user(
            second.id(),
            UserPatch {
                email: Some(first.email().to_string()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    // re-submitting its own email is a no-op, not a conflict
    let same = facade
        .update_user(
            second.id(),
            UserPatch {
                email: Some(second.email().to_string()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.email(), second.email());
}

#[tokio::test]
async fn update_goes_through_validating_setters() {
    let facade = facade();
    let user = facade.create_user(new_account("v")).await.unwrap();

    let err = facade
        .update_user(
            user.id(),
            UserPatch {
                email: Some("broken".into()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    // the stored record is untouched
    let stored = facade.get_user(user.id()).await.unwrap().unwrap();
    assert_eq!(stored.email(), user.email());
}

#[tokio::test]
async fn verify_credentials_round_trip() {
    let facade = facade();
    let mut input = new_account("login");
    input.password = "correct-horse-9".into();
    let user = facade.create_user(input.clone()).await.unwrap();

    let hit = facade
        .verify_credentials(&input.email, "correct-horse-9")
        .await
        .unwrap();
    assert_eq!(hit.unwrap().id(), user.id());

    assert!(facade
        .verify_credentials(&input.email, "wrong")
        .await
        .unwrap()
        .is_none());
    assert!(facade
        .verify_credentials(&unique_email("ghost"), "correct-horse-9")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn argon_adapter_round_trips_through_the_facade() {
    let facade = facade_with_hasher(
        Arc::new(ArgonCredentialHasher::new()),
        PricingPolicy::default(),
    );
    let mut input = new_account("argon");
    input.password = "correct-horse-9".into();
    let user = facade.create_user(input.clone()).await.unwrap();

    // the stored hash is opaque, salted, and verifiable
    assert_ne!(user.password_hash(), "correct-horse-9");
    let hit = facade
        .verify_credentials(&input.email, "correct-horse-9")
        .await
        .unwrap();
    assert_eq!(hit.unwrap().id(), user.id());
    assert!(facade
        .verify_credentials(&input.email, "almost-right")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn find_account_resolves_hosts_too() {
    let facade = facade();
    let host = facade.create_host(new_account("findme")).await.unwrap();

    let account = facade
        .find_account_by_email(&host.profile().email().to_uppercase())
        .await
        .unwrap()
        .expect("host resolves case-insensitively");
    assert_eq!(account.id(), host.id());
}

#[tokio::test]
async fn first_account_probe_flips_after_any_signup() {
    let facade = facade();
    assert!(facade.is_first_account().await.unwrap());
    facade.create_host(new_account("h")).await.unwrap();
    assert!(!facade.is_first_account().await.unwrap());
}

#[tokio::test]
async fn short_password_is_rejected_on_create_and_update() {
    let facade = facade();
    let mut input = new_account("pw");
    input.password = "short".into();
    assert!(matches!(
        facade.create_user(input).await.unwrap_err(),
        DomainError::Validation(_)
    ));

    let user = facade.create_user(new_account("pw")).await.unwrap();
    let err = facade
        .update_user(
            user.id(),
            UserPatch {
                password: Some("tiny".into()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn deleting_a_user_freezes_their_bookings() {
    let facade = facade();
    let host = facade.create_host(new_account("host")).await.unwrap();
    let guest = facade.create_user(new_account("guest")).await.unwrap();
    let place = facade
        .create_place(new_place(host.id(), "Loft", 4, 90.0))
        .await
        .unwrap();
    let booking = facade
        .create_booking(new_booking(guest.id(), place.id(), 2, 10, 2))
        .await
        .unwrap();

    facade.delete_user(guest.id()).await.unwrap();
    assert!(facade.get_user(guest.id()).await.unwrap().is_none());

    // the booking survives with its frozen actor id
    let frozen = facade.get_booking(booking.id()).await.unwrap().unwrap();
    assert_eq!(frozen.user_id(), guest.id());
}

#[tokio::test]
async fn mutations_on_missing_ids_are_not_found() {
    let facade = facade();
    let ghost = Uuid::new_v4();

    assert!(matches!(
        facade.update_user(ghost, UserPatch::default()).await,
        Err(DomainError::NotFound(_, _))
    ));
    assert!(matches!(
        facade.delete_host(ghost).await,
        Err(DomainError::NotFound(_, _))
    ));
    // reads report absence as a value, not an error
    assert!(facade.get_user(ghost).await.unwrap().is_none());
}
