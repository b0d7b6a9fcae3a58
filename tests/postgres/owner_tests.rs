//! Owner repository tests against `PostgreSQL`.

use crate::postgres::helpers::{PostgresContext, postgres_context, registered};
use rstest::rstest;
use taskmaster::identity::{
    domain::EmailAddress,
    ports::{OwnerRepository, OwnerRepositoryError},
};

#[rstest]
fn owners_are_found_by_email(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let owner = ctx.owner("alice@example.com");
    let email = EmailAddress::new("alice@example.com").expect("valid email");

    let found = ctx
        .rt
        .block_on(ctx.owners.find_by_email(&email))
        .expect("lookup")
        .expect("owner stored");

    assert_eq!(found.id(), owner.id());
    assert_eq!(found.full_name(), owner.full_name());
    assert!(found.is_active());
}

#[rstest]
fn duplicate_email_is_rejected(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    let first = ctx.owner("alice@example.com");
    let second = registered("alice@example.com");

    let result = ctx.rt.block_on(ctx.owners.store(&second));

    assert!(matches!(
        result,
        Err(OwnerRepositoryError::DuplicateEmail(ref email)) if email.as_str() == "alice@example.com"
    ));
    let owners = ctx
        .rt
        .block_on(ctx.owners.list_all())
        .expect("listing");
    assert_eq!(
        owners.iter().map(|owner| owner.id()).collect::<Vec<_>>(),
        vec![first.id()]
    );
}

#[rstest]
fn changing_to_a_taken_email_is_rejected(postgres_context: Option<PostgresContext>) {
    let Some(ctx) = postgres_context else { return };
    ctx.owner("alice@example.com");
    let mut bob = ctx.owner("bob@example.com");
    bob.change_email(EmailAddress::new("alice@example.com").expect("valid email"));

    let result = ctx.rt.block_on(ctx.owners.update(&bob));

    assert!(matches!(
        result,
        Err(OwnerRepositoryError::DuplicateEmail(_))
    ));
}
