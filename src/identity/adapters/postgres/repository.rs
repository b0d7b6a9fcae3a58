//! `PostgreSQL` repository implementation for owner accounts.

use super::{
    models::{OwnerRecord, OwnerRow},
    schema::owners,
};
use crate::identity::{
    domain::{EmailAddress, Owner, OwnerId, PasswordDigest, PersistedOwnerData, Role},
    ports::{OwnerRepository, OwnerRepositoryError, OwnerRepositoryResult},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed owner repository.
#[derive(Debug, Clone)]
pub struct PostgresOwnerRepository {
    pool: PgPool,
}

impl PostgresOwnerRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OwnerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OwnerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, OwnerRepositoryError::persistence)?;
                f(&mut connection)
            },
            OwnerRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl OwnerRepository for PostgresOwnerRepository {
    async fn store(&self, owner: &Owner) -> OwnerRepositoryResult<()> {
        let record = to_record(owner);
        let email = owner.email().clone();
        self.run_blocking(move |connection| {
            diesel::insert_into(owners::table)
                .values(&record)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, owner: &Owner) -> OwnerRepositoryResult<()> {
        let record = to_record(owner);
        let owner_id = owner.id();
        let email = owner.email().clone();
        self.run_blocking(move |connection| {
            let affected = diesel::update(owners::table.filter(owners::id.eq(record.id)))
                .set(&record)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, &email))?;
            if affected == 0 {
                return Err(OwnerRepositoryError::NotFound(owner_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: OwnerId) -> OwnerRepositoryResult<Option<Owner>> {
        self.run_blocking(move |connection| {
            owners::table
                .filter(owners::id.eq(id.into_inner()))
                .select(OwnerRow::as_select())
                .first::<OwnerRow>(connection)
                .optional()
                .map_err(OwnerRepositoryError::persistence)?
                .map(row_to_owner)
                .transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> OwnerRepositoryResult<Option<Owner>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            owners::table
                .filter(owners::email.eq(lookup))
                .select(OwnerRow::as_select())
                .first::<OwnerRow>(connection)
                .optional()
                .map_err(OwnerRepositoryError::persistence)?
                .map(row_to_owner)
                .transpose()
        })
        .await
    }

    async fn list_all(&self) -> OwnerRepositoryResult<Vec<Owner>> {
        self.run_blocking(move |connection| {
            owners::table
                .order((owners::created_at.asc(), owners::id.asc()))
                .select(OwnerRow::as_select())
                .load::<OwnerRow>(connection)
                .map_err(OwnerRepositoryError::persistence)?
                .into_iter()
                .map(row_to_owner)
                .collect()
        })
        .await
    }
}

fn to_record(owner: &Owner) -> OwnerRecord {
    OwnerRecord {
        id: owner.id().into_inner(),
        email: owner.email().as_str().to_owned(),
        password_digest: owner.password_digest().as_str().to_owned(),
        full_name: owner.full_name().to_owned(),
        is_active: owner.is_active(),
        role: owner.role().as_str().to_owned(),
        created_at: owner.created_at(),
    }
}

fn row_to_owner(row: OwnerRow) -> OwnerRepositoryResult<Owner> {
    let email = EmailAddress::new(row.email).map_err(OwnerRepositoryError::persistence)?;
    let role = Role::try_from(row.role.as_str()).map_err(OwnerRepositoryError::persistence)?;
    Ok(Owner::from_persisted(PersistedOwnerData {
        id: OwnerId::from_uuid(row.id),
        email,
        password_digest: PasswordDigest::new(row.password_digest),
        full_name: row.full_name,
        is_active: row.is_active,
        role,
        created_at: row.created_at,
    }))
}

fn map_unique_violation(err: DieselError, email: &EmailAddress) -> OwnerRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_email_unique_violation(info.as_ref()) =>
        {
            OwnerRepositoryError::DuplicateEmail(email.clone())
        }
        _ => OwnerRepositoryError::persistence(err),
    }
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_owners_email_unique")
}
