//! Diesel row models for owner persistence.

use super::schema::owners;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for owner records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = owners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OwnerRow {
    /// Owner identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// Password digest.
    pub password_digest: String,
    /// Display name.
    pub full_name: String,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Role name.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert and update model for owner records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = owners)]
pub struct OwnerRecord {
    /// Owner identifier.
    pub id: uuid::Uuid,
    /// Email address.
    pub email: String,
    /// Password digest.
    pub password_digest: String,
    /// Display name.
    pub full_name: String,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Role name.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
