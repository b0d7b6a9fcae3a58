//! Diesel schema for owner persistence.

diesel::table! {
    /// Registered owner accounts.
    owners (id) {
        /// Owner identifier.
        id -> Uuid,
        /// Normalized, unique email address.
        #[max_length = 320]
        email -> Varchar,
        /// Credential-service password digest.
        #[max_length = 255]
        password_digest -> Varchar,
        /// Display name.
        #[max_length = 255]
        full_name -> Varchar,
        /// Soft-delete flag.
        is_active -> Bool,
        /// Role name.
        #[max_length = 20]
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
