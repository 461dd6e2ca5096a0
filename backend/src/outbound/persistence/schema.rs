//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; `diesel
//! print-schema` against a migrated database regenerates them.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique login name (max 50 characters).
        username -> Varchar,
        /// PHC-encoded Argon2id digest of the password.
        password -> Varchar,
    }
}

diesel::table! {
    /// Notes owned by users; rows cascade away with their owner.
    notes (id) {
        /// Serial primary key.
        id -> Int4,
        /// Owning user.
        user_id -> Int4,
        /// Note body.
        text -> Text,
    }
}

diesel::joinable!(notes -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(notes, users);
