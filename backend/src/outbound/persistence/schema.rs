//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `username` carries a unique constraint.
    users (id) {
        id -> Int8,
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per recorded transformation, removed with its owner.
    history (id) {
        id -> Int8,
        user_id -> Int8,
        original_text -> Text,
        result_text -> Text,
        /// Lower-case transform name, e.g. `slug`.
        kind -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(history -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, history);
