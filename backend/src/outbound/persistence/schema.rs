//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Provisioned hostels. Seeded by migration, never written at runtime.
    hostels (id) {
        id -> Uuid,
        name -> Varchar,
        slug -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Lower-cased login email, unique.
        email -> Varchar,
        /// PHC-formatted Argon2 hash.
        password_hash -> Text,
        display_name -> Varchar,
        /// `Student` or `Warden`.
        role -> Varchar,
        hostel_id -> Uuid,
        floor_number -> Nullable<Int4>,
        room_number -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Complaints. `votes` always equals `cardinality(voted_by)`.
    complaints (id) {
        id -> Uuid,
        /// Author.
        user_id -> Uuid,
        hostel_id -> Uuid,
        title -> Text,
        room -> Varchar,
        category -> Varchar,
        description -> Text,
        image_url -> Nullable<Text>,
        status -> Varchar,
        votes -> Int4,
        voted_by -> Array<Uuid>,
        scheduled_for -> Nullable<Timestamptz>,
        warden_comments -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Scheduled maintenance visits per hostel.
    maintenance_checks (id) {
        id -> Uuid,
        hostel_id -> Uuid,
        title -> Text,
        status -> Varchar,
        scheduled_for -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(users -> hostels (hostel_id));
diesel::joinable!(complaints -> hostels (hostel_id));
diesel::joinable!(maintenance_checks -> hostels (hostel_id));

diesel::allow_tables_to_appear_in_same_query!(complaints, hostels, maintenance_checks, users);
