//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique; derived from the email local part at signup.
        #[max_length = 30]
        username -> Varchar,
        /// Unique sign-in address.
        email -> Text,
        password_hash -> Text,
        /// One of `Free`, `Premium`, `Ultra-Premium`.
        plan -> Text,
        first_name -> Text,
        last_name -> Text,
        phone -> Text,
        company -> Text,
        position -> Text,
        location -> Text,
        bio -> Text,
        preferences -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Design templates.
    templates (id) {
        id -> Uuid,
        /// Unique client key when present.
        template_key -> Nullable<Text>,
        name -> Text,
        description -> Nullable<Text>,
        template_type -> Text,
        category -> Text,
        thumbnail -> Text,
        thumbnail_filename -> Nullable<Text>,
        design_filename -> Nullable<Text>,
        file_url -> Nullable<Text>,
        width -> Int4,
        height -> Int4,
        canvas_size -> Text,
        background_color -> Text,
        background_image -> Nullable<Text>,
        /// Ordered canvas objects.
        objects -> Jsonb,
        is_real_estate -> Bool,
        created_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One brand kit per user.
    brand_kits (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 7]
        primary_color -> Varchar,
        #[max_length = 7]
        secondary_color -> Varchar,
        #[max_length = 7]
        accent_color -> Varchar,
        logo -> Nullable<Jsonb>,
        fonts -> Jsonb,
        custom_elements -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Short-lived editor backgrounds keyed by template reference and user.
    template_backgrounds (id) {
        id -> Uuid,
        /// Template id or client key.
        template_ref -> Text,
        user_id -> Uuid,
        image_data -> Text,
        image_type -> Text,
        file_name -> Text,
        created_at -> Timestamptz,
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(brand_kits -> users (user_id));
diesel::joinable!(template_backgrounds -> users (user_id));
diesel::joinable!(templates -> users (created_by));

diesel::allow_tables_to_appear_in_same_query!(brand_kits, template_backgrounds, templates, users,);
