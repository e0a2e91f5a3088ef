//! Diesel schema for use-case persistence.

diesel::table! {
    /// Use-case records.
    cases (id) {
        /// Use-case identifier.
        id -> Uuid,
        /// Use-case name.
        #[max_length = 100]
        name -> Varchar,
        /// Use-case description.
        description -> Text,
        /// Optimistic-concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
