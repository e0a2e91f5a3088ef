//! Diesel schema for task persistence.

diesel::table! {
    /// Task records keyed by internal identifier, with a unique human code.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Human-readable team-prefixed code, unique across the board.
        #[max_length = 32]
        code -> Varchar,
        /// Team code the task is assigned to.
        #[max_length = 16]
        team -> Varchar,
        /// Optional use-case assignment.
        case_id -> Nullable<Uuid>,
        /// Task name.
        #[max_length = 100]
        name -> Varchar,
        /// Task description.
        description -> Text,
        /// Dependency codes as a JSON array of strings.
        dependencies -> Jsonb,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Optimistic-concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
