//! Diesel schema for task persistence.

diesel::table! {
    /// Tasks: lifecycle state, references, and the blocking set.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-text description.
        description -> Nullable<Text>,
        /// Free-text deadline.
        #[max_length = 255]
        deadline -> Nullable<Varchar>,
        /// Owning space, if any.
        space_id -> Nullable<Uuid>,
        /// Dashboard grouping, if any.
        dashboard_id -> Nullable<Uuid>,
        /// Reporter user identifier.
        reporter_id -> Uuid,
        /// Assigned user identifier, if any.
        assigner_id -> Nullable<Uuid>,
        /// Reviewer user identifier, if any.
        reviewer_id -> Nullable<Uuid>,
        /// Approver user identifier.
        approver_id -> Uuid,
        /// Lifecycle status storage string.
        #[max_length = 50]
        status -> Varchar,
        /// Approval state storage string.
        #[max_length = 50]
        approval -> Varchar,
        /// Identifiers of tasks blocking completion.
        blocked_by -> Array<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest mutation timestamp.
        updated_at -> Timestamptz,
        /// Work-start timestamp, if any.
        started_at -> Nullable<Timestamptz>,
        /// Completion timestamp, if any.
        done_at -> Nullable<Timestamptz>,
    }
}
