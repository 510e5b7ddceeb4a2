//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users with display-name parts and credential hash.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Given name.
        #[max_length = 255]
        given_name -> Varchar,
        /// Family name.
        #[max_length = 255]
        family_name -> Varchar,
        /// Optional middle name.
        #[max_length = 255]
        middle_name -> Nullable<Varchar>,
        /// Unique login.
        #[max_length = 255]
        login -> Varchar,
        /// Organisational role identifier.
        role_id -> Int4,
        /// Opaque credential hash.
        #[max_length = 255]
        credential -> Varchar,
    }
}
