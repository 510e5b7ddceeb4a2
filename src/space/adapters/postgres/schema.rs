//! Diesel schema for space and membership persistence.

diesel::table! {
    /// Spaces: named tenant boundaries.
    spaces (id) {
        /// Space identifier.
        id -> Uuid,
        /// Space name.
        #[max_length = 255]
        name -> Varchar,
        /// Creator user identifier.
        creator_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Memberships: (space, user, role) with composite identity.
    space_memberships (space_id, user_id) {
        /// Space the membership belongs to.
        space_id -> Uuid,
        /// Member user identifier.
        user_id -> Uuid,
        /// Role held within the space.
        #[max_length = 50]
        role -> Varchar,
    }
}

diesel::joinable!(space_memberships -> spaces (space_id));
diesel::allow_tables_to_appear_in_same_query!(spaces, space_memberships);
