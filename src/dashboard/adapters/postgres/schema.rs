//! Diesel schema for dashboard persistence.

diesel::table! {
    /// Dashboards: lightweight named task groupings.
    dashboards (id) {
        /// Dashboard identifier.
        id -> Uuid,
        /// Dashboard name (not unique).
        #[max_length = 255]
        name -> Varchar,
    }
}
