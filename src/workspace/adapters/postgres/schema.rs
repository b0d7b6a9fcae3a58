//! Diesel schema for workspace persistence.

diesel::table! {
    /// Boards, each owned by one account.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Owning account.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered lanes within a board.
    lanes (id) {
        /// Lane identifier.
        id -> Uuid,
        /// Lane title.
        #[max_length = 255]
        title -> Varchar,
        /// Position among the board's lanes.
        position -> Int4,
        /// Parent board.
        board_id -> Uuid,
    }
}

diesel::table! {
    /// Tasks placed in lanes.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Priority; higher is more urgent.
        priority -> Int4,
        /// Position among the lane's tasks.
        position -> Int4,
        /// Containing lane.
        lane_id -> Nullable<Uuid>,
        /// Creating owner.
        owner_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(lanes -> boards (board_id));
diesel::joinable!(tasks -> lanes (lane_id));
diesel::allow_tables_to_appear_in_same_query!(boards, lanes, tasks);
