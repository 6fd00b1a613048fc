diesel::table! {
    indicators (id) {
        id -> Text,
        item_id -> Text,
        date_first_seen -> Nullable<Text>,
        date_last_seen -> Nullable<Text>,
        deleted -> Bool,
        description -> Nullable<Text>,
        domain -> Nullable<Text>,
        created_at -> TimestamptzSqlite,
    }
}

diesel::table! {
    items (id) {
        id -> Text,
        author -> Nullable<Text>,
        company_ids -> Text,
        indicator_ids -> Text,
        is_published -> Bool,
        is_tailored -> Bool,
        labels -> Text,
        langs -> Text,
        malware_list -> Text,
        seq_update -> BigInt,
        created_at -> TimestamptzSqlite,
        updated_at -> TimestamptzSqlite,
    }
}

diesel::joinable!(indicators -> items (item_id));

diesel::allow_tables_to_appear_in_same_query!(indicators, items);
