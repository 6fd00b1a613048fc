use crate::schema::indicators;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = indicators)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Indicator {
    pub id: String,
    pub item_id: String,
    pub date_first_seen: Option<String>,
    pub date_last_seen: Option<String>,
    pub deleted: bool,
    pub description: Option<String>,
    pub domain: Option<String>,

    pub created_at: DateTime<Utc>,
}
