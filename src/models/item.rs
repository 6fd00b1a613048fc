use crate::models::StringList;
use crate::schema::items;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Item {
    pub id: String,
    pub author: Option<String>,
    pub company_ids: StringList,
    pub indicator_ids: StringList,
    pub is_published: bool,
    pub is_tailored: bool,
    pub labels: StringList,
    pub langs: StringList,
    pub malware_list: StringList,
    pub seq_update: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
