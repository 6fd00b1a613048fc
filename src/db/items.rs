use crate::models::{Item, StringList};
use crate::schema::{indicators, items};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error;
use diesel::sqlite::SqliteConnection;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = items)]
pub struct NewItem {
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

/// Partial update of an item. `None` fields are left out of the UPDATE
/// statement, so the stored values survive.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = items)]
pub struct ItemChangeset {
    pub author: Option<String>,
    pub company_ids: Option<StringList>,
    pub indicator_ids: Option<StringList>,
    pub is_published: Option<bool>,
    pub is_tailored: Option<bool>,
    pub labels: Option<StringList>,
    pub langs: Option<StringList>,
    pub malware_list: Option<StringList>,
    pub seq_update: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

pub fn create(conn: &mut SqliteConnection, new_item: &NewItem) -> Result<Item, Error> {
    diesel::insert_into(items::table)
        .values(new_item)
        .execute(conn)?;

    items::table
        .find(&new_item.id)
        .select(Item::as_select())
        .first(conn)
}

pub fn update(
    conn: &mut SqliteConnection,
    id: &str,
    changes: &ItemChangeset,
) -> Result<usize, Error> {
    diesel::update(items::table.find(id))
        .set(changes)
        .execute(conn)
}

pub fn find(conn: &mut SqliteConnection, id: &str) -> Result<Option<Item>, Error> {
    items::table
        .find(id)
        .select(Item::as_select())
        .first(conn)
        .optional()
}

pub fn count(conn: &mut SqliteConnection) -> Result<i64, Error> {
    items::table.count().get_result(conn)
}

/// Deletes the item together with every indicator it owns.
pub fn remove(conn: &mut SqliteConnection, id: &str) -> Result<usize, Error> {
    conn.transaction(|conn| {
        diesel::delete(indicators::table.filter(indicators::item_id.eq(id))).execute(conn)?;

        diesel::delete(items::table.find(id)).execute(conn)
    })
}
