use crate::models::Indicator;
use crate::schema::indicators;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error;
use diesel::sqlite::SqliteConnection;

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = indicators)]
pub struct NewIndicator {
    pub id: String,
    pub item_id: String,
    pub date_first_seen: Option<String>,
    pub date_last_seen: Option<String>,
    pub deleted: bool,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub fn create(
    conn: &mut SqliteConnection,
    new_indicator: &NewIndicator,
) -> Result<Indicator, Error> {
    diesel::insert_into(indicators::table)
        .values(new_indicator)
        .execute(conn)?;

    indicators::table
        .find(&new_indicator.id)
        .select(Indicator::as_select())
        .first(conn)
}

pub fn find(conn: &mut SqliteConnection, id: &str) -> Result<Option<Indicator>, Error> {
    indicators::table
        .find(id)
        .select(Indicator::as_select())
        .first(conn)
        .optional()
}

pub fn find_by_item(
    conn: &mut SqliteConnection,
    item_id: &str,
) -> Result<Vec<Indicator>, Error> {
    indicators::table
        .filter(indicators::item_id.eq(item_id))
        .order(indicators::id)
        .select(Indicator::as_select())
        .load(conn)
}
