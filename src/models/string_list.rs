use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;

/// Set-valued column stored as a JSON array in a TEXT column.
#[derive(AsExpression, FromSqlRow, Debug, Clone, Default, Eq, PartialEq)]
#[diesel(sql_type = Text)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<&[&str]> for StringList {
    fn from(values: &[&str]) -> Self {
        Self(values.iter().map(|value| value.to_string()).collect())
    }
}

impl ToSql<Text, Sqlite> for StringList {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(&self.0)?);

        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for StringList {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;

        Ok(Self(serde_json::from_str(&text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::StringList;
    use crate::db;
    use diesel::dsl::sql;
    use diesel::sql_types::Text;
    use diesel::RunQueryDsl;

    #[test]
    fn it_reads_json_arrays_from_text_columns() {
        let mut connection = db::establish_test_connection();

        let list = diesel::select(sql::<Text>("'[\"en\",\"ru\"]'"))
            .get_result::<StringList>(&mut connection)
            .unwrap();

        assert_eq!(StringList::from(&["en", "ru"][..]), list);
    }

    #[test]
    fn it_fails_on_text_that_is_not_a_json_array() {
        let mut connection = db::establish_test_connection();

        let result = diesel::select(sql::<Text>("'en,ru'")).get_result::<StringList>(&mut connection);

        assert!(result.is_err());
    }
}
