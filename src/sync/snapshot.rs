//! Tolerant conversion of a raw JSON payload into a [`Snapshot`].
//!
//! Parsing never fails. Every field is read independently: a key that is
//! missing, `null` or of the wrong type is kept as `None`, so that
//! reconciliation leaves the stored value alone. The accessors on
//! [`SnapshotItem`] and [`SnapshotIndicator`] substitute the declared
//! defaults for those fields.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Snapshot {
    pub count: i64,
    pub seq_update: Option<i64>,
    pub items: Vec<SnapshotItem>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SnapshotItem {
    pub id: Option<String>,
    pub author: Option<String>,
    pub company_ids: Option<Vec<String>>,
    pub indicator_ids: Option<Vec<String>>,
    pub is_published: Option<bool>,
    pub is_tailored: Option<bool>,
    pub labels: Option<Vec<String>>,
    pub langs: Option<Vec<String>>,
    pub malware_list: Option<Vec<String>>,
    pub seq_update: Option<i64>,
    pub indicators: Vec<SnapshotIndicator>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SnapshotIndicator {
    pub id: Option<String>,
    pub date_first_seen: Option<String>,
    pub date_last_seen: Option<String>,
    pub deleted: Option<bool>,
    pub description: Option<String>,
    pub domain: Option<String>,
}

impl Snapshot {
    pub fn parse(payload: &Value) -> Self {
        let object = match payload.as_object() {
            Some(object) => object,
            None => return Self::default(),
        };

        let count = object.get("count").and_then(Value::as_i64).unwrap_or(0);
        let seq_update = object.get("seqUpdate").and_then(Value::as_i64);
        let items = objects(object.get("items"))
            .map(SnapshotItem::parse)
            .collect();

        Snapshot {
            count,
            seq_update,
            items,
        }
    }
}

impl SnapshotItem {
    fn parse(object: &Map<String, Value>) -> Self {
        SnapshotItem {
            id: identity(object),
            author: string(object, "author"),
            company_ids: field(object, "companyId", string_set),
            indicator_ids: field(object, "indicatorsIds", string_set),
            is_published: field(object, "isPublished", Value::as_bool),
            is_tailored: field(object, "isTailored", Value::as_bool),
            labels: field(object, "labels", string_set),
            langs: field(object, "langs", string_set),
            malware_list: field(object, "malwareList", string_set),
            seq_update: field(object, "seqUpdate", Value::as_i64),
            indicators: objects(object.get("indicators"))
                .map(SnapshotIndicator::parse)
                .collect(),
        }
    }

    pub fn company_ids(&self) -> &[String] {
        self.company_ids.as_deref().unwrap_or_default()
    }

    pub fn indicator_ids(&self) -> &[String] {
        self.indicator_ids.as_deref().unwrap_or_default()
    }

    pub fn is_published(&self) -> bool {
        self.is_published.unwrap_or(false)
    }

    pub fn is_tailored(&self) -> bool {
        self.is_tailored.unwrap_or(false)
    }

    pub fn labels(&self) -> &[String] {
        self.labels.as_deref().unwrap_or_default()
    }

    pub fn langs(&self) -> &[String] {
        self.langs.as_deref().unwrap_or_default()
    }

    pub fn malware_list(&self) -> &[String] {
        self.malware_list.as_deref().unwrap_or_default()
    }

    pub fn seq_update(&self) -> i64 {
        self.seq_update.unwrap_or(0)
    }
}

impl SnapshotIndicator {
    fn parse(object: &Map<String, Value>) -> Self {
        SnapshotIndicator {
            id: identity(object),
            date_first_seen: string(object, "dateFirstSeen"),
            date_last_seen: string(object, "dateLastSeen"),
            deleted: field(object, "deleted", Value::as_bool),
            description: string(object, "description"),
            domain: string(object, "domain"),
        }
    }

    pub fn deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }
}

fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn identity(object: &Map<String, Value>) -> Option<String> {
    string(object, "id").filter(|id| !id.is_empty())
}

fn string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn field<T, F>(object: &Map<String, Value>, key: &str, extract: F) -> Option<T>
where
    F: Fn(&Value) -> Option<T>,
{
    object.get(key).and_then(extract)
}

fn string_set(value: &Value) -> Option<Vec<String>> {
    let values = value.as_array()?;
    let mut set: Vec<String> = Vec::with_capacity(values.len());

    for value in values.iter().filter_map(Value::as_str) {
        if !set.iter().any(|existing| existing == value) {
            set.push(value.to_string());
        }
    }

    Some(set)
}
