use crate::db;
use crate::db::indicators::NewIndicator;
use crate::db::items::{ItemChangeset, NewItem};
use crate::models::{Indicator, Item, StringList};
use crate::sync::snapshot::{Snapshot, SnapshotIndicator, SnapshotItem};
use crate::sync::SyncError;
use diesel::QueryResult;
use log::debug;

/// Storage operations needed to apply a snapshot.
pub trait EntityStore {
    fn find_item(&mut self, id: &str) -> QueryResult<Option<Item>>;

    fn insert_item(&mut self, item: &NewItem) -> QueryResult<()>;

    fn update_item(&mut self, id: &str, changes: &ItemChangeset) -> QueryResult<()>;

    fn find_indicator(&mut self, id: &str) -> QueryResult<Option<Indicator>>;

    fn insert_indicator(&mut self, indicator: &NewIndicator) -> QueryResult<()>;

    /// Runs `f` as one unit: its changes are committed when it returns `Ok`
    /// and discarded when it returns `Err`.
    fn atomically<T, F>(&mut self, f: F) -> Result<T, SyncError>
    where
        F: FnOnce(&mut Self) -> Result<T, SyncError>;
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ReconcileStats {
    pub items_created: usize,
    pub items_updated: usize,
    pub indicators_created: usize,
    pub indicators_unchanged: usize,
}

/// Applies the snapshot to the store in a single transaction.
///
/// Items are upserted: unknown ids are inserted with defaults for absent
/// fields, known ids only get the fields present in the snapshot. A key that
/// is missing or `null` never resets a stored value. Indicators
/// are insert-only, an indicator id that is already stored is never
/// rewritten.
pub fn reconcile<S: EntityStore>(
    snapshot: &Snapshot,
    store: &mut S,
) -> Result<ReconcileStats, SyncError> {
    store.atomically(|store| {
        let mut stats = ReconcileStats::default();

        for (position, item) in snapshot.items.iter().enumerate() {
            let item_id = item.id.as_deref().ok_or_else(|| SyncError::Validation {
                msg: format!("item at position {position} has no id"),
            })?;

            upsert_item(store, item_id, item, &mut stats)?;

            for (indicator_position, indicator) in item.indicators.iter().enumerate() {
                let indicator_id = indicator.id.as_deref().ok_or_else(|| SyncError::Validation {
                    msg: format!(
                        "indicator at position {indicator_position} of item {item_id} has no id"
                    ),
                })?;

                insert_indicator(store, item_id, indicator_id, indicator, &mut stats)?;
            }
        }

        Ok(stats)
    })
}

fn upsert_item<S: EntityStore>(
    store: &mut S,
    item_id: &str,
    item: &SnapshotItem,
    stats: &mut ReconcileStats,
) -> Result<(), SyncError> {
    match store.find_item(item_id)? {
        None => {
            debug!("Creating item {}", item_id);

            store.insert_item(&new_item(item_id, item))?;
            stats.items_created += 1;
        }
        Some(_) => {
            debug!("Updating item {}", item_id);

            store.update_item(item_id, &item_changeset(item))?;
            stats.items_updated += 1;
        }
    }

    Ok(())
}

fn insert_indicator<S: EntityStore>(
    store: &mut S,
    item_id: &str,
    indicator_id: &str,
    indicator: &SnapshotIndicator,
    stats: &mut ReconcileStats,
) -> Result<(), SyncError> {
    if store.find_indicator(indicator_id)?.is_some() {
        debug!("Indicator {} already exists, skipping", indicator_id);

        stats.indicators_unchanged += 1;
        return Ok(());
    }

    debug!("Creating indicator {} for item {}", indicator_id, item_id);

    store.insert_indicator(&new_indicator(item_id, indicator_id, indicator))?;
    stats.indicators_created += 1;

    Ok(())
}

fn new_item(item_id: &str, item: &SnapshotItem) -> NewItem {
    let now = db::current_time();

    NewItem {
        id: item_id.to_string(),
        author: item.author.clone(),
        company_ids: StringList::from(item.company_ids().to_vec()),
        indicator_ids: StringList::from(item.indicator_ids().to_vec()),
        is_published: item.is_published(),
        is_tailored: item.is_tailored(),
        labels: StringList::from(item.labels().to_vec()),
        langs: StringList::from(item.langs().to_vec()),
        malware_list: StringList::from(item.malware_list().to_vec()),
        seq_update: item.seq_update(),
        created_at: now,
        updated_at: now,
    }
}

fn item_changeset(item: &SnapshotItem) -> ItemChangeset {
    ItemChangeset {
        author: item.author.clone(),
        company_ids: string_list(&item.company_ids),
        indicator_ids: string_list(&item.indicator_ids),
        is_published: item.is_published,
        is_tailored: item.is_tailored,
        labels: string_list(&item.labels),
        langs: string_list(&item.langs),
        malware_list: string_list(&item.malware_list),
        seq_update: item.seq_update,
        updated_at: db::current_time(),
    }
}

fn new_indicator(item_id: &str, indicator_id: &str, indicator: &SnapshotIndicator) -> NewIndicator {
    NewIndicator {
        id: indicator_id.to_string(),
        item_id: item_id.to_string(),
        date_first_seen: indicator.date_first_seen.clone(),
        date_last_seen: indicator.date_last_seen.clone(),
        deleted: indicator.deleted(),
        description: indicator.description.clone(),
        domain: indicator.domain.clone(),
        created_at: db::current_time(),
    }
}

fn string_list(values: &Option<Vec<String>>) -> Option<StringList> {
    values.clone().map(StringList::from)
}
