use crate::models::category::default_categories;
use crate::store::{QuestionStore, StoreResult};

/// Inserts the default trivia categories into a store that has none.
/// Existing categories are never touched.
pub async fn bootstrap(store: &dyn QuestionStore) -> StoreResult<usize> {
    let existing = store.list_categories().await?;
    if !existing.is_empty() {
        tracing::debug!(
            "{} categories already present, seed skipped",
            existing.len()
        );
        return Ok(0);
    }

    let mut inserted = 0;
    for category in default_categories() {
        let kind = category.kind.clone();
        if store.ensure_category(category).await? {
            tracing::info!("Seeded category {}", kind);
            inserted += 1;
        }
    }

    tracing::info!("Category seed complete: {} inserted", inserted);
    Ok(inserted)
}
