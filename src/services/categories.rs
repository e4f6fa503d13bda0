use crate::db::Store;
use crate::domain::category_key;
use crate::models::Category;
use std::collections::HashSet;
use tracing::debug;

/// Find-or-create for genre categories, keyed on the case-folded name.
#[derive(Clone)]
pub struct CategoryResolver {
    store: Store,
}

impl CategoryResolver {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns the stored category matching `name` case-insensitively,
    /// creating it with this casing when none exists. Blank names yield
    /// `None`.
    pub async fn resolve(&self, name: &str) -> anyhow::Result<Option<Category>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        if let Some(existing) = self.store.find_category_by_name(name).await? {
            return Ok(Some(existing));
        }

        debug!(category = %name, "Category not seen before, creating");
        Ok(Some(self.store.save_category(name).await?))
    }

    /// Resolves a record's genre list, dropping repeats that differ only by
    /// case. Order follows the first occurrence of each name.
    pub async fn resolve_all(&self, names: &[String]) -> anyhow::Result<Vec<Category>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for name in names {
            if !seen.insert(category_key(name.trim())) {
                continue;
            }
            if let Some(category) = self.resolve(name).await? {
                resolved.push(category);
            }
        }

        Ok(resolved)
    }
}
