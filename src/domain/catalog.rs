//! Catalog of developers and available items
//!
//! Developers are fixed once the catalog is built. Items move between the
//! available list and the board; the catalog remembers the full item set so
//! the board can be reset.

use thiserror::Error;

use super::developer::Developer;
use super::id::{DeveloperId, ItemId};
use super::item::Item;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Item already in the catalog: {0}")]
    DuplicateItem(ItemId),

    #[error("Developer already in the catalog: {0}")]
    DuplicateDeveloper(DeveloperId),
}

/// Developers plus the ordered list of unallocated items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    developers: Vec<Developer>,
    items: Vec<Item>,
    available: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog where every item starts out available
    pub fn new(developers: Vec<Developer>, items: Vec<Item>) -> Result<Self, CatalogError> {
        for (i, dev) in developers.iter().enumerate() {
            if developers[..i].iter().any(|d| d.id == dev.id) {
                return Err(CatalogError::DuplicateDeveloper(dev.id.clone()));
            }
        }
        for (i, item) in items.iter().enumerate() {
            if items[..i].iter().any(|it| it.id == item.id) {
                return Err(CatalogError::DuplicateItem(item.id.clone()));
            }
        }

        Ok(Self {
            available: items.clone(),
            developers,
            items,
        })
    }

    pub fn developers(&self) -> &[Developer] {
        &self.developers
    }

    pub fn developer(&self, id: &DeveloperId) -> Option<&Developer> {
        self.developers.iter().find(|d| &d.id == id)
    }

    pub fn has_developer(&self, id: &DeveloperId) -> bool {
        self.developer(id).is_some()
    }

    /// Every item the catalog was built with, allocated or not
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Unallocated items in insertion order
    pub fn available(&self) -> &[Item] {
        &self.available
    }

    pub fn is_available(&self, id: &ItemId) -> bool {
        self.available.iter().any(|i| &i.id == id)
    }

    /// Removes an item from the available list; absent IDs are ignored
    pub fn remove_available(&mut self, id: &ItemId) -> Option<Item> {
        let pos = self.available.iter().position(|i| &i.id == id)?;
        Some(self.available.remove(pos))
    }

    /// Appends an item to the available list
    pub fn add_available(&mut self, item: Item) -> Result<(), CatalogError> {
        if self.is_available(&item.id) {
            return Err(CatalogError::DuplicateItem(item.id));
        }
        self.available.push(item);
        Ok(())
    }

    /// Makes every catalog item available again, in catalog order
    pub fn restore(&mut self) {
        self.available = self.items.clone();
    }

    /// Reorders the available list to follow `order`
    ///
    /// IDs that are not currently available are skipped. Available items
    /// missing from `order` keep their relative order after the listed ones.
    pub fn reorder_available(&mut self, order: &[ItemId]) {
        let mut rest = std::mem::take(&mut self.available);
        let mut sorted = Vec::with_capacity(rest.len());

        for id in order {
            if let Some(pos) = rest.iter().position(|i| &i.id == id) {
                sorted.push(rest.remove(pos));
            }
        }
        sorted.append(&mut rest);
        self.available = sorted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn item(id: &str, weeks: u32) -> Item {
        Item::new(id.parse().unwrap(), id, NonZeroU32::new(weeks).unwrap())
    }

    fn dev(id: &str) -> Developer {
        Developer::new(id.parse().unwrap(), id)
    }

    #[test]
    fn all_items_start_available() {
        let catalog = Catalog::new(vec![dev("dev-1")], vec![item("a", 1), item("b", 2)]).unwrap();

        let ids: Vec<_> = catalog.available().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(catalog.has_developer(&"dev-1".parse().unwrap()));
        assert!(!catalog.has_developer(&"dev-2".parse().unwrap()));
    }

    #[test]
    fn duplicates_are_rejected() {
        let result = Catalog::new(vec![], vec![item("a", 1), item("a", 2)]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateItem("a".parse().unwrap()));

        let result = Catalog::new(vec![dev("dev-1"), dev("dev-1")], vec![]);
        assert!(matches!(result, Err(CatalogError::DuplicateDeveloper(_))));
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut catalog = Catalog::new(vec![], vec![item("a", 1)]).unwrap();

        assert!(catalog.remove_available(&"zzz".parse().unwrap()).is_none());
        assert_eq!(catalog.available().len(), 1);
    }

    #[test]
    fn add_back_appends_in_order() {
        let mut catalog = Catalog::new(vec![], vec![item("a", 1), item("b", 1), item("c", 1)]).unwrap();

        let a = catalog.remove_available(&"a".parse().unwrap()).unwrap();
        catalog.add_available(a).unwrap();

        let ids: Vec<_> = catalog.available().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn add_duplicate_is_rejected() {
        let mut catalog = Catalog::new(vec![], vec![item("a", 1)]).unwrap();

        let result = catalog.add_available(item("a", 1));
        assert_eq!(result, Err(CatalogError::DuplicateItem("a".parse().unwrap())));
        assert_eq!(catalog.available().len(), 1);
    }

    #[test]
    fn restore_brings_back_everything() {
        let mut catalog = Catalog::new(vec![], vec![item("a", 1), item("b", 1)]).unwrap();
        catalog.remove_available(&"a".parse().unwrap());
        catalog.remove_available(&"b".parse().unwrap());
        assert!(catalog.available().is_empty());

        catalog.restore();
        assert_eq!(catalog.available(), catalog.items());
    }

    #[test]
    fn reorder_follows_saved_order() {
        let mut catalog =
            Catalog::new(vec![], vec![item("a", 1), item("b", 1), item("c", 1), item("d", 1)]).unwrap();
        catalog.remove_available(&"b".parse().unwrap());

        let order: Vec<ItemId> = ["c", "b", "zzz", "a", "c"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        catalog.reorder_available(&order);

        let ids: Vec<_> = catalog.available().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "d"]);
    }
}
