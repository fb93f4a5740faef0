// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered item collection with pin and selection sub-state.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::item::{Item, ItemId, Locator};

/// Result of [`ItemCollection::add`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended.
    Added,
    /// An item with the same locator already exists; nothing changed.
    Duplicate,
}

/// Summary of an [`ItemCollection::absorb`] merge.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Items appended because their locator was not present yet.
    pub appended: usize,
    /// Existing items whose pin flag was promoted by a pinned duplicate.
    pub promoted: usize,
    /// Duplicates that changed nothing.
    pub unchanged: usize,
}

impl MergeReport {
    /// Fold another report into this one.
    pub fn accumulate(&mut self, other: Self) {
        self.appended += other.appended;
        self.promoted += other.promoted;
        self.unchanged += other.unchanged;
    }
}

/// Ordered, locator-deduplicated set of items.
///
/// Insertion order is display order. The pinned subset is stored as a flag on
/// each item, so it can never name an item that is not present. The selection
/// is pruned whenever an item leaves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemCollection {
    items: Vec<Item>,
    selected: BTreeSet<ItemId>,
}

impl ItemCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the collection holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate items in display order.
    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Iterate the pinned subset, in display order.
    pub fn pinned(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|i| i.is_pinned())
    }

    /// Iterate items that are not pinned, in display order.
    pub fn unpinned(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|i| !i.is_pinned())
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Position of the item with `locator`, if present.
    pub fn position_of(&self, locator: &Locator) -> Option<usize> {
        self.items.iter().position(|i| i.locator() == locator)
    }

    /// Whether an item with `locator` is present.
    pub fn contains_locator(&self, locator: &Locator) -> bool {
        self.position_of(locator).is_some()
    }

    /// Append `item` unless an item with the same locator is already present.
    pub fn add(&mut self, item: Item) -> AddOutcome {
        if self.contains_locator(item.locator()) {
            return AddOutcome::Duplicate;
        }
        self.items.push(item);
        AddOutcome::Added
    }

    /// Append every item, skipping duplicates. Returns how many were added.
    pub fn extend<I: IntoIterator<Item = Item>>(&mut self, items: I) -> usize {
        let mut added = 0;
        for item in items {
            if self.add(item) == AddOutcome::Added {
                added += 1;
            }
        }
        added
    }

    /// Remove the item with `id`, deselecting it.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.id() == id)?;
        self.selected.remove(&id);
        Some(self.items.remove(pos))
    }

    /// Remove the item with `locator`, deselecting it.
    pub fn remove_locator(&mut self, locator: &Locator) -> Option<Item> {
        let pos = self.position_of(locator)?;
        let item = self.items.remove(pos);
        self.selected.remove(&item.id());
        Some(item)
    }

    /// Remove every item and clear the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected.clear();
    }

    /// Flip the pin flag of `id`. Returns the new state, or `None` if absent.
    pub fn toggle_pin(&mut self, id: ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|i| i.id() == id)?;
        let pinned = !item.is_pinned();
        item.set_pinned(pinned);
        Some(pinned)
    }

    /// Add `id` to the selection. Returns false if no such item exists.
    pub fn select(&mut self, id: ItemId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected.insert(id);
        true
    }

    /// Remove `id` from the selection.
    pub fn deselect(&mut self, id: ItemId) -> bool {
        self.selected.remove(&id)
    }

    /// Select every item.
    pub fn select_all(&mut self) {
        self.selected = self.items.iter().map(Item::id).collect();
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in display order.
    pub fn selected(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .map(Item::id)
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    /// Merge `other` into `self`.
    ///
    /// Pinned items of `other` are visited first, then its plain items, each
    /// group in `other`'s display order:
    /// - an item whose locator is absent is appended with its pin flag;
    /// - an item whose locator is present promotes the existing copy to pinned
    ///   when the incoming copy is pinned. Pins are never demoted.
    ///
    /// The selection of `other` is discarded.
    pub fn absorb(&mut self, other: Self) -> MergeReport {
        let mut report = MergeReport::default();
        let (pinned, plain): (Vec<Item>, Vec<Item>) =
            other.items.into_iter().partition(Item::is_pinned);
        for incoming in pinned.into_iter().chain(plain) {
            match self.position_of(incoming.locator()) {
                None => {
                    self.items.push(incoming);
                    report.appended += 1;
                }
                Some(pos) if incoming.is_pinned() && !self.items[pos].is_pinned() => {
                    self.items[pos].set_pinned(true);
                    report.promoted += 1;
                }
                Some(_) => report.unchanged += 1,
            }
        }
        report
    }
}

impl<'a> IntoIterator for &'a ItemCollection {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn item(path: &str) -> Item {
        Item::new(Locator::new(path))
    }

    fn locators(c: &ItemCollection) -> Vec<&str> {
        c.iter().map(|i| i.locator().as_str()).collect()
    }

    #[test]
    fn add_deduplicates_by_locator() {
        let mut c = ItemCollection::new();
        assert_eq!(c.add(item("/a")), AddOutcome::Added);
        assert_eq!(c.add(item("/a").pinned(true)), AddOutcome::Duplicate);
        assert_eq!(c.len(), 1);
        assert!(!c.items()[0].is_pinned(), "duplicate add must not alter the existing item");
    }

    #[test]
    fn extend_counts_only_new_items() {
        let mut c = ItemCollection::new();
        let added = c.extend(vec![item("/a"), item("/b"), item("/a")]);
        assert_eq!(added, 2);
        assert_eq!(locators(&c), vec!["/a", "/b"]);
    }

    #[test]
    fn remove_prunes_selection() {
        let mut c = ItemCollection::new();
        c.extend(vec![item("/a"), item("/b")]);
        let a = c.items()[0].id();
        assert!(c.select(a));
        assert!(c.remove(a).is_some());
        assert!(!c.is_selected(a));
        assert!(c.selected().is_empty());
    }

    #[test]
    fn remove_by_locator_takes_exactly_that_item() {
        let mut c = ItemCollection::new();
        c.extend(vec![item("/a"), item("/b")]);
        let b = c.items()[1].id();
        assert!(c.select(b));
        let removed = c.remove_locator(&Locator::new("/b")).expect("present");
        assert_eq!(removed.locator().as_str(), "/b");
        assert_eq!(locators(&c), vec!["/a"]);
        assert!(c.selected().is_empty());
        assert!(c.remove_locator(&Locator::new("/b")).is_none());
    }

    #[test]
    fn select_unknown_item_is_refused() {
        let mut c = ItemCollection::new();
        assert!(!c.select(item("/missing").id()));
    }

    #[test]
    fn select_all_follows_display_order() {
        let mut c = ItemCollection::new();
        c.extend(vec![item("/z"), item("/a")]);
        c.select_all();
        let ids: Vec<_> = c.iter().map(Item::id).collect();
        assert_eq!(c.selected(), ids);
    }

    #[test]
    fn toggle_pin_round_trips() {
        let mut c = ItemCollection::new();
        c.add(item("/folder"));
        let id = c.items()[0].id();
        assert_eq!(c.toggle_pin(id), Some(true));
        assert_eq!(c.pinned().count(), 1);
        assert_eq!(c.toggle_pin(id), Some(false));
        assert_eq!(c.pinned().count(), 0);
        assert_eq!(c.toggle_pin(item("/nope").id()), None);
    }

    #[test]
    fn absorb_dedups_shared_items() {
        let mut primary = ItemCollection::new();
        primary.extend(vec![item("/A"), item("/B")]);
        let mut other = ItemCollection::new();
        other.extend(vec![item("/B"), item("/C")]);

        let report = primary.absorb(other);
        assert_eq!(locators(&primary), vec!["/A", "/B", "/C"]);
        assert_eq!(report, MergeReport { appended: 1, promoted: 0, unchanged: 1 });
    }

    #[test]
    fn absorb_promotes_but_never_demotes() {
        let mut primary = ItemCollection::new();
        primary.add(item("/B"));
        primary.add(item("/P").pinned(true));
        let mut other = ItemCollection::new();
        other.add(item("/B").pinned(true));
        other.add(item("/P"));

        let report = primary.absorb(other);
        assert_eq!(report.promoted, 1);
        assert!(primary.pinned().any(|i| i.locator().as_str() == "/B"));
        assert!(primary.pinned().any(|i| i.locator().as_str() == "/P"));
    }

    #[test]
    fn absorb_appends_pinned_before_plain() {
        let mut primary = ItemCollection::new();
        primary.add(item("/existing"));
        let mut other = ItemCollection::new();
        other.add(item("/plain-1"));
        other.add(item("/folder").pinned(true));
        other.add(item("/plain-2"));

        primary.absorb(other);
        assert_eq!(
            locators(&primary),
            vec!["/existing", "/folder", "/plain-1", "/plain-2"]
        );
    }

    #[test]
    fn absorb_drops_incoming_selection() {
        let mut primary = ItemCollection::new();
        let mut other = ItemCollection::new();
        other.add(item("/x"));
        other.select_all();
        primary.absorb(other);
        assert!(primary.selected().is_empty());
    }

    mod properties {
        use super::*;
        use alloc::format;
        use alloc::string::String;
        use proptest::prelude::*;

        fn collection(entries: &[(u8, bool)]) -> ItemCollection {
            let mut c = ItemCollection::new();
            for (n, pinned) in entries {
                c.add(Item::new(Locator::new(format!("/f{n}"))).pinned(*pinned));
            }
            c
        }

        proptest! {
            #[test]
            fn merged_locators_are_unique_union(
                a in proptest::collection::vec((0u8..16, any::<bool>()), 0..12),
                b in proptest::collection::vec((0u8..16, any::<bool>()), 0..12),
            ) {
                let mut merged = collection(&a);
                merged.absorb(collection(&b));

                let mut seen: Vec<String> = Vec::new();
                for i in merged.iter() {
                    let loc = String::from(i.locator().as_str());
                    prop_assert!(!seen.contains(&loc));
                    seen.push(loc);
                }
                for (n, _) in a.iter().chain(b.iter()) {
                    let loc = format!("/f{n}");
                    prop_assert!(seen.contains(&loc));
                }
            }

            #[test]
            fn pins_survive_any_merge_order(
                a in proptest::collection::vec((0u8..8, any::<bool>()), 0..8),
                b in proptest::collection::vec((0u8..8, any::<bool>()), 0..8),
                c in proptest::collection::vec((0u8..8, any::<bool>()), 0..8),
            ) {
                let sources = [&a, &b, &c];
                let orders: [[usize; 3]; 3] = [[0, 1, 2], [2, 1, 0], [1, 2, 0]];
                for order in orders {
                    let mut dest = collection(sources[order[0]]);
                    dest.absorb(collection(sources[order[1]]));
                    dest.absorb(collection(sources[order[2]]));
                    // Any locator pinned in any source (as first stored there) is pinned after merge.
                    for source in sources {
                        for i in collection(source).pinned() {
                            let pos = dest.position_of(i.locator());
                            prop_assert!(pos.is_some());
                            prop_assert!(dest.items()[pos.unwrap_or_default()].is_pinned());
                        }
                    }
                }
            }
        }
    }
}
