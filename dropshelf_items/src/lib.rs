// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=dropshelf_items --heading-base-level=0

//! Dropshelf Items: ordered item collections for floating drop containers.
//!
//! Dropshelf Items is the leaf building block of the Dropshelf workspace.
//!
//! - An [`Item`] is one dropped entry, addressed by a [`Locator`] (a path or URI).
//! - An [`ItemCollection`] keeps items in insertion order, de-duplicated by locator,
//!   with a pinned subset (items promoted to a "power" role, typically folders)
//!   and a selection set.
//! - [`ItemCollection::absorb`] merges one collection into another, which is the
//!   core of collapsing many containers into one.
//!
//! It does not touch the file system and knows nothing about windows or geometry.
//! Higher layers (a container, a registry) own collections and decide when to mutate them.
//!
//! ## Identity and equality
//!
//! [`ItemId`] is derived from the locator with a stable hash, so the same logical file
//! always maps to the same id, in every collection and across merges.
//! De-duplication compares locators, never ids.
//!
//! ## Invariants
//!
//! - The pinned subset is always a subset of the items (it is a flag on each item).
//! - The selection only ever names items that are present; removing an item deselects it.
//!
//! # Example
//!
//! ```rust
//! use dropshelf_items::{Item, ItemCollection, Locator};
//!
//! let mut primary = ItemCollection::new();
//! primary.add(Item::new(Locator::new("/tmp/a.txt")));
//! primary.add(Item::new(Locator::new("/tmp/b.txt")));
//!
//! let mut other = ItemCollection::new();
//! other.add(Item::new(Locator::new("/tmp/b.txt")).pinned(true));
//! other.add(Item::new(Locator::new("/tmp/c.txt")));
//!
//! let report = primary.absorb(other);
//! assert_eq!(report.appended, 1);
//! assert_eq!(report.promoted, 1);
//!
//! let locators: Vec<_> = primary.iter().map(|i| i.locator().as_str()).collect();
//! assert_eq!(locators, ["/tmp/a.txt", "/tmp/b.txt", "/tmp/c.txt"]);
//! assert!(primary.iter().nth(1).unwrap().is_pinned());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod collection;
mod item;

pub use collection::{AddOutcome, ItemCollection, MergeReport};
pub use item::{Item, ItemId, Locator};
