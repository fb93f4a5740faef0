// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public item types: locators, stable identifiers, and items.

use alloc::string::String;
use core::fmt;

/// Location of a dropped entry: a file-system path or a URI.
///
/// Locators are compared verbatim. Callers that need normalization (resolving
/// symlinks, percent-decoding) must do so before building the locator.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Locator(String);

impl Locator {
    /// Wrap a path or URI string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The locator as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Locator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Stable identity of an item.
///
/// Derived from the [`Locator`] with 64-bit FNV-1a, so the same logical file
/// always produces the same id regardless of which collection it lives in.
/// Ids are opaque: they are only meant for selection bookkeeping and for
/// addressing an item in a collection.
///
/// Distinct locators can collide on the same 64-bit hash, and id-addressed
/// operations then act on the first match. De-duplication compares locators and
/// is unaffected; callers holding a locator should prefer
/// [`ItemCollection::remove_locator`](crate::ItemCollection::remove_locator).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    /// Compute the id for a locator.
    pub fn for_locator(locator: &Locator) -> Self {
        let mut hash = Self::FNV_OFFSET;
        for byte in locator.as_str().bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(Self::FNV_PRIME);
        }
        Self(hash)
    }

    /// Raw hash value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// One dropped entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    locator: Locator,
    pinned: bool,
    temporary: bool,
}

impl Item {
    /// Create an unpinned, non-temporary item.
    pub fn new(locator: Locator) -> Self {
        Self {
            id: ItemId::for_locator(&locator),
            locator,
            pinned: false,
            temporary: false,
        }
    }

    /// Builder: set the pinned flag.
    #[must_use]
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Builder: mark the item as temporary (for example a promised file that
    /// was materialized into a scratch directory).
    #[must_use]
    pub fn temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    /// Identity of the item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Where the item lives.
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Whether the item belongs to the pinned subset.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Whether the item is temporary.
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    pub(crate) fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }
}
