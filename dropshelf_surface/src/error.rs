// Copyright 2025 the Dropshelf Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guard rejections.

use thiserror::Error;

use crate::types::ContainerId;

/// Why a show or hide request was dropped.
///
/// These are expected steady-state outcomes, not failures: the next matching
/// gesture succeeds once the guard clears. Callers log them and move on.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq, Hash)]
pub enum Rejected {
    /// Another show or hide transition is still in flight.
    #[error("container {0} is mid-transition")]
    InTransition(ContainerId),
    /// A file transfer or share is running and the container holds items.
    #[error("container {0} is busy with a file or share operation")]
    Busy(ContainerId),
    /// The container is not on screen, so there is nothing to auto-hide.
    #[error("container {0} is not visible")]
    NotVisible(ContainerId),
}
