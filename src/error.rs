// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors shared by the carving and maze engines.

use failure::Fail;

/// Everything that can go wrong inside the library.  None of these are
/// recoverable in place: the caller either abandons the request or
/// should not have issued it.
#[derive(Debug, Fail, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    #[fail(display = "invalid dimensions {}x{}: both must be positive", width, height)]
    InvalidDimension { width: u32, height: u32 },

    #[fail(display = "a {}x{} grid cannot be carved any further", width, height)]
    Terminal { width: u32, height: u32 },

    #[fail(display = "nothing has been marked for removal")]
    EmptyStructureAccess,

    #[fail(display = "the goal cannot be reached from the start")]
    NoPathFound,

    #[fail(display = "seam is broken or out of bounds at step {}", step)]
    DisconnectedSeam { step: usize },

    #[fail(display = "seam carving cannot upscale an image")]
    CannotUpscale,

    #[fail(display = "({}, {}) is not a cell of this maze", x, y)]
    UnknownCell { x: u32, y: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
