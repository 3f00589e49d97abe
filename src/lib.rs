/*
    dumpfox
    https://github.com/dbalsom/dumpfox

    Copyright 2025 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------
*/

//! dumpfox translates between a structured description of a disc dumping job
//! and the flat command-line text handed to an external dumping tool, and
//! performs the reverse translation from arbitrary (possibly hand-edited)
//! command-line text back into the same structure.
//!
//! Each supported tool contributes a static grammar - its flag catalog,
//! command registry, per-command flag support matrix and positional arity
//! contract - through the [Tool] trait. A single engine, [ExecutionState],
//! implements generation and validation over any grammar, so the round-trip
//! law (generate → parse → generate is idempotent) holds uniformly:
//!
//! ```
//! use dumpfox::prelude::*;
//!
//! let job = DumpJob::new("D:\\", "image.iso", DiscSystem::IbmPcCompatible, MediaType::Cd)
//!     .with_speed(8);
//! let state = Aaru::derive(&job);
//! let text = state.generate().unwrap();
//! let reparsed = ExecutionState::<Aaru>::from_cmdline(&text).unwrap();
//! assert_eq!(reparsed.generate().unwrap(), text);
//! ```

pub mod context;
pub mod grammar;
pub mod input;
pub mod job;
pub mod media;
pub mod tools;

pub(crate) mod token;

use thiserror::Error;

pub use crate::{
    context::ExecutionState,
    grammar::{Arity, CommandSpec, FamilySpec, FlagSpec, Tool},
    input::{BlockCount, FlagValue, ValueKind},
    job::{DumpJob, JobSettings},
    media::{DiscSystem, MediaType},
};

/// The separator characters trimmed from the tail of a device-style positional argument.
pub const PATH_SEPARATORS: [char; 2] = ['\\', '/'];

/// Errors produced while validating command-line text against a tool grammar.
///
/// Generation failures are not errors: [ExecutionState::generate] returns `None`
/// when the configuration is incomplete.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("No command could be resolved from the input")]
    UnknownCommand,
    #[error("A required positional argument was missing")]
    MissingPositional,
    #[error("Unconsumed input remained after parsing: {0}")]
    TrailingInput(String),
}

pub mod prelude {
    pub use crate::{
        context::ExecutionState,
        grammar::{Arity, CommandSpec, FamilySpec, FlagSpec, Tool},
        input::{BlockCount, FlagValue, ValueKind},
        job::{DumpJob, JobSettings},
        media::{DiscSystem, MediaType},
        tools::{aaru::Aaru, redumper::Redumper},
        ParamError,
    };
}
