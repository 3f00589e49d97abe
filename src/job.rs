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

    job.rs

    The external description of a dumping job, as handed to the default
    deriver of a tool grammar.
*/

use crate::media::{DiscSystem, MediaType};

/// Option settings a frontend carries into default derivation. These are
/// read-only to the engine.
#[derive(Clone, Debug, Default)]
pub struct JobSettings {
    /// Number of reread passes to request for damaged sectors.
    pub read_retries: Option<i32>,
    /// Emit the tool's pre-command verbose flag.
    pub verbose: bool,
    /// Emit the tool's pre-command debug flag, where the tool has one.
    pub debug: bool,
}

/// A structured description of one dumping job, read-only to this crate.
/// The default deriver of each tool grammar turns one of these into an
/// initial [ExecutionState].
///
/// [ExecutionState]: crate::context::ExecutionState
#[derive(Clone, Debug)]
pub struct DumpJob {
    pub drive_path: String,
    pub output_file: String,
    pub drive_speed: Option<i32>,
    pub system: DiscSystem,
    pub media: MediaType,
    pub settings: JobSettings,
}

impl DumpJob {
    pub fn new(
        drive_path: impl Into<String>,
        output_file: impl Into<String>,
        system: DiscSystem,
        media: MediaType,
    ) -> DumpJob {
        DumpJob {
            drive_path: drive_path.into(),
            output_file: output_file.into(),
            drive_speed: None,
            system,
            media,
            settings: JobSettings::default(),
        }
    }

    pub fn with_speed(mut self, speed: i32) -> DumpJob {
        self.drive_speed = Some(speed);
        self
    }

    pub fn with_settings(mut self, settings: JobSettings) -> DumpJob {
        self.settings = settings;
        self
    }
}
