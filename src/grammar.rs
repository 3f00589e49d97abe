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

    grammar.rs

    The static grammar a tool contributes to the engine: flag and command
    declarations, the family alias tables, the positional arity contract,
    and the Tool trait tying them together.
*/

use std::{fmt::Debug, hash::Hash};

use crate::{context::ExecutionState, input::ValueKind, job::DumpJob, media::MediaType};

/// Static declaration of a single command-line flag: its aliases and the kind
/// of value it carries.
#[derive(Copy, Clone, Debug)]
pub struct FlagSpec {
    /// Optional abbreviated alias, e.g. `-f`.
    pub short: Option<&'static str>,
    /// Canonical alias, e.g. `--force`. Generation always emits this form.
    pub long: &'static str,
    pub kind: ValueKind,
    /// Int64 flags only: the literal token `all` is accepted in place of a
    /// block count.
    pub accepts_all: bool,
}

impl FlagSpec {
    pub const fn boolean(short: Option<&'static str>, long: &'static str) -> FlagSpec {
        FlagSpec { short, long, kind: ValueKind::Boolean, accepts_all: false }
    }

    pub const fn int8(short: Option<&'static str>, long: &'static str) -> FlagSpec {
        FlagSpec { short, long, kind: ValueKind::Int8, accepts_all: false }
    }

    pub const fn int16(short: Option<&'static str>, long: &'static str) -> FlagSpec {
        FlagSpec { short, long, kind: ValueKind::Int16, accepts_all: false }
    }

    pub const fn int32(short: Option<&'static str>, long: &'static str) -> FlagSpec {
        FlagSpec { short, long, kind: ValueKind::Int32, accepts_all: false }
    }

    pub const fn int64(short: Option<&'static str>, long: &'static str) -> FlagSpec {
        FlagSpec { short, long, kind: ValueKind::Int64, accepts_all: false }
    }

    pub const fn block_count(short: Option<&'static str>, long: &'static str) -> FlagSpec {
        FlagSpec { short, long, kind: ValueKind::Int64, accepts_all: true }
    }

    pub const fn text(short: Option<&'static str>, long: &'static str) -> FlagSpec {
        FlagSpec { short, long, kind: ValueKind::Text, accepts_all: false }
    }

    /// True when the given token is one of this flag's aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.short.is_some_and(|s| s == token) || self.long == token
    }
}

/// The fixed positional-argument contract of a command. Counts are never
/// optional: a command either takes a positional or it does not.
///
/// Device-style and image-style paths quote differently on emission, which is
/// why the single-path case is split in two. Both normalize identically on
/// parse.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Arity {
    /// No positional arguments.
    None,
    /// One device path: trailing path separator trimmed, quoted only when the
    /// path contains whitespace.
    Device,
    /// One image path: always quoted.
    Image,
    /// A device path followed by an output image path.
    DeviceAndImage,
    /// An input image path followed by an output image path.
    ImagePair,
    /// One remote host token: always quoted.
    RemoteHost,
}

impl Arity {
    /// The number of positional tokens the contract requires.
    pub fn count(&self) -> usize {
        match self {
            Arity::None => 0,
            Arity::Device | Arity::Image | Arity::RemoteHost => 1,
            Arity::DeviceAndImage | Arity::ImagePair => 2,
        }
    }
}

/// A command family and the alias tokens that select it, e.g. `media` / `m`.
#[derive(Copy, Clone, Debug)]
pub struct FamilySpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl FamilySpec {
    pub fn matches(&self, token: &str) -> bool {
        self.aliases.contains(&token)
    }
}

/// Static declaration of one command: its optional family, name, the alias
/// tokens that select it (within the family, or standalone), and its
/// positional arity contract.
#[derive(Copy, Clone, Debug)]
pub struct CommandSpec {
    pub family: Option<&'static str>,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub arity: Arity,
}

impl CommandSpec {
    pub const fn standalone(name: &'static str, aliases: &'static [&'static str], arity: Arity) -> CommandSpec {
        CommandSpec { family: None, name, aliases, arity }
    }

    pub const fn in_family(
        family: &'static str,
        name: &'static str,
        aliases: &'static [&'static str],
        arity: Arity,
    ) -> CommandSpec {
        CommandSpec { family: Some(family), name, aliases, arity }
    }

    /// The canonical text of the command: `"family name"` or bare `"name"`.
    /// Every alias normalizes to this form.
    pub fn canonical_text(&self) -> String {
        match self.family {
            Some(family) => format!("{} {}", family, self.name),
            None => self.name.to_string(),
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        self.aliases.contains(&token)
    }
}

/// A tool grammar: the static tables the engine needs to generate and
/// validate command lines for one external dumping tool, plus the
/// domain operations frontends consume.
///
/// Implementations are zero-sized marker types; all methods are associated
/// functions over `'static` tables, so a grammar never carries state.
pub trait Tool: Sized {
    /// Closed enumeration of the tool's flags.
    type Flag: Copy + Clone + Eq + Hash + Debug + 'static;
    /// Closed enumeration of the tool's commands.
    type Command: Copy + Clone + Eq + Debug + 'static;

    /// The tool's display name, used in diagnostics only.
    const NAME: &'static str;

    /// Every flag, in declaration order. Within each value-kind group,
    /// generation and validation walk flags in this order.
    fn flags() -> &'static [Self::Flag];

    /// Flags legal before any command token (verbosity, help, version and the
    /// like), in emission order. These never appear in a support matrix row.
    fn precommand_flags() -> &'static [Self::Flag];

    /// Every command, in declaration order.
    fn commands() -> &'static [Self::Command];

    /// Command families, if the tool groups its commands. Standalone-only
    /// grammars leave this empty.
    fn families() -> &'static [FamilySpec] {
        &[]
    }

    fn flag_spec(flag: Self::Flag) -> FlagSpec;

    fn command_spec(command: Self::Command) -> CommandSpec;

    /// The per-command flag support matrix. Flags outside a command's row are
    /// never emitted for that command, though validation still records them.
    fn supports(command: Self::Command, flag: Self::Flag) -> bool;

    /// True when the command performs a physical dump, as opposed to an
    /// info/verify/list operation. Collaborators use this to decide whether
    /// to expect a long-running operation.
    fn is_dump_command(command: Self::Command) -> bool;

    /// The default output-file extension for the given media type.
    fn default_extension(media: MediaType) -> &'static str;

    /// Best-effort media-type inference from a parsed state. Returns `None`
    /// unless the tool's grammar encodes the media type explicitly.
    fn media_type(state: &ExecutionState<Self>) -> Option<MediaType>;

    /// Build an initial state for a dumping job: the tool's canonical dump
    /// command, input/output identity, and - only for supported
    /// (disc-system, media-type) pairs - the tool's type-specific defaults.
    fn derive(job: &DumpJob) -> ExecutionState<Self>;

    /// The current input (drive) path, without re-serializing the state.
    fn input_path(state: &ExecutionState<Self>) -> Option<String>;

    /// The current output path, without re-serializing the state.
    fn output_path(state: &ExecutionState<Self>) -> Option<String>;

    /// The current drive speed, if one is set.
    fn speed(state: &ExecutionState<Self>) -> Option<i32>;

    /// One row of the support matrix, in flag-declaration order. Frontends
    /// use this to enable or grey out controls per command.
    fn supported_flags(command: Self::Command) -> Vec<Self::Flag> {
        Self::flags()
            .iter()
            .copied()
            .filter(|&flag| Self::supports(command, flag))
            .collect()
    }

    /// Resolve a family alias token to its family table entry.
    fn resolve_family(token: &str) -> Option<&'static FamilySpec> {
        Self::families().iter().find(|family| family.matches(token))
    }
}
