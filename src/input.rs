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

    input.rs

    The typed input model: the five value kinds a flag may carry, and the
    typed storage for a flag that is present in an execution state.
*/

use std::fmt::{Display, Formatter};

/// The kind of value a command-line flag carries.
///
/// Generation emits set flags grouped by kind: booleans first, then the 8/16/32
/// bit integer kinds, then 64-bit integers, then text. The external tools this
/// crate models are sensitive to argument order, so the grouping is part of the
/// contract, not a cosmetic choice.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum ValueKind {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Text,
}

impl ValueKind {
    /// The emission order of value-kind groups, shared by generation and the
    /// grouped flag passes of validation.
    pub const GROUP_ORDER: [ValueKind; 6] = [
        ValueKind::Boolean,
        ValueKind::Int8,
        ValueKind::Int16,
        ValueKind::Int32,
        ValueKind::Int64,
        ValueKind::Text,
    ];
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Int8 => write!(f, "int8"),
            ValueKind::Int16 => write!(f, "int16"),
            ValueKind::Int32 => write!(f, "int32"),
            ValueKind::Int64 => write!(f, "int64"),
            ValueKind::Text => write!(f, "text"),
        }
    }
}

/// The value of a 64-bit block-count flag: either an explicit count, or the
/// literal token `all`, which the external tools accept in place of a count
/// for "length"-style flags.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlockCount {
    Count(i64),
    All,
}

impl Display for BlockCount {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            BlockCount::Count(n) => write!(f, "{}", n),
            BlockCount::All => write!(f, "all"),
        }
    }
}

/// Typed storage for one flag that is present in an [ExecutionState].
///
/// Presence and value are separate: a flag whose value token failed to parse
/// is still present, with its value unset. Downstream logic treats such a flag
/// as "set but incomplete" and generation will not emit it.
///
/// [ExecutionState]: crate::context::ExecutionState
#[derive(Clone, Debug, PartialEq)]
pub enum FlagValue {
    Boolean,
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<BlockCount>),
    Text(Option<String>),
}

impl FlagValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FlagValue::Boolean => ValueKind::Boolean,
            FlagValue::Int8(_) => ValueKind::Int8,
            FlagValue::Int16(_) => ValueKind::Int16,
            FlagValue::Int32(_) => ValueKind::Int32,
            FlagValue::Int64(_) => ValueKind::Int64,
            FlagValue::Text(_) => ValueKind::Text,
        }
    }

    /// A present flag of the given kind with no value recorded.
    pub fn unset(kind: ValueKind) -> FlagValue {
        match kind {
            ValueKind::Boolean => FlagValue::Boolean,
            ValueKind::Int8 => FlagValue::Int8(None),
            ValueKind::Int16 => FlagValue::Int16(None),
            ValueKind::Int32 => FlagValue::Int32(None),
            ValueKind::Int64 => FlagValue::Int64(None),
            ValueKind::Text => FlagValue::Text(None),
        }
    }

    /// Parse a value token according to the given kind. An unparseable or
    /// out-of-range token yields the unset value of the kind, never an error.
    /// `accepts_all` permits the literal `all` for Int64 kinds.
    pub fn parse(kind: ValueKind, token: &str, accepts_all: bool) -> FlagValue {
        match kind {
            ValueKind::Boolean => FlagValue::Boolean,
            ValueKind::Int8 => FlagValue::Int8(token.parse::<i8>().ok()),
            ValueKind::Int16 => FlagValue::Int16(token.parse::<i16>().ok()),
            ValueKind::Int32 => FlagValue::Int32(token.parse::<i32>().ok()),
            ValueKind::Int64 => match token.parse::<i64>() {
                Ok(n) => FlagValue::Int64(Some(BlockCount::Count(n))),
                Err(_) if accepts_all && token.eq_ignore_ascii_case("all") => {
                    FlagValue::Int64(Some(BlockCount::All))
                }
                Err(_) => FlagValue::Int64(None),
            },
            ValueKind::Text => FlagValue::Text(Some(token.to_string())),
        }
    }

    /// The value token to emit for this flag, if the value is set.
    /// Booleans carry no value token; text values are re-quoted when they
    /// contain whitespace.
    pub fn format(&self) -> Option<String> {
        match self {
            FlagValue::Boolean => None,
            FlagValue::Int8(v) => v.map(|n| n.to_string()),
            FlagValue::Int16(v) => v.map(|n| n.to_string()),
            FlagValue::Int32(v) => v.map(|n| n.to_string()),
            FlagValue::Int64(v) => v.map(|n| n.to_string()),
            FlagValue::Text(v) => v.as_deref().map(crate::token::quote_if_needed),
        }
    }

    /// True when the flag can be emitted: booleans always, value-carrying
    /// kinds only once their value is set.
    pub fn is_complete(&self) -> bool {
        matches!(self, FlagValue::Boolean) || self.format().is_some()
    }
}
