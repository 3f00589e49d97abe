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

    context.rs

    The execution context: one mutable state record per dumping job, plus the
    two core algorithms over it - generation (state → text) and
    validation (text → state).
*/

use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
};

use crate::{
    grammar::{Arity, Tool},
    input::{BlockCount, FlagValue, ValueKind},
    token,
    ParamError,
    PATH_SEPARATORS,
};

/// The structured, in-memory configuration of one dumping job for one
/// external tool.
///
/// A state holds the active command (or none), a sparse map of present flags
/// to their typed values, and up to two positional path values. It is built
/// either by a tool's default deriver ([Tool::derive]) and mutated through
/// the typed setters, or by [ExecutionState::from_cmdline] from raw text.
///
/// Each instance is owned exclusively by its caller; batch validation of
/// multiple profiles must use one state per profile.
pub struct ExecutionState<T: Tool> {
    command: Option<T::Command>,
    flags: HashMap<T::Flag, FlagValue>,
    input: Option<String>,
    output: Option<String>,
}

impl<T: Tool> Default for ExecutionState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tool> Clone for ExecutionState<T> {
    fn clone(&self) -> Self {
        ExecutionState {
            command: self.command,
            flags: self.flags.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }
}

impl<T: Tool> Debug for ExecutionState<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("ExecutionState")
            .field("tool", &T::NAME)
            .field("command", &self.command)
            .field("flags", &self.flags)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

impl<T: Tool> ExecutionState<T> {
    pub fn new() -> ExecutionState<T> {
        ExecutionState {
            command: None,
            flags: HashMap::new(),
            input: None,
            output: None,
        }
    }

    // ------------------------------------------------------------------
    // Command and positional state
    // ------------------------------------------------------------------

    pub fn command(&self) -> Option<T::Command> {
        self.command
    }

    /// Set or clear the active command. Switching commands resets all flag
    /// state; nothing set for one command may leak into another.
    pub fn set_command(&mut self, command: Option<T::Command>) {
        if self.command != command {
            self.flags.clear();
        }
        self.command = command;
    }

    pub fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn set_input_path(&mut self, path: impl Into<String>) {
        self.input = Some(path.into());
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn set_output_path(&mut self, path: impl Into<String>) {
        self.output = Some(path.into());
    }

    // ------------------------------------------------------------------
    // Typed flag setters and accessors
    // ------------------------------------------------------------------

    pub fn is_set(&self, flag: T::Flag) -> bool {
        self.flags.contains_key(&flag)
    }

    pub fn value(&self, flag: T::Flag) -> Option<&FlagValue> {
        self.flags.get(&flag)
    }

    /// Mark a flag present without recording a value. For boolean flags this
    /// is the only setter; for value-carrying flags the result is "set but
    /// incomplete" and will not be emitted.
    pub fn set(&mut self, flag: T::Flag) {
        let kind = T::flag_spec(flag).kind;
        self.flags.insert(flag, FlagValue::unset(kind));
    }

    pub fn unset(&mut self, flag: T::Flag) {
        self.flags.remove(&flag);
    }

    pub fn set_i8(&mut self, flag: T::Flag, value: i8) {
        self.store(flag, FlagValue::Int8(Some(value)));
    }

    pub fn set_i16(&mut self, flag: T::Flag, value: i16) {
        self.store(flag, FlagValue::Int16(Some(value)));
    }

    pub fn set_i32(&mut self, flag: T::Flag, value: i32) {
        self.store(flag, FlagValue::Int32(Some(value)));
    }

    pub fn set_i64(&mut self, flag: T::Flag, value: i64) {
        self.store(flag, FlagValue::Int64(Some(BlockCount::Count(value))));
    }

    /// Set the literal `all` alternative of a block-count flag.
    pub fn set_all(&mut self, flag: T::Flag) {
        self.store(flag, FlagValue::Int64(Some(BlockCount::All)));
    }

    pub fn set_text(&mut self, flag: T::Flag, value: impl Into<String>) {
        self.store(flag, FlagValue::Text(Some(value.into())));
    }

    pub fn i8_value(&self, flag: T::Flag) -> Option<i8> {
        match self.flags.get(&flag) {
            Some(FlagValue::Int8(v)) => *v,
            _ => None,
        }
    }

    pub fn i16_value(&self, flag: T::Flag) -> Option<i16> {
        match self.flags.get(&flag) {
            Some(FlagValue::Int16(v)) => *v,
            _ => None,
        }
    }

    pub fn i32_value(&self, flag: T::Flag) -> Option<i32> {
        match self.flags.get(&flag) {
            Some(FlagValue::Int32(v)) => *v,
            _ => None,
        }
    }

    pub fn block_count(&self, flag: T::Flag) -> Option<BlockCount> {
        match self.flags.get(&flag) {
            Some(FlagValue::Int64(v)) => *v,
            _ => None,
        }
    }

    pub fn text_value(&self, flag: T::Flag) -> Option<&str> {
        match self.flags.get(&flag) {
            Some(FlagValue::Text(v)) => v.as_deref(),
            _ => None,
        }
    }

    fn store(&mut self, flag: T::Flag, value: FlagValue) {
        let declared = T::flag_spec(flag).kind;
        if declared != value.kind() {
            log::warn!(
                "{}: setter kind mismatch for {}: declared {}, got {}; ignoring",
                T::NAME,
                T::flag_spec(flag).long,
                declared,
                value.kind()
            );
            return;
        }
        self.flags.insert(flag, value);
    }

    // ------------------------------------------------------------------
    // Generation (state → text)
    // ------------------------------------------------------------------

    /// Serialize the state to command-line text.
    ///
    /// Emission order: set pre-command flags in declaration order, the active
    /// command's canonical text, the set and supported flags grouped by value
    /// kind, then the positional arguments required by the command's arity.
    ///
    /// Returns `None` when the configuration is incomplete - no active
    /// command, or a required positional value missing. Callers must treat an
    /// absent result as "needs more input", not as an empty command.
    pub fn generate(&self) -> Option<String> {
        let command = self.command?;
        let cmd_spec = T::command_spec(command);
        let mut parts: Vec<String> = Vec::new();

        for &flag in T::precommand_flags() {
            if self.flags.contains_key(&flag) {
                parts.push(T::flag_spec(flag).long.to_string());
            }
        }

        parts.push(cmd_spec.canonical_text());

        for kind in ValueKind::GROUP_ORDER {
            for &flag in T::flags() {
                if T::precommand_flags().contains(&flag) {
                    continue;
                }
                let flag_spec = T::flag_spec(flag);
                if flag_spec.kind != kind || !T::supports(command, flag) {
                    continue;
                }
                let Some(value) = self.flags.get(&flag) else {
                    continue;
                };
                if !value.is_complete() {
                    log::debug!("{}: {} is set without a value; not emitting", T::NAME, flag_spec.long);
                    continue;
                }
                parts.push(flag_spec.long.to_string());
                if let Some(value_token) = value.format() {
                    parts.push(value_token);
                }
            }
        }

        match cmd_spec.arity {
            Arity::None => {}
            Arity::Device => parts.push(format_device(self.input.as_deref()?)),
            Arity::Image => parts.push(token::quote(self.input.as_deref()?)),
            Arity::DeviceAndImage => {
                parts.push(format_device(self.input.as_deref()?));
                parts.push(token::quote(self.output.as_deref()?));
            }
            Arity::ImagePair => {
                parts.push(token::quote(self.input.as_deref()?));
                parts.push(token::quote(self.output.as_deref()?));
            }
            Arity::RemoteHost => parts.push(token::quote(self.input.as_deref()?)),
        }

        Some(parts.join(" "))
    }

    // ------------------------------------------------------------------
    // Validation (text → state)
    // ------------------------------------------------------------------

    /// Validate raw command-line text against the tool grammar and build the
    /// corresponding state.
    ///
    /// Phases run strictly forward: tokenize, pre-command flag passes,
    /// command resolution, grouped flag passes, positional arguments. The
    /// parse fails on an unresolvable command, a missing required positional,
    /// or unconsumed trailing tokens. Unparseable numeric values are not
    /// failures; they record the flag as present with its value unset.
    pub fn from_cmdline(text: &str) -> Result<ExecutionState<T>, ParamError> {
        let tokens = token::tokenize(text);
        let mut state = ExecutionState::new();
        let mut cursor = 0usize;

        // Pre-command flags: repeat full passes until one matches nothing.
        loop {
            let mut matched = false;
            for &flag in T::precommand_flags() {
                if state.try_process(flag, &tokens, &mut cursor) {
                    matched = true;
                }
            }
            if !matched {
                break;
            }
        }

        let command = resolve_command::<T>(&tokens, &mut cursor).ok_or(ParamError::UnknownCommand)?;
        state.command = Some(command);
        log::trace!("{}: resolved command {}", T::NAME, T::command_spec(command).canonical_text());

        // Flag passes try every declared flag, grouped in emission order,
        // not just the active command's support matrix. Out-of-matrix flags
        // are recorded; generation will never re-emit them.
        let grouped = grouped_flags::<T>();
        loop {
            let mut matched = false;
            for &flag in grouped.iter() {
                let at = cursor;
                if state.try_process(flag, &tokens, &mut cursor) {
                    matched = true;
                    if !T::precommand_flags().contains(&flag) && !T::supports(command, flag) {
                        log::warn!(
                            "{}: {} is not supported by '{}'; accepted but it will not round-trip",
                            T::NAME,
                            T::flag_spec(flag).long,
                            T::command_spec(command).canonical_text()
                        );
                    }
                    debug_assert!(cursor > at);
                }
            }
            if !matched {
                break;
            }
        }

        let arity = T::command_spec(command).arity;
        let mut next_positional = || -> Result<String, ParamError> {
            let value = tokens.get(cursor).cloned().ok_or(ParamError::MissingPositional)?;
            cursor += 1;
            Ok(value)
        };
        match arity {
            Arity::None => {}
            Arity::Device | Arity::Image | Arity::RemoteHost => {
                state.input = Some(next_positional()?);
            }
            Arity::DeviceAndImage | Arity::ImagePair => {
                state.input = Some(next_positional()?);
                state.output = Some(next_positional()?);
            }
        }

        if cursor < tokens.len() {
            return Err(ParamError::TrailingInput(tokens[cursor..].join(" ")));
        }

        Ok(state)
    }

    /// Re-validate text into this state. On success the state is replaced
    /// wholesale; on failure the active command is reset to none, leaving the
    /// state unusable for generation until corrected input arrives.
    pub fn set_cmdline(&mut self, text: &str) -> Result<(), ParamError> {
        match Self::from_cmdline(text) {
            Ok(state) => {
                *self = state;
                Ok(())
            }
            Err(e) => {
                self.command = None;
                Err(e)
            }
        }
    }

    /// Attempt to match one flag at the cursor. The cursor advances only on a
    /// match: one token for booleans, two for value-carrying kinds. A value
    /// alias with no following token does not match.
    fn try_process(&mut self, flag: T::Flag, tokens: &[String], cursor: &mut usize) -> bool {
        let spec = T::flag_spec(flag);
        let Some(current) = tokens.get(*cursor) else {
            return false;
        };
        if !spec.matches(current) {
            return false;
        }

        if spec.kind == ValueKind::Boolean {
            // A duplicate occurrence overwrites presence with presence.
            self.flags.insert(flag, FlagValue::Boolean);
            *cursor += 1;
            return true;
        }

        let Some(value_token) = tokens.get(*cursor + 1) else {
            return false;
        };
        let value = FlagValue::parse(spec.kind, value_token, spec.accepts_all);
        if !value.is_complete() {
            log::debug!(
                "{}: could not parse '{}' as {} for {}; recording flag with unset value",
                T::NAME,
                value_token,
                spec.kind,
                spec.long
            );
        }
        self.flags.insert(flag, value);
        *cursor += 2;
        true
    }
}

/// Two-stage command resolution. The first token may select a family, in
/// which case the second token selects the sub-command within it; otherwise
/// the first token must resolve a standalone command. Advances the cursor by
/// one or two tokens on success only.
fn resolve_command<T: Tool>(tokens: &[String], cursor: &mut usize) -> Option<T::Command> {
    let first = tokens.get(*cursor)?;

    if let Some(family) = T::resolve_family(first) {
        let second = tokens.get(*cursor + 1)?;
        let command = T::commands().iter().copied().find(|&command| {
            let spec = T::command_spec(command);
            spec.family == Some(family.name) && spec.matches(second)
        })?;
        *cursor += 2;
        return Some(command);
    }

    let command = T::commands().iter().copied().find(|&command| {
        let spec = T::command_spec(command);
        spec.family.is_none() && spec.matches(first)
    })?;
    *cursor += 1;
    Some(command)
}

/// Every declared flag in grouped emission order: booleans, then the 8/16/32
/// bit integers, then 64-bit integers, then text, declaration order within
/// each group. Pre-command flags are included; text may legally repeat them
/// after the command.
fn grouped_flags<T: Tool>() -> Vec<T::Flag> {
    let mut flags = Vec::with_capacity(T::flags().len());
    for kind in ValueKind::GROUP_ORDER {
        flags.extend(
            T::flags()
                .iter()
                .copied()
                .filter(|&flag| T::flag_spec(flag).kind == kind),
        );
    }
    flags
}

/// Emit a device-style positional: trailing path separators trimmed, quoted
/// only when the path contains whitespace.
fn format_device(path: &str) -> String {
    token::quote_if_needed(path.trim_end_matches(&PATH_SEPARATORS[..]))
}
