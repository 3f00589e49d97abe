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

    tools/redumper.rs

    The redumper grammar: standalone mode commands with no positional
    arguments - drive and image identity travel as text flags - and media
    types encoded directly in the dump commands.
*/

use std::sync::OnceLock;

use strum::IntoEnumIterator;

use crate::{
    context::ExecutionState,
    grammar::{Arity, CommandSpec, FlagSpec, Tool},
    job::DumpJob,
    media::{DiscSystem, MediaType},
    PATH_SEPARATORS,
};

/// Marker type implementing the redumper grammar.
pub struct Redumper;

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum RedumperFlag {
    // Pre-command flags.
    Verbose,
    Version,
    Help,
    // Booleans.
    AsusSkipLeadout,
    ForceQToc,
    ForceSplit,
    Iso9660Trim,
    LeaveUnchanged,
    Overwrite,
    PlextorSkipLeadin,
    RefineSubchannel,
    // 16-bit integers.
    DriveC2Shift,
    // 32-bit integers.
    DriveReadOffset,
    LeadinRetries,
    Retries,
    Speed,
    // Text.
    Drive,
    DriveReadMethod,
    DriveSectorOrder,
    DriveType,
    Firmware,
    ImageName,
    ImagePath,
    SkipRanges,
}

#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum RedumperCommand {
    Cd,
    Dvd,
    Bd,
    Sacd,
    Dump,
    Refine,
    Split,
    Hash,
    Info,
    Eject,
    Skeleton,
}

const PRECOMMAND_FLAGS: [RedumperFlag; 3] = [RedumperFlag::Verbose, RedumperFlag::Version, RedumperFlag::Help];

impl Tool for Redumper {
    type Flag = RedumperFlag;
    type Command = RedumperCommand;

    const NAME: &'static str = "redumper";

    fn flags() -> &'static [RedumperFlag] {
        static FLAGS: OnceLock<Vec<RedumperFlag>> = OnceLock::new();
        FLAGS.get_or_init(|| RedumperFlag::iter().collect())
    }

    fn precommand_flags() -> &'static [RedumperFlag] {
        &PRECOMMAND_FLAGS
    }

    fn commands() -> &'static [RedumperCommand] {
        static COMMANDS: OnceLock<Vec<RedumperCommand>> = OnceLock::new();
        COMMANDS.get_or_init(|| RedumperCommand::iter().collect())
    }

    #[rustfmt::skip]
    fn flag_spec(flag: RedumperFlag) -> FlagSpec {
        match flag {
            RedumperFlag::Verbose => FlagSpec::boolean(Some("-v"), "--verbose"),
            RedumperFlag::Version => FlagSpec::boolean(None, "--version"),
            RedumperFlag::Help => FlagSpec::boolean(Some("-h"), "--help"),
            RedumperFlag::AsusSkipLeadout => FlagSpec::boolean(None, "--asus-skip-leadout"),
            RedumperFlag::ForceQToc => FlagSpec::boolean(None, "--force-qtoc"),
            RedumperFlag::ForceSplit => FlagSpec::boolean(None, "--force-split"),
            RedumperFlag::Iso9660Trim => FlagSpec::boolean(None, "--iso9660-trim"),
            RedumperFlag::LeaveUnchanged => FlagSpec::boolean(None, "--leave-unchanged"),
            RedumperFlag::Overwrite => FlagSpec::boolean(None, "--overwrite"),
            RedumperFlag::PlextorSkipLeadin => FlagSpec::boolean(None, "--plextor-skip-leadin"),
            RedumperFlag::RefineSubchannel => FlagSpec::boolean(None, "--refine-subchannel"),
            RedumperFlag::DriveC2Shift => FlagSpec::int16(None, "--drive-c2-shift"),
            RedumperFlag::DriveReadOffset => FlagSpec::int32(None, "--drive-read-offset"),
            RedumperFlag::LeadinRetries => FlagSpec::int32(None, "--leadin-retries"),
            RedumperFlag::Retries => FlagSpec::int32(None, "--retries"),
            RedumperFlag::Speed => FlagSpec::int32(None, "--speed"),
            RedumperFlag::Drive => FlagSpec::text(None, "--drive"),
            RedumperFlag::DriveReadMethod => FlagSpec::text(None, "--drive-read-method"),
            RedumperFlag::DriveSectorOrder => FlagSpec::text(None, "--drive-sector-order"),
            RedumperFlag::DriveType => FlagSpec::text(None, "--drive-type"),
            RedumperFlag::Firmware => FlagSpec::text(None, "--firmware"),
            RedumperFlag::ImageName => FlagSpec::text(None, "--image-name"),
            RedumperFlag::ImagePath => FlagSpec::text(None, "--image-path"),
            RedumperFlag::SkipRanges => FlagSpec::text(None, "--skip"),
        }
    }

    fn command_spec(command: RedumperCommand) -> CommandSpec {
        match command {
            RedumperCommand::Cd => CommandSpec::standalone("cd", &["cd"], Arity::None),
            RedumperCommand::Dvd => CommandSpec::standalone("dvd", &["dvd"], Arity::None),
            RedumperCommand::Bd => CommandSpec::standalone("bd", &["bd"], Arity::None),
            RedumperCommand::Sacd => CommandSpec::standalone("sacd", &["sacd"], Arity::None),
            RedumperCommand::Dump => CommandSpec::standalone("dump", &["dump"], Arity::None),
            RedumperCommand::Refine => CommandSpec::standalone("refine", &["refine"], Arity::None),
            RedumperCommand::Split => CommandSpec::standalone("split", &["split"], Arity::None),
            RedumperCommand::Hash => CommandSpec::standalone("hash", &["hash"], Arity::None),
            RedumperCommand::Info => CommandSpec::standalone("info", &["info"], Arity::None),
            RedumperCommand::Eject => CommandSpec::standalone("eject", &["eject"], Arity::None),
            RedumperCommand::Skeleton => CommandSpec::standalone("skeleton", &["skeleton"], Arity::None),
        }
    }

    fn supports(command: RedumperCommand, flag: RedumperFlag) -> bool {
        use RedumperFlag::*;
        match command {
            RedumperCommand::Cd
            | RedumperCommand::Dvd
            | RedumperCommand::Bd
            | RedumperCommand::Sacd
            | RedumperCommand::Dump => matches!(
                flag,
                AsusSkipLeadout
                    | ForceQToc
                    | Iso9660Trim
                    | Overwrite
                    | PlextorSkipLeadin
                    | DriveC2Shift
                    | DriveReadOffset
                    | LeadinRetries
                    | Retries
                    | Speed
                    | Drive
                    | DriveReadMethod
                    | DriveSectorOrder
                    | DriveType
                    | Firmware
                    | ImageName
                    | ImagePath
                    | SkipRanges
            ),
            RedumperCommand::Refine => matches!(
                flag,
                RefineSubchannel
                    | DriveC2Shift
                    | DriveReadOffset
                    | LeadinRetries
                    | Retries
                    | Speed
                    | Drive
                    | DriveReadMethod
                    | DriveSectorOrder
                    | DriveType
                    | ImageName
                    | ImagePath
            ),
            RedumperCommand::Split => {
                matches!(flag, ForceQToc | ForceSplit | LeaveUnchanged | ImageName | ImagePath)
            }
            RedumperCommand::Hash | RedumperCommand::Info | RedumperCommand::Skeleton => {
                matches!(flag, ImageName | ImagePath)
            }
            RedumperCommand::Eject => matches!(flag, Drive),
        }
    }

    fn is_dump_command(command: RedumperCommand) -> bool {
        matches!(
            command,
            RedumperCommand::Cd
                | RedumperCommand::Dvd
                | RedumperCommand::Bd
                | RedumperCommand::Sacd
                | RedumperCommand::Dump
        )
    }

    fn default_extension(media: MediaType) -> &'static str {
        match media {
            MediaType::Cd | MediaType::Gd => "cue",
            MediaType::Dvd | MediaType::HdDvd | MediaType::BluRay | MediaType::Sacd => "iso",
            _ => "bin",
        }
    }

    fn media_type(state: &ExecutionState<Redumper>) -> Option<MediaType> {
        match state.command()? {
            RedumperCommand::Cd => Some(MediaType::Cd),
            RedumperCommand::Dvd => Some(MediaType::Dvd),
            RedumperCommand::Bd => Some(MediaType::BluRay),
            RedumperCommand::Sacd => Some(MediaType::Sacd),
            _ => None,
        }
    }

    fn derive(job: &DumpJob) -> ExecutionState<Redumper> {
        let mut state = ExecutionState::new();
        state.set_command(Some(dump_command_for(job.media)));

        if job.settings.verbose {
            state.set(RedumperFlag::Verbose);
        }

        state.set_text(RedumperFlag::Drive, job.drive_path.trim_end_matches(&PATH_SEPARATORS[..]));
        let (path, name) = split_output(&job.output_file);
        if let Some(path) = path {
            state.set_text(RedumperFlag::ImagePath, path);
        }
        state.set_text(RedumperFlag::ImageName, name);

        if !supports_media(job.media) {
            log::debug!("redumper: no type-specific defaults for {} / {}", job.system, job.media);
            return state;
        }

        if let Some(speed) = job.drive_speed {
            state.set_i32(RedumperFlag::Speed, speed);
        }
        if let Some(retries) = job.settings.read_retries {
            state.set_i32(RedumperFlag::Retries, retries);
        }

        if job.media == MediaType::Cd {
            state.set(RedumperFlag::PlextorSkipLeadin);
            state.set(RedumperFlag::AsusSkipLeadout);
            if job.system == DiscSystem::SonyPlayStation {
                state.set(RedumperFlag::ForceQToc);
            }
        }

        state
    }

    fn input_path(state: &ExecutionState<Redumper>) -> Option<String> {
        state.text_value(RedumperFlag::Drive).map(str::to_string)
    }

    fn output_path(state: &ExecutionState<Redumper>) -> Option<String> {
        let name = state.text_value(RedumperFlag::ImageName)?;
        match state.text_value(RedumperFlag::ImagePath) {
            Some(path) => Some(format!("{}/{}", path.trim_end_matches(&PATH_SEPARATORS[..]), name)),
            None => Some(name.to_string()),
        }
    }

    fn speed(state: &ExecutionState<Redumper>) -> Option<i32> {
        state.i32_value(RedumperFlag::Speed)
    }
}

/// The dump command encoding the job's media type. Unsupported media falls
/// back to the generic aggregate mode.
fn dump_command_for(media: MediaType) -> RedumperCommand {
    match media {
        MediaType::Dvd | MediaType::HdDvd => RedumperCommand::Dvd,
        MediaType::BluRay => RedumperCommand::Bd,
        MediaType::Sacd => RedumperCommand::Sacd,
        _ => RedumperCommand::Cd,
    }
}

fn supports_media(media: MediaType) -> bool {
    matches!(
        media,
        MediaType::Cd | MediaType::Gd | MediaType::Dvd | MediaType::HdDvd | MediaType::BluRay | MediaType::Sacd
    )
}

/// Split an output file specification into its directory and file name.
fn split_output(output: &str) -> (Option<&str>, &str) {
    match output.rfind(&PATH_SEPARATORS[..]) {
        Some(idx) => (Some(&output[..idx]), &output[idx + 1..]),
        None => (None, output),
    }
}
