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

    tests/redumper.rs

    redumper grammar tests: flag-borne drive/image identity, media inference
    from the dump commands, and the per-media default tables.
*/
mod common;

use common::*;
use dumpfox::{
    prelude::*,
    tools::redumper::{RedumperCommand, RedumperFlag},
};

#[test]
fn derived_cd_dump_generates_expected_text() {
    init();
    let job = DumpJob::new("/dev/sr0", "dumps/game.cue", DiscSystem::SonyPlayStation, MediaType::Cd)
        .with_speed(8)
        .with_settings(JobSettings { read_retries: Some(50), verbose: false, debug: false });
    let state = Redumper::derive(&job);
    assert_eq!(
        state.generate().as_deref(),
        Some(
            "cd --asus-skip-leadout --force-qtoc --plextor-skip-leadin --retries 50 --speed 8 \
             --drive /dev/sr0 --image-name game.cue --image-path dumps"
        )
    );
    assert_round_trip(&state);
}

#[test]
fn media_inference_covers_the_dump_commands_only() {
    init();
    let cases = [
        ("cd", Some(MediaType::Cd)),
        ("dvd", Some(MediaType::Dvd)),
        ("bd", Some(MediaType::BluRay)),
        ("sacd", Some(MediaType::Sacd)),
        ("split", None),
        ("info", None),
    ];
    for (text, expected) in cases {
        let state = ExecutionState::<Redumper>::from_cmdline(text).unwrap();
        assert_eq!(Redumper::media_type(&state), expected, "inference for '{}'", text);
    }
}

#[test]
fn commands_take_no_positional_arguments() {
    init();
    for &command in Redumper::commands() {
        assert_eq!(Redumper::command_spec(command).arity, Arity::None);
    }
    // Anything after the flags is trailing input, not a positional.
    let result = ExecutionState::<Redumper>::from_cmdline("cd /dev/sr0");
    assert!(matches!(result, Err(ParamError::TrailingInput(_))));
}

#[test]
fn accessors_read_the_identity_flags() {
    init();
    let state = ExecutionState::<Redumper>::from_cmdline(
        "cd --speed 16 --drive /dev/sr1 --image-name game.cue --image-path dumps",
    )
    .unwrap();
    assert_eq!(Redumper::input_path(&state).as_deref(), Some("/dev/sr1"));
    assert_eq!(Redumper::output_path(&state).as_deref(), Some("dumps/game.cue"));
    assert_eq!(Redumper::speed(&state), Some(16));
}

#[test]
fn refine_rejects_nothing_but_gates_split_flags() {
    init();
    // --force-split belongs to split; refine records but never re-emits it.
    let state = ExecutionState::<Redumper>::from_cmdline("refine --force-split --retries 10").unwrap();
    assert_eq!(state.command(), Some(RedumperCommand::Refine));
    assert!(state.is_set(RedumperFlag::ForceSplit));
    assert_eq!(state.generate().as_deref(), Some("refine --retries 10"));
}

#[test]
fn extension_tracks_media_type() {
    init();
    assert_eq!(Redumper::default_extension(MediaType::Cd), "cue");
    assert_eq!(Redumper::default_extension(MediaType::Dvd), "iso");
    assert_eq!(Redumper::default_extension(MediaType::HardDisk), "bin");
}

#[test]
fn dump_predicate_covers_the_media_modes() {
    init();
    assert!(Redumper::is_dump_command(RedumperCommand::Cd));
    assert!(Redumper::is_dump_command(RedumperCommand::Dump));
    assert!(!Redumper::is_dump_command(RedumperCommand::Split));
    assert!(!Redumper::is_dump_command(RedumperCommand::Eject));
}

#[test]
fn skip_ranges_travel_as_verbatim_text() {
    init();
    let state = ExecutionState::<Redumper>::from_cmdline("cd --skip 100-200:350-400").unwrap();
    assert_eq!(state.text_value(RedumperFlag::SkipRanges), Some("100-200:350-400"));
    assert_eq!(state.generate().as_deref(), Some("cd --skip 100-200:350-400"));
}
