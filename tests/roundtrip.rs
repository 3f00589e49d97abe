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

    tests/roundtrip.rs

    Engine-level tests: the round-trip law, the phase machine's failure
    modes, and the generation/validation contracts shared by every grammar.
*/
mod common;

use common::*;
use dumpfox::{prelude::*, tools::aaru::{AaruCommand, AaruFlag}};

#[test]
fn generate_emits_command_speed_and_positionals() {
    init();
    let job = DumpJob::new("D:\\", "image.iso", DiscSystem::IbmPcCompatible, MediaType::Cd).with_speed(8);
    let state = Aaru::derive(&job);

    // Booleans in declaration order, then the Int8 speed flag, then the
    // device path with its trailing separator trimmed, then the quoted
    // output path.
    assert_eq!(
        state.generate().as_deref(),
        Some("media dump --fix-offset --trim --speed 8 D: \"image.iso\"")
    );
}

#[test]
fn parse_reproduces_the_derived_state() {
    init();
    let state =
        ExecutionState::<Aaru>::from_cmdline("media dump --fix-offset --trim --speed 8 D: \"image.iso\"").unwrap();
    assert_eq!(state.command(), Some(AaruCommand::MediaDump));
    assert_eq!(Aaru::speed(&state), Some(8));
    assert_eq!(state.input_path(), Some("D:"));
    assert_eq!(state.output_path(), Some("image.iso"));
    assert!(state.is_set(AaruFlag::Trim));
    assert!(state.is_set(AaruFlag::FixOffset));
}

#[test]
fn derived_states_round_trip() {
    init();
    let systems = [
        (DiscSystem::IbmPcCompatible, MediaType::Cd),
        (DiscSystem::SonyPlayStation, MediaType::Cd),
        (DiscSystem::DvdVideo, MediaType::Dvd),
        (DiscSystem::BdVideo, MediaType::BluRay),
        (DiscSystem::IbmPcCompatible, MediaType::Floppy),
        (DiscSystem::SuperAudioCd, MediaType::Sacd),
    ];
    for (system, media) in systems {
        let job = DumpJob::new("D:\\", "image.bin", system, media)
            .with_speed(8)
            .with_settings(JobSettings {
                read_retries: Some(20),
                verbose: true,
                debug: false,
            });
        assert_round_trip(&Aaru::derive(&job));
        assert_round_trip(&Redumper::derive(&job));
    }
}

#[test]
fn setter_mutations_round_trip() {
    init();
    let job = DumpJob::new("D:\\", "image.iso", DiscSystem::IbmPcCompatible, MediaType::Cd);
    let mut state = Aaru::derive(&job);
    state.set(AaruFlag::Force);
    state.set(AaruFlag::Persistent);
    state.set_i32(AaruFlag::RetryPasses, 50);
    state.set_i64(AaruFlag::Skip, 512);
    state.set_text(AaruFlag::Subchannel, "any");
    state.set_text(AaruFlag::Options, "a path with spaces");
    assert_round_trip(&state);
}

#[test]
fn empty_text_value_round_trips() {
    init();
    let job = DumpJob::new("D:\\", "image.iso", DiscSystem::IbmPcCompatible, MediaType::Cd);
    let mut state = Aaru::derive(&job);
    state.set_text(AaruFlag::Subchannel, "");
    // The empty value token is quoted; an unquoted one would vanish on
    // re-tokenization and let the flag swallow the device path.
    assert_eq!(
        state.generate().as_deref(),
        Some("media dump --fix-offset --trim --subchannel \"\" D: \"image.iso\"")
    );
    assert_round_trip(&state);
}

#[test]
fn trailing_token_fails_the_parse() {
    init();
    let result = ExecutionState::<Aaru>::from_cmdline("media dump D: \"image.iso\" extra");
    assert!(matches!(result, Err(ParamError::TrailingInput(_))));
}

#[test]
fn missing_positional_fails_the_parse() {
    init();
    let result = ExecutionState::<Aaru>::from_cmdline("media dump D:");
    assert!(matches!(result, Err(ParamError::MissingPositional)));
}

#[test]
fn unresolvable_command_fails_the_parse() {
    init();
    assert!(matches!(
        ExecutionState::<Aaru>::from_cmdline("--verbose frobnicate"),
        Err(ParamError::UnknownCommand)
    ));
    assert!(matches!(ExecutionState::<Aaru>::from_cmdline(""), Err(ParamError::UnknownCommand)));
}

#[test]
fn generate_without_a_command_is_absent() {
    init();
    let state = ExecutionState::<Aaru>::new();
    assert_eq!(state.generate(), None);
}

#[test]
fn generate_without_required_positionals_is_absent() {
    init();
    let mut state = ExecutionState::<Aaru>::new();
    state.set_command(Some(AaruCommand::MediaDump));
    state.set_input_path("D:");
    // Output image path still missing.
    assert_eq!(state.generate(), None);
}

#[test]
fn duplicate_boolean_is_emitted_once() {
    init();
    let state = ExecutionState::<Aaru>::from_cmdline("media dump --trim --trim D: \"image.iso\"").unwrap();
    let text = state.generate().unwrap();
    assert_eq!(text.matches("--trim").count(), 1);
}

#[test]
fn out_of_matrix_flag_is_recorded_but_never_re_emitted() {
    init();
    // --trim is not in image info's support matrix; validation records it,
    // generation drops it.
    let state = ExecutionState::<Aaru>::from_cmdline("image info --trim \"disc.aaruf\"").unwrap();
    assert!(state.is_set(AaruFlag::Trim));
    assert_eq!(state.generate().as_deref(), Some("image info \"disc.aaruf\""));
}

#[test]
fn unparseable_numeric_records_presence_with_unset_value() {
    init();
    let state = ExecutionState::<Aaru>::from_cmdline("media dump --speed fast D: \"image.iso\"").unwrap();
    assert!(state.is_set(AaruFlag::Speed));
    assert_eq!(Aaru::speed(&state), None);
    // The incomplete flag is withheld from generation.
    assert_eq!(state.generate().as_deref(), Some("media dump D: \"image.iso\""));
}

#[test]
fn block_count_flag_accepts_the_literal_all() {
    init();
    let state = ExecutionState::<Aaru>::from_cmdline("image decode --length all \"disc.aaruf\"").unwrap();
    assert_eq!(state.block_count(AaruFlag::Length), Some(BlockCount::All));
    assert_eq!(state.generate().as_deref(), Some("image decode --length all \"disc.aaruf\""));

    let state = ExecutionState::<Aaru>::from_cmdline("image decode --length 270000 \"disc.aaruf\"").unwrap();
    assert_eq!(state.block_count(AaruFlag::Length), Some(BlockCount::Count(270000)));
}

#[test]
fn switching_commands_resets_flag_state() {
    init();
    let mut state = ExecutionState::<Aaru>::from_cmdline("media dump --trim D: \"image.iso\"").unwrap();
    state.set_command(Some(AaruCommand::ImageInfo));
    assert!(!state.is_set(AaruFlag::Trim));
}

#[test]
fn failed_revalidation_resets_the_active_command() {
    init();
    let mut state = Aaru::derive(&DumpJob::new("D:\\", "image.iso", DiscSystem::IbmPcCompatible, MediaType::Cd));
    assert!(state.generate().is_some());
    assert!(state.set_cmdline("media dump D: \"image.iso\" trailing garbage").is_err());
    assert_eq!(state.command(), None);
    assert_eq!(state.generate(), None);
}

#[test]
fn value_alias_at_end_of_input_does_not_match() {
    init();
    // "--speed" with no following token cannot consume a value; it is left
    // unmatched and surfaces as trailing input.
    let result = ExecutionState::<Aaru>::from_cmdline("device list --speed");
    assert!(matches!(result, Err(ParamError::TrailingInput(_))));
}

#[test]
fn precommand_flags_parse_before_the_command_and_lead_generation() {
    init();
    let state = ExecutionState::<Aaru>::from_cmdline("-v --debug media dump D: \"image.iso\"").unwrap();
    assert!(state.is_set(AaruFlag::Verbose));
    assert!(state.is_set(AaruFlag::Debug));
    // Re-emission is in declaration order, long aliases only.
    assert_eq!(state.generate().as_deref(), Some("--debug --verbose media dump D: \"image.iso\""));
}

#[test]
fn quoted_paths_with_whitespace_survive_the_round_trip() {
    init();
    let job = DumpJob::new("\\\\.\\My Drive\\", "my dumps/disc image.iso", DiscSystem::AudioCd, MediaType::Cd);
    let state = Aaru::derive(&job);
    let text = state.generate().unwrap();
    assert!(text.contains("\"\\\\.\\My Drive\""));
    assert!(text.contains("\"my dumps/disc image.iso\""));
    assert_round_trip(&state);
}
