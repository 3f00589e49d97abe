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

    tools/aaru.rs

    The Aaru grammar: command families with abbreviated aliases, a large flag
    catalog spanning all five value kinds, the per-command support matrix,
    and the default deriver for dumping jobs.
*/

use std::sync::OnceLock;

use strum::IntoEnumIterator;

use crate::{
    context::ExecutionState,
    grammar::{Arity, CommandSpec, FamilySpec, FlagSpec, Tool},
    job::DumpJob,
    media::MediaType,
};

/// Marker type implementing the Aaru grammar.
pub struct Aaru;

/// Every flag Aaru accepts, declared in emission order: booleans first
/// (pre-command flags at the head), then the integer kinds by width, then
/// text. Adding a variant without extending the alias and matrix tables below
/// is a compile error.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum AaruFlag {
    // Pre-command flags, legal before any command token.
    Debug,
    Pause,
    Verbose,
    Version,
    Help,
    // Booleans.
    Adler32,
    Crc16,
    Crc32,
    Crc64,
    DiskTags,
    DuplicatedSectors,
    Eject,
    ExtendedAttributes,
    Filesystems,
    FirstPregap,
    FixOffset,
    FixSubchannel,
    FixSubchannelCrc,
    FixSubchannelPosition,
    Force,
    GenerateSubchannels,
    LongFormat,
    LongSectors,
    Md5,
    Metadata,
    Partitions,
    Persistent,
    Private,
    Resume,
    RetrySubchannel,
    SectorTags,
    SeparatedTracks,
    Sha1,
    Sha256,
    SkipCdiReadyHole,
    SpamSum,
    StopOnError,
    StoreEncrypted,
    Tape,
    TitleKeys,
    Trim,
    VerifyDisc,
    VerifySectors,
    WholeDisc,
    // 8-bit integers.
    Speed,
    // 16-bit integers.
    Width,
    // 32-bit integers.
    MediaLastSequence,
    MediaSequence,
    RetryPasses,
    // 64-bit integers.
    BlockSize,
    Count,
    Length,
    MaxBlocks,
    Skip,
    Start,
    // Text.
    Comments,
    Creator,
    DriveManufacturer,
    DriveModel,
    DriveRevision,
    DriveSerial,
    Encoding,
    FormatConvert,
    ImgBurnLog,
    MediaBarcode,
    MediaManufacturer,
    MediaModel,
    MediaPartNumber,
    MediaSerial,
    MediaTitle,
    Namespace,
    Options,
    OutputPrefix,
    ResumeFile,
    Subchannel,
    XmlSidecar,
}

/// Every Aaru command, family groups first, standalone commands last.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum AaruCommand {
    MediaDump,
    MediaInfo,
    MediaScan,
    ImageChecksum,
    ImageCompare,
    ImageConvert,
    ImageCreateSidecar,
    ImageDecode,
    ImageEntropy,
    ImageInfo,
    ImagePrint,
    ImageVerify,
    FilesystemExtract,
    FilesystemInfo,
    FilesystemList,
    DeviceInfo,
    DeviceList,
    DeviceReport,
    Configure,
    Formats,
    ListEncodings,
    ListNamespaces,
    ListOptions,
    Remote,
}

const FAMILIES: [FamilySpec; 4] = [
    FamilySpec { name: "media", aliases: &["media", "m"] },
    FamilySpec { name: "image", aliases: &["image", "i"] },
    FamilySpec { name: "filesystem", aliases: &["filesystem", "fs", "f"] },
    FamilySpec { name: "device", aliases: &["device", "dev"] },
];

const PRECOMMAND_FLAGS: [AaruFlag; 5] = [
    AaruFlag::Debug,
    AaruFlag::Pause,
    AaruFlag::Verbose,
    AaruFlag::Version,
    AaruFlag::Help,
];

impl Tool for Aaru {
    type Flag = AaruFlag;
    type Command = AaruCommand;

    const NAME: &'static str = "aaru";

    fn flags() -> &'static [AaruFlag] {
        static FLAGS: OnceLock<Vec<AaruFlag>> = OnceLock::new();
        FLAGS.get_or_init(|| AaruFlag::iter().collect())
    }

    fn precommand_flags() -> &'static [AaruFlag] {
        &PRECOMMAND_FLAGS
    }

    fn commands() -> &'static [AaruCommand] {
        static COMMANDS: OnceLock<Vec<AaruCommand>> = OnceLock::new();
        COMMANDS.get_or_init(|| AaruCommand::iter().collect())
    }

    fn families() -> &'static [FamilySpec] {
        &FAMILIES
    }

    #[rustfmt::skip]
    fn flag_spec(flag: AaruFlag) -> FlagSpec {
        match flag {
            AaruFlag::Debug => FlagSpec::boolean(Some("-d"), "--debug"),
            AaruFlag::Pause => FlagSpec::boolean(None, "--pause"),
            AaruFlag::Verbose => FlagSpec::boolean(Some("-v"), "--verbose"),
            AaruFlag::Version => FlagSpec::boolean(None, "--version"),
            AaruFlag::Help => FlagSpec::boolean(Some("-h"), "--help"),
            AaruFlag::Adler32 => FlagSpec::boolean(Some("-a"), "--adler32"),
            AaruFlag::Crc16 => FlagSpec::boolean(None, "--crc16"),
            AaruFlag::Crc32 => FlagSpec::boolean(None, "--crc32"),
            AaruFlag::Crc64 => FlagSpec::boolean(None, "--crc64"),
            AaruFlag::DiskTags => FlagSpec::boolean(None, "--disk-tags"),
            AaruFlag::DuplicatedSectors => FlagSpec::boolean(None, "--duplicated-sectors"),
            AaruFlag::Eject => FlagSpec::boolean(None, "--eject"),
            AaruFlag::ExtendedAttributes => FlagSpec::boolean(None, "--xattrs"),
            AaruFlag::Filesystems => FlagSpec::boolean(None, "--filesystems"),
            AaruFlag::FirstPregap => FlagSpec::boolean(None, "--first-pregap"),
            AaruFlag::FixOffset => FlagSpec::boolean(None, "--fix-offset"),
            AaruFlag::FixSubchannel => FlagSpec::boolean(None, "--fix-subchannel"),
            AaruFlag::FixSubchannelCrc => FlagSpec::boolean(None, "--fix-subchannel-crc"),
            AaruFlag::FixSubchannelPosition => FlagSpec::boolean(None, "--fix-subchannel-position"),
            AaruFlag::Force => FlagSpec::boolean(Some("-f"), "--force"),
            AaruFlag::GenerateSubchannels => FlagSpec::boolean(None, "--generate-subchannels"),
            AaruFlag::LongFormat => FlagSpec::boolean(None, "--long-format"),
            AaruFlag::LongSectors => FlagSpec::boolean(None, "--long-sectors"),
            AaruFlag::Md5 => FlagSpec::boolean(Some("-m"), "--md5"),
            AaruFlag::Metadata => FlagSpec::boolean(None, "--metadata"),
            AaruFlag::Partitions => FlagSpec::boolean(None, "--partitions"),
            AaruFlag::Persistent => FlagSpec::boolean(None, "--persistent"),
            AaruFlag::Private => FlagSpec::boolean(None, "--private"),
            AaruFlag::Resume => FlagSpec::boolean(Some("-r"), "--resume"),
            AaruFlag::RetrySubchannel => FlagSpec::boolean(None, "--retry-subchannel"),
            AaruFlag::SectorTags => FlagSpec::boolean(None, "--sector-tags"),
            AaruFlag::SeparatedTracks => FlagSpec::boolean(None, "--separated-tracks"),
            AaruFlag::Sha1 => FlagSpec::boolean(None, "--sha1"),
            AaruFlag::Sha256 => FlagSpec::boolean(None, "--sha256"),
            AaruFlag::SkipCdiReadyHole => FlagSpec::boolean(None, "--skip-cdiready-hole"),
            AaruFlag::SpamSum => FlagSpec::boolean(None, "--spamsum"),
            AaruFlag::StopOnError => FlagSpec::boolean(None, "--stop-on-error"),
            AaruFlag::StoreEncrypted => FlagSpec::boolean(None, "--store-encrypted"),
            AaruFlag::Tape => FlagSpec::boolean(Some("-t"), "--tape"),
            AaruFlag::TitleKeys => FlagSpec::boolean(None, "--title-keys"),
            AaruFlag::Trim => FlagSpec::boolean(None, "--trim"),
            AaruFlag::VerifyDisc => FlagSpec::boolean(None, "--verify-disc"),
            AaruFlag::VerifySectors => FlagSpec::boolean(None, "--verify-sectors"),
            AaruFlag::WholeDisc => FlagSpec::boolean(Some("-w"), "--whole-disc"),
            AaruFlag::Speed => FlagSpec::int8(None, "--speed"),
            AaruFlag::Width => FlagSpec::int16(None, "--width"),
            AaruFlag::MediaLastSequence => FlagSpec::int32(None, "--media-lastsequence"),
            AaruFlag::MediaSequence => FlagSpec::int32(None, "--media-sequence"),
            AaruFlag::RetryPasses => FlagSpec::int32(Some("-p"), "--retry-passes"),
            AaruFlag::BlockSize => FlagSpec::int64(Some("-b"), "--block-size"),
            AaruFlag::Count => FlagSpec::int64(Some("-c"), "--count"),
            AaruFlag::Length => FlagSpec::block_count(Some("-l"), "--length"),
            AaruFlag::MaxBlocks => FlagSpec::int64(None, "--max-blocks"),
            AaruFlag::Skip => FlagSpec::int64(Some("-k"), "--skip"),
            AaruFlag::Start => FlagSpec::int64(Some("-s"), "--start"),
            AaruFlag::Comments => FlagSpec::text(None, "--comments"),
            AaruFlag::Creator => FlagSpec::text(None, "--creator"),
            AaruFlag::DriveManufacturer => FlagSpec::text(None, "--drive-manufacturer"),
            AaruFlag::DriveModel => FlagSpec::text(None, "--drive-model"),
            AaruFlag::DriveRevision => FlagSpec::text(None, "--drive-revision"),
            AaruFlag::DriveSerial => FlagSpec::text(None, "--drive-serial"),
            AaruFlag::Encoding => FlagSpec::text(Some("-e"), "--encoding"),
            AaruFlag::FormatConvert => FlagSpec::text(None, "--format"),
            AaruFlag::ImgBurnLog => FlagSpec::text(None, "--ibg-log"),
            AaruFlag::MediaBarcode => FlagSpec::text(None, "--media-barcode"),
            AaruFlag::MediaManufacturer => FlagSpec::text(None, "--media-manufacturer"),
            AaruFlag::MediaModel => FlagSpec::text(None, "--media-model"),
            AaruFlag::MediaPartNumber => FlagSpec::text(None, "--media-partnumber"),
            AaruFlag::MediaSerial => FlagSpec::text(None, "--media-serial"),
            AaruFlag::MediaTitle => FlagSpec::text(None, "--media-title"),
            AaruFlag::Namespace => FlagSpec::text(Some("-n"), "--namespace"),
            AaruFlag::Options => FlagSpec::text(Some("-O"), "--options"),
            AaruFlag::OutputPrefix => FlagSpec::text(None, "--output-prefix"),
            AaruFlag::ResumeFile => FlagSpec::text(None, "--resume-file"),
            AaruFlag::Subchannel => FlagSpec::text(None, "--subchannel"),
            AaruFlag::XmlSidecar => FlagSpec::text(Some("-x"), "--cicm-xml"),
        }
    }

    #[rustfmt::skip]
    fn command_spec(command: AaruCommand) -> CommandSpec {
        match command {
            AaruCommand::MediaDump => CommandSpec::in_family("media", "dump", &["dump"], Arity::DeviceAndImage),
            AaruCommand::MediaInfo => CommandSpec::in_family("media", "info", &["info"], Arity::Device),
            AaruCommand::MediaScan => CommandSpec::in_family("media", "scan", &["scan"], Arity::Device),
            AaruCommand::ImageChecksum => CommandSpec::in_family("image", "checksum", &["checksum", "chk"], Arity::Image),
            AaruCommand::ImageCompare => CommandSpec::in_family("image", "compare", &["compare", "cmp"], Arity::ImagePair),
            AaruCommand::ImageConvert => CommandSpec::in_family("image", "convert", &["convert"], Arity::ImagePair),
            AaruCommand::ImageCreateSidecar => CommandSpec::in_family("image", "create-sidecar", &["create-sidecar"], Arity::Image),
            AaruCommand::ImageDecode => CommandSpec::in_family("image", "decode", &["decode"], Arity::Image),
            AaruCommand::ImageEntropy => CommandSpec::in_family("image", "entropy", &["entropy"], Arity::Image),
            AaruCommand::ImageInfo => CommandSpec::in_family("image", "info", &["info"], Arity::Image),
            AaruCommand::ImagePrint => CommandSpec::in_family("image", "print", &["print"], Arity::Image),
            AaruCommand::ImageVerify => CommandSpec::in_family("image", "verify", &["verify"], Arity::Image),
            AaruCommand::FilesystemExtract => CommandSpec::in_family("filesystem", "extract", &["extract"], Arity::Image),
            AaruCommand::FilesystemInfo => CommandSpec::in_family("filesystem", "info", &["info"], Arity::Image),
            AaruCommand::FilesystemList => CommandSpec::in_family("filesystem", "list", &["list", "ls"], Arity::Image),
            AaruCommand::DeviceInfo => CommandSpec::in_family("device", "info", &["info"], Arity::Device),
            AaruCommand::DeviceList => CommandSpec::in_family("device", "list", &["list"], Arity::None),
            AaruCommand::DeviceReport => CommandSpec::in_family("device", "report", &["report"], Arity::Device),
            AaruCommand::Configure => CommandSpec::standalone("configure", &["configure"], Arity::None),
            AaruCommand::Formats => CommandSpec::standalone("formats", &["formats"], Arity::None),
            AaruCommand::ListEncodings => CommandSpec::standalone("list-encodings", &["list-encodings"], Arity::None),
            AaruCommand::ListNamespaces => CommandSpec::standalone("list-namespaces", &["list-namespaces"], Arity::None),
            AaruCommand::ListOptions => CommandSpec::standalone("list-options", &["list-options"], Arity::None),
            AaruCommand::Remote => CommandSpec::standalone("remote", &["remote"], Arity::RemoteHost),
        }
    }

    fn supports(command: AaruCommand, flag: AaruFlag) -> bool {
        use AaruFlag::*;
        match command {
            AaruCommand::MediaDump => matches!(
                flag,
                Eject
                    | FirstPregap
                    | FixOffset
                    | FixSubchannel
                    | FixSubchannelCrc
                    | FixSubchannelPosition
                    | Force
                    | GenerateSubchannels
                    | Metadata
                    | Persistent
                    | Private
                    | Resume
                    | RetrySubchannel
                    | SkipCdiReadyHole
                    | StopOnError
                    | StoreEncrypted
                    | TitleKeys
                    | Trim
                    | Speed
                    | RetryPasses
                    | MaxBlocks
                    | Skip
                    | Encoding
                    | Options
                    | ResumeFile
                    | Subchannel
                    | XmlSidecar
            ),
            AaruCommand::MediaInfo => matches!(flag, OutputPrefix),
            AaruCommand::MediaScan => matches!(flag, ImgBurnLog),
            AaruCommand::ImageChecksum => matches!(
                flag,
                Adler32 | Crc16 | Crc32 | Crc64 | Md5 | Sha1 | Sha256 | SpamSum | SeparatedTracks | WholeDisc
            ),
            AaruCommand::ImageCompare => false,
            AaruCommand::ImageConvert => matches!(
                flag,
                Force
                    | BlockSize
                    | Count
                    | MediaLastSequence
                    | MediaSequence
                    | Comments
                    | Creator
                    | DriveManufacturer
                    | DriveModel
                    | DriveRevision
                    | DriveSerial
                    | FormatConvert
                    | MediaBarcode
                    | MediaManufacturer
                    | MediaModel
                    | MediaPartNumber
                    | MediaSerial
                    | MediaTitle
                    | Options
                    | XmlSidecar
            ),
            AaruCommand::ImageCreateSidecar => matches!(flag, Tape | BlockSize | Encoding),
            AaruCommand::ImageDecode => matches!(flag, DiskTags | SectorTags | Length | Start),
            AaruCommand::ImageEntropy => matches!(flag, DuplicatedSectors | SeparatedTracks | WholeDisc),
            AaruCommand::ImageInfo => false,
            AaruCommand::ImagePrint => matches!(flag, LongSectors | Width | Length | Start),
            AaruCommand::ImageVerify => matches!(flag, VerifyDisc | VerifySectors),
            AaruCommand::FilesystemExtract => matches!(flag, ExtendedAttributes | Encoding | Namespace | Options),
            AaruCommand::FilesystemInfo => matches!(flag, Filesystems | Partitions | Encoding),
            AaruCommand::FilesystemList => matches!(flag, LongFormat | Encoding | Namespace | Options),
            AaruCommand::DeviceInfo => matches!(flag, OutputPrefix),
            AaruCommand::DeviceList | AaruCommand::DeviceReport => false,
            AaruCommand::Configure
            | AaruCommand::Formats
            | AaruCommand::ListEncodings
            | AaruCommand::ListNamespaces
            | AaruCommand::ListOptions
            | AaruCommand::Remote => false,
        }
    }

    fn is_dump_command(command: AaruCommand) -> bool {
        matches!(command, AaruCommand::MediaDump)
    }

    fn default_extension(_media: MediaType) -> &'static str {
        // Aaru dumps into its own container format regardless of media.
        "aaruf"
    }

    fn media_type(_state: &ExecutionState<Aaru>) -> Option<MediaType> {
        // The Aaru grammar does not encode the media type; `media dump` is
        // media-agnostic.
        None
    }

    fn derive(job: &DumpJob) -> ExecutionState<Aaru> {
        let mut state = ExecutionState::new();
        state.set_command(Some(AaruCommand::MediaDump));
        state.set_input_path(&job.drive_path);
        state.set_output_path(&job.output_file);

        if job.settings.debug {
            state.set(AaruFlag::Debug);
        }
        if job.settings.verbose {
            state.set(AaruFlag::Verbose);
        }

        if !supports_media(job.media) {
            log::debug!("aaru: no type-specific defaults for {} / {}", job.system, job.media);
            return state;
        }

        if let Some(speed) = job.drive_speed {
            state.set_i8(AaruFlag::Speed, speed.clamp(0, i8::MAX as i32) as i8);
        }
        if let Some(retries) = job.settings.read_retries {
            state.set_i32(AaruFlag::RetryPasses, retries);
        }

        match job.media {
            MediaType::Cd | MediaType::Gd => {
                state.set(AaruFlag::Trim);
                state.set(AaruFlag::FixOffset);
                if job.system.has_subchannel_protection() {
                    state.set(AaruFlag::RetrySubchannel);
                    state.set(AaruFlag::FixSubchannel);
                }
            }
            MediaType::Dvd | MediaType::HdDvd | MediaType::BluRay => {
                state.set(AaruFlag::StoreEncrypted);
                if job.system.has_encrypted_video() {
                    state.set(AaruFlag::TitleKeys);
                }
            }
            MediaType::Floppy | MediaType::HardDisk => {}
            _ => {}
        }

        state
    }

    fn input_path(state: &ExecutionState<Aaru>) -> Option<String> {
        state.input_path().map(str::to_string)
    }

    fn output_path(state: &ExecutionState<Aaru>) -> Option<String> {
        state.output_path().map(str::to_string)
    }

    fn speed(state: &ExecutionState<Aaru>) -> Option<i32> {
        state.i8_value(AaruFlag::Speed).map(i32::from)
    }
}

/// Media types Aaru can dump. Jobs for anything else derive a state with no
/// type-specific defaults.
fn supports_media(media: MediaType) -> bool {
    matches!(
        media,
        MediaType::Cd
            | MediaType::Gd
            | MediaType::Dvd
            | MediaType::HdDvd
            | MediaType::BluRay
            | MediaType::Floppy
            | MediaType::HardDisk
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::DiscSystem;
    use std::collections::HashSet;

    #[test]
    fn aliases_are_unique() {
        let mut seen = HashSet::new();
        for &flag in Aaru::flags() {
            let spec = Aaru::flag_spec(flag);
            assert!(seen.insert(spec.long), "duplicate long alias {}", spec.long);
            if let Some(short) = spec.short {
                assert!(seen.insert(short), "duplicate short alias {}", short);
            }
        }
    }

    #[test]
    fn precommand_flags_are_outside_every_matrix_row() {
        for &command in Aaru::commands() {
            for &flag in Aaru::precommand_flags() {
                assert!(!Aaru::supports(command, flag), "{:?} supports precommand {:?}", command, flag);
            }
        }
    }

    #[test]
    fn family_commands_resolve_to_two_word_canonical_text() {
        let spec = Aaru::command_spec(AaruCommand::MediaDump);
        assert_eq!(spec.canonical_text(), "media dump");
        let spec = Aaru::command_spec(AaruCommand::Formats);
        assert_eq!(spec.canonical_text(), "formats");
    }

    #[test]
    fn cd_defaults_add_trim_and_offset_fix() {
        let job = DumpJob::new("D:\\", "disc.aaruf", DiscSystem::IbmPcCompatible, MediaType::Cd);
        let state = Aaru::derive(&job);
        assert!(state.is_set(AaruFlag::Trim));
        assert!(state.is_set(AaruFlag::FixOffset));
        assert!(!state.is_set(AaruFlag::RetrySubchannel));
        assert!(!state.is_set(AaruFlag::StoreEncrypted));
    }

    #[test]
    fn subchannel_protected_systems_add_subchannel_repair() {
        let job = DumpJob::new("D:\\", "disc.aaruf", DiscSystem::SonyPlayStation, MediaType::Cd);
        let state = Aaru::derive(&job);
        assert!(state.is_set(AaruFlag::RetrySubchannel));
        assert!(state.is_set(AaruFlag::FixSubchannel));
    }

    #[test]
    fn dvd_video_defaults_add_encryption_handling() {
        let job = DumpJob::new("D:\\", "disc.aaruf", DiscSystem::DvdVideo, MediaType::Dvd);
        let state = Aaru::derive(&job);
        assert!(state.is_set(AaruFlag::StoreEncrypted));
        assert!(state.is_set(AaruFlag::TitleKeys));
    }

    #[test]
    fn unsupported_media_derives_without_type_specific_flags() {
        let job = DumpJob::new("D:\\", "disc.aaruf", DiscSystem::SuperAudioCd, MediaType::Sacd).with_speed(8);
        let state = Aaru::derive(&job);
        assert_eq!(state.command(), Some(AaruCommand::MediaDump));
        assert!(!state.is_set(AaruFlag::Speed));
        assert!(!state.is_set(AaruFlag::Trim));
        assert_eq!(Aaru::speed(&state), None);
    }
}
