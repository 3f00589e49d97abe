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

    media.rs

    Disc-system and media-type classifications for dumping jobs.
*/

use std::fmt::{Display, Formatter};

/// The system a disc was published for - not necessarily the system used to
/// dump it. Tools condition their type-specific defaults on the
/// (disc-system, media-type) pair; systems with protected or subchannel-
/// sensitive discs get extra repair flags from the default deriver.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum DiscSystem {
    AppleMacintosh,
    AudioCd,
    BdVideo,
    DvdVideo,
    EnhancedCd,
    HdDvdVideo,
    IbmPcCompatible,
    MicrosoftXbox,
    NintendoGameCube,
    NintendoWii,
    PhilipsCdi,
    SegaDreamcast,
    SegaMegaCd,
    SegaSaturn,
    SonyPlayStation,
    SonyPlayStation2,
    SuperAudioCd,
}

impl DiscSystem {
    /// Systems whose discs carry subchannel-based protection schemes, and so
    /// benefit from subchannel repair during a CD dump.
    pub fn has_subchannel_protection(&self) -> bool {
        matches!(
            self,
            DiscSystem::SonyPlayStation | DiscSystem::SegaMegaCd | DiscSystem::SegaSaturn
        )
    }

    /// Systems whose DVD/BD media carry encrypted video sectors.
    pub fn has_encrypted_video(&self) -> bool {
        matches!(
            self,
            DiscSystem::BdVideo | DiscSystem::DvdVideo | DiscSystem::HdDvdVideo
        )
    }
}

impl Display for DiscSystem {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            DiscSystem::AppleMacintosh => write!(f, "Apple Macintosh"),
            DiscSystem::AudioCd => write!(f, "Audio CD"),
            DiscSystem::BdVideo => write!(f, "BD-Video"),
            DiscSystem::DvdVideo => write!(f, "DVD-Video"),
            DiscSystem::EnhancedCd => write!(f, "Enhanced CD"),
            DiscSystem::HdDvdVideo => write!(f, "HD DVD-Video"),
            DiscSystem::IbmPcCompatible => write!(f, "IBM PC compatible"),
            DiscSystem::MicrosoftXbox => write!(f, "Microsoft Xbox"),
            DiscSystem::NintendoGameCube => write!(f, "Nintendo GameCube"),
            DiscSystem::NintendoWii => write!(f, "Nintendo Wii"),
            DiscSystem::PhilipsCdi => write!(f, "Philips CD-i"),
            DiscSystem::SegaDreamcast => write!(f, "Sega Dreamcast"),
            DiscSystem::SegaMegaCd => write!(f, "Sega Mega CD"),
            DiscSystem::SegaSaturn => write!(f, "Sega Saturn"),
            DiscSystem::SonyPlayStation => write!(f, "Sony PlayStation"),
            DiscSystem::SonyPlayStation2 => write!(f, "Sony PlayStation 2"),
            DiscSystem::SuperAudioCd => write!(f, "Super Audio CD"),
        }
    }
}

/// The physical media type of a dumping job.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, strum::EnumIter)]
pub enum MediaType {
    Cd,
    Gd,
    Dvd,
    HdDvd,
    BluRay,
    Sacd,
    Umd,
    Floppy,
    HardDisk,
}

impl MediaType {
    pub fn is_optical(&self) -> bool {
        !matches!(self, MediaType::Floppy | MediaType::HardDisk)
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            MediaType::Cd => write!(f, "CD-ROM"),
            MediaType::Gd => write!(f, "GD-ROM"),
            MediaType::Dvd => write!(f, "DVD-ROM"),
            MediaType::HdDvd => write!(f, "HD DVD-ROM"),
            MediaType::BluRay => write!(f, "Blu-ray"),
            MediaType::Sacd => write!(f, "Super Audio CD"),
            MediaType::Umd => write!(f, "UMD"),
            MediaType::Floppy => write!(f, "Floppy disk"),
            MediaType::HardDisk => write!(f, "Hard disk"),
        }
    }
}
