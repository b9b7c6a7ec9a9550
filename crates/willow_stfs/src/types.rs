//! Base types for structure of STFS packages.

use binrw::{binread, helpers::read_u24, BinRead, BinResult};
use derive_more::derive::Display;
use std::io::SeekFrom;
use widestring::U16CString;

use crate::error::{Error, Result};

/// Package signature, which also identifies the signing scheme
#[derive(BinRead, Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StfsMagic {
    /// Signed by a console
    #[br(magic = b"CON ")]
    #[display("CON")]
    Con,

    /// Signed by Microsoft, distributed outside of Xbox Live
    #[br(magic = b"PIRS")]
    #[display("PIRS")]
    Pirs,

    /// Signed by Microsoft, distributed over Xbox Live
    #[br(magic = b"LIVE")]
    #[display("LIVE")]
    Live,
}

impl StfsMagic {
    /// Identify the signature at the start of `data`
    pub fn from_bytes(data: &[u8]) -> Option<StfsMagic> {
        match data.get(..4)? {
            b"CON " => Some(StfsMagic::Con),
            b"PIRS" => Some(StfsMagic::Pirs),
            b"LIVE" => Some(StfsMagic::Live),
            _ => None,
        }
    }

    /// The raw signature bytes
    pub const fn as_bytes(&self) -> &'static [u8; 4] {
        match self {
            StfsMagic::Con => b"CON ",
            StfsMagic::Pirs => b"PIRS",
            StfsMagic::Live => b"LIVE",
        }
    }
}

/// Signing data found right after the signature
///
/// The contents are kept as read, nothing here is verified.
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(import(magic: StfsMagic))]
pub enum Certificate {
    /// Console signed packages carry the console's certificate followed by the package signature
    #[br(pre_assert(magic == StfsMagic::Con))]
    Console {
        public_key_size: u16,
        console_id: [u8; 5],
        part_number: [u8; 0x14],
        console_type: u8,
        date: [u8; 8],
        /// Public key, certificate signature and package signature (0x28..0x22C)
        #[br(count = 0x204)]
        blob: Vec<u8>,
    },

    /// Packages signed by Microsoft only carry the package signature
    Remote {
        #[br(count = 0x100)]
        signature: Vec<u8>,
    },
}

/// Episode information present in metadata version 2
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
pub struct SeriesInfo {
    pub series_id: [u8; 0x10],
    pub season_id: [u8; 0x10],
    pub season_number: u16,
    pub episode_number: u16,
}

/// Read a null padded UTF-16 field of `units` code units
#[binrw::parser(reader, endian)]
fn utf16_text(units: usize) -> BinResult<String> {
    let raw = (0..units)
        .map(|_| u16::read_options(reader, endian, ()))
        .collect::<BinResult<Vec<u16>>>()?;
    Ok(U16CString::from_vec_truncate(raw).to_string_lossy())
}

/// Number of languages in the localized display name and description tables
pub const LOCALE_COUNT: usize = 18;

/// Read one null padded 0x80 byte entry per language
#[binrw::parser(reader, endian)]
fn localized_text() -> BinResult<Vec<String>> {
    (0..LOCALE_COUNT)
        .map(|_| utf16_text(reader, endian, (0x40,)))
        .collect()
}

/// Kind of content carried by a package
#[derive(Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    #[display("saved game")]
    SavedGame,
    #[display("marketplace content")]
    MarketplaceContent,
    #[display("publisher")]
    Publisher,
    #[display("Xbox 360 title")]
    Xbox360Title,
    #[display("IPTV pause buffer")]
    IptvPauseBuffer,
    #[display("installed game")]
    InstalledGame,
    #[display("Xbox original game")]
    XboxOriginalGame,
    #[display("avatar item")]
    AvatarItem,
    #[display("profile")]
    Profile,
    #[display("gamer picture")]
    GamerPicture,
    #[display("theme")]
    Theme,
    #[display("cache file")]
    Cache,
    #[display("storage download")]
    StorageDownload,
    #[display("Xbox saved game")]
    XboxSavedGame,
    #[display("Xbox download")]
    XboxDownload,
    #[display("game demo")]
    GameDemo,
    #[display("video")]
    Video,
    #[display("game title")]
    GameTitle,
    #[display("installer")]
    Installer,
    #[display("game trailer")]
    GameTrailer,
    #[display("arcade title")]
    ArcadeTitle,
    #[display("XNA")]
    Xna,
    #[display("license store")]
    LicenseStore,
    #[display("movie")]
    Movie,
    #[display("TV")]
    Tv,
    #[display("music video")]
    MusicVideo,
    #[display("game video")]
    GameVideo,
    #[display("podcast video")]
    PodcastVideo,
    #[display("viral video")]
    ViralVideo,
    #[display("community game")]
    CommunityGame,
    #[display("unknown ({_0:#010X})")]
    Other(u32),
}

impl ContentType {
    const KNOWN: [(u32, ContentType); 30] = [
        (0x0000_0001, ContentType::SavedGame),
        (0x0000_0002, ContentType::MarketplaceContent),
        (0x0000_0003, ContentType::Publisher),
        (0x0000_1000, ContentType::Xbox360Title),
        (0x0000_2000, ContentType::IptvPauseBuffer),
        (0x0000_4000, ContentType::InstalledGame),
        (0x0000_5000, ContentType::XboxOriginalGame),
        (0x0000_9000, ContentType::AvatarItem),
        (0x0001_0000, ContentType::Profile),
        (0x0002_0000, ContentType::GamerPicture),
        (0x0003_0000, ContentType::Theme),
        (0x0004_0000, ContentType::Cache),
        (0x0005_0000, ContentType::StorageDownload),
        (0x0006_0000, ContentType::XboxSavedGame),
        (0x0007_0000, ContentType::XboxDownload),
        (0x0008_0000, ContentType::GameDemo),
        (0x0009_0000, ContentType::Video),
        (0x000A_0000, ContentType::GameTitle),
        (0x000B_0000, ContentType::Installer),
        (0x000C_0000, ContentType::GameTrailer),
        (0x000D_0000, ContentType::ArcadeTitle),
        (0x000E_0000, ContentType::Xna),
        (0x000F_0000, ContentType::LicenseStore),
        (0x0010_0000, ContentType::Movie),
        (0x0020_0000, ContentType::Tv),
        (0x0030_0000, ContentType::MusicVideo),
        (0x0040_0000, ContentType::GameVideo),
        (0x0050_0000, ContentType::PodcastVideo),
        (0x0060_0000, ContentType::ViralVideo),
        (0x0200_0000, ContentType::CommunityGame),
    ];

    /// The value stored in the header
    pub fn raw(&self) -> u32 {
        match self {
            ContentType::Other(raw) => *raw,
            known => ContentType::KNOWN
                .iter()
                .find(|(_, content)| content == known)
                .map(|(raw, _)| *raw)
                .unwrap_or_default(),
        }
    }
}

impl From<u32> for ContentType {
    fn from(raw: u32) -> Self {
        ContentType::KNOWN
            .iter()
            .find(|(value, _)| *value == raw)
            .map(|(_, content)| *content)
            .unwrap_or(ContentType::Other(raw))
    }
}

/// Select the hash table geometry from the package's entry id
pub fn table_size_shift(entry_id: u32) -> u8 {
    if ((entry_id.wrapping_add(0xFFF) & 0xF000) >> 12) == 0xB {
        0
    } else {
        1
    }
}

/// STFS package header
///
/// Every field lives at a fixed offset from the start of the package. Values are big endian
/// except for the file table location, which is stored little endian.
#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
#[br(big)]
pub struct StfsHeader {
    pub magic: StfsMagic,

    #[br(args(magic))]
    pub certificate: Certificate,

    #[br(seek_before = SeekFrom::Start(0x22C), count = 0x100)]
    pub license_entries: Vec<u8>,

    /// SHA-1 of the header
    pub content_id: [u8; 0x14],
    pub entry_id: u32,
    #[br(map = |raw: u32| ContentType::from(raw))]
    pub content_type: ContentType,
    pub metadata_version: u32,
    pub content_size: u64,
    pub media_id: u32,
    pub version: u32,
    pub base_version: u32,
    pub title_id: u32,
    pub platform: u8,
    pub executable_type: u8,
    pub disc_number: u8,
    pub disc_in_set: u8,
    pub save_game_id: u32,
    pub console_id: [u8; 5],
    pub profile_id: [u8; 8],

    pub volume_descriptor_size: u8,
    pub reserved: u8,
    pub block_separation: u8,

    /// Number of blocks holding the file table
    #[br(little)]
    pub file_table_block_count: u16,

    /// Logical block where the file table starts
    #[br(little, parse_with = read_u24)]
    pub file_table_block_number: u32,

    pub top_hash_table_hash: [u8; 0x14],
    pub allocated_count: u32,
    pub unallocated_count: u32,
    pub data_file_count: u32,
    pub data_file_size: u64,

    #[br(if(metadata_version == 2), seek_before = SeekFrom::Start(0x3B1))]
    pub series: Option<SeriesInfo>,

    #[br(seek_before = SeekFrom::Start(0x3FD))]
    pub device_id: [u8; 0x14],

    /// Display name in each language, English first
    #[br(seek_before = SeekFrom::Start(0x411), parse_with = localized_text)]
    pub display_names: Vec<String>,

    #[br(calc = display_names.first().cloned().unwrap_or_default())]
    pub display_name: String,

    /// Description in each language, English first
    #[br(seek_before = SeekFrom::Start(0xD11), parse_with = localized_text)]
    pub display_descriptions: Vec<String>,

    #[br(calc = display_descriptions.first().cloned().unwrap_or_default())]
    pub display_description: String,

    #[br(seek_before = SeekFrom::Start(0x1611), parse_with = utf16_text, args(0x40))]
    pub publisher_name: String,

    #[br(parse_with = utf16_text, args(0x40))]
    pub title_name: String,

    pub transfer_flags: u8,
    pub thumbnail_size: u32,
    pub title_image_size: u32,

    #[br(if(thumbnail_size > 0), count = thumbnail_size)]
    pub thumbnail: Vec<u8>,

    #[br(if(metadata_version == 2), seek_before = SeekFrom::Start(0x541A), parse_with = utf16_text, args(0x180))]
    pub additional_display_names: String,

    #[br(if(title_image_size > 0), seek_before = SeekFrom::Start(0x571A), count = title_image_size)]
    pub title_image: Vec<u8>,

    #[br(if(metadata_version == 2), seek_before = SeekFrom::Start(0x941A), parse_with = utf16_text, args(0x180))]
    pub additional_display_descriptions: String,

    /// Derived geometry selector, `0` or `1`
    #[br(calc = table_size_shift(entry_id))]
    pub table_size_shift: u8,
}

/// Allocation state stored in a hash record
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum HashStatus {
    Unused = 0x00,
    Freed = 0x40,
    Old = 0x80,
    Current = 0xC0,
}

/// Which of the two redundant hash tables to consult
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Generation {
    Primary = 0,
    Alternate = 1,
}

/// Hash table record describing one data block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHashRecord {
    /// Logical block the record describes
    pub block: u32,
    /// SHA-1 of the block's contents
    pub hash: [u8; 0x14],
    /// Allocation state, see [`HashStatus`]
    pub status: u8,
    /// Logical block that follows in the chain
    pub next_block: u32,
    /// Physical index of the hash table block the record was read from
    pub table: i64,
    /// Index of the record inside its table
    pub record: u32,
}

impl BlockHashRecord {
    /// Whether the record belongs to a live generation
    pub fn is_live(&self) -> bool {
        self.status >= HashStatus::Old as u8
    }
}

/// Spacing between hash table blocks at each level of the hash tree
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableSpacing {
    pub level1: u32,
    pub level2: u32,
    pub level3: u32,
}

/// Spacing for each value of [`StfsHeader::table_size_shift`]
pub const TABLE_SPACING: [TableSpacing; 2] = [
    TableSpacing {
        level1: 0xAB,
        level2: 0x718F,
        level3: 0xFE7DA,
    },
    TableSpacing {
        level1: 0xAC,
        level2: 0x723A,
        level3: 0xFD00B,
    },
];

/// Raw 0x40 byte file table slot
#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
#[br(big)]
pub(crate) struct FileEntry {
    pub name: [u8; 0x28],
    pub flags: u8,
    #[br(little, parse_with = read_u24)]
    pub block_count: u32,
    #[br(little, parse_with = read_u24, temp)]
    _block_count_copy: u32,
    #[br(little, parse_with = read_u24)]
    pub first_block: u32,
    pub path_index: i16,
    pub size: u32,
    pub update_date: u16,
    pub update_time: u16,
    pub access_date: u16,
    pub access_time: u16,
}

/// A file or directory entry of the package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListing {
    /// Position of the entry in the file table
    pub slot: usize,
    /// Name of the entry
    pub name: Box<str>,
    /// Raw name bytes, including padding
    pub name_raw: Box<[u8]>,
    /// Path from the package root, components joined with `/`
    pub path: Box<str>,
    pub is_directory: bool,
    pub block_count: u32,
    pub first_block: u32,
    /// Slot of the parent directory, `-1` for the root
    pub path_index: i16,
    /// Size of the file in bytes
    pub size: u32,
    pub update_date: u16,
    pub update_time: u16,
    pub access_date: u16,
    pub access_time: u16,
}

impl FileListing {
    pub(crate) fn from_entry(slot: usize, entry: FileEntry) -> Result<FileListing> {
        let name: Vec<u8> = entry.name.iter().copied().filter(|&b| b != 0).collect();
        if name.is_empty() {
            return Err(Error::MalformedRecord { slot });
        }
        let name: Box<str> = String::from_utf8_lossy(&name).into();

        Ok(FileListing {
            slot,
            path: name.clone(),
            name,
            name_raw: entry.name.into(),
            is_directory: entry.flags & 0x80 == 0x80,
            block_count: entry.block_count,
            first_block: entry.first_block,
            path_index: entry.path_index,
            size: entry.size,
            update_date: entry.update_date,
            update_time: entry.update_time,
            access_date: entry.access_date,
            access_time: entry.access_time,
        })
    }
}
