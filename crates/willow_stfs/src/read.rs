//! Types for reading STFS packages
//!

use binrw::BinRead;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, trace, warn};
use willow_io::{ByteOrder, Cursor};

use crate::{
    error::{Error, FileNotFoundError, Result},
    types::{
        BlockHashRecord, FileEntry, FileListing, Generation, HashStatus, StfsHeader, StfsMagic,
        TABLE_SPACING,
    },
};

/// Smallest buffer that can hold every fixed header field
pub const HEADER_SIZE: usize = 0x971A;

/// Size of a data or hash table block
pub const BLOCK_SIZE: usize = 0x1000;

/// Offset of physical block `0`
pub const DATA_START: usize = 0xC000;

/// Number of data blocks covered by one level 0 hash table
pub const BLOCKS_PER_TABLE: u32 = 0xAA;

/// Number of data blocks covered by one level 1 hash table
pub const BLOCKS_PER_LEVEL1_TABLE: u32 = 0x70E4;

/// Size of a hash table record
pub const HASH_RECORD_SIZE: usize = 0x18;

/// Size of a file table slot
pub const FILE_ENTRY_SIZE: usize = 0x40;

/// Translate a logical data block into its physical block index
///
/// Hash table blocks are interleaved with the data, one every [`BLOCKS_PER_TABLE`] blocks and
/// again every [`BLOCKS_PER_LEVEL1_TABLE`] blocks, so the physical index grows faster than the
/// logical one.
pub fn fix_block_number(block: u32, table_size_shift: u8) -> u32 {
    let mut adjust = 0;

    if block >= BLOCKS_PER_TABLE {
        adjust += (block / BLOCKS_PER_TABLE + 1) << table_size_shift;
    }
    if block >= BLOCKS_PER_LEVEL1_TABLE {
        adjust += (block / BLOCKS_PER_LEVEL1_TABLE + 1) << table_size_shift;
    }

    block + adjust
}

/// Physical index of the hash table block holding the record for `block`
///
/// The result can be negative: the first tables sit right before physical block `0`.
pub fn hash_table_block(block: u32, table_size_shift: u8, generation: Generation) -> i64 {
    let spacing = TABLE_SPACING[usize::from(table_size_shift.min(1))];
    let step = 1i64 << table_size_shift;
    let block = i64::from(block);

    let mut table = block / i64::from(BLOCKS_PER_TABLE) * i64::from(spacing.level1);
    if block >= i64::from(BLOCKS_PER_TABLE) {
        table += (block / i64::from(BLOCKS_PER_LEVEL1_TABLE) + 1) << table_size_shift;
        if block >= i64::from(BLOCKS_PER_LEVEL1_TABLE) {
            table += step;
        }
    }

    table + generation as i64 - step
}

/// Whether a primary record must be replaced by its alternate generation
pub fn needs_alternate(table_size_shift: u8, status: u8) -> bool {
    table_size_shift > 0 && status < HashStatus::Old as u8
}

/// STFS package reader
///
/// The package borrows its input; listings are decoded once when the package is opened and the
/// contents of a file are only extracted on request.
///
/// ```no_run
/// fn list_package(data: &[u8]) -> willow_stfs::error::Result<()> {
///     let package = willow_stfs::StfsPackage::new(data)?;
///
///     for listing in package.files() {
///         let contents = package.read_file(listing)?;
///         println!("{}: {} bytes", listing.path, contents.len());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StfsPackage<'a> {
    data: &'a [u8],
    header: StfsHeader,
    /// Listings keyed by file table slot, in table order
    files: IndexMap<usize, FileListing>,
    /// Position of the first listing with each full path
    paths: HashMap<Box<str>, usize>,
}

impl<'a> StfsPackage<'a> {
    /// Read a package header and its file table.
    #[instrument(skip(data), fields(len = data.len()), err)]
    pub fn new(data: &'a [u8]) -> Result<StfsPackage<'a>> {
        let header = Self::parse_header(data)?;
        debug!(
            magic = %header.magic,
            shift = header.table_size_shift,
            blocks = header.allocated_count,
            "parsed package header"
        );

        let mut package = StfsPackage {
            data,
            header,
            files: IndexMap::new(),
            paths: HashMap::new(),
        };
        package.files = package.parse_file_table()?;
        package.paths = index_paths(&package.files);

        Ok(package)
    }

    /// Decode only the fixed header of a package
    pub fn parse_header(data: &[u8]) -> Result<StfsHeader> {
        if data.len() < HEADER_SIZE {
            return Err(willow_io::error::Error::OutOfRange {
                offset: 0,
                requested: HEADER_SIZE,
                available: data.len(),
            }
            .into());
        }

        if StfsMagic::from_bytes(data).is_none() {
            let mut magic = [0u8; 4];
            magic.copy_from_slice(&data[..4]);
            return Err(Error::InvalidHeader { magic });
        }

        Ok(StfsHeader::read(&mut std::io::Cursor::new(data))?)
    }

    /// The package header
    pub fn header(&self) -> &StfsHeader {
        &self.header
    }

    /// Number of listings, directories included
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the package lists nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Listings in file table order
    pub fn files(&self) -> impl Iterator<Item = &FileListing> {
        self.files.values()
    }

    /// Full paths of every listing in file table order
    ///
    /// A path can appear more than once when the file table holds duplicate entries.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.values().map(|listing| listing.path.as_ref())
    }

    /// Get the index of the first listing with a full path, if it's present.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.paths.get(name).copied()
    }

    /// Search for the first listing with a full path
    pub fn by_name(&self, name: &str) -> Result<&FileListing> {
        self.index_for_name(name)
            .and_then(|index| self.files.get_index(index))
            .map(|(_, listing)| listing)
            .ok_or_else(|| Error::FileNotFound(FileNotFoundError::Name(name.to_owned())))
    }

    /// Get the listing stored in a file table slot
    pub fn by_slot(&self, slot: usize) -> Result<&FileListing> {
        self.files
            .get(&slot)
            .ok_or(Error::FileNotFound(FileNotFoundError::Slot(slot)))
    }

    /// Get a listing by index
    pub fn by_index(&self, index: usize) -> Result<&FileListing> {
        self.files
            .get_index(index)
            .map(|(_, listing)| listing)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(index)))
    }

    /// Extract the contents of a listing
    ///
    /// The block chain is followed until `size` bytes have been read. A chain that ends early,
    /// leaves the allocated range or reaches a block that is no longer in use stops the read and
    /// the bytes gathered so far are returned, so a result shorter than [`FileListing::size`]
    /// means the package is damaged.
    #[instrument(skip(self, listing), fields(path = %listing.path), err)]
    pub fn read_file(&self, listing: &FileListing) -> Result<Vec<u8>> {
        let shift = self.header.table_size_shift;
        let mut remaining = listing.size as usize;
        let mut block = listing.first_block;
        let mut status = HashStatus::Old as u8;
        let mut data = Vec::with_capacity(remaining.min(self.data.len()));

        while remaining > 0
            && block > 0
            && block < self.header.allocated_count
            && status >= HashStatus::Old as u8
        {
            let length = remaining.min(BLOCK_SIZE);
            data.extend_from_slice(self.read_block(i64::from(fix_block_number(block, shift)), length)?);
            remaining -= length;

            if remaining == 0 {
                break;
            }

            let hash = self.resolve_block_hash(block)?;
            trace!(block, next = hash.next_block, status = hash.status, "followed block");
            block = hash.next_block;
            status = hash.status;
        }

        if remaining > 0 {
            warn!(
                read = data.len(),
                expected = listing.size,
                block,
                status,
                "block chain ended before the end of the file"
            );
        }

        Ok(data)
    }

    /// Extract the contents of a listing found by its full path
    pub fn read_by_name(&self, name: &str) -> Result<Vec<u8>> {
        self.read_file(self.by_name(name)?)
    }

    /// Read the hash record of `block` from one generation of its hash table
    pub fn block_hash(&self, block: u32, generation: Generation) -> Result<BlockHashRecord> {
        let table = hash_table_block(block, self.header.table_size_shift, generation);
        let record = block % BLOCKS_PER_TABLE;

        let data = self.read_block(table, BLOCK_SIZE)?;
        let mut cursor = Cursor::with_order(data, ByteOrder::Big);
        cursor.seek(record as usize * HASH_RECORD_SIZE)?;

        Ok(BlockHashRecord {
            block,
            hash: cursor.read_array()?,
            status: cursor.read_u8()?,
            next_block: cursor.read_u24()?,
            table,
            record,
        })
    }

    /// Read the hash record of `block` from whichever generation is currently valid
    pub fn resolve_block_hash(&self, block: u32) -> Result<BlockHashRecord> {
        let primary = self.block_hash(block, Generation::Primary)?;
        if needs_alternate(self.header.table_size_shift, primary.status) {
            trace!(block, status = primary.status, "using alternate hash table");
            return self.block_hash(block, Generation::Alternate);
        }
        Ok(primary)
    }

    fn read_block(&self, physical: i64, length: usize) -> Result<&'a [u8]> {
        let position = DATA_START as i64 + physical * BLOCK_SIZE as i64;
        let position = usize::try_from(position).map_err(|_| willow_io::error::Error::OutOfRange {
            offset: 0,
            requested: length,
            available: self.data.len(),
        })?;

        let mut cursor = Cursor::new(self.data);
        cursor.seek(position)?;
        Ok(cursor.read_bytes(length)?)
    }

    fn read_file_table(&self) -> Result<Vec<u8>> {
        let shift = self.header.table_size_shift;
        let mut block = self.header.file_table_block_number;
        let declared = usize::from(self.header.file_table_block_count) * BLOCK_SIZE;
        let mut table = Vec::with_capacity(declared.min(self.data.len()));

        let mut visited = HashSet::new();
        for _ in 0..self.header.file_table_block_count {
            if !visited.insert(block) {
                warn!(block, "file table chain loops back on itself");
                break;
            }
            table.extend_from_slice(self.read_block(i64::from(fix_block_number(block, shift)), BLOCK_SIZE)?);
            block = self.resolve_block_hash(block)?.next_block;
        }

        Ok(table)
    }

    fn parse_file_table(&self) -> Result<IndexMap<usize, FileListing>> {
        let table = self.read_file_table()?;

        let mut listings = Vec::new();
        for (slot, raw) in table.chunks_exact(FILE_ENTRY_SIZE).enumerate() {
            let entry = FileEntry::read(&mut std::io::Cursor::new(raw))?;
            match FileListing::from_entry(slot, entry) {
                Ok(listing) => listings.push(listing),
                Err(e) => trace!("skipping: {e}"),
            }
        }

        let by_slot: HashMap<usize, usize> = listings
            .iter()
            .enumerate()
            .map(|(i, listing)| (listing.slot, i))
            .collect();

        let paths: Vec<Box<str>> = listings
            .iter()
            .map(|listing| full_path(listing, &listings, &by_slot))
            .collect();

        let mut files = IndexMap::with_capacity(listings.len());
        for (mut listing, path) in listings.into_iter().zip(paths) {
            listing.path = path;
            files.insert(listing.slot, listing);
        }

        debug!(files = files.len(), "parsed file table");
        Ok(files)
    }
}

/// Map every full path to the position of its first listing
fn index_paths(files: &IndexMap<usize, FileListing>) -> HashMap<Box<str>, usize> {
    let mut paths = HashMap::with_capacity(files.len());
    for (index, listing) in files.values().enumerate() {
        if paths.contains_key(&listing.path) {
            warn!(path = %listing.path, slot = listing.slot, "duplicate path in file table");
            continue;
        }
        paths.insert(listing.path.clone(), index);
    }
    paths
}

/// Build the path of `listing` by walking up its parent directories
fn full_path(
    listing: &FileListing,
    listings: &[FileListing],
    by_slot: &HashMap<usize, usize>,
) -> Box<str> {
    let mut parts = vec![listing.name.as_ref()];
    let mut parent = listing.path_index;

    while let Ok(slot) = usize::try_from(parent) {
        // a loop in the parent chain cannot be longer than the table itself
        if parts.len() > listings.len() {
            warn!(path = %listing.name, "directory loop in file table");
            break;
        }
        let Some(&index) = by_slot.get(&slot) else {
            warn!(slot, path = %listing.name, "missing parent directory");
            break;
        };
        parts.push(listings[index].name.as_ref());
        parent = listings[index].path_index;
    }

    parts.reverse();
    parts.join("/").into()
}
