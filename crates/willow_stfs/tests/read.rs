use pretty_assertions::assert_eq;
use tracing_test::traced_test;
use willow_stfs::error::{Error, FileNotFoundError, Result};
use willow_stfs::read::{BLOCK_SIZE, DATA_START};
use willow_stfs::types::{Certificate, ContentType, Generation, LOCALE_COUNT};
use willow_stfs::{StfsMagic, StfsPackage};

/// Entry id giving a table size shift of 0
const SHIFT_0_ENTRY_ID: u32 = 0xAD0E;

/// Entry id giving a table size shift of 1
const SHIFT_1_ENTRY_ID: u32 = 0x9000;

/// Build an empty package of `blocks` data blocks with a one block file table at block 0
fn package(magic: &[u8; 4], entry_id: u32, blocks: usize) -> Vec<u8> {
    let mut data = vec![0u8; DATA_START + blocks * BLOCK_SIZE];
    data[..4].copy_from_slice(magic);
    data[0x340..0x344].copy_from_slice(&entry_id.to_be_bytes());
    data[0x37C..0x37E].copy_from_slice(&1u16.to_le_bytes());
    data[0x395..0x399].copy_from_slice(&(blocks as u32).to_be_bytes());
    data
}

/// Write the hash record of a block covered by the first hash table
fn set_hash(data: &mut [u8], table: usize, block: u32, status: u8, next: u32) {
    let offset = table + block as usize * 0x18;
    data[offset..offset + 0x14].fill(block as u8);
    data[offset + 0x14] = status;
    data[offset + 0x15..offset + 0x18].copy_from_slice(&next.to_be_bytes()[1..]);
}

/// Write a file table slot into block 0
fn set_entry(data: &mut [u8], slot: usize, name: &str, flags: u8, first_block: u32, path_index: i16, size: u32) {
    let offset = DATA_START + slot * 0x40;
    let blocks = size.div_ceil(BLOCK_SIZE as u32);

    data[offset..offset + name.len()].copy_from_slice(name.as_bytes());
    data[offset + 0x28] = flags;
    data[offset + 0x29..offset + 0x2C].copy_from_slice(&blocks.to_le_bytes()[..3]);
    data[offset + 0x2C..offset + 0x2F].copy_from_slice(&blocks.to_le_bytes()[..3]);
    data[offset + 0x2F..offset + 0x32].copy_from_slice(&first_block.to_le_bytes()[..3]);
    data[offset + 0x32..offset + 0x34].copy_from_slice(&path_index.to_be_bytes());
    data[offset + 0x34..offset + 0x38].copy_from_slice(&size.to_be_bytes());
}

/// Write null padded UTF-16 text at a header offset
fn put_text(data: &mut [u8], offset: usize, text: &str) {
    let units: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
    data[offset..offset + units.len()].copy_from_slice(&units);
}

/// Fill a data block below the first table boundary
fn fill_block(data: &mut [u8], block: usize, value: u8) {
    let offset = DATA_START + block * BLOCK_SIZE;
    data[offset..offset + BLOCK_SIZE].fill(value);
}

fn save_package() -> Vec<u8> {
    let mut data = package(b"CON ", SHIFT_0_ENTRY_ID, 8);

    data[0x344..0x348].copy_from_slice(&1u32.to_be_bytes());
    put_text(&mut data, 0x411, "Borderlands");

    set_entry(&mut data, 0, "SaveGame.sav", 0x00, 1, -1, 0x2800);
    set_entry(&mut data, 2, "data", 0x80, 0, -1, 0);
    set_entry(&mut data, 3, "profile.bin", 0x00, 4, 2, 0x10);

    set_hash(&mut data, 0xB000, 1, 0xC0, 2);
    set_hash(&mut data, 0xB000, 2, 0xC0, 3);
    set_hash(&mut data, 0xB000, 3, 0x80, 0xFFFFFF);

    fill_block(&mut data, 1, 0x11);
    fill_block(&mut data, 2, 0x22);
    fill_block(&mut data, 3, 0x33);
    fill_block(&mut data, 4, 0x44);

    data
}

#[test]
fn read_invalid_magic() {
    let mut data = package(b"LIVE", SHIFT_0_ENTRY_ID, 1);
    data[..4].copy_from_slice(b"WSG\x02");

    let result = StfsPackage::new(&data);
    assert!(matches!(
        result,
        Err(Error::InvalidHeader { magic }) if &magic == b"WSG\x02"
    ));
}

#[test]
fn read_truncated_header() {
    let data = b"CON ".to_vec();

    let result = StfsPackage::new(&data);
    assert!(matches!(
        result,
        Err(Error::Io(willow_io::error::Error::OutOfRange { .. }))
    ));
}

#[traced_test]
#[test]
fn read_header() -> Result<()> {
    let data = save_package();

    let package = StfsPackage::new(&data)?;
    let header = package.header();

    assert_eq!(header.magic, StfsMagic::Con);
    assert!(matches!(header.certificate, Certificate::Console { .. }));
    assert_eq!(header.entry_id, SHIFT_0_ENTRY_ID);
    assert_eq!(header.table_size_shift, 0);
    assert_eq!(header.file_table_block_count, 1);
    assert_eq!(header.file_table_block_number, 0);
    assert_eq!(header.allocated_count, 8);
    assert_eq!(header.content_type, ContentType::SavedGame);
    assert_eq!(header.display_name, "Borderlands");
    assert_eq!(header.display_names.len(), LOCALE_COUNT);
    assert!(header.thumbnail.is_empty());
    assert!(header.series.is_none());

    Ok(())
}

#[test]
fn read_remote_signed_header() -> Result<()> {
    let mut data = package(b"LIVE", SHIFT_1_ENTRY_ID, 1);
    data[0x1712..0x1716].copy_from_slice(&4u32.to_be_bytes());
    data[0x171A..0x171E].copy_from_slice(b"\x89PNG");

    let header = StfsPackage::parse_header(&data)?;
    assert_eq!(header.magic, StfsMagic::Live);
    assert!(matches!(header.certificate, Certificate::Remote { .. }));
    assert_eq!(header.table_size_shift, 1);
    assert_eq!(header.thumbnail, b"\x89PNG".to_vec());
    assert!(header.title_image.is_empty());

    Ok(())
}

#[traced_test]
#[test]
fn list_files_skips_empty_slots() -> Result<()> {
    let data = save_package();

    let package = StfsPackage::new(&data)?;
    assert_eq!(package.len(), 3);
    assert_eq!(
        package.file_names().collect::<Vec<_>>(),
        vec!["SaveGame.sav", "data", "data/profile.bin"]
    );

    let directory = package.by_name("data")?;
    assert!(directory.is_directory);
    assert_eq!(directory.slot, 2);

    let nested = package.by_index(2)?;
    assert_eq!(&*nested.name, "profile.bin");
    assert_eq!(nested.path_index, 2);
    assert_eq!(package.index_for_name("data/profile.bin"), Some(2));

    Ok(())
}

#[test]
fn missing_files_are_reported() -> Result<()> {
    let data = save_package();

    let package = StfsPackage::new(&data)?;
    assert!(matches!(
        package.by_name("profile.bin"),
        Err(Error::FileNotFound(FileNotFoundError::Name(name))) if name == "profile.bin"
    ));
    assert!(matches!(
        package.by_index(3),
        Err(Error::FileNotFound(FileNotFoundError::Index(3)))
    ));

    Ok(())
}

#[traced_test]
#[test]
fn read_file_follows_chain() -> Result<()> {
    let data = save_package();

    let package = StfsPackage::new(&data)?;
    let contents = package.read_by_name("SaveGame.sav")?;

    assert_eq!(contents.len(), 0x2800);
    assert!(contents[..0x1000].iter().all(|&b| b == 0x11));
    assert!(contents[0x1000..0x2000].iter().all(|&b| b == 0x22));
    assert!(contents[0x2000..].iter().all(|&b| b == 0x33));

    let small = package.read_by_name("data/profile.bin")?;
    assert_eq!(small, vec![0x44; 0x10]);

    assert!(package.read_by_name("data")?.is_empty());

    Ok(())
}

#[traced_test]
#[test]
fn read_file_stops_at_freed_block() -> Result<()> {
    let mut data = save_package();
    set_entry(&mut data, 0, "SaveGame.sav", 0x00, 1, -1, 0x5000);
    set_hash(&mut data, 0xB000, 3, 0x40, 4);

    let package = StfsPackage::new(&data)?;
    let listing = package.by_name("SaveGame.sav")?;
    let contents = package.read_file(listing)?;

    assert_eq!(contents.len(), 0x3000);
    assert!(contents.len() < listing.size as usize);
    assert!(logs_contain("block chain ended before the end of the file"));

    Ok(())
}

#[test]
fn read_file_stops_outside_allocated_blocks() -> Result<()> {
    let mut data = save_package();
    set_hash(&mut data, 0xB000, 1, 0xC0, 0x100);

    let package = StfsPackage::new(&data)?;
    let contents = package.read_by_name("SaveGame.sav")?;
    assert_eq!(contents.len(), 0x1000);

    Ok(())
}

#[test]
fn read_file_starting_at_block_zero_is_empty() -> Result<()> {
    let mut data = save_package();
    set_entry(&mut data, 0, "SaveGame.sav", 0x00, 0, -1, 0x100);

    let package = StfsPackage::new(&data)?;
    assert!(package.read_by_name("SaveGame.sav")?.is_empty());

    Ok(())
}

#[traced_test]
#[test]
fn stale_primary_table_uses_alternate_generation() -> Result<()> {
    let mut data = package(b"PIRS", SHIFT_1_ENTRY_ID, 8);
    set_entry(&mut data, 0, "SaveGame.sav", 0x00, 1, -1, 0x1800);

    // primary tables sit at physical block -2, alternates at -1
    set_hash(&mut data, 0xA000, 1, 0x00, 5);
    set_hash(&mut data, 0xB000, 1, 0x80, 2);
    set_hash(&mut data, 0xA000, 2, 0xC0, 0xFFFFFF);

    fill_block(&mut data, 1, 0x11);
    fill_block(&mut data, 2, 0x22);
    fill_block(&mut data, 5, 0x55);

    let package = StfsPackage::new(&data)?;
    assert_eq!(package.header().table_size_shift, 1);

    let primary = package.block_hash(1, Generation::Primary)?;
    assert_eq!(primary.status, 0x00);
    assert_eq!(primary.table, -2);
    assert_eq!(primary.record, 1);

    let resolved = package.resolve_block_hash(1)?;
    assert_eq!(resolved.table, -1);
    assert_eq!(resolved.next_block, 2);
    assert_eq!(resolved.hash, [1u8; 0x14]);
    assert!(resolved.is_live());

    let current = package.resolve_block_hash(2)?;
    assert_eq!(current.table, -2);

    let contents = package.read_by_name("SaveGame.sav")?;
    assert_eq!(contents.len(), 0x1800);
    assert!(contents[..0x1000].iter().all(|&b| b == 0x11));
    assert!(contents[0x1000..].iter().all(|&b| b == 0x22));

    Ok(())
}

#[test]
fn file_table_spanning_blocks() -> Result<()> {
    let mut data = package(b"LIVE", SHIFT_0_ENTRY_ID, 4);
    data[0x37C..0x37E].copy_from_slice(&2u16.to_le_bytes());
    data[0x37E..0x381].copy_from_slice(&[0x02, 0x00, 0x00]);

    // file table continues from block 2 to block 1
    set_hash(&mut data, 0xB000, 2, 0xC0, 1);
    for (block, name) in [(2usize, "first"), (1usize, "second")] {
        let offset = DATA_START + block * BLOCK_SIZE;
        data[offset..offset + name.len()].copy_from_slice(name.as_bytes());
        data[offset + 0x32..offset + 0x34].copy_from_slice(&(-1i16).to_be_bytes());
    }

    let package = StfsPackage::new(&data)?;
    assert_eq!(package.file_names().collect::<Vec<_>>(), vec!["first", "second"]);
    assert_eq!(package.by_name("second")?.slot, 0x40);

    Ok(())
}

#[traced_test]
#[test]
fn read_metadata_version_2_header() -> Result<()> {
    let mut data = package(b"LIVE", SHIFT_1_ENTRY_ID, 1);
    data[0x344..0x348].copy_from_slice(&0x0000_4000u32.to_be_bytes());
    data[0x348..0x34C].copy_from_slice(&2u32.to_be_bytes());

    data[0x3B1..0x3C1].fill(0x11);
    data[0x3C1..0x3D1].fill(0x22);
    data[0x3D1..0x3D3].copy_from_slice(&7u16.to_be_bytes());
    data[0x3D3..0x3D5].copy_from_slice(&9u16.to_be_bytes());

    put_text(&mut data, 0x411, "Borderlands");
    put_text(&mut data, 0x491, "Borderlands DE");
    put_text(&mut data, 0xD11, "Desc");
    put_text(&mut data, 0x1611, "Gearbox");
    put_text(&mut data, 0x1691, "Borderlands GOTY");
    put_text(&mut data, 0x541A, "Extra");
    put_text(&mut data, 0x941A, "Desc2");

    data[0x1716..0x171A].copy_from_slice(&3u32.to_be_bytes());
    data[0x571A..0x571D].copy_from_slice(b"IMG");

    let header = StfsPackage::parse_header(&data)?;

    assert_eq!(header.content_type, ContentType::InstalledGame);
    assert_eq!(header.metadata_version, 2);
    let series = header.series.as_ref().expect("metadata version 2 has series info");
    assert_eq!(series.series_id, [0x11; 0x10]);
    assert_eq!(series.season_id, [0x22; 0x10]);
    assert_eq!(series.season_number, 7);
    assert_eq!(series.episode_number, 9);

    assert_eq!(header.display_name, "Borderlands");
    assert_eq!(header.display_names[1], "Borderlands DE");
    assert!(header.display_names[2..].iter().all(String::is_empty));
    assert_eq!(header.display_description, "Desc");
    assert_eq!(header.display_descriptions.len(), LOCALE_COUNT);
    assert_eq!(header.publisher_name, "Gearbox");
    assert_eq!(header.title_name, "Borderlands GOTY");
    assert_eq!(header.additional_display_names, "Extra");
    assert_eq!(header.additional_display_descriptions, "Desc2");

    assert!(header.thumbnail.is_empty());
    assert_eq!(header.title_image_size, 3);
    assert_eq!(header.title_image, b"IMG".to_vec());

    Ok(())
}

#[test]
fn metadata_version_1_skips_version_2_fields() -> Result<()> {
    let mut data = package(b"LIVE", SHIFT_1_ENTRY_ID, 1);
    data[0x348..0x34C].copy_from_slice(&1u32.to_be_bytes());
    data[0x3D1..0x3D3].copy_from_slice(&7u16.to_be_bytes());
    put_text(&mut data, 0x541A, "Extra");

    let header = StfsPackage::parse_header(&data)?;
    assert!(header.series.is_none());
    assert!(header.additional_display_names.is_empty());
    assert!(header.additional_display_descriptions.is_empty());

    Ok(())
}

#[traced_test]
#[test]
fn duplicate_paths_keep_every_listing() -> Result<()> {
    let mut data = package(b"LIVE", SHIFT_0_ENTRY_ID, 4);
    set_entry(&mut data, 0, "same", 0x00, 1, -1, 0x10);
    set_entry(&mut data, 1, "same", 0x00, 2, -1, 0x10);
    // parent slot 9 does not exist, so the path falls back to the bare name
    set_entry(&mut data, 2, "same", 0x00, 3, 9, 0x10);
    fill_block(&mut data, 1, 0x11);
    fill_block(&mut data, 2, 0x22);
    fill_block(&mut data, 3, 0x33);

    let package = StfsPackage::new(&data)?;
    assert_eq!(package.len(), 3);
    assert_eq!(package.file_names().collect::<Vec<_>>(), vec!["same"; 3]);
    assert!(logs_contain("duplicate path in file table"));

    assert_eq!(package.index_for_name("same"), Some(0));
    assert_eq!(package.by_name("same")?.slot, 0);
    assert_eq!(package.read_by_name("same")?, vec![0x11; 0x10]);

    assert_eq!(package.by_index(1)?.slot, 1);
    assert_eq!(package.read_file(package.by_slot(1)?)?, vec![0x22; 0x10]);
    assert_eq!(package.read_file(package.by_slot(2)?)?, vec![0x33; 0x10]);
    assert!(matches!(
        package.by_slot(3),
        Err(Error::FileNotFound(FileNotFoundError::Slot(3)))
    ));

    Ok(())
}

#[traced_test]
#[test]
fn corrupt_file_table_block_count() -> Result<()> {
    let mut data = save_package();
    data[0x37C..0x37E].copy_from_slice(&0xFFFFu16.to_le_bytes());

    // the hash record of block 0 points back at block 0
    let package = StfsPackage::new(&data)?;
    assert_eq!(package.len(), 3);
    assert!(logs_contain("file table chain loops back on itself"));

    Ok(())
}
