//! Types for reading save files
//!

use tracing::{debug, instrument};
use willow_io::{ByteOrder, Cursor};

use crate::{
    detect::Platform,
    error::{Error, Result},
    types::{AmmoPool, SaveDocument, Skill, Vehicles, MAGIC, PLAYER_MARKER},
};

impl SaveDocument {
    /// Decode a PC or PS3 save.
    ///
    /// The version field selects the byte order of everything that follows it. Any read past the
    /// end of `data` aborts the decode, there is no partial document.
    #[instrument(skip(data), fields(len = data.len()), err)]
    pub fn parse(data: &[u8]) -> Result<SaveDocument> {
        let mut cursor = Cursor::with_order(data, ByteOrder::Little);

        let magic = cursor.read_array::<3>()?;
        check_marker(&magic, MAGIC, "WSG")?;

        let raw_version = cursor.read_i32()?;
        let (platform, byte_order) =
            Platform::from_version(raw_version).ok_or(Error::UnknownVersion(raw_version))?;
        cursor.set_order(byte_order);
        let version = match byte_order {
            ByteOrder::Little => raw_version,
            ByteOrder::Big => raw_version.swap_bytes(),
        };

        let marker = cursor.read_array::<4>()?;
        check_marker(&marker, PLAYER_MARKER, "PLYR")?;

        let revision = cursor.read_i32()?;
        let class = cursor.read_string()?;
        let level = cursor.read_i32()?;
        let experience = cursor.read_i32()?;
        let skill_points = cursor.read_i32()?;
        let reserved = cursor.read_i32()?;
        let cash = cursor.read_i32()?;
        let playthrough_completed = cursor.read_i32()?;

        let skills = cursor.read_counted(Skill::read)?;
        let vehicles = Vehicles::read(&mut cursor)?;
        let ammo_pools = cursor.read_counted(AmmoPool::read)?;
        let trailing = cursor.rest().to_vec();

        debug!(
            %platform,
            %class,
            level,
            skills = skills.len(),
            ammo_pools = ammo_pools.len(),
            trailing = trailing.len(),
            "parsed save"
        );

        Ok(SaveDocument {
            platform,
            byte_order,
            magic,
            version,
            marker,
            revision,
            class,
            level,
            experience,
            skill_points,
            reserved,
            cash,
            playthrough_completed,
            skills,
            vehicles,
            ammo_pools,
            trailing,
        })
    }
}

fn check_marker(found: &[u8], expected: &[u8], name: &'static str) -> Result<()> {
    if found != expected {
        return Err(Error::InvalidHeader {
            expected: name,
            found: found.escape_ascii().to_string(),
        });
    }
    Ok(())
}

impl Skill {
    fn read(cursor: &mut Cursor) -> willow_io::error::Result<Skill> {
        Ok(Skill {
            name: cursor.read_string()?,
            level: cursor.read_i32()?,
            experience: cursor.read_i32()?,
            in_use: cursor.read_i32()?,
        })
    }
}

impl Vehicles {
    fn read(cursor: &mut Cursor) -> willow_io::error::Result<Vehicles> {
        Ok(Vehicles {
            first_color: cursor.read_i32()?,
            second_color: cursor.read_i32()?,
            first_type: cursor.read_i32()?,
            second_type: cursor.read_i32()?,
        })
    }
}

impl AmmoPool {
    fn read(cursor: &mut Cursor) -> willow_io::error::Result<AmmoPool> {
        Ok(AmmoPool {
            resource: cursor.read_string()?,
            pool: cursor.read_string()?,
            remaining: cursor.read_f32()?,
            level: cursor.read_i32()?,
        })
    }
}
