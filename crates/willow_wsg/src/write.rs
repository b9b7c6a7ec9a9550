//! Types for writing save files
//!

use willow_io::Writer;

use crate::types::{AmmoPool, SaveDocument, Skill, Vehicles};

impl SaveDocument {
    /// Encode the document in its own byte order.
    ///
    /// Group counts are taken from the collections and the trailing bytes are appended
    /// unchanged, so parsing the result gives back an equal document.
    ///
    /// # Panics
    ///
    /// Panics if a collection holds more than `i32::MAX` records.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = Writer::new(self.byte_order);

        writer.write_bytes(&self.magic);
        writer.write_i32(self.version);
        writer.write_bytes(&self.marker);

        writer.write_i32(self.revision);
        writer.write_string(&self.class);
        writer.write_i32(self.level);
        writer.write_i32(self.experience);
        writer.write_i32(self.skill_points);
        writer.write_i32(self.reserved);
        writer.write_i32(self.cash);
        writer.write_i32(self.playthrough_completed);

        writer.write_counted(&self.skills, |writer, skill| skill.write(writer));
        self.vehicles.write(&mut writer);
        writer.write_counted(&self.ammo_pools, |writer, pool| pool.write(writer));

        writer.write_bytes(&self.trailing);
        writer.finish()
    }
}

impl Skill {
    fn write(&self, writer: &mut Writer) {
        writer.write_string(&self.name);
        writer.write_i32(self.level);
        writer.write_i32(self.experience);
        writer.write_i32(self.in_use);
    }
}

impl Vehicles {
    fn write(&self, writer: &mut Writer) {
        writer.write_i32(self.first_color);
        writer.write_i32(self.second_color);
        writer.write_i32(self.first_type);
        writer.write_i32(self.second_type);
    }
}

impl AmmoPool {
    fn write(&self, writer: &mut Writer) {
        writer.write_string(&self.resource);
        writer.write_string(&self.pool);
        writer.write_f32(self.remaining);
        writer.write_i32(self.level);
    }
}
