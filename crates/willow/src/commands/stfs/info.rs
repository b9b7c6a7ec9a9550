use clap::Args;
use itertools::Itertools;
use miette::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use willow_stfs::{types::Certificate, StfsPackage};

use crate::commands::read_input;

#[derive(Args)]
pub struct InfoArgs {
    /// An input STFS package
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).join("")
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let header = StfsPackage::parse_header(&data)?;

        println!("{:<18}{}", "Magic".bold(), header.magic);
        if let Certificate::Console {
            console_id,
            part_number,
            console_type,
            ..
        } = &header.certificate
        {
            println!("{:<18}{}", "Signing console".bold(), hex(console_id));
            println!(
                "{:<18}{}",
                "Part number".bold(),
                String::from_utf8_lossy(part_number).trim_end_matches('\0')
            );
            println!("{:<18}{}", "Console type".bold(), console_type);
        }
        println!("{:<18}{}", "Display name".bold(), header.display_name);
        println!("{:<18}{}", "Description".bold(), header.display_description);
        println!("{:<18}{}", "Publisher".bold(), header.publisher_name);
        println!("{:<18}{}", "Title".bold(), header.title_name);
        println!("{:<18}{:08X}", "Title id".bold(), header.title_id);
        println!(
            "{:<18}{} ({:08X})",
            "Content type".bold(),
            header.content_type,
            header.content_type.raw()
        );
        println!("{:<18}{}", "Metadata version".bold(), header.metadata_version);
        println!("{:<18}{}", "Content id".bold(), hex(&header.content_id));
        println!("{:<18}{}", "Console id".bold(), hex(&header.console_id));
        println!("{:<18}{}", "Profile id".bold(), hex(&header.profile_id));
        println!(
            "{:<18}{:08X} (table size shift {})",
            "Entry id".bold(),
            header.entry_id,
            header.table_size_shift
        );
        println!(
            "{:<18}{} at block {}",
            "File table".bold(),
            header.file_table_block_count,
            header.file_table_block_number
        );
        println!(
            "{:<18}{} allocated, {} free",
            "Blocks".bold(),
            header.allocated_count,
            header.unallocated_count
        );
        if let Some(series) = &header.series {
            println!(
                "{:<18}season {} episode {}",
                "Series".bold(),
                series.season_number,
                series.episode_number
            );
        }
        println!(
            "{:<18}{} bytes thumbnail, {} bytes title image",
            "Images".bold(),
            header.thumbnail.len(),
            header.title_image.len()
        );

        Ok(())
    }
}
