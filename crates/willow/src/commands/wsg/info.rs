use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use willow_wsg::SaveDocument;

use crate::commands::read_input;

#[derive(Args)]
pub struct InfoArgs {
    /// An input save, or an Xbox 360 package holding one
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Print the whole save as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let save = willow_wsg::load(&data, willow_wsg::first_save_listing)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&save).into_diagnostic()?);
        } else {
            print_summary(&save);
        }
        Ok(())
    }
}

fn print_summary(save: &SaveDocument) {
    println!("{:<14}{} ({} endian)", "Platform".bold(), save.platform, save.byte_order);
    println!("{:<14}{}", "Version".bold(), save.version);
    println!("{:<14}{}", "Revision".bold(), save.revision);
    println!("{:<14}{}", "Class".bold(), save.class);
    println!("{:<14}{}", "Level".bold(), save.level);
    println!("{:<14}{}", "Experience".bold(), save.experience);
    println!("{:<14}{}", "Skill points".bold(), save.skill_points);
    println!("{:<14}{}", "Cash".bold(), save.cash);
    println!("{:<14}{}", "Playthrough".bold(), save.playthrough_completed);

    println!("{} ({})", "Skills".bold(), save.skills.len());
    for skill in &save.skills {
        let name = if skill.is_in_use() {
            skill.name.green().to_string()
        } else {
            skill.name.dimmed().to_string()
        };
        println!("  {name} level {} ({} xp)", skill.level, skill.experience);
    }

    let vehicles = &save.vehicles;
    println!(
        "{:<14}colors {}/{}, types {}/{}",
        "Vehicles".bold(),
        vehicles.first_color,
        vehicles.second_color,
        vehicles.first_type,
        vehicles.second_type
    );

    println!("{} ({})", "Ammo pools".bold(), save.ammo_pools.len());
    for pool in &save.ammo_pools {
        println!("  {} {} (level {})", pool.resource, pool.remaining, pool.level);
    }

    println!("{:<14}{} bytes", "Remaining".bold(), save.trailing.len());
}
