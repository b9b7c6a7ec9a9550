use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::Write,
    path::{Component, Path, PathBuf},
};
use tracing::{info, warn};
use willow_stfs::StfsPackage;

use crate::commands::read_input;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input STFS package
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let package = StfsPackage::new(&data)?;

        for (index, listing) in package.files().enumerate() {
            if package.index_for_name(&listing.path) != Some(index) {
                warn!(path = %listing.path, slot = listing.slot, "skipping duplicate path");
                continue;
            }

            let relative = Path::new(&*listing.path);
            if !relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
            {
                warn!(path = %listing.path, "skipping path outside of the target directory");
                continue;
            }

            let p = self.directory.join(relative);
            if listing.is_directory {
                std::fs::create_dir_all(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", p.display()))?;
                continue;
            }

            let contents = package.read_file(listing)?;
            if contents.len() < listing.size as usize {
                warn!(
                    path = %listing.path,
                    read = contents.len(),
                    expected = listing.size,
                    "file is incomplete, the package may be damaged"
                );
            }

            info!("writing {}", p.display());
            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent)
                    .into_diagnostic()
                    .context(format!("creating {}", parent.display()))?;
            }
            let mut out = if !self.overwrite {
                File::create_new(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", p.display()))?
            } else {
                File::create(&p)
                    .into_diagnostic()
                    .context(format!("creating {}", p.display()))?
            };

            out.write_all(&contents).into_diagnostic()?;
        }
        Ok(())
    }
}
