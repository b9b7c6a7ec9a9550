//! Load a save from any supported platform

use tracing::{debug, instrument, warn};
use willow_stfs::{FileListing, StfsPackage};

use crate::{
    detect::{detect, Platform},
    error::{Error, Result},
    types::{SaveDocument, MAGIC},
};

/// Decode a save, unwrapping it from its package first on Xbox 360.
///
/// `select` picks the listing holding the save out of a package; [`first_save_listing`] is a
/// reasonable default. Files that are not recognized at all fail with
/// [`Error::UnrecognizedFile`], which is distinct from the errors of a damaged save.
///
/// ```no_run
/// fn show_level(data: &[u8]) -> willow_wsg::error::Result<()> {
///     let save = willow_wsg::load(data, willow_wsg::first_save_listing)?;
///     println!("{} is level {}", save.class, save.level);
///
///     Ok(())
/// }
/// ```
#[instrument(skip_all, fields(len = data.len()), err)]
pub fn load<F>(data: &[u8], select: F) -> Result<SaveDocument>
where
    F: for<'p, 'd> FnOnce(&'p StfsPackage<'d>) -> Option<&'p FileListing>,
{
    let platform = detect(data);
    debug!(%platform, "detected platform");

    match platform {
        Platform::Pc | Platform::Ps3 => SaveDocument::parse(data),
        Platform::Xbox360 => {
            let package = StfsPackage::new(data)?;
            let listing = select(&package).ok_or(Error::NoSaveSelected)?;

            let contents = package.read_file(listing)?;
            if contents.len() < listing.size as usize {
                warn!(
                    path = %listing.path,
                    read = contents.len(),
                    expected = listing.size,
                    "save was only partially extracted"
                );
            }

            let mut save = SaveDocument::parse(&contents)?;
            save.platform = Platform::Xbox360;
            Ok(save)
        }
        Platform::Unknown => Err(Error::UnrecognizedFile),
    }
}

/// Select the first file of a package that starts like a save
pub fn first_save_listing<'p>(package: &'p StfsPackage<'_>) -> Option<&'p FileListing> {
    package.files().filter(|listing| !listing.is_directory).find(|listing| {
        package
            .read_file(listing)
            .is_ok_and(|contents| contents.starts_with(MAGIC))
    })
}
