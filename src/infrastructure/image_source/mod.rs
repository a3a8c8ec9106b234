//! Image source implementations

mod loaded_image;
mod mapped_image;

pub use loaded_image::LoadedImage;
pub use mapped_image::MappedImage;

use crate::domain::repositories::ImageReadError;
use std::fs::File;
use std::path::Path;

/// Opens `path` read-only and checks its size against `max_size`
fn open_checked(path: &Path, max_size: u64) -> Result<(File, u64), ImageReadError> {
    let file = File::open(path).map_err(|e| ImageReadError::from_io(path, e))?;
    let size = file
        .metadata()
        .map_err(|e| ImageReadError::from_io(path, e))?
        .len();

    if size > max_size {
        return Err(ImageReadError::TooLarge {
            size,
            limit: max_size,
        });
    }

    Ok((file, size))
}
