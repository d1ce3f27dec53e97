//! EXIF inspection and removal

pub mod exif;
pub mod strip;

pub use self::exif::{format_exif, read_exif, ExifData, GpsData};
pub use self::strip::{strip_exif, StripOptions};
