//! EXIF reading

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Exif, Field, In, Reader, Tag, Value};
use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorContext, ImgaiError, Result};

/// The EXIF fields imgai reports, already formatted for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExifData {
    pub make: Option<String>,
    pub model: Option<String>,
    pub date_time: Option<String>,
    pub orientation: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub focal_length: Option<String>,
    pub aperture: Option<String>,
    pub iso: Option<String>,
    pub shutter_speed: Option<String>,
    pub gps: Option<GpsData>,
}

/// Decimal-degree coordinates, south and west negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsData {
    pub latitude: f64,
    pub longitude: f64,
}

impl ExifData {
    pub fn has_gps(&self) -> bool {
        self.gps.is_some()
    }

    /// True when none of the descriptive fields are present
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.date_time.is_none()
            && self.focal_length.is_none()
            && self.aperture.is_none()
            && self.iso.is_none()
            && self.shutter_speed.is_none()
            && !self.has_gps()
    }

    /// Extract the reported fields from a parsed EXIF block
    pub fn from_exif(exif: &Exif) -> Self {
        let field = move |tag| exif.get_field(tag, In::PRIMARY);

        Self {
            make: field(Tag::Make).and_then(ascii),
            model: field(Tag::Model).and_then(ascii),
            date_time: field(Tag::DateTime).and_then(ascii),
            orientation: field(Tag::Orientation).and_then(|f| f.value.get_uint(0)),
            width: field(Tag::PixelXDimension).and_then(|f| f.value.get_uint(0)),
            height: field(Tag::PixelYDimension).and_then(|f| f.value.get_uint(0)),
            focal_length: field(Tag::FocalLength)
                .and_then(|f| rational(f, 0))
                .map(|v| format!("{:.1}mm", v)),
            aperture: field(Tag::FNumber)
                .and_then(|f| rational(f, 0))
                .map(|v| format!("f/{:.1}", v)),
            iso: field(Tag::PhotographicSensitivity)
                .and_then(|f| f.value.get_uint(0))
                .map(|v| format!("ISO {}", v)),
            shutter_speed: field(Tag::ExposureTime).and_then(|f| match f.value {
                Value::Rational(ref v) => v.first().and_then(|r| shutter_speed(r.num, r.denom)),
                _ => None,
            }),
            gps: gps(exif),
        }
    }
}

fn ascii(field: &Field) -> Option<String> {
    match field.value {
        Value::Ascii(ref parts) => {
            let text = parts
                .iter()
                .map(|p| String::from_utf8_lossy(p).into_owned())
                .collect::<Vec<_>>()
                .join(" ");
            let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
            (!text.is_empty()).then(|| text.to_string())
        }
        _ => None,
    }
}

fn rational(field: &Field, index: usize) -> Option<f64> {
    match field.value {
        Value::Rational(ref v) => v
            .get(index)
            .filter(|r| r.denom != 0)
            .map(|r| r.to_f64()),
        _ => None,
    }
}

/// `1/N` for sub-second exposures, whole seconds otherwise
pub fn shutter_speed(num: u32, denom: u32) -> Option<String> {
    if num == 0 || denom == 0 {
        return None;
    }
    if num < denom {
        Some(format!("1/{}", denom / num))
    } else {
        Some(format!("{}", num / denom))
    }
}

/// Degrees, minutes, seconds to decimal degrees
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

fn coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let parts = match field.value {
        Value::Rational(ref v) if v.len() >= 3 && v.iter().all(|r| r.denom != 0) => v,
        _ => return None,
    };
    let degrees = dms_to_degrees(parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64());

    let negative = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|f| match f.value {
            Value::Ascii(ref v) => v.first().and_then(|s| s.first().copied()),
            _ => None,
        })
        .map_or(false, |c| c.eq_ignore_ascii_case(&negative_ref));

    Some(if negative { -degrees } else { degrees })
}

fn gps(exif: &Exif) -> Option<GpsData> {
    let latitude = coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S')?;
    let longitude = coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W')?;
    Some(GpsData { latitude, longitude })
}

/// Read the EXIF block of `path`
///
/// An image without any EXIF block yields an empty [`ExifData`], not an error.
pub fn read_exif(path: &Path) -> Result<ExifData> {
    if !path.exists() {
        return Err(ImgaiError::file_not_found(path));
    }

    let file = File::open(path).with_file_context(path.to_path_buf())?;
    let mut reader = BufReader::new(file);

    match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => {
            debug!("Read {} EXIF fields from {:?}", exif.fields().len(), path);
            Ok(ExifData::from_exif(&exif))
        }
        Err(exif::Error::NotFound(_)) => {
            debug!("No EXIF block in {:?}", path);
            Ok(ExifData::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Render the human-readable block printed by `imgai exif`
pub fn format_exif(data: &ExifData) -> String {
    let mut lines = Vec::new();

    if data.make.is_some() || data.model.is_some() {
        lines.push(format!(
            "Camera: {} {}",
            data.make.as_deref().unwrap_or(""),
            data.model.as_deref().unwrap_or("")
        ));
    }
    if let Some(date) = &data.date_time {
        lines.push(format!("Date: {}", date));
    }
    if let (Some(w), Some(h)) = (data.width, data.height) {
        lines.push(format!("Dimensions: {} x {}", w, h));
    }
    if let Some(focal) = &data.focal_length {
        lines.push(format!("Focal Length: {}", focal));
    }
    if let Some(aperture) = &data.aperture {
        lines.push(format!("Aperture: {}", aperture));
    }
    if let Some(shutter) = &data.shutter_speed {
        lines.push(format!("Shutter Speed: {}s", shutter));
    }
    if let Some(iso) = &data.iso {
        lines.push(format!("ISO: {}", iso));
    }
    if let Some(orientation) = data.orientation {
        lines.push(format!("Orientation: {}", orientation));
    }
    if let Some(gps) = data.gps {
        lines.push(format!("GPS: {:.6}, {:.6}", gps.latitude, gps.longitude));
    }

    lines.into_iter().map(|line| line + "\n").collect()
}
