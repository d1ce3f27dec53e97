//! `imgai exif`

use std::path::Path;

use crate::commands::RunContext;
use crate::error::{ImgaiError, Result};
use crate::i18n::Message;
use crate::metadata::exif::{format_exif, read_exif, ExifData};

const RULE_WIDTH: usize = 50;

/// Read and, unless quiet, print the EXIF block of one file
pub fn run(input: &Path, ctx: &RunContext) -> Result<ExifData> {
    if !input.exists() {
        return Err(ImgaiError::file_not_found(input));
    }

    let data = read_exif(input)?;

    if !ctx.quiet {
        println!("{}", ctx.messages.render(Message::ExifDataFor { path: input }));
        println!("{}", "-".repeat(RULE_WIDTH));
        let text = format_exif(&data);
        if text.is_empty() {
            println!("{}", ctx.messages.render(Message::NoExif));
        } else {
            print!("{}", text);
        }
    }

    Ok(data)
}
