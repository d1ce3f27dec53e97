//! `imgai strip`

use std::path::Path;
use tracing::info;

use crate::commands::{run_batch, run_preview, run_single, single_input, RunContext};
use crate::error::Result;
use crate::i18n::Message;
use crate::metadata::strip::{strip_exif, StripOptions};
use crate::parallel::BatchReport;

pub fn run(inputs: &[String], options: &StripOptions, ctx: &RunContext) -> Result<BatchReport> {
    info!("Stripping metadata from {} inputs", inputs.len());

    let single = single_input(inputs, options.output.as_ref());
    let options = match single {
        Some(_) => options.clone(),
        None => StripOptions::default(),
    };

    if ctx.dry_run {
        let preview = |path: &Path| -> Result<()> {
            let output = options.output_for(path);
            ctx.preview(Message::WouldStrip { input: path, output: &output });
            Ok(())
        };
        return Ok(run_preview(inputs, ctx, &preview));
    }

    let strip = |path: &Path| -> Result<()> {
        let output = strip_exif(path, &options)?;
        ctx.say(Message::Stripped { output: &output });
        Ok(())
    };

    match single {
        Some(input) => run_single(input, strip),
        None => Ok(run_batch(inputs, ctx, &strip)),
    }
}
