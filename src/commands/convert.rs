//! `imgai convert`

use std::path::Path;
use tracing::info;

use crate::commands::{run_batch, run_preview, run_single, single_input, RunContext};
use crate::error::{ImgaiError, Result};
use crate::i18n::Message;
use crate::parallel::BatchReport;
use crate::processing::convert::{convert_image, ConvertOptions};
use crate::processing::validation::validate_quality;

pub fn run(inputs: &[String], options: &ConvertOptions, ctx: &RunContext) -> Result<BatchReport> {
    validate_quality(options.quality)
        .map_err(|_| ImgaiError::invalid_parameters(ctx.messages.render(Message::QualityRange)))?;
    info!("Converting {} inputs to {}", inputs.len(), options.format);

    let single = single_input(inputs, options.output.as_ref());
    let options = match single {
        Some(_) => options.clone(),
        None => ConvertOptions { output: None, ..options.clone() },
    };

    if ctx.dry_run {
        let preview = |path: &Path| -> Result<()> {
            let output = options.output_for(path);
            let quality = options.format.is_lossy().then_some(options.quality);
            ctx.preview(Message::WouldConvert {
                input: path,
                output: &output,
                format: options.format,
                quality,
            });
            Ok(())
        };
        return Ok(run_preview(inputs, ctx, &preview));
    }

    let convert = |path: &Path| -> Result<()> {
        let output = convert_image(path, &options)?;
        ctx.say(Message::Converted { input: path, output: &output, format: options.format });
        Ok(())
    };

    match single {
        Some(input) => run_single(input, convert),
        None => Ok(run_batch(inputs, ctx, &convert)),
    }
}
