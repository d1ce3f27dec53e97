//! `imgai resize`

use std::path::Path;
use tracing::info;

use crate::commands::{run_batch, run_preview, run_single, single_input, RunContext};
use crate::error::{ImgaiError, Result};
use crate::i18n::Message;
use crate::parallel::BatchReport;
use crate::processing::resize::{plan_resize, resize_image, ResizeOptions};
use crate::processing::validation::validate_dimensions;

pub fn run(inputs: &[String], options: &ResizeOptions, ctx: &RunContext) -> Result<BatchReport> {
    validate_dimensions(options.width, options.height)
        .map_err(|_| ImgaiError::invalid_parameters(ctx.messages.render(Message::DimensionRequired)))?;
    info!("Resizing {} inputs to {}x{}", inputs.len(), options.width, options.height);

    let single = single_input(inputs, options.output.as_ref());
    let options = match single {
        Some(_) => options.clone(),
        None => ResizeOptions { output: None, ..options.clone() },
    };

    if ctx.dry_run {
        // Reads only the header to report the target size
        let preview = |path: &Path| -> Result<()> {
            let plan = plan_resize(path, &options)?;
            ctx.preview(Message::WouldResize {
                input: path,
                output: &plan.output,
                width: plan.width,
                height: plan.height,
            });
            Ok(())
        };
        return Ok(run_preview(inputs, ctx, &preview));
    }

    let resize = |path: &Path| -> Result<()> {
        let done = resize_image(path, &options)?;
        ctx.say(Message::Resized {
            input: path,
            output: &done.output,
            width: done.width,
            height: done.height,
        });
        Ok(())
    };

    match single {
        Some(input) => run_single(input, resize),
        None => Ok(run_batch(inputs, ctx, &resize)),
    }
}
