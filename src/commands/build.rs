//! Build command handler - Build the alias -> entity index

use crate::cli::BuildArgs;
use crate::commands::{render_report, text_fields, CommandContext};
use crate::error::Result;
use crate::pipeline::AliasPipeline;

/// Run the build command
pub fn run_build(args: &BuildArgs, ctx: &CommandContext) -> Result<String> {
    let config = args.to_config(ctx.workers);

    if ctx.verbose {
        eprintln!(
            "Building alias index from {} with {} workers",
            config.sources.data_dir.display(),
            config.workers
        );
    }

    let progress = ctx.progress_bars();
    let mut pipeline = AliasPipeline::new(&config);
    if let Some(factory) = progress.as_deref() {
        pipeline = pipeline.with_progress(factory);
    }
    let report = pipeline.run()?;

    render_report(&report, ctx.format, |value| {
        let mut output = String::from("Alias index build complete:\n");
        output.push_str(&text_fields(value));
        output
    })
}
