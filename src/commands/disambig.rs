//! Disambig command handler - Extract disambiguation-page entities

use crate::cli::DisambigArgs;
use crate::commands::{render_report, text_fields, CommandContext};
use crate::disambig::DisambigPipeline;
use crate::error::Result;

/// Run the disambig command
pub fn run_disambig(args: &DisambigArgs, ctx: &CommandContext) -> Result<String> {
    let config = args.to_config(ctx.workers);

    let progress = ctx.progress_bars();
    let mut pipeline = DisambigPipeline::new(&config);
    if let Some(factory) = progress.as_deref() {
        pipeline = pipeline.with_progress(factory);
    }
    let report = pipeline.run()?;

    render_report(&report, ctx.format, |value| {
        let mut output = String::from("Disambiguation extraction complete:\n");
        output.push_str(&text_fields(value));
        output
    })
}
