use std::path::Path;

use clap::Args;
use drift_core::filter::counts;
use drift_core::FilterSelection;

use crate::context::{CliResult, Context};
use crate::render;

#[derive(Args)]
pub struct ListArgs {
    /// Category filter
    #[arg(long, short, default_value = "all")]
    category: String,
    /// Effort filter
    #[arg(long, short, default_value = "all")]
    effort: String,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ListArgs, catalog: Option<&Path>) -> CliResult {
    let mut ctx = Context::open(catalog)?;
    ctx.session
        .set_selection(FilterSelection::parse(&args.category, &args.effort));
    let found = ctx.session.candidates();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    for prompt in &found {
        println!("{}", render::row(prompt));
    }
    let summary = counts(found.iter().copied());
    println!(
        "\n{} of {} prompts",
        summary.total,
        ctx.session.catalog().len()
    );
    if summary.total > 0 {
        println!("{}", render::breakdown(&summary));
    }
    Ok(())
}
