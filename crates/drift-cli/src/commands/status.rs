use std::path::Path;

use crate::context::{CliResult, Context};
use crate::render;

pub fn run(json: bool, catalog: Option<&Path>) -> CliResult {
    let ctx = Context::open(catalog)?;
    let session = &ctx.session;

    if json {
        let status = serde_json::json!({
            "snapshot": session.engine().snapshot(),
            "catalog_size": session.catalog().len(),
            "saved": session.favorites().len(),
            "shuffle": ctx.config.shuffle,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    match session.current() {
        Some(prompt) => println!("{}\n", render::card(prompt, session.is_current_saved())),
        None => println!("DRAW A CARD\nBegin your journey\n"),
    }
    println!(
        "{} IN THE ARCHIVE",
        render::plural(session.catalog().len() as u64, "ADVENTURE")
    );
    if session.draw_count() > 0 {
        println!("{} DRAWN", render::plural(session.draw_count(), "CARD"));
    }
    println!("{} SAVED", render::plural(session.favorites().len() as u64, "CARD"));
    Ok(())
}
