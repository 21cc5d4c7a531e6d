use std::path::Path;

use clap::Subcommand;

use crate::context::{CliResult, Context};
use crate::render;

#[derive(Subcommand)]
pub enum SavedAction {
    /// List saved prompts
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a prompt
    Add {
        /// Prompt id
        id: String,
    },
    /// Unsave a prompt
    Remove {
        /// Prompt id
        id: String,
    },
    /// Save or unsave a prompt (the last drawn card by default)
    Toggle {
        /// Prompt id
        id: Option<String>,
    },
    /// Unsave everything
    Clear,
}

pub fn run(action: SavedAction, catalog: Option<&Path>) -> CliResult {
    let mut ctx = Context::open(catalog)?;

    match action {
        SavedAction::List { json } => {
            let saved = ctx.session.saved_prompts();
            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else if saved.is_empty() {
                println!("NO SAVED CARDS");
                println!("Draw some cards and archive your favorites");
            } else {
                for prompt in saved {
                    println!("{}", render::row(prompt));
                }
            }
        }
        SavedAction::Add { id } => {
            require_known(&ctx, &id)?;
            if ctx.session.favorites_mut().add(&id) {
                println!("saved {id}");
            } else if ctx.session.favorites().contains(&id) {
                println!("{id} already saved");
            } else {
                return Err(format!("could not save {id}").into());
            }
        }
        SavedAction::Remove { id } => {
            if ctx.session.favorites_mut().remove(&id) {
                println!("removed {id}");
            } else if ctx.session.favorites().contains(&id) {
                return Err(format!("could not remove {id}").into());
            } else {
                println!("{id} was not saved");
            }
        }
        SavedAction::Toggle { id } => {
            let saved = match id {
                Some(id) => {
                    require_known(&ctx, &id)?;
                    ctx.session.favorites_mut().toggle(&id)
                }
                None => ctx
                    .session
                    .toggle_save_current()
                    .ok_or("no card drawn yet")?,
            };
            println!("{}", if saved { "ARCHIVED" } else { "REMOVED" });
        }
        SavedAction::Clear => {
            ctx.session.favorites_mut().clear();
            if !ctx.session.favorites().is_empty() {
                return Err("could not clear saved prompts".into());
            }
            println!("cleared");
        }
    }
    Ok(())
}

fn require_known(ctx: &Context, id: &str) -> CliResult {
    if ctx.session.catalog().get(id).is_none() {
        return Err(format!("unknown prompt id: {id}").into());
    }
    Ok(())
}
