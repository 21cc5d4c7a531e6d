use std::io::Write;
use std::path::Path;
use std::time::Duration;

use clap::Args;
use drift_core::{DrawEvent, FilterSelection};

use crate::context::{CliResult, Context};
use crate::render;

#[derive(Args)]
pub struct DrawArgs {
    /// Category to draw from (creative, social, outdoors, learning, wellness, chaos, all)
    #[arg(long, short, default_value = "all")]
    category: String,
    /// Effort level (quick, committed, fullsend, all)
    #[arg(long, short, default_value = "all")]
    effort: String,
    /// Skip the shuffle animation
    #[arg(long)]
    instant: bool,
    /// Save the drawn card
    #[arg(long)]
    save: bool,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

pub fn run(args: DrawArgs, catalog: Option<&Path>) -> CliResult {
    let mut ctx = Context::open(catalog)?;
    ctx.session
        .set_selection(FilterSelection::parse(&args.category, &args.effort));

    let reveal = if args.instant {
        let event = ctx.session.draw_now();
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
        }
        Reveal::from_event(&event)
    } else {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(animate(&mut ctx, args.json))?
    };

    match reveal {
        Reveal::Settled => {}
        Reveal::NoMatches => {
            if !args.json {
                eprintln!("no matching prompts");
            }
            return ctx.save();
        }
        Reveal::Interrupted => return ctx.save(),
    }

    if args.save {
        if let Some(prompt) = ctx.session.current() {
            let id = prompt.id.clone();
            ctx.session.favorites_mut().add(&id);
        }
    }

    if !args.json {
        if let Some(prompt) = ctx.session.current() {
            println!("{}", render::card(prompt, ctx.session.is_current_saved()));
        }
    }
    ctx.save()
}

enum Reveal {
    Settled,
    NoMatches,
    /// Cancelled with Ctrl-C, or the engine stopped without settling.
    Interrupted,
}

impl Reveal {
    fn from_event(event: &DrawEvent) -> Self {
        match event {
            DrawEvent::DrawSettled { .. } => Reveal::Settled,
            DrawEvent::NoMatches { .. } => Reveal::NoMatches,
            _ => Reveal::Interrupted,
        }
    }
}

/// Drive the shuffle from a tokio interval until it settles.
async fn animate(ctx: &mut Context, json: bool) -> CliResult<Reveal> {
    let started = ctx.session.trigger_draw();
    if json {
        println!("{}", serde_json::to_string(&started)?);
    }
    if !matches!(started, DrawEvent::ShuffleStarted { .. }) {
        return Ok(Reveal::from_event(&started));
    }

    let period = Duration::from_millis(ctx.session.engine().config().interval_ms);
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    let mut stderr = std::io::stderr();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                if let Some(event) = ctx.session.cancel() {
                    if json {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                }
                if !json {
                    eprintln!();
                }
                return Ok(Reveal::Interrupted);
            }
        }

        let Some(event) = ctx.session.tick() else {
            return Ok(Reveal::Interrupted);
        };
        if json {
            println!("{}", serde_json::to_string(&event)?);
        }
        match event {
            DrawEvent::ShuffleStep { prompt, .. } => {
                if !json {
                    write!(stderr, "{}", render::shuffle_frame(&prompt))?;
                    stderr.flush()?;
                }
            }
            DrawEvent::DrawSettled { .. } => {
                if !json {
                    write!(stderr, "\r\x1b[2K")?;
                    stderr.flush()?;
                }
                return Ok(Reveal::Settled);
            }
            _ => {}
        }
    }
}
