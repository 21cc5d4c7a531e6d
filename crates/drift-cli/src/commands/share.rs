use std::path::Path;

use drift_core::share::NoClipboard;
use drift_core::{Clipboard, ShareOutcome};

use crate::context::{CliResult, Context};

/// System clipboard via arboard.
#[cfg(feature = "clipboard")]
struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), drift_core::ShareError> {
        use drift_core::ShareError;

        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ShareError::Clipboard(e.to_string()))
    }
}

#[cfg(feature = "clipboard")]
fn clipboard() -> Box<dyn Clipboard> {
    if std::env::var_os("DRIFT_NO_CLIPBOARD").is_some() {
        return Box::new(NoClipboard);
    }
    Box::new(SystemClipboard)
}

#[cfg(not(feature = "clipboard"))]
fn clipboard() -> Box<dyn Clipboard> {
    Box::new(NoClipboard)
}

pub fn run(id: Option<String>, catalog: Option<&Path>) -> CliResult {
    let ctx = Context::open(catalog)?;
    let prompt = match id {
        Some(id) => ctx
            .session
            .catalog()
            .get(&id)
            .ok_or_else(|| format!("unknown prompt id: {id}"))?,
        None => ctx.session.current().ok_or("no card drawn yet")?,
    };

    // A terminal has no native share sheet.
    let payload = ctx.session.share_payload(prompt);
    let clipboard = clipboard();
    match drift_core::share(payload, None, clipboard.as_ref()) {
        ShareOutcome::Copied { .. } => println!("Copied to clipboard!"),
        ShareOutcome::Unavailable { payload } => println!("{}", payload.text),
        ShareOutcome::Shared | ShareOutcome::Cancelled => {}
    }
    Ok(())
}
