//! Sending the preview to a print host.

use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::{self, PrintDispatch, PrintHost};
use crate::model::Quote;
use crate::render::{QuoteRenderer, View};

/// Prints the preview root of `view`. While editing there is no preview root, so
/// nothing is printed.
pub fn run(
    renderer: &QuoteRenderer,
    quote: &Quote,
    view: View,
    host: &dyn PrintHost,
) -> Result<CmdResult> {
    let rendered = if view.is_previewing() {
        Some(renderer.render(quote, view)?)
    } else {
        None
    };
    let preview_root = rendered.as_ref().and_then(|r| r.preview_root());

    let outcome = export::dispatch(preview_root, host);
    let message = match outcome {
        PrintDispatch::Skipped => CmdMessage::info("Nothing to print; switch to the preview first"),
        PrintDispatch::Submitted => CmdMessage::success("Quote sent to print"),
        PrintDispatch::HostFailed => CmdMessage::warning("The print host could not take the quote"),
    };
    Ok(CmdResult::default().with_print(outcome).with_message(message))
}
