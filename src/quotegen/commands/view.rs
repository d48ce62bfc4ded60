//! Rendering the current view and dumping the live snapshot.

use super::CmdResult;
use crate::error::Result;
use crate::model::Quote;
use crate::render::{QuoteRenderer, View};

pub fn run(renderer: &QuoteRenderer, quote: &Quote, view: View) -> Result<CmdResult> {
    let rendered = renderer.render(quote, view)?;
    Ok(CmdResult::default().with_rendered(rendered))
}

/// The snapshot as pretty JSON, for inspection only.
pub fn dump(quote: &Quote) -> Result<CmdResult> {
    let json = serde_json::to_string_pretty(quote)?;
    Ok(CmdResult::default().with_json(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Branding, EditorSection, Rendered};

    fn renderer() -> QuoteRenderer {
        QuoteRenderer::with_color(Branding::default(), false).unwrap()
    }

    #[test]
    fn renders_the_requested_view() {
        let quote = Quote::default();

        let editing = run(&renderer(), &quote, View::Editing(EditorSection::Terms)).unwrap();
        assert!(matches!(editing.rendered, Some(Rendered::Editor(_))));

        let previewing = run(&renderer(), &quote, View::Previewing).unwrap();
        let rendered = previewing.rendered.unwrap();
        assert!(rendered.preview_root().is_some());
        assert!(rendered.text().contains("QUOTATION"));
    }

    #[test]
    fn dump_is_json_of_the_snapshot() {
        let mut quote = Quote::default();
        quote.client_name = "Venad Finances".into();
        let result = dump(&quote).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result.json.unwrap()).unwrap();
        assert_eq!(value["clientName"], "Venad Finances");
        assert_eq!(value["terms"].as_array().map(Vec::len), Some(6));
    }
}
