//! # Render Pipeline
//!
//! Turns a quote snapshot into what the user sees. There are exactly two views, held
//! in [`View`]:
//!
//! - **Editing**: the sectioned form panel ([`editor`]), one section at a time.
//! - **Previewing**: the print-ready document ([`preview`]), produced both as HTML
//!   markup (the preview root handed to the exporter) and as a terminal outline.
//!
//! Switching views is always an explicit user action. Nothing here caches: every call
//! recomputes [`Derived`] values and the filtered document from the snapshot it is
//! given, so rendering one snapshot twice yields identical output.
//!
//! Layout math (padding, numbering, filtering, money formatting) stays in Rust;
//! templates only present.

pub mod editor;
mod engine;
pub mod preview;
pub mod styles;
mod templates;

pub use editor::EditorSection;
pub use preview::{Branding, PreviewModel};

use crate::commands::{CmdMessage, MessageLevel};
use crate::derive::Derived;
use crate::error::Result;
use crate::model::Quote;
use engine::Engine;
use serde::Serialize;
use styles::names;
use tracing::debug;

/// Which presentation of the quote is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Editing(EditorSection),
    Previewing,
}

impl View {
    pub fn is_previewing(&self) -> bool {
        matches!(self, View::Previewing)
    }
}

impl Default for View {
    fn default() -> Self {
        View::Editing(EditorSection::default())
    }
}

/// The preview in both of its forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutput {
    /// Terminal outline of the document.
    pub text: String,
    /// The `print-root` element: the markup the exporter prints.
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Editor(String),
    Preview(PreviewOutput),
}

impl Rendered {
    /// What a terminal shows for this rendition.
    pub fn text(&self) -> &str {
        match self {
            Rendered::Editor(text) => text,
            Rendered::Preview(output) => &output.text,
        }
    }

    /// The preview root markup; absent while editing.
    pub fn preview_root(&self) -> Option<&str> {
        match self {
            Rendered::Editor(_) => None,
            Rendered::Preview(output) => Some(&output.markup),
        }
    }
}

#[derive(Serialize)]
struct MessageData<'a> {
    content: &'a str,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData<'a> {
    messages: Vec<MessageData<'a>>,
}

pub struct QuoteRenderer {
    engine: Engine,
    branding: Branding,
}

impl QuoteRenderer {
    /// A renderer that styles terminal output when stdout supports colour.
    pub fn new(branding: Branding) -> Result<Self> {
        Ok(Self {
            engine: Engine::new()?,
            branding,
        })
    }

    pub fn with_color(branding: Branding, use_color: bool) -> Result<Self> {
        Ok(Self {
            engine: Engine::with_color(use_color)?,
            branding,
        })
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    pub fn render(&self, quote: &Quote, view: View) -> Result<Rendered> {
        match view {
            View::Editing(section) => self.render_editor(quote, section).map(Rendered::Editor),
            View::Previewing => self.render_preview(quote).map(Rendered::Preview),
        }
    }

    pub fn render_editor(&self, quote: &Quote, section: EditorSection) -> Result<String> {
        let derived = Derived::of(quote);
        let panel = editor::panel(quote, &derived, section, &self.branding.company_name);
        debug!(section = section.slug(), "rendering editor panel");
        self.engine.render(templates::EDITOR, &panel)
    }

    pub fn preview_model(&self, quote: &Quote) -> PreviewModel {
        PreviewModel::build(quote, &Derived::of(quote), &self.branding)
    }

    pub fn render_preview(&self, quote: &Quote) -> Result<PreviewOutput> {
        let model = self.preview_model(quote);
        debug!(
            pages = model.scope.pages.len(),
            priced = model.pricing.is_some(),
            terms = model.terms.len(),
            "rendering preview"
        );
        Ok(PreviewOutput {
            text: self.engine.render(templates::PREVIEW, &model)?,
            markup: self.engine.render(templates::PRINT_ROOT, &model)?,
        })
    }

    /// Renders command messages, one per line, styled by level.
    pub fn render_messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let data = MessagesData {
            messages: messages
                .iter()
                .map(|msg| MessageData {
                    content: &msg.content,
                    style: match msg.level {
                        MessageLevel::Info => names::INFO,
                        MessageLevel::Success => names::SUCCESS,
                        MessageLevel::Warning => names::WARNING,
                        MessageLevel::Error => names::ERROR,
                    },
                })
                .collect(),
        };

        self.engine
            .render(templates::MESSAGES, &data)
            .unwrap_or_else(|_| {
                messages
                    .iter()
                    .map(|m| format!("{}\n", m.content))
                    .collect()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, PriceModule, QuoteSeed};

    fn renderer() -> QuoteRenderer {
        QuoteRenderer::with_color(Branding::default(), false).unwrap()
    }

    fn quote() -> Quote {
        Quote::seeded(QuoteSeed {
            date: "18/10/2026".into(),
            prepared_by: "Tresvance Softwares".into(),
            payment: Default::default(),
        })
    }

    fn filled_quote() -> Quote {
        let mut q = quote();
        q.client_name = "Venad Finances".into();
        q.quote_ref = "VENADFIN_QUOTE_26".into();
        *q.main_nav_items.get_mut(0).unwrap() = "Home".into();
        {
            let page = q.pages.get_mut(0).unwrap();
            page.name = "Home Page".into();
            page.description = "Landing page".into();
            *page.features.get_mut(0).unwrap() = "Hero banner".into();
        }
        let module = q.price_modules.get_mut(0).unwrap();
        module.name = "UI/UX Design".into();
        module.price = "15000".into();
        q
    }

    #[test]
    fn default_view_is_client_info_editor() {
        assert_eq!(View::default(), View::Editing(EditorSection::ClientInfo));
        assert!(!View::default().is_previewing());
        assert!(View::Previewing.is_previewing());
    }

    #[test]
    fn editor_has_no_preview_root() {
        let rendered = renderer()
            .render(&quote(), View::Editing(EditorSection::Pricing))
            .unwrap();
        assert!(rendered.preview_root().is_none());
        assert!(rendered.text().contains("TOTAL PROJECT COST"));
        assert!(rendered.text().contains("▸ Pricing"));
    }

    #[test]
    fn preview_root_is_the_print_root_element() {
        let rendered = renderer().render(&filled_quote(), View::Previewing).unwrap();
        let markup = rendered.preview_root().unwrap();
        assert!(markup.trim_start().starts_with("<div id=\"print-root\""));
        assert!(markup.contains("Hero banner"));
        assert!(markup.contains("Fifteen Thousand Rupees Only"));
    }

    #[test]
    fn preview_is_idempotent() {
        let r = renderer();
        let q = filled_quote();
        assert_eq!(r.render_preview(&q).unwrap(), r.render_preview(&q).unwrap());
    }

    #[test]
    fn preview_text_keeps_fixed_section_numbers() {
        let mut q = quote();
        for i in 0..3 {
            *q.additional_features.get_mut(i).unwrap() = String::new();
        }
        let text = renderer().render_preview(&q).unwrap().text;
        assert!(text.contains("2. WEBSITE STRUCTURE & SCOPE"));
        assert!(!text.contains("3. ADDITIONAL FEATURES"));
        assert!(!text.contains("4. DETAILED PRICING BREAKDOWN"));
        assert!(text.contains("5. TERMS & CONDITIONS"));
        assert!(text.contains("6. WHY TRESVANCE SOFTWARES?"));
        assert!(text.contains("7. PAYMENT DETAILS"));
    }

    #[test]
    fn blank_named_entries_never_reach_the_preview() {
        let mut q = filled_quote();
        q.pages.push(Page {
            name: String::new(),
            description: "Orphan description".into(),
            features: crate::model::Entries::one("Orphan feature".into()),
        });
        q.price_modules.push(PriceModule {
            name: " ".into(),
            price: "99999".into(),
        });
        let output = renderer().render_preview(&q).unwrap();
        for rendition in [&output.text, &output.markup] {
            assert!(!rendition.contains("Orphan"));
            assert!(!rendition.contains("99,999"));
        }
    }

    #[test]
    fn quote_text_is_escaped_in_markup() {
        let mut q = filled_quote();
        q.client_name = "<script>alert(1)</script>".into();
        let markup = renderer().render_preview(&q).unwrap().markup;
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
    }

    #[test]
    fn amc_row_toggles_in_both_renditions() {
        let r = renderer();
        let mut q = quote();
        q.amc_enabled = false;
        let off = r.render_preview(&q).unwrap();
        assert!(!off.text.contains("AMC CHARGE"));
        assert!(!off.markup.contains("AMC CHARGE"));

        q.amc_enabled = true;
        let on = r.render_preview(&q).unwrap();
        assert_eq!(on.text.matches("AMC CHARGE").count(), 1);
        assert_eq!(on.markup.matches("AMC CHARGE").count(), 1);
    }

    #[test]
    fn messages_render_one_per_line() {
        let out = renderer().render_messages(&[
            CmdMessage::success("Page added"),
            CmdMessage::info("Kept the last page"),
        ]);
        assert_eq!(out, "Page added\nKept the last page\n");
        assert_eq!(renderer().render_messages(&[]), "");
    }
}
