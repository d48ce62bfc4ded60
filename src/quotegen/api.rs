//! # API Facade
//!
//! [`QuoteApi`] is the single entry point for a quote session, whatever the UI. It owns
//! the session's state:
//!
//! - the [`QuoteStore`] holding the one quote,
//! - the active [`View`],
//! - the [`AccessGate`] and the [`SessionStorage`] its flag lives in,
//! - the [`QuoteRenderer`].
//!
//! Every method dispatches to `commands/*` and returns `Result<CmdResult>`. Nothing here
//! writes to a terminal.
//!
//! ## The gate
//!
//! Every operation on the document checks the gate first and fails with
//! [`QuoteError::AccessDenied`] while it is locked. Only [`QuoteApi::login`] and the
//! read-only accessors work without it.
//!
//! ## Views
//!
//! Switching between editing and previewing is always an explicit call
//! ([`QuoteApi::edit_section`], [`QuoteApi::preview`]). Edits are accepted in either view
//! and never switch it.

use crate::commands::{self, config::ConfigAction, edit::Edit, CmdResult};
use crate::config::QuoteConfig;
use crate::error::{QuoteError, Result};
use crate::export::PrintHost;
use crate::gate::{AccessGate, Credentials, SessionStorage};
use crate::model::Quote;
use crate::render::{EditorSection, QuoteRenderer, View};
use crate::store::QuoteStore;
use std::path::Path;
use std::sync::Arc;

pub struct QuoteApi {
    store: QuoteStore,
    view: View,
    renderer: QuoteRenderer,
    gate: AccessGate,
    session: SessionStorage,
}

impl QuoteApi {
    pub fn new(quote: Quote, renderer: QuoteRenderer, gate: AccessGate) -> Self {
        Self {
            store: QuoteStore::new(quote),
            view: View::default(),
            renderer,
            gate,
            session: SessionStorage::new(),
        }
    }

    /// A session seeded, branded and gated from `config`.
    pub fn from_config(config: &QuoteConfig, use_color: bool) -> Result<Self> {
        let renderer = QuoteRenderer::with_color(config.branding(), use_color)?;
        Ok(Self::new(
            Quote::seeded(config.seed()),
            renderer,
            config.access_gate(),
        ))
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn renderer(&self) -> &QuoteRenderer {
        &self.renderer
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked(&self.session)
    }

    pub fn gate_configured(&self) -> bool {
        self.gate.is_configured()
    }

    pub fn login(&mut self, credentials: &Credentials) -> CmdResult {
        commands::login::run(&self.gate, &mut self.session, credentials)
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Result<Arc<Quote>> {
        self.ensure_unlocked()?;
        Ok(self.store.snapshot())
    }

    pub fn edit(&mut self, edit: Edit) -> Result<CmdResult> {
        self.ensure_unlocked()?;
        commands::edit::run(&mut self.store, edit)
    }

    /// Switches to the editor, on `section` when given, and renders it.
    pub fn edit_section(&mut self, section: Option<EditorSection>) -> Result<CmdResult> {
        self.ensure_unlocked()?;
        let section = match (section, self.view) {
            (Some(section), _) => section,
            (None, View::Editing(current)) => current,
            (None, View::Previewing) => EditorSection::default(),
        };
        self.view = View::Editing(section);
        self.show()
    }

    pub fn preview(&mut self) -> Result<CmdResult> {
        self.ensure_unlocked()?;
        self.view = View::Previewing;
        self.show()
    }

    /// Renders the active view from the current snapshot.
    pub fn show(&self) -> Result<CmdResult> {
        self.ensure_unlocked()?;
        commands::view::run(&self.renderer, &self.store.snapshot(), self.view)
    }

    pub fn print(&self, host: &dyn PrintHost) -> Result<CmdResult> {
        self.ensure_unlocked()?;
        commands::print::run(&self.renderer, &self.store.snapshot(), self.view, host)
    }

    pub fn dump(&self) -> Result<CmdResult> {
        self.ensure_unlocked()?;
        commands::view::dump(&self.store.snapshot())
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(QuoteError::AccessDenied)
        }
    }
}

/// Reads or changes the configuration stored in `dir`. Needs no session.
pub fn config(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(dir, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{PrintDispatch, PrintJob};
    use crate::model::FieldUpdate;
    use crate::render::{Branding, Rendered};
    use std::cell::Cell;

    struct CountingHost(Cell<usize>);

    impl PrintHost for CountingHost {
        fn print(&self, _job: &PrintJob) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    fn api(gate: AccessGate) -> QuoteApi {
        let renderer = QuoteRenderer::with_color(Branding::default(), false).unwrap();
        QuoteApi::new(Quote::default(), renderer, gate)
    }

    fn locked() -> QuoteApi {
        api(AccessGate::new(Some(Credentials::new("admin", "pw"))))
    }

    #[test]
    fn locked_session_refuses_document_operations() {
        let mut api = locked();
        assert!(!api.is_unlocked());
        assert!(matches!(api.show(), Err(QuoteError::AccessDenied)));
        assert!(matches!(api.preview(), Err(QuoteError::AccessDenied)));
        assert!(matches!(api.dump(), Err(QuoteError::AccessDenied)));
        assert!(matches!(api.snapshot(), Err(QuoteError::AccessDenied)));
        assert!(matches!(
            api.edit(Edit::AddPage),
            Err(QuoteError::AccessDenied)
        ));
        assert_eq!(api.view(), View::default());
    }

    #[test]
    fn login_unlocks_the_session() {
        let mut api = locked();
        api.login(&Credentials::new("admin", "bad"));
        assert!(!api.is_unlocked());

        api.login(&Credentials::new("admin", "pw"));
        assert!(api.is_unlocked());
        assert!(api.show().is_ok());
    }

    #[test]
    fn views_switch_only_on_request() {
        let mut api = api(AccessGate::open());
        api.edit_section(Some(EditorSection::Pricing)).unwrap();
        assert_eq!(api.view(), View::Editing(EditorSection::Pricing));

        api.edit(Edit::AddPriceModule).unwrap();
        assert_eq!(api.view(), View::Editing(EditorSection::Pricing));

        let result = api.preview().unwrap();
        assert!(matches!(result.rendered, Some(Rendered::Preview(_))));

        api.edit(Edit::Field(FieldUpdate::ClientName("Venad".into())))
            .unwrap();
        assert!(api.view().is_previewing());

        api.edit_section(None).unwrap();
        assert_eq!(api.view(), View::Editing(EditorSection::ClientInfo));
    }

    #[test]
    fn printing_needs_the_preview() {
        let mut api = api(AccessGate::open());
        let host = CountingHost(Cell::new(0));

        let result = api.print(&host).unwrap();
        assert_eq!(result.print, Some(PrintDispatch::Skipped));
        assert_eq!(host.0.get(), 0);

        api.preview().unwrap();
        let result = api.print(&host).unwrap();
        assert_eq!(result.print, Some(PrintDispatch::Submitted));
        assert_eq!(host.0.get(), 1);
    }

    #[test]
    fn earlier_snapshots_survive_edits() {
        let mut api = api(AccessGate::open());
        let before = api.snapshot().unwrap();
        api.edit(Edit::Field(FieldUpdate::ClientName("Venad".into())))
            .unwrap();
        assert_eq!(before.client_name, "");
        assert_eq!(api.snapshot().unwrap().client_name, "Venad");
    }

    #[test]
    fn default_config_locks_the_session() {
        let mut api = api(QuoteConfig::default().access_gate_with(|_| None));
        assert!(!api.is_unlocked());
        assert!(!api.gate_configured());
        assert!(matches!(
            api.edit(Edit::AddPriceModule),
            Err(QuoteError::AccessDenied)
        ));

        let result = api.login(&Credentials::new("admin", "admin"));
        assert_eq!(result.messages[0].content, crate::gate::NOT_CONFIGURED);
        assert!(!api.is_unlocked());
        assert!(matches!(api.show(), Err(QuoteError::AccessDenied)));
    }

    #[test]
    fn config_seeds_the_session() {
        let mut config = QuoteConfig::default();
        config.company_name = "Acme Labs".into();
        config.gate_open = true;
        let api = QuoteApi::from_config(&config, false).unwrap();
        let quote = api.snapshot().unwrap();
        assert_eq!(quote.prepared_by, "Acme Labs");
    }
}
