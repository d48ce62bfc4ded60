//! # Document State Store
//!
//! [`QuoteStore`] owns the quote a session works on and is the only thing allowed to
//! change it.
//!
//! ## Snapshots
//!
//! The current document is held as an `Arc<Quote>`. Every operation clones the current
//! value, applies the change to the clone and swaps the new value in, bumping
//! [`QuoteStore::version`]. A snapshot handed out earlier is therefore never altered:
//! renderers and the exporter can hold on to one while editing carries on.
//!
//! ## Contract
//!
//! - No operation fails and none does I/O.
//! - Removing from a collection that holds a single entry leaves it as is (see
//!   [`Entries::remove`]).
//! - Indices are zero-based and must come from the current snapshot. Out-of-range
//!   indices are a caller bug; the store ignores them. User input is validated one
//!   layer up, in `commands::edit`.

use crate::model::{
    Entries, FieldUpdate, Page, PageField, PaymentField, PriceField, PriceModule, Quote, Term,
    TermField,
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct QuoteStore {
    current: Arc<Quote>,
    version: u64,
}

impl QuoteStore {
    pub fn new(quote: Quote) -> Self {
        Self {
            current: Arc::new(quote),
            version: 0,
        }
    }

    /// The current document. Cheap to clone, never mutated afterwards.
    pub fn snapshot(&self) -> Arc<Quote> {
        Arc::clone(&self.current)
    }

    pub fn quote(&self) -> &Quote {
        &self.current
    }

    /// Number of snapshots committed since the store was created.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn commit<F>(&mut self, op: &'static str, change: F)
    where
        F: FnOnce(&mut Quote),
    {
        let mut next = Quote::clone(&self.current);
        change(&mut next);
        self.current = Arc::new(next);
        self.version += 1;
        debug!(op, version = self.version, "quote snapshot committed");
    }

    // --- scalar fields ---

    pub fn set_field(&mut self, update: FieldUpdate) {
        self.commit("set_field", |q| update.apply(q));
    }

    pub fn set_payment(&mut self, field: PaymentField, value: String) {
        self.commit("set_payment", |q| q.payment.set(field, value));
    }

    // --- pages ---

    pub fn add_page(&mut self) {
        self.commit("add_page", |q| q.pages.push(Page::empty()));
    }

    pub fn remove_page(&mut self, index: usize) {
        self.commit("remove_page", |q| {
            q.pages.remove(index);
        });
    }

    pub fn set_page_field(&mut self, index: usize, field: PageField, value: String) {
        self.commit("set_page_field", |q| {
            if let Some(page) = q.pages.get_mut(index) {
                match field {
                    PageField::Name => page.name = value,
                    PageField::Description => page.description = value,
                }
            }
        });
    }

    // --- page features ---

    pub fn add_feature(&mut self, page: usize) {
        self.commit("add_feature", |q| {
            if let Some(page) = q.pages.get_mut(page) {
                page.features.push(String::new());
            }
        });
    }

    pub fn set_feature(&mut self, page: usize, feature: usize, value: String) {
        self.commit("set_feature", |q| {
            if let Some(slot) = q
                .pages
                .get_mut(page)
                .and_then(|p| p.features.get_mut(feature))
            {
                *slot = value;
            }
        });
    }

    pub fn remove_feature(&mut self, page: usize, feature: usize) {
        self.commit("remove_feature", |q| {
            if let Some(page) = q.pages.get_mut(page) {
                page.features.remove(feature);
            }
        });
    }

    // --- main navigation items ---

    pub fn add_nav_item(&mut self) {
        self.commit("add_nav_item", |q| q.main_nav_items.push(String::new()));
    }

    pub fn set_nav_item(&mut self, index: usize, value: String) {
        self.commit("set_nav_item", |q| set_text(&mut q.main_nav_items, index, value));
    }

    pub fn remove_nav_item(&mut self, index: usize) {
        self.commit("remove_nav_item", |q| {
            q.main_nav_items.remove(index);
        });
    }

    // --- additional features ---

    pub fn add_additional_feature(&mut self) {
        self.commit("add_additional_feature", |q| {
            q.additional_features.push(String::new())
        });
    }

    pub fn set_additional_feature(&mut self, index: usize, value: String) {
        self.commit("set_additional_feature", |q| {
            set_text(&mut q.additional_features, index, value)
        });
    }

    pub fn remove_additional_feature(&mut self, index: usize) {
        self.commit("remove_additional_feature", |q| {
            q.additional_features.remove(index);
        });
    }

    // --- price modules ---

    pub fn add_price_module(&mut self) {
        self.commit("add_price_module", |q| {
            q.price_modules.push(PriceModule::default())
        });
    }

    pub fn set_price_module(&mut self, index: usize, field: PriceField, value: String) {
        self.commit("set_price_module", |q| {
            if let Some(module) = q.price_modules.get_mut(index) {
                match field {
                    PriceField::Name => module.name = value,
                    PriceField::Price => module.price = value,
                }
            }
        });
    }

    pub fn remove_price_module(&mut self, index: usize) {
        self.commit("remove_price_module", |q| {
            q.price_modules.remove(index);
        });
    }

    // --- terms ---

    pub fn add_term(&mut self) {
        self.commit("add_term", |q| q.terms.push(Term::default()));
    }

    pub fn set_term(&mut self, index: usize, field: TermField, value: String) {
        self.commit("set_term", |q| {
            if let Some(term) = q.terms.get_mut(index) {
                match field {
                    TermField::Heading => term.heading = value,
                    TermField::Content => term.content = value,
                }
            }
        });
    }

    pub fn remove_term(&mut self, index: usize) {
        self.commit("remove_term", |q| {
            q.terms.remove(index);
        });
    }
}

impl Default for QuoteStore {
    fn default() -> Self {
        Self::new(Quote::default())
    }
}

fn set_text(entries: &mut Entries<String>, index: usize, value: String) {
    if let Some(slot) = entries.get_mut(index) {
        *slot = value;
    }
}
