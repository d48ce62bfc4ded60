//! Edits to the quote.
//!
//! An [`Edit`] names one store operation with 1-based positions, exactly as a user
//! typed it. [`run`] checks those positions against the current snapshot, so the store
//! only ever sees indices that exist, then applies the edit.
//!
//! Removing the last entry of a collection is not an error: the entry is kept and an
//! informational message says so.

use super::{position_to_index, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Entries, FieldUpdate, PageField, PaymentField, PriceField, TermField};
use crate::store::QuoteStore;

const PAGE: &str = "page";
const FEATURE: &str = "feature";
const NAV_ITEM: &str = "navigation item";
const EXTRA: &str = "additional feature";
const PRICE_MODULE: &str = "price module";
const TERM: &str = "term";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Field(FieldUpdate),
    Payment(PaymentField, String),

    AddPage,
    RemovePage(usize),
    SetPage {
        page: usize,
        field: PageField,
        value: String,
    },

    AddFeature {
        page: usize,
    },
    RemoveFeature {
        page: usize,
        feature: usize,
    },
    SetFeature {
        page: usize,
        feature: usize,
        value: String,
    },

    AddNavItem,
    RemoveNavItem(usize),
    SetNavItem(usize, String),

    AddExtra,
    RemoveExtra(usize),
    SetExtra(usize, String),

    AddPriceModule,
    RemovePriceModule(usize),
    SetPriceModule {
        position: usize,
        field: PriceField,
        value: String,
    },

    AddTerm,
    RemoveTerm(usize),
    SetTerm {
        position: usize,
        field: TermField,
        value: String,
    },
}

pub fn run(store: &mut QuoteStore, edit: Edit) -> Result<CmdResult> {
    let quote = store.snapshot();
    let mut result = CmdResult::default();

    match edit {
        Edit::Field(update) => {
            let name = update.field_name();
            store.set_field(update);
            result.add_message(CmdMessage::success(format!("{} updated", name)));
        }
        Edit::Payment(field, value) => {
            store.set_payment(field, value);
            result.add_message(CmdMessage::success(format!(
                "payment {} updated",
                field.key()
            )));
        }

        Edit::AddPage => {
            store.add_page();
            result.add_message(CmdMessage::success(format!(
                "Page {} added",
                quote.pages.len() + 1
            )));
        }
        Edit::RemovePage(position) => {
            let index = position_to_index(PAGE, position, quote.pages.len())?;
            removal(&mut result, &quote.pages, PAGE, position, || {
                store.remove_page(index)
            });
        }
        Edit::SetPage { page, field, value } => {
            let index = position_to_index(PAGE, page, quote.pages.len())?;
            store.set_page_field(index, field, value);
            result.add_message(CmdMessage::success(format!("Page {} updated", page)));
        }

        Edit::AddFeature { page } => {
            let index = position_to_index(PAGE, page, quote.pages.len())?;
            let count = quote.pages.get(index).map_or(0, |p| p.features.len());
            store.add_feature(index);
            result.add_message(CmdMessage::success(format!(
                "Feature {} added to page {}",
                count + 1,
                page
            )));
        }
        Edit::RemoveFeature { page, feature } => {
            let page_index = position_to_index(PAGE, page, quote.pages.len())?;
            if let Some(target) = quote.pages.get(page_index) {
                let index = position_to_index(FEATURE, feature, target.features.len())?;
                removal(&mut result, &target.features, FEATURE, feature, || {
                    store.remove_feature(page_index, index)
                });
            }
        }
        Edit::SetFeature {
            page,
            feature,
            value,
        } => {
            let page_index = position_to_index(PAGE, page, quote.pages.len())?;
            if let Some(target) = quote.pages.get(page_index) {
                let index = position_to_index(FEATURE, feature, target.features.len())?;
                store.set_feature(page_index, index, value);
                result.add_message(CmdMessage::success(format!(
                    "Feature {} of page {} updated",
                    feature, page
                )));
            }
        }

        Edit::AddNavItem => {
            store.add_nav_item();
            result.add_message(added(NAV_ITEM, quote.main_nav_items.len() + 1));
        }
        Edit::RemoveNavItem(position) => {
            let index = position_to_index(NAV_ITEM, position, quote.main_nav_items.len())?;
            removal(&mut result, &quote.main_nav_items, NAV_ITEM, position, || {
                store.remove_nav_item(index)
            });
        }
        Edit::SetNavItem(position, value) => {
            let index = position_to_index(NAV_ITEM, position, quote.main_nav_items.len())?;
            store.set_nav_item(index, value);
            result.add_message(updated(NAV_ITEM, position));
        }

        Edit::AddExtra => {
            store.add_additional_feature();
            result.add_message(added(EXTRA, quote.additional_features.len() + 1));
        }
        Edit::RemoveExtra(position) => {
            let index = position_to_index(EXTRA, position, quote.additional_features.len())?;
            removal(&mut result, &quote.additional_features, EXTRA, position, || {
                store.remove_additional_feature(index)
            });
        }
        Edit::SetExtra(position, value) => {
            let index = position_to_index(EXTRA, position, quote.additional_features.len())?;
            store.set_additional_feature(index, value);
            result.add_message(updated(EXTRA, position));
        }

        Edit::AddPriceModule => {
            store.add_price_module();
            result.add_message(added(PRICE_MODULE, quote.price_modules.len() + 1));
        }
        Edit::RemovePriceModule(position) => {
            let index = position_to_index(PRICE_MODULE, position, quote.price_modules.len())?;
            removal(
                &mut result,
                &quote.price_modules,
                PRICE_MODULE,
                position,
                || store.remove_price_module(index),
            );
        }
        Edit::SetPriceModule {
            position,
            field,
            value,
        } => {
            let index = position_to_index(PRICE_MODULE, position, quote.price_modules.len())?;
            store.set_price_module(index, field, value);
            result.add_message(updated(PRICE_MODULE, position));
        }

        Edit::AddTerm => {
            store.add_term();
            result.add_message(added(TERM, quote.terms.len() + 1));
        }
        Edit::RemoveTerm(position) => {
            let index = position_to_index(TERM, position, quote.terms.len())?;
            removal(&mut result, &quote.terms, TERM, position, || {
                store.remove_term(index)
            });
        }
        Edit::SetTerm {
            position,
            field,
            value,
        } => {
            let index = position_to_index(TERM, position, quote.terms.len())?;
            store.set_term(index, field, value);
            result.add_message(updated(TERM, position));
        }
    }

    Ok(result)
}

fn added(what: &str, position: usize) -> CmdMessage {
    CmdMessage::success(format!("{} {} added", capitalize(what), position))
}

fn updated(what: &str, position: usize) -> CmdMessage {
    CmdMessage::success(format!("{} {} updated", capitalize(what), position))
}

/// Removes through `remove` unless `entries` is at its floor.
fn removal<T, F>(result: &mut CmdResult, entries: &Entries<T>, what: &str, position: usize, remove: F)
where
    F: FnOnce(),
{
    if entries.can_remove() {
        remove();
        result.add_message(CmdMessage::success(format!(
            "{} {} removed",
            capitalize(what),
            position
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Kept the last {}; there must always be one",
            what
        )));
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::QuoteError;
    use crate::model::{ProjectType, Quote, QuoteSeed};

    fn store() -> QuoteStore {
        QuoteStore::new(Quote::seeded(QuoteSeed {
            date: "18/10/2026".into(),
            prepared_by: "Tresvance Softwares".into(),
            payment: Default::default(),
        }))
    }

    #[test]
    fn set_field_updates_snapshot() {
        let mut store = store();
        let result = run(
            &mut store,
            Edit::Field(FieldUpdate::ProjectType(ProjectType::ErpSoftware)),
        )
        .unwrap();
        assert_eq!(store.quote().project_type, ProjectType::ErpSoftware);
        assert_eq!(result.messages[0].content, "project-type updated");
    }

    #[test]
    fn add_then_set_page_by_position() {
        let mut store = store();
        let result = run(&mut store, Edit::AddPage).unwrap();
        assert_eq!(result.messages[0].content, "Page 2 added");

        run(
            &mut store,
            Edit::SetPage {
                page: 2,
                field: PageField::Name,
                value: "About Us".into(),
            },
        )
        .unwrap();
        assert_eq!(store.quote().pages.get(1).unwrap().name, "About Us");
    }

    #[test]
    fn out_of_range_position_is_reported_and_nothing_changes() {
        let mut store = store();
        let before = store.version();

        let err = run(&mut store, Edit::RemoveTerm(7)).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::NoSuchEntry {
                collection: "term",
                position: 7
            }
        ));

        let err = run(&mut store, Edit::SetNavItem(0, "Home".into())).unwrap_err();
        assert!(matches!(err, QuoteError::NoSuchEntry { position: 0, .. }));

        let err = run(
            &mut store,
            Edit::SetFeature {
                page: 1,
                feature: 2,
                value: "x".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            QuoteError::NoSuchEntry {
                collection: "feature",
                ..
            }
        ));
        assert_eq!(store.version(), before);
    }

    #[test]
    fn removing_the_last_entry_keeps_it() {
        let mut store = store();
        let result = run(&mut store, Edit::RemovePriceModule(1)).unwrap();
        assert_eq!(store.quote().price_modules.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.contains("Kept the last price module"));

        let result = run(
            &mut store,
            Edit::RemoveFeature {
                page: 1,
                feature: 1,
            },
        )
        .unwrap();
        assert_eq!(store.quote().pages.get(0).unwrap().features.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn add_then_remove_price_module_restores_collection() {
        let mut store = store();
        let original = store.quote().price_modules.clone();

        run(&mut store, Edit::AddPriceModule).unwrap();
        assert_eq!(store.quote().price_modules.len(), 2);
        let result = run(&mut store, Edit::RemovePriceModule(2)).unwrap();
        assert_eq!(result.messages[0].content, "Price module 2 removed");
        assert_eq!(store.quote().price_modules, original);
    }

    #[test]
    fn features_are_addressed_per_page() {
        let mut store = store();
        run(&mut store, Edit::AddPage).unwrap();
        let result = run(&mut store, Edit::AddFeature { page: 2 }).unwrap();
        assert_eq!(result.messages[0].content, "Feature 2 added to page 2");

        run(
            &mut store,
            Edit::SetFeature {
                page: 2,
                feature: 2,
                value: "Contact form".into(),
            },
        )
        .unwrap();
        let quote = store.quote();
        assert_eq!(quote.pages.get(0).unwrap().features.len(), 1);
        assert_eq!(
            quote.pages.get(1).unwrap().features.get(1).map(String::as_str),
            Some("Contact form")
        );
    }

    #[test]
    fn terms_and_extras_edit_in_place() {
        let mut store = store();
        run(
            &mut store,
            Edit::SetTerm {
                position: 3,
                field: TermField::Content,
                value: "Domain included.".into(),
            },
        )
        .unwrap();
        run(&mut store, Edit::RemoveExtra(1)).unwrap();

        let quote = store.quote();
        assert_eq!(quote.terms.get(2).unwrap().content, "Domain included.");
        assert_eq!(quote.additional_features.len(), 2);
        assert_eq!(
            quote.additional_features.get(0).map(String::as_str),
            Some("SEO optimized page & URL structure")
        );
    }
}
