//! # Preview Document
//!
//! [`PreviewModel`] is the read-only document a quote prints as. It is rebuilt from the
//! snapshot on every render and carries only what the document shows:
//!
//! - pages with a blank name are dropped, along with all their features; blank features
//!   of kept pages are dropped too
//! - navigation items that are blank are dropped
//! - the additional features block exists only with at least one non-blank entry
//! - the pricing block exists only when some module is named; unnamed modules never
//!   appear, and serials count the rows that do
//! - terms need a heading; the AMC row is appended only when enabled and non-blank
//!
//! Section numbers are fixed (`3.` and `4.` may be absent, `5.` stays `5.`).

use crate::derive::{format_inr, Derived};
use crate::model::{PaymentField, Quote};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const AMC_HEADING: &str = "AMC CHARGE";
pub const CURRENCY: &str = "INR (Indian Rupees)";

const CLIENT_FALLBACK: &str = "Client Name";
const CLIENT_PLACEHOLDER: &str = "[Client Name]";
const BLANK_CELL: &str = "—";

pub const DEFAULT_WHY_US: [&str; 6] = [
    "Deep understanding of regulatory requirements for software developments.",
    "Strong UI/UX expertise with modern, conversion-driven design.",
    "End-to-end capabilities: design, development, integrations and deployment.",
    "Dedicated project management with clear milestone based delivery.",
    "Transparent communication and proactive status reporting throughout the project.",
    "Post launch support and training to ensure smooth handover.",
];

/// Company details printed on the cover, in section 6 and in the closing block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branding {
    pub company_name: String,
    pub address: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub why_us: Vec<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "Tresvance Softwares".to_string(),
            address: "Souparnika Building, Priyadarsini Nagar 128, Kilikolloor P.O, Kollam 691500"
                .to_string(),
            website: "www.tresvance.com".to_string(),
            email: "info@tresvance.com".to_string(),
            phone: "+91 8129108139".to_string(),
            why_us: DEFAULT_WHY_US.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    /// Spaces that align `value` in the terminal outline.
    pub padding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewPage {
    pub number: String,
    pub name: String,
    pub description: Option<String>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCountLine {
    pub main: u64,
    pub sub: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub nav_items: Vec<String>,
    pub counts: Option<PageCountLine>,
    pub pages: Vec<PreviewPage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub serial: String,
    pub name: String,
    pub price: String,
    pub padding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pricing {
    pub rows: Vec<PriceRow>,
    pub total: String,
    pub words: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermRow {
    pub heading: String,
    pub content: String,
}

/// The filtered document, ready for either template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewModel {
    pub company: String,
    pub company_upper: String,
    pub company_address: String,
    pub contact: Vec<String>,
    pub project_label: String,
    pub project_upper: String,
    pub project_lower: String,
    pub client_display: String,
    pub client_mention: String,
    pub client_address: Option<String>,
    pub cover: Vec<KeyValue>,
    pub scope: Scope,
    pub additional_features: Vec<String>,
    pub pricing: Option<Pricing>,
    pub terms: Vec<TermRow>,
    pub why_us_title: String,
    pub why_us: Vec<String>,
    pub payment: Vec<KeyValue>,
    pub prepared_by: String,
}

fn non_blank(text: &str) -> bool {
    !text.trim().is_empty()
}

fn or_dash(text: &str) -> String {
    if non_blank(text) {
        text.to_string()
    } else {
        BLANK_CELL.to_string()
    }
}

fn aligned(pairs: Vec<(String, String)>) -> Vec<KeyValue> {
    let width = pairs.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    pairs
        .into_iter()
        .map(|(key, value)| KeyValue {
            padding: " ".repeat(width - key.width()),
            key,
            value,
        })
        .collect()
}

/// How a module's price cell reads in the document. Only a whole decimal literal is
/// formatted; anything else, `"15000/-"` included, is shown as typed.
pub fn price_cell(price: &str) -> String {
    let trimmed = price.trim();
    if trimmed.is_empty() {
        return BLANK_CELL.to_string();
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => format_inr(value),
        _ => trimmed.to_string(),
    }
}

impl PreviewModel {
    pub fn build(quote: &Quote, derived: &Derived, branding: &Branding) -> Self {
        let client_named = non_blank(&quote.client_name);
        let client_display = if client_named {
            quote.client_name.clone()
        } else {
            CLIENT_FALLBACK.to_string()
        };
        let client_mention = if client_named {
            quote.client_name.clone()
        } else {
            CLIENT_PLACEHOLDER.to_string()
        };

        let cover = aligned(vec![
            ("Prepared For".into(), or_dash(&quote.client_name)),
            ("Prepared By".into(), quote.prepared_by.clone()),
            ("Quote Reference".into(), or_dash(&quote.quote_ref)),
            ("Date".into(), quote.date.clone()),
            ("Currency".into(), CURRENCY.to_string()),
            ("Project Type".into(), derived.project_label.clone()),
        ]);

        let payment = aligned(
            PaymentField::all()
                .iter()
                .map(|f| {
                    (
                        f.document_label().to_string(),
                        quote.payment.get(*f).to_string(),
                    )
                })
                .collect(),
        );

        Self {
            company: branding.company_name.clone(),
            company_upper: branding.company_name.to_uppercase(),
            company_address: branding.address.clone(),
            contact: [&branding.website, &branding.email, &branding.phone]
                .into_iter()
                .filter(|s| non_blank(s))
                .cloned()
                .collect(),
            project_label: derived.project_label.clone(),
            project_upper: derived.project_label.to_uppercase(),
            project_lower: derived.project_label.to_lowercase(),
            client_display,
            client_mention,
            client_address: non_blank(&quote.client_address).then(|| quote.client_address.clone()),
            cover,
            scope: scope(quote, derived),
            additional_features: quote
                .additional_features
                .iter()
                .filter(|f| non_blank(f))
                .cloned()
                .collect(),
            pricing: pricing(quote, derived),
            terms: terms(quote),
            why_us_title: format!("WHY {}?", branding.company_name.to_uppercase()),
            why_us: branding.why_us.clone(),
            payment,
            prepared_by: quote.prepared_by.clone(),
        }
    }
}

fn scope(quote: &Quote, derived: &Derived) -> Scope {
    let pages = quote
        .pages
        .iter()
        .filter(|p| non_blank(&p.name))
        .enumerate()
        .map(|(i, page)| PreviewPage {
            number: format!("2.{}", i + 2),
            name: page.name.clone(),
            description: non_blank(&page.description).then(|| page.description.clone()),
            features: page
                .features
                .iter()
                .filter(|f| non_blank(f))
                .cloned()
                .collect(),
        })
        .collect();

    let counts = (!derived.pages.is_empty()).then(|| PageCountLine {
        main: derived.pages.main,
        sub: derived.pages.sub,
        total: derived.pages.total,
    });

    Scope {
        nav_items: quote
            .main_nav_items
            .iter()
            .filter(|n| non_blank(n))
            .cloned()
            .collect(),
        counts,
        pages,
    }
}

fn pricing(quote: &Quote, derived: &Derived) -> Option<Pricing> {
    let named: Vec<_> = quote
        .price_modules
        .iter()
        .filter(|m| non_blank(&m.name))
        .collect();
    if named.is_empty() {
        return None;
    }

    let width = named.iter().map(|m| m.name.width()).max().unwrap_or(0);
    let rows = named
        .into_iter()
        .enumerate()
        .map(|(i, module)| PriceRow {
            serial: format!("{:02}", i + 1),
            padding: " ".repeat(width - module.name.width()),
            name: module.name.clone(),
            price: price_cell(&module.price),
        })
        .collect();

    Some(Pricing {
        rows,
        total: derived.total_display.clone(),
        words: derived.total_words.clone(),
    })
}

fn terms(quote: &Quote) -> Vec<TermRow> {
    let mut rows: Vec<TermRow> = quote
        .terms
        .iter()
        .filter(|t| non_blank(&t.heading))
        .map(|t| TermRow {
            heading: t.heading.clone(),
            content: t.content.clone(),
        })
        .collect();
    if quote.amc_enabled && non_blank(&quote.amc_line) {
        rows.push(TermRow {
            heading: AMC_HEADING.to_string(),
            content: quote.amc_line.clone(),
        });
    }
    rows
}
