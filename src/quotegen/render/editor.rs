//! The editing panel.
//!
//! The panel shows one [`EditorSection`] at a time next to a list of all sections.
//! Each section is laid out as groups of labelled rows; every group carries the
//! session command that edits it. Padding and placeholders are computed here so the
//! template stays a flat loop.

use crate::derive::Derived;
use crate::model::{PaymentField, ProjectType, Quote};
use crate::error::QuoteError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

use super::styles::names;

const EMPTY: &str = "(empty)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorSection {
    #[default]
    ClientInfo,
    Pages,
    AdditionalFeatures,
    Pricing,
    Terms,
    Payment,
}

impl EditorSection {
    pub fn all() -> &'static [EditorSection] {
        &[
            EditorSection::ClientInfo,
            EditorSection::Pages,
            EditorSection::AdditionalFeatures,
            EditorSection::Pricing,
            EditorSection::Terms,
            EditorSection::Payment,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditorSection::ClientInfo => "Client Info",
            EditorSection::Pages => "Pages & Features",
            EditorSection::AdditionalFeatures => "Additional Features",
            EditorSection::Pricing => "Pricing",
            EditorSection::Terms => "Terms & Conditions",
            EditorSection::Payment => "Payment Details",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            EditorSection::ClientInfo => "client",
            EditorSection::Pages => "pages",
            EditorSection::AdditionalFeatures => "additional",
            EditorSection::Pricing => "pricing",
            EditorSection::Terms => "terms",
            EditorSection::Payment => "payment",
        }
    }
}

impl fmt::Display for EditorSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EditorSection {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let found = match wanted.as_str() {
            "client" | "client-info" | "info" => EditorSection::ClientInfo,
            "pages" | "page" | "features" => EditorSection::Pages,
            "additional" | "extra" | "extras" | "additional-features" => {
                EditorSection::AdditionalFeatures
            }
            "pricing" | "price" | "prices" => EditorSection::Pricing,
            "terms" | "term" => EditorSection::Terms,
            "payment" | "bank" => EditorSection::Payment,
            _ => {
                return Err(QuoteError::InvalidValue {
                    field: "section".to_string(),
                    value: s.to_string(),
                })
            }
        };
        Ok(found)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SidebarItem {
    marker: &'static str,
    label: &'static str,
    slug: &'static str,
    style: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Row {
    label: String,
    padding: String,
    display: String,
    style: &'static str,
}

#[derive(Debug, Serialize, Default)]
pub(crate) struct Group {
    title: String,
    note: Option<String>,
    rows: Vec<Row>,
    hint: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EditorPanel {
    banner: String,
    rule: String,
    sidebar: Vec<SidebarItem>,
    heading: &'static str,
    groups: Vec<Group>,
}

struct GroupBuilder {
    title: String,
    note: Option<String>,
    rows: Vec<(String, String, &'static str)>,
    hint: Option<String>,
}

impl GroupBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note: None,
            rows: Vec::new(),
            hint: None,
        }
    }

    fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn field(self, label: impl Into<String>, value: &str) -> Self {
        self.styled(label, value, names::VALUE)
    }

    fn styled(mut self, label: impl Into<String>, value: &str, style: &'static str) -> Self {
        if value.trim().is_empty() {
            self.rows
                .push((label.into(), EMPTY.to_string(), names::PLACEHOLDER));
        } else {
            self.rows.push((label.into(), value.to_string(), style));
        }
        self
    }

    fn list<'a, I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        for (i, item) in items.into_iter().enumerate() {
            self = self.field(format!("{}.", i + 1), item);
        }
        self
    }

    fn build(self) -> Group {
        let width = self
            .rows
            .iter()
            .map(|(label, _, _)| label.width())
            .max()
            .unwrap_or(0);
        let rows = self
            .rows
            .into_iter()
            .map(|(label, display, style)| Row {
                padding: " ".repeat(width - label.width()),
                label,
                display,
                style,
            })
            .collect();
        Group {
            title: self.title,
            note: self.note,
            rows,
            hint: self.hint,
        }
    }
}

pub(crate) fn panel(
    quote: &Quote,
    derived: &Derived,
    section: EditorSection,
    company: &str,
) -> EditorPanel {
    let sidebar = EditorSection::all()
        .iter()
        .map(|s| {
            let active = *s == section;
            SidebarItem {
                marker: if active { "▸" } else { " " },
                label: s.label(),
                slug: s.slug(),
                style: if active { names::ACTIVE } else { names::INACTIVE },
            }
        })
        .collect();

    let groups = match section {
        EditorSection::ClientInfo => client_groups(quote),
        EditorSection::Pages => page_groups(quote),
        EditorSection::AdditionalFeatures => vec![GroupBuilder::new(
            "Additional Features & Technical Enhancements",
        )
        .note("These appear under Section 3 of the quote.")
        .list(&quote.additional_features)
        .hint("extra add | extra set <n> <text> | extra remove <n>")
        .build()],
        EditorSection::Pricing => pricing_groups(quote, derived),
        EditorSection::Terms => term_groups(quote),
        EditorSection::Payment => {
            let group = PaymentField::all()
                .iter()
                .fold(GroupBuilder::new("Payment Details"), |g, field| {
                    g.field(field.label(), quote.payment.get(*field))
                });
            vec![group
                .hint("payment <account-name|acc-no|ifsc|swift-code|branch> <value>")
                .build()]
        }
    };

    EditorPanel {
        banner: company.to_uppercase(),
        rule: "─".repeat(60),
        sidebar,
        heading: section.label(),
        groups,
    }
}

fn client_groups(quote: &Quote) -> Vec<Group> {
    let options = ProjectType::all()
        .iter()
        .map(|t| t.slug())
        .collect::<Vec<_>>()
        .join("|");

    let mut info = GroupBuilder::new("Client Information")
        .field("Client / Company Name", &quote.client_name)
        .field("Quote Reference", &quote.quote_ref)
        .field("Client Address", &quote.client_address)
        .field("Date", &quote.date)
        .field("Project Type", quote.project_type.label());
    if quote.project_type == ProjectType::Other {
        info = info.field("Custom Project Type", &quote.custom_project_type);
    }
    let info = info
        .field("Prepared By", &quote.prepared_by)
        .note(format!("project types: {}", options))
        .hint("set <client-name|quote-ref|client-address|date|project-type|custom-project-type|prepared-by> <value>")
        .build();

    let counts = GroupBuilder::new("Page Count (for Scope Table)")
        .field("Main Pages Count", &quote.main_pages_count)
        .field("Sub Pages Count", &quote.sub_pages_count)
        .hint("set main-pages <n> | set sub-pages <n>")
        .build();

    let nav = GroupBuilder::new("Main Navigation Menu Items")
        .note("These appear as the bullet list under section 2.1 in the quote.")
        .list(&quote.main_nav_items)
        .hint("nav add | nav set <n> <text> | nav remove <n>")
        .build();

    vec![info, counts, nav]
}

fn page_groups(quote: &Quote) -> Vec<Group> {
    let summary = GroupBuilder::new("Pages & Features")
        .note(format!(
            "These appear as subsections 2.2, 2.3, etc. in the quote. {} page(s) defined.",
            quote.pages.len()
        ))
        .hint("page add | page remove <n>")
        .build();

    let mut groups = vec![summary];
    for (i, page) in quote.pages.iter().enumerate() {
        let n = i + 1;
        let mut group = GroupBuilder::new(format!("Section 2.{}", i + 2))
            .field("Page / Section Name", &page.name)
            .field("Intro Paragraph", &page.description);
        for (fi, feature) in page.features.iter().enumerate() {
            group = group.field(format!("Feature {}", fi + 1), feature);
        }
        groups.push(
            group
                .hint(format!(
                    "page set {n} name|description <text> | feature add {n} | feature set {n} <f> <text> | feature remove {n} <f>"
                ))
                .build(),
        );
    }
    groups
}

fn pricing_groups(quote: &Quote, derived: &Derived) -> Vec<Group> {
    let mut group = GroupBuilder::new("Detailed Pricing Breakdown")
        .note("Add each module and its price. This appears as Section 4 in the quote.");
    for (i, module) in quote.price_modules.iter().enumerate() {
        let serial = format!("{:02}", i + 1);
        let name = if module.name.trim().is_empty() {
            EMPTY
        } else {
            module.name.as_str()
        };
        let price = if module.price.trim().is_empty() {
            "—".to_string()
        } else {
            format!("₹ {}", module.price.trim())
        };
        group = group.field(serial, &format!("{}  {}", name, price));
    }
    group = group.styled(
        "TOTAL PROJECT COST",
        &format!("₹ {}", derived.total_display),
        names::MONEY,
    );
    if derived.total > 0.0 && !derived.total_words.is_empty() {
        group = group.styled(
            "In words",
            &format!(
                "₹ {} ({} Rupees Only)",
                derived.total_display, derived.total_words
            ),
            names::MONEY,
        );
    }
    vec![group
        .hint("price add | price set <n> name|price <value> | price remove <n>")
        .build()]
}

fn term_groups(quote: &Quote) -> Vec<Group> {
    let mut groups: Vec<Group> = quote
        .terms
        .iter()
        .enumerate()
        .map(|(i, term)| {
            GroupBuilder::new(format!("Term {}", i + 1))
                .field("Heading", &term.heading)
                .field("Content", &term.content)
                .build()
        })
        .collect();

    let mut amc = GroupBuilder::new("AMC Charge Line").field(
        "Include AMC in Terms",
        if quote.amc_enabled { "[x]" } else { "[ ]" },
    );
    if quote.amc_enabled {
        amc = amc.field("AMC Content", &quote.amc_line);
    }
    groups.push(
        amc.hint("term add | term set <n> heading|content <text> | term remove <n> | set amc-enabled on|off | set amc-line <text>")
            .build(),
    );
    groups
}
