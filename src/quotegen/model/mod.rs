//! Core quotation types.
//!
//! A [`Quote`] is the single document a session works on. It is plain data: all
//! mutation goes through [`crate::store::QuoteStore`], and everything computed from it
//! (totals, words, page counts) lives in [`crate::derive`].

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod entries;
mod fields;

pub use entries::Entries;
pub(crate) use fields::parse_flag;
pub use fields::{FieldUpdate, PageField, PaymentField, PriceField, TermField};

pub const DEFAULT_AMC_LINE: &str = "8000 (CLOUD + SSL) + 4000 (SUPPORT) = 12,000 INR/YR";
pub const DEFAULT_PREPARED_BY: &str = "Tresvance Softwares";

pub const DEFAULT_ADDITIONAL_FEATURES: [&str; 3] = [
    "SSL secured website (HTTPS)",
    "SEO optimized page & URL structure",
    "Fully mobile-responsive design (all breakpoints)",
];

pub const DEFAULT_TERMS: [(&str, &str); 6] = [
    (
        "Payment Terms",
        "50% advance upon confirmation. 50% before final deployment.",
    ),
    (
        "Project Timeline",
        "6 – 8 working weeks from date of advance payment.",
    ),
    (
        "Domain",
        "Not included in this quote. Client to provide their own domain.",
    ),
    (
        "Content",
        "Client to provide required brand assets and must verify it.",
    ),
    (
        "Post Launch Support",
        "100 days free support after launch for bug fixes.",
    ),
    (
        "Quote Validity",
        "This quotation is valid for 30 days from the date of issue.",
    ),
];

/// The kind of project a quote is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "Website Development")]
    WebsiteDevelopment,
    #[serde(rename = "ERP Software")]
    ErpSoftware,
    #[serde(rename = "Mobile App Development")]
    MobileAppDevelopment,
    #[serde(rename = "Custom Software Development")]
    CustomSoftwareDevelopment,
    #[serde(rename = "E-Commerce Platform")]
    ECommercePlatform,
    /// Sentinel: the label comes from `Quote::custom_project_type`.
    Other,
}

impl ProjectType {
    pub fn all() -> &'static [ProjectType] {
        &[
            ProjectType::WebsiteDevelopment,
            ProjectType::ErpSoftware,
            ProjectType::MobileAppDevelopment,
            ProjectType::CustomSoftwareDevelopment,
            ProjectType::ECommercePlatform,
            ProjectType::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::WebsiteDevelopment => "Website Development",
            ProjectType::ErpSoftware => "ERP Software",
            ProjectType::MobileAppDevelopment => "Mobile App Development",
            ProjectType::CustomSoftwareDevelopment => "Custom Software Development",
            ProjectType::ECommercePlatform => "E-Commerce Platform",
            ProjectType::Other => "Other",
        }
    }

    /// Kebab-case name accepted on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            ProjectType::WebsiteDevelopment => "website",
            ProjectType::ErpSoftware => "erp",
            ProjectType::MobileAppDevelopment => "mobile-app",
            ProjectType::CustomSoftwareDevelopment => "custom-software",
            ProjectType::ECommercePlatform => "e-commerce",
            ProjectType::Other => "other",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProjectType::all()
            .iter()
            .find(|t| t.slug().eq_ignore_ascii_case(wanted) || t.label().eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| format!("unknown project type '{}'", wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub name: String,
    /// Optional intro paragraph; blank means absent.
    pub description: String,
    pub features: Entries<String>,
}

impl Page {
    /// A page with no name and a single empty feature slot.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            features: Entries::one(String::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriceModule {
    pub name: String,
    /// Numeric text as typed; parsed only when totals are derived.
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Term {
    pub heading: String,
    pub content: String,
}

impl Term {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub account_name: String,
    pub acc_no: String,
    pub ifsc: String,
    pub swift_code: String,
    pub branch: String,
}

impl Default for PaymentDetails {
    fn default() -> Self {
        Self {
            account_name: "TRESVANCE SOFTWARES".to_string(),
            acc_no: "22810200003388".to_string(),
            ifsc: "FDRL0002281".to_string(),
            swift_code: "FDRLINBBIBD".to_string(),
            branch: "KADAPPAKADA, KOLLAM".to_string(),
        }
    }
}

impl PaymentDetails {
    pub fn get(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::AccountName => &self.account_name,
            PaymentField::AccNo => &self.acc_no,
            PaymentField::Ifsc => &self.ifsc,
            PaymentField::SwiftCode => &self.swift_code,
            PaymentField::Branch => &self.branch,
        }
    }

    pub fn set(&mut self, field: PaymentField, value: String) {
        match field {
            PaymentField::AccountName => self.account_name = value,
            PaymentField::AccNo => self.acc_no = value,
            PaymentField::Ifsc => self.ifsc = value,
            PaymentField::SwiftCode => self.swift_code = value,
            PaymentField::Branch => self.branch = value,
        }
    }
}

/// The values a fresh quote is seeded with that may come from configuration.
#[derive(Debug, Clone)]
pub struct QuoteSeed {
    pub date: String,
    pub prepared_by: String,
    pub payment: PaymentDetails,
}

impl QuoteSeed {
    /// Today's date in the `dd/mm/yyyy` form used on Indian documents.
    pub fn today_string() -> String {
        Local::now().format("%d/%m/%Y").to_string()
    }
}

impl Default for QuoteSeed {
    fn default() -> Self {
        Self {
            date: Self::today_string(),
            prepared_by: DEFAULT_PREPARED_BY.to_string(),
            payment: PaymentDetails::default(),
        }
    }
}

/// The quotation document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub client_name: String,
    pub client_address: String,
    pub quote_ref: String,
    pub date: String,
    pub prepared_by: String,
    pub project_type: ProjectType,
    pub custom_project_type: String,
    pub main_pages_count: String,
    pub sub_pages_count: String,
    pub main_nav_items: Entries<String>,
    pub pages: Entries<Page>,
    pub additional_features: Entries<String>,
    pub price_modules: Entries<PriceModule>,
    pub terms: Entries<Term>,
    pub amc_enabled: bool,
    pub amc_line: String,
    pub payment: PaymentDetails,
}

impl Quote {
    /// Builds the quote a session starts with.
    pub fn seeded(seed: QuoteSeed) -> Self {
        let additional_features = DEFAULT_ADDITIONAL_FEATURES
            .iter()
            .map(|f| f.to_string())
            .collect();
        let terms = DEFAULT_TERMS
            .iter()
            .map(|(heading, content)| Term::new(*heading, *content))
            .collect();

        Self {
            client_name: String::new(),
            client_address: String::new(),
            quote_ref: String::new(),
            date: seed.date,
            prepared_by: seed.prepared_by,
            project_type: ProjectType::WebsiteDevelopment,
            custom_project_type: String::new(),
            main_pages_count: String::new(),
            sub_pages_count: String::new(),
            main_nav_items: Entries::one(String::new()),
            pages: Entries::one(Page::empty()),
            additional_features: Entries::from_vec(additional_features)
                .unwrap_or_else(|| Entries::one(String::new())),
            price_modules: Entries::one(PriceModule::default()),
            terms: Entries::from_vec(terms).unwrap_or_else(|| Entries::one(Term::default())),
            amc_enabled: true,
            amc_line: DEFAULT_AMC_LINE.to_string(),
            payment: seed.payment,
        }
    }

    /// What the document calls the project: the custom text for `Other`, else the type label.
    pub fn project_label(&self) -> &str {
        match self.project_type {
            ProjectType::Other => &self.custom_project_type,
            other => other.label(),
        }
    }
}

impl Default for Quote {
    fn default() -> Self {
        Self::seeded(QuoteSeed::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> QuoteSeed {
        QuoteSeed {
            date: "18/10/2026".to_string(),
            prepared_by: DEFAULT_PREPARED_BY.to_string(),
            payment: PaymentDetails::default(),
        }
    }

    #[test]
    fn seeded_quote_has_defaults() {
        let quote = Quote::seeded(seed());
        assert_eq!(quote.date, "18/10/2026");
        assert_eq!(quote.project_type, ProjectType::WebsiteDevelopment);
        assert_eq!(quote.pages.len(), 1);
        assert_eq!(quote.pages.get(0).unwrap().features.len(), 1);
        assert_eq!(quote.main_nav_items.len(), 1);
        assert_eq!(quote.price_modules.len(), 1);
        assert_eq!(quote.additional_features.len(), 3);
        assert_eq!(quote.terms.len(), 6);
        assert_eq!(quote.terms.get(0).unwrap().heading, "Payment Terms");
        assert!(quote.amc_enabled);
        assert_eq!(quote.amc_line, DEFAULT_AMC_LINE);
        assert_eq!(quote.payment.ifsc, "FDRL0002281");
    }

    #[test]
    fn project_label_uses_custom_text_for_other() {
        let mut quote = Quote::seeded(seed());
        quote.custom_project_type = "Kiosk Software".to_string();
        assert_eq!(quote.project_label(), "Website Development");

        quote.project_type = ProjectType::Other;
        assert_eq!(quote.project_label(), "Kiosk Software");
    }

    #[test]
    fn project_type_parses_slug_and_label() {
        assert_eq!("erp".parse::<ProjectType>(), Ok(ProjectType::ErpSoftware));
        assert_eq!(
            "mobile app development".parse::<ProjectType>(),
            Ok(ProjectType::MobileAppDevelopment)
        );
        assert_eq!("Other".parse::<ProjectType>(), Ok(ProjectType::Other));
        assert!("spaceship".parse::<ProjectType>().is_err());
    }

    #[test]
    fn quote_serializes_with_camel_case_keys() {
        let quote = Quote::seeded(seed());
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["projectType"], "Website Development");
        assert_eq!(json["payment"]["swiftCode"], "FDRLINBBIBD");
        assert!(json["priceModules"].is_array());
    }
}
