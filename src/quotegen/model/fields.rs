//! Addressable fields of a quote.
//!
//! Field names are accepted in kebab-case (`client-name`) or in the camelCase used by
//! the JSON dump (`clientName`).

use super::{ProjectType, Quote};
use crate::error::{QuoteError, Result};
use std::str::FromStr;

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

pub(crate) fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(QuoteError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// A replacement value for one top-level field of the quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    ClientName(String),
    ClientAddress(String),
    QuoteRef(String),
    Date(String),
    PreparedBy(String),
    ProjectType(ProjectType),
    CustomProjectType(String),
    MainPagesCount(String),
    SubPagesCount(String),
    AmcEnabled(bool),
    AmcLine(String),
}

impl FieldUpdate {
    pub const NAMES: [&'static str; 11] = [
        "client-name",
        "client-address",
        "quote-ref",
        "date",
        "prepared-by",
        "project-type",
        "custom-project-type",
        "main-pages",
        "sub-pages",
        "amc-enabled",
        "amc-line",
    ];

    /// Parses a field name and its textual value.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let value_owned = value.to_string();
        let update = match normalize(field).as_str() {
            "clientname" | "client" => FieldUpdate::ClientName(value_owned),
            "clientaddress" | "address" => FieldUpdate::ClientAddress(value_owned),
            "quoteref" | "ref" => FieldUpdate::QuoteRef(value_owned),
            "date" => FieldUpdate::Date(value_owned),
            "preparedby" => FieldUpdate::PreparedBy(value_owned),
            "projecttype" | "type" => {
                let kind = value.parse::<ProjectType>().map_err(|_| QuoteError::InvalidValue {
                    field: "project-type".to_string(),
                    value: value.to_string(),
                })?;
                FieldUpdate::ProjectType(kind)
            }
            "customprojecttype" => FieldUpdate::CustomProjectType(value_owned),
            "mainpages" | "mainpagescount" => FieldUpdate::MainPagesCount(value_owned),
            "subpages" | "subpagescount" => FieldUpdate::SubPagesCount(value_owned),
            "amcenabled" | "amc" => FieldUpdate::AmcEnabled(parse_flag("amc-enabled", value)?),
            "amcline" => FieldUpdate::AmcLine(value_owned),
            _ => return Err(QuoteError::UnknownField(field.to_string())),
        };
        Ok(update)
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::ClientName(_) => "client-name",
            FieldUpdate::ClientAddress(_) => "client-address",
            FieldUpdate::QuoteRef(_) => "quote-ref",
            FieldUpdate::Date(_) => "date",
            FieldUpdate::PreparedBy(_) => "prepared-by",
            FieldUpdate::ProjectType(_) => "project-type",
            FieldUpdate::CustomProjectType(_) => "custom-project-type",
            FieldUpdate::MainPagesCount(_) => "main-pages",
            FieldUpdate::SubPagesCount(_) => "sub-pages",
            FieldUpdate::AmcEnabled(_) => "amc-enabled",
            FieldUpdate::AmcLine(_) => "amc-line",
        }
    }

    pub(crate) fn apply(self, quote: &mut Quote) {
        match self {
            FieldUpdate::ClientName(v) => quote.client_name = v,
            FieldUpdate::ClientAddress(v) => quote.client_address = v,
            FieldUpdate::QuoteRef(v) => quote.quote_ref = v,
            FieldUpdate::Date(v) => quote.date = v,
            FieldUpdate::PreparedBy(v) => quote.prepared_by = v,
            FieldUpdate::ProjectType(v) => quote.project_type = v,
            FieldUpdate::CustomProjectType(v) => quote.custom_project_type = v,
            FieldUpdate::MainPagesCount(v) => quote.main_pages_count = v,
            FieldUpdate::SubPagesCount(v) => quote.sub_pages_count = v,
            FieldUpdate::AmcEnabled(v) => quote.amc_enabled = v,
            FieldUpdate::AmcLine(v) => quote.amc_line = v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageField {
    Name,
    Description,
}

impl FromStr for PageField {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "name" => Ok(PageField::Name),
            "description" | "intro" => Ok(PageField::Description),
            _ => Err(QuoteError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Name,
    Price,
}

impl FromStr for PriceField {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "name" | "module" => Ok(PriceField::Name),
            "price" | "amount" => Ok(PriceField::Price),
            _ => Err(QuoteError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermField {
    Heading,
    Content,
}

impl FromStr for TermField {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "heading" => Ok(TermField::Heading),
            "content" => Ok(TermField::Content),
            _ => Err(QuoteError::UnknownField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    AccountName,
    AccNo,
    Ifsc,
    SwiftCode,
    Branch,
}

impl PaymentField {
    pub fn all() -> &'static [PaymentField] {
        &[
            PaymentField::AccountName,
            PaymentField::AccNo,
            PaymentField::Ifsc,
            PaymentField::SwiftCode,
            PaymentField::Branch,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            PaymentField::AccountName => "account-name",
            PaymentField::AccNo => "acc-no",
            PaymentField::Ifsc => "ifsc",
            PaymentField::SwiftCode => "swift-code",
            PaymentField::Branch => "branch",
        }
    }

    /// Label used in the editor form.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentField::AccountName => "Account Name",
            PaymentField::AccNo => "Account Number",
            PaymentField::Ifsc => "IFSC Code",
            PaymentField::SwiftCode => "SWIFT Code",
            PaymentField::Branch => "Branch",
        }
    }

    /// Label used in the printed document.
    pub fn document_label(&self) -> &'static str {
        match self {
            PaymentField::AccountName => "ACCOUNT NAME",
            PaymentField::AccNo => "ACC NO",
            PaymentField::Ifsc => "IFSC",
            PaymentField::SwiftCode => "SWIFT CODE",
            PaymentField::Branch => "BRANCH",
        }
    }
}

impl FromStr for PaymentField {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "accountname" => Ok(PaymentField::AccountName),
            "accno" | "accountnumber" => Ok(PaymentField::AccNo),
            "ifsc" => Ok(PaymentField::Ifsc),
            "swiftcode" | "swift" => Ok(PaymentField::SwiftCode),
            "branch" => Ok(PaymentField::Branch),
            _ => Err(QuoteError::UnknownField(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_and_camel_names() {
        assert_eq!(
            FieldUpdate::parse("client-name", "Acme").unwrap(),
            FieldUpdate::ClientName("Acme".into())
        );
        assert_eq!(
            FieldUpdate::parse("quoteRef", "Q-1").unwrap(),
            FieldUpdate::QuoteRef("Q-1".into())
        );
    }

    #[test]
    fn parses_project_type_value() {
        assert_eq!(
            FieldUpdate::parse("project-type", "other").unwrap(),
            FieldUpdate::ProjectType(ProjectType::Other)
        );
        assert!(matches!(
            FieldUpdate::parse("project-type", "rocket"),
            Err(QuoteError::InvalidValue { .. })
        ));
    }

    #[test]
    fn parses_amc_flag() {
        assert_eq!(
            FieldUpdate::parse("amc-enabled", "off").unwrap(),
            FieldUpdate::AmcEnabled(false)
        );
        assert!(FieldUpdate::parse("amc-enabled", "maybe").is_err());
    }

    #[test]
    fn page_counts_stay_free_text() {
        assert_eq!(
            FieldUpdate::parse("main-pages", "nine").unwrap(),
            FieldUpdate::MainPagesCount("nine".into())
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(matches!(
            FieldUpdate::parse("colour", "red"),
            Err(QuoteError::UnknownField(_))
        ));
    }

    #[test]
    fn every_listed_name_parses() {
        for name in FieldUpdate::NAMES {
            let value = if name == "project-type" {
                "erp"
            } else if name == "amc-enabled" {
                "yes"
            } else {
                "x"
            };
            let update = FieldUpdate::parse(name, value).unwrap();
            assert_eq!(update.field_name(), name);
        }
    }

    #[test]
    fn payment_fields_parse() {
        assert_eq!("swift-code".parse::<PaymentField>().unwrap(), PaymentField::SwiftCode);
        assert_eq!("accNo".parse::<PaymentField>().unwrap(), PaymentField::AccNo);
        assert!("iban".parse::<PaymentField>().is_err());
    }
}
