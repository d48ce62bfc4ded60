//! # Derived Values
//!
//! Pure functions computing what a quote shows but does not store: the running total,
//! its Indian-numbering rendition in words, money formatting and page counts.
//!
//! Malformed numeric text is never an error here. An unparsable price or page count
//! counts as zero, so rendering always completes.

use crate::model::{PriceModule, Quote};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const THOUSAND: u64 = 1_000;
const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Parses a price as typed, reading the longest leading decimal literal the way a
/// number input would: `"15000/-"` and `"15000 INR"` are both `15000.0`.
///
/// Text without a numeric prefix, or one that overflows to infinity, is `0.0`.
/// Negative amounts are accepted as written.
pub fn parse_price(text: &str) -> f64 {
    match leading_decimal(text.trim()).parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// The longest prefix of `text` shaped like `[+-]digits[.digits][e[+-]digits]`.
/// Empty when there is no digit before the exponent.
fn leading_decimal(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    &text[..end]
}

pub fn total_price<'a, I>(modules: I) -> f64
where
    I: IntoIterator<Item = &'a PriceModule>,
{
    modules.into_iter().map(|m| parse_price(&m.price)).sum()
}

/// Spells out a rupee amount using Indian grouping (Thousand, Lakh, Crore).
///
/// Zero yields an empty string; callers decide whether to show anything at all.
///
/// ```
/// use quotegen::derive::amount_in_words;
/// assert_eq!(amount_in_words(250_000), "Two Lakh Fifty Thousand");
/// ```
pub fn amount_in_words(n: u64) -> String {
    if n < 20 {
        return ONES[n as usize].to_string();
    }
    if n < 100 {
        let tens = TENS[(n / 10) as usize];
        return match n % 10 {
            0 => tens.to_string(),
            rest => format!("{} {}", tens, ONES[rest as usize]),
        };
    }
    if n < THOUSAND {
        return scaled(ONES[(n / 100) as usize].to_string(), "Hundred", n % 100);
    }
    if n < LAKH {
        return scaled(amount_in_words(n / THOUSAND), "Thousand", n % THOUSAND);
    }
    if n < CRORE {
        return scaled(amount_in_words(n / LAKH), "Lakh", n % LAKH);
    }
    scaled(amount_in_words(n / CRORE), "Crore", n % CRORE)
}

fn scaled(head: String, unit: &str, rest: u64) -> String {
    if rest == 0 {
        format!("{} {}", head, unit)
    } else {
        format!("{} {} {}", head, unit, amount_in_words(rest))
    }
}

/// Words for the whole-rupee part of a total. Paise are dropped; a total that is zero,
/// negative or below one rupee has no words.
pub fn total_in_words(total: f64) -> String {
    if !total.is_finite() || total < 1.0 {
        return String::new();
    }
    amount_in_words(total.trunc() as u64)
}

/// Formats an amount with Indian digit grouping (`12,34,567`) and at most three
/// fraction digits, trailing zeros dropped.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    // Leading group may be a single digit; the rest are pairs.
    let mut groups: Vec<&str> = Vec::new();
    let first = head.len() % 2;
    if first == 1 {
        groups.push(&head[..1]);
    }
    let mut i = first;
    while i < head.len() {
        groups.push(&head[i..i + 2]);
        i += 2;
    }
    groups.push(tail);
    groups.join(",")
}

/// Reads a page count the way a number field would: leading decimal digits count,
/// anything else is `0`.
pub fn parse_count(text: &str) -> u64 {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u64>().unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCounts {
    pub main: u64,
    pub sub: u64,
    pub total: u64,
}

impl PageCounts {
    pub fn of(quote: &Quote) -> Self {
        let main = parse_count(&quote.main_pages_count);
        let sub = parse_count(&quote.sub_pages_count);
        Self {
            main,
            sub,
            total: main.saturating_add(sub),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Everything derived from one snapshot, computed together for a render.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub project_label: String,
    pub total: f64,
    pub total_display: String,
    pub total_words: String,
    pub pages: PageCounts,
}

impl Derived {
    pub fn of(quote: &Quote) -> Self {
        let total = total_price(&quote.price_modules);
        Self {
            project_label: quote.project_label().to_string(),
            total,
            total_display: format_inr(total),
            total_words: total_in_words(total),
            pages: PageCounts::of(quote),
        }
    }
}
