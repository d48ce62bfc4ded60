//! The session command language.
//!
//! One command per line. Words split on whitespace; single or double quotes keep a
//! value together and a backslash escapes the next character outside single quotes. A
//! `#` starting a word begins a comment. Trailing words of a value are joined with a
//! single space, so `set client-name Venad Finances` needs no quoting.
//!
//! Positions are 1-based.

use quotegen::commands::edit::Edit;
use quotegen::error::{QuoteError, Result};
use quotegen::gate::Credentials;
use quotegen::model::{FieldUpdate, PageField, PaymentField, PriceField, TermField};
use quotegen::render::EditorSection;
use std::path::PathBuf;

pub const HELP: &str = "\
Editing
  set <field> <value>                      client-name, client-address, quote-ref, date,
                                           prepared-by, project-type, custom-project-type,
                                           main-pages, sub-pages, amc-enabled, amc-line
  payment <field> <value>                  account-name, acc-no, ifsc, swift-code, branch
  page add | remove <n> | set <n> name|description <value>
  feature add <page> | remove <page> <n> | set <page> <n> <value>
  nav add | remove <n> | set <n> <value>
  extra add | remove <n> | set <n> <value>
  price add | remove <n> | set <n> name|price <value>
  term add | remove <n> | set <n> heading|content <value>

Views
  edit [section]                           client, pages, additional, pricing, terms, payment
  preview                                  show the print-ready quote
  show                                     redraw the current view

Other
  print [--to <file>]                      print the preview (or write it to a file)
  dump                                     print the quote as JSON
  login <user> <password>
  help
  quit
";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Edit(Edit),
    EditView(Option<EditorSection>),
    Preview,
    Show,
    Print { to: Option<PathBuf> },
    Dump,
    Login(Credentials),
    Help,
    Quit,
}

impl SessionCommand {
    /// Whether the command only changes the document or the view.
    pub fn is_scriptable(&self) -> bool {
        matches!(
            self,
            SessionCommand::Edit(_) | SessionCommand::EditView(_) | SessionCommand::Preview
        )
    }
}

/// Parses one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>> {
    let words = tokenize(line)?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(None);
    };
    let args = Args::new(head, rest);

    let command = match head.to_ascii_lowercase().as_str() {
        "set" => {
            let field = args.word(0, "set <field> <value>")?;
            SessionCommand::Edit(Edit::Field(FieldUpdate::parse(field, &args.text_from(1))?))
        }
        "payment" => {
            let field: PaymentField = args.word(0, "payment <field> <value>")?.parse()?;
            SessionCommand::Edit(Edit::Payment(field, args.text_from(1)))
        }
        "page" => SessionCommand::Edit(parse_page(&args)?),
        "feature" => SessionCommand::Edit(parse_feature(&args)?),
        "nav" => SessionCommand::Edit(parse_list(
            &args,
            "nav add | remove <n> | set <n> <value>",
            || Edit::AddNavItem,
            Edit::RemoveNavItem,
            Edit::SetNavItem,
        )?),
        "extra" => SessionCommand::Edit(parse_list(
            &args,
            "extra add | remove <n> | set <n> <value>",
            || Edit::AddExtra,
            Edit::RemoveExtra,
            Edit::SetExtra,
        )?),
        "price" => SessionCommand::Edit(parse_price(&args)?),
        "term" => SessionCommand::Edit(parse_term(&args)?),
        "edit" => match rest.first() {
            Some(section) => SessionCommand::EditView(Some(section.parse()?)),
            None => SessionCommand::EditView(None),
        },
        "preview" => SessionCommand::Preview,
        "show" => SessionCommand::Show,
        "print" => match rest {
            [] => SessionCommand::Print { to: None },
            [flag, path] if flag == "--to" => SessionCommand::Print {
                to: Some(PathBuf::from(path)),
            },
            _ => return Err(usage("print [--to <file>]")),
        },
        "dump" => SessionCommand::Dump,
        "login" => match rest {
            [user, password] => SessionCommand::Login(Credentials::new(user, password)),
            _ => return Err(usage("login <user> <password>")),
        },
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => {
            return Err(QuoteError::Command(format!(
                "Unknown command: {} (try 'help')",
                other
            )))
        }
    };
    Ok(Some(command))
}

struct Args<'a> {
    head: &'a str,
    rest: &'a [String],
}

impl<'a> Args<'a> {
    fn new(head: &'a str, rest: &'a [String]) -> Self {
        Self { head, rest }
    }

    fn action(&self, usage_text: &str) -> Result<String> {
        self.word(0, usage_text).map(str::to_ascii_lowercase)
    }

    fn word(&self, at: usize, usage_text: &str) -> Result<&'a str> {
        self.rest
            .get(at)
            .map(String::as_str)
            .ok_or_else(|| usage(usage_text))
    }

    fn position(&self, at: usize, usage_text: &str) -> Result<usize> {
        let word = self.word(at, usage_text)?;
        word.parse().map_err(|_| QuoteError::InvalidValue {
            field: format!("{} position", self.head),
            value: word.to_string(),
        })
    }

    fn text_from(&self, at: usize) -> String {
        self.rest.get(at..).map(|w| w.join(" ")).unwrap_or_default()
    }
}

fn parse_page(args: &Args) -> Result<Edit> {
    const USAGE: &str = "page add | remove <n> | set <n> name|description <value>";
    match args.action(USAGE)?.as_str() {
        "add" => Ok(Edit::AddPage),
        "remove" => Ok(Edit::RemovePage(args.position(1, USAGE)?)),
        "set" => Ok(Edit::SetPage {
            page: args.position(1, USAGE)?,
            field: args.word(2, USAGE)?.parse::<PageField>()?,
            value: args.text_from(3),
        }),
        _ => Err(usage(USAGE)),
    }
}

fn parse_feature(args: &Args) -> Result<Edit> {
    const USAGE: &str = "feature add <page> | remove <page> <n> | set <page> <n> <value>";
    match args.action(USAGE)?.as_str() {
        "add" => Ok(Edit::AddFeature {
            page: args.position(1, USAGE)?,
        }),
        "remove" => Ok(Edit::RemoveFeature {
            page: args.position(1, USAGE)?,
            feature: args.position(2, USAGE)?,
        }),
        "set" => Ok(Edit::SetFeature {
            page: args.position(1, USAGE)?,
            feature: args.position(2, USAGE)?,
            value: args.text_from(3),
        }),
        _ => Err(usage(USAGE)),
    }
}

fn parse_list<A, R, S>(args: &Args, usage_text: &str, add: A, remove: R, set: S) -> Result<Edit>
where
    A: FnOnce() -> Edit,
    R: FnOnce(usize) -> Edit,
    S: FnOnce(usize, String) -> Edit,
{
    match args.action(usage_text)?.as_str() {
        "add" => Ok(add()),
        "remove" => Ok(remove(args.position(1, usage_text)?)),
        "set" => Ok(set(args.position(1, usage_text)?, args.text_from(2))),
        _ => Err(usage(usage_text)),
    }
}

fn parse_price(args: &Args) -> Result<Edit> {
    const USAGE: &str = "price add | remove <n> | set <n> name|price <value>";
    match args.action(USAGE)?.as_str() {
        "add" => Ok(Edit::AddPriceModule),
        "remove" => Ok(Edit::RemovePriceModule(args.position(1, USAGE)?)),
        "set" => Ok(Edit::SetPriceModule {
            position: args.position(1, USAGE)?,
            field: args.word(2, USAGE)?.parse::<PriceField>()?,
            value: args.text_from(3),
        }),
        _ => Err(usage(USAGE)),
    }
}

fn parse_term(args: &Args) -> Result<Edit> {
    const USAGE: &str = "term add | remove <n> | set <n> heading|content <value>";
    match args.action(USAGE)?.as_str() {
        "add" => Ok(Edit::AddTerm),
        "remove" => Ok(Edit::RemoveTerm(args.position(1, USAGE)?)),
        "set" => Ok(Edit::SetTerm {
            position: args.position(1, USAGE)?,
            field: args.word(2, USAGE)?.parse::<TermField>()?,
            value: args.text_from(3),
        }),
        _ => Err(usage(USAGE)),
    }
}

fn usage(text: &str) -> QuoteError {
    QuoteError::Command(format!("usage: {}", text))
}

/// Splits a line into words.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '#' if !in_word => break,
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated()),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch) => current.push(ch),
                            None => return Err(unterminated()),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(unterminated()),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(ch) = chars.next() {
                    current.push(ch);
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn unterminated() -> QuoteError {
    QuoteError::Command("unterminated quote".to_string())
}
