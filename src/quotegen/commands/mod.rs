//! # Command Layer
//!
//! Business logic for every session operation. Commands take the store, renderer or
//! gate they need as arguments and return a [`CmdResult`]; none of them writes to the
//! terminal. User-facing positions are 1-based here and converted to indices before
//! they reach the store.

use crate::config::QuoteConfig;
use crate::export::PrintDispatch;
use crate::render::Rendered;

pub mod config;
pub mod edit;
pub mod login;
pub mod print;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub rendered: Option<Rendered>,
    pub print: Option<PrintDispatch>,
    pub json: Option<String>,
    pub config: Option<QuoteConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_rendered(mut self, rendered: Rendered) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_print(mut self, dispatch: PrintDispatch) -> Self {
        self.print = Some(dispatch);
        self
    }

    pub fn with_json(mut self, json: String) -> Self {
        self.json = Some(json);
        self
    }

    pub fn with_config(mut self, config: QuoteConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Converts a 1-based user position into an index, checking it against `len`.
pub(crate) fn position_to_index(
    collection: &'static str,
    position: usize,
    len: usize,
) -> crate::error::Result<usize> {
    if position == 0 || position > len {
        return Err(crate::error::QuoteError::NoSuchEntry {
            collection,
            position,
        });
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;

    #[test]
    fn positions_are_one_based() {
        assert_eq!(position_to_index("page", 1, 3).unwrap(), 0);
        assert_eq!(position_to_index("page", 3, 3).unwrap(), 2);
        assert!(matches!(
            position_to_index("page", 0, 3),
            Err(QuoteError::NoSuchEntry { position: 0, .. })
        ));
        assert!(matches!(
            position_to_index("term", 4, 3),
            Err(QuoteError::NoSuchEntry {
                collection: "term",
                position: 4
            })
        ));
    }

    #[test]
    fn builder_collects_messages() {
        let result = CmdResult::default()
            .with_message(CmdMessage::success("done"))
            .with_json("{}".into());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.json.as_deref(), Some("{}"));
    }
}
