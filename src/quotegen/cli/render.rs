//! Terminal output for command results.

use quotegen::commands::{CmdMessage, CmdResult};
use quotegen::config::QuoteConfig;
use quotegen::render::QuoteRenderer;

pub fn print_messages(renderer: &QuoteRenderer, messages: &[CmdMessage]) {
    print!("{}", renderer.render_messages(messages));
}

/// Prints whatever a command produced: a rendition, a JSON dump, then its messages.
pub fn print_result(renderer: &QuoteRenderer, result: &CmdResult) {
    if let Some(rendered) = &result.rendered {
        print!("{}", ensure_newline(rendered.text()));
    }
    if let Some(json) = &result.json {
        println!("{}", json);
    }
    print_messages(renderer, &result.messages);
}

/// `key = value` lines for every scalar configuration key.
pub fn config_lines(config: &QuoteConfig) -> Vec<String> {
    QuoteConfig::KEYS
        .iter()
        .map(|key| {
            let value = config.get(key).ok().flatten().unwrap_or_default();
            format!("{} = {}", key, value)
        })
        .collect()
}

pub fn ensure_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_lines_mask_the_password() {
        let mut config = QuoteConfig::default();
        config.gate_password = Some("hunter2".into());
        let lines = config_lines(&config);
        assert_eq!(lines.len(), QuoteConfig::KEYS.len());
        assert!(lines.contains(&"company-name = Tresvance Softwares".to_string()));
        assert!(lines.contains(&"gate-password = ***".to_string()));
        assert!(lines.contains(&"print-command = ".to_string()));
    }

    #[test]
    fn newline_is_added_once() {
        assert_eq!(ensure_newline("a"), "a\n");
        assert_eq!(ensure_newline("a\n"), "a\n");
        assert_eq!(ensure_newline(""), "");
    }
}
