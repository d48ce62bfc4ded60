//! Template environment shared by every rendition.
//!
//! All templates are compiled once into a single minijinja [`Environment`]. Terminal
//! templates (`*.tmp`) get the `style` filter; the print template (`*.html`) relies on
//! minijinja's name-based auto-escaping so quote text can never inject markup.

use super::styles::{Theme, QUOTE_THEME};
use super::templates;
use crate::error::Result;
use console::Term;
use minijinja::{Environment, Value};
use serde::Serialize;

pub struct Engine {
    env: Environment<'static>,
}

impl Engine {
    /// Colour on when stdout supports it.
    pub fn new() -> Result<Self> {
        Self::with_color(Term::stdout().features().colors_supported())
    }

    pub fn with_color(use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        register_style_filter(&mut env, QUOTE_THEME.clone(), use_color);

        for (name, source) in templates::ALL {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(data)?)
    }
}

fn register_style_filter(env: &mut Environment<'static>, theme: Theme, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        if use_color {
            theme.apply(&name, &text)
        } else {
            theme.apply_plain(&name, &text)
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Message {
        content: String,
        style: String,
    }

    #[derive(Serialize)]
    struct Messages {
        messages: Vec<Message>,
    }

    #[test]
    fn plain_engine_emits_no_escape_codes() {
        let engine = Engine::with_color(false).unwrap();
        let out = engine
            .render(
                templates::MESSAGES,
                &Messages {
                    messages: vec![Message {
                        content: "Page added".into(),
                        style: "success".into(),
                    }],
                },
            )
            .unwrap();
        assert_eq!(out, "Page added\n");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let engine = Engine::with_color(false).unwrap();
        assert!(engine.render("missing.tmp", &()).is_err());
    }
}
