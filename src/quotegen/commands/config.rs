use crate::commands::{CmdMessage, CmdResult};
use crate::config::QuoteConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = QuoteConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = QuoteConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Ok(Some(val)) => result.add_message(CmdMessage::info(val)),
                Ok(None) => result.add_message(CmdMessage::info(format!("{} is not set", key))),
                Err(_) => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = QuoteConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(CmdMessage::error(e.to_string())));
            }
            config.save(dir)?;
            let display_val = config.get(&key).ok().flatten().unwrap_or_default();
            Ok(CmdResult::default()
                .with_config(config)
                .with_message(CmdMessage::success(format!("{} set to {}", key, display_val))))
        }
    }
}
