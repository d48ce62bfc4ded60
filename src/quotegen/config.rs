//! Configuration for quotegen, stored as `config.json` in the config directory.
//!
//! The directory is `$QUOTEGEN_HOME` when set, otherwise the platform config
//! directory. A missing file means defaults. Every field is optional in the file.
//!
//! Gate credentials can also come from `QUOTEGEN_USERNAME` / `QUOTEGEN_PASSWORD`; the
//! environment wins over the file. Without credentials the quote stays locked unless
//! `gate-open` is switched on.

use crate::error::{QuoteError, Result};
use crate::gate::{AccessGate, Credentials};
use crate::model::{parse_flag, PaymentDetails, PaymentField, QuoteSeed};
use crate::render::preview::{Branding, DEFAULT_WHY_US};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";

pub const HOME_ENV: &str = "QUOTEGEN_HOME";
pub const USERNAME_ENV: &str = "QUOTEGEN_USERNAME";
pub const PASSWORD_ENV: &str = "QUOTEGEN_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuoteConfig {
    pub company_name: String,
    pub company_address: String,
    pub website: String,
    pub email: String,
    pub phone: String,
    pub why_us: Vec<String>,
    pub payment: PaymentDetails,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_password: Option<String>,
    /// Skips the gate when no credentials are configured.
    pub gate_open: bool,

    /// Command used to open spooled print documents (`open`, `xdg-open`… when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_command: Option<String>,
    /// Where print documents are spooled (system temp dir when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spool_dir: Option<PathBuf>,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        let branding = Branding::default();
        Self {
            company_name: branding.company_name,
            company_address: branding.address,
            website: branding.website,
            email: branding.email,
            phone: branding.phone,
            why_us: DEFAULT_WHY_US.iter().map(|s| s.to_string()).collect(),
            payment: PaymentDetails::default(),
            gate_username: None,
            gate_password: None,
            gate_open: false,
            print_command: None,
            spool_dir: None,
        }
    }
}

/// Resolves the configuration directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "tresvance", "quotegen")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| QuoteError::Config("Could not determine config dir".to_string()))
}

impl QuoteConfig {
    /// Scalar keys accepted by [`QuoteConfig::get`] and [`QuoteConfig::set`].
    pub const KEYS: [&'static str; 15] = [
        "company-name",
        "company-address",
        "website",
        "email",
        "phone",
        "payment-account-name",
        "payment-acc-no",
        "payment-ifsc",
        "payment-swift-code",
        "payment-branch",
        "gate-username",
        "gate-password",
        "gate-open",
        "print-command",
        "spool-dir",
    ];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: QuoteConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Like [`QuoteConfig::load`], but a broken file only costs a warning.
    pub fn load_or_default<P: AsRef<Path>>(config_dir: P) -> Self {
        match Self::load(&config_dir) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(field) = payment_key(key) {
            return Ok(Some(self.payment.get(field?).to_string()));
        }
        let value = match key {
            "company-name" => Some(self.company_name.clone()),
            "company-address" => Some(self.company_address.clone()),
            "website" => Some(self.website.clone()),
            "email" => Some(self.email.clone()),
            "phone" => Some(self.phone.clone()),
            "gate-username" => self.gate_username.clone(),
            "gate-password" => self.gate_password.as_ref().map(|_| "***".to_string()),
            "gate-open" => Some(if self.gate_open { "on" } else { "off" }.to_string()),
            "print-command" => self.print_command.clone(),
            "spool-dir" => self
                .spool_dir
                .as_ref()
                .map(|p| p.display().to_string()),
            _ => return Err(QuoteError::UnknownField(key.to_string())),
        };
        Ok(value)
    }

    /// Sets a scalar key. An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(field) = payment_key(key) {
            self.payment.set(field?, value.to_string());
            return Ok(());
        }
        let optional = || (!value.is_empty()).then(|| value.to_string());
        match key {
            "company-name" => self.company_name = value.to_string(),
            "company-address" => self.company_address = value.to_string(),
            "website" => self.website = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "gate-username" => self.gate_username = optional(),
            "gate-password" => self.gate_password = optional(),
            "gate-open" => self.gate_open = parse_flag(key, value)?,
            "print-command" => self.print_command = optional(),
            "spool-dir" => self.spool_dir = optional().map(PathBuf::from),
            _ => return Err(QuoteError::UnknownField(key.to_string())),
        }
        Ok(())
    }

    pub fn branding(&self) -> Branding {
        Branding {
            company_name: self.company_name.clone(),
            address: self.company_address.clone(),
            website: self.website.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            why_us: self.why_us.clone(),
        }
    }

    /// Values a new quote starts from.
    pub fn seed(&self) -> QuoteSeed {
        QuoteSeed {
            date: QuoteSeed::today_string(),
            prepared_by: self.company_name.clone(),
            payment: self.payment.clone(),
        }
    }

    /// The gate credentials, from the process environment or this config.
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    /// The gate a session starts behind. Configured credentials always gate; without
    /// them the gate is locked unless `gate-open` is on.
    pub fn access_gate(&self) -> AccessGate {
        self.access_gate_with(|name| std::env::var(name).ok())
    }

    pub fn access_gate_with<F>(&self, env: F) -> AccessGate
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.credentials_with(env) {
            Some(credentials) => AccessGate::new(Some(credentials)),
            None if self.gate_open => AccessGate::open(),
            None => AccessGate::new(None),
        }
    }

    /// [`QuoteConfig::credentials`] with an injectable environment lookup.
    pub fn credentials_with<F>(&self, env: F) -> Option<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = env(USERNAME_ENV).or_else(|| self.gate_username.clone())?;
        let password = env(PASSWORD_ENV).or_else(|| self.gate_password.clone())?;
        Some(Credentials::new(username, password))
    }
}

fn payment_key(key: &str) -> Option<Result<PaymentField>> {
    key.strip_prefix("payment-").map(|rest| rest.parse())
}
