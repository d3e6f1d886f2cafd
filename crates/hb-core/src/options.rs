//! Generation options
//!
//! Tunables for a forge run, read from a nethackrc-style file:
//!
//! ```text
//! # comments are skipped
//! OPTIONS=wizard,weakening:until_safe
//! OPTIONS=activation_chance:4,cursed_chance=13
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::WeakeningMode;
use crate::consts::{A_CURSED, ACTIVATION_CHANCE};
use crate::errors::OptionsError;

/// Tunables for a forge run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// How the damage balancer applies weakening
    pub weakening: WeakeningMode,
    /// 1 in N chance of an activation; doubled for armour
    pub activation_chance: u32,
    /// 1 in N chance that an unforced, non-scroll artifact is cursed
    pub cursed_chance: u32,
    /// Promote diagnostics to info level
    pub wizard: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            weakening: WeakeningMode::default(),
            activation_chance: ACTIVATION_CHANCE,
            cursed_chance: A_CURSED,
            wizard: false,
        }
    }
}

impl GenerationOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    /// Parse a single option, e.g. `!wizard` or `weakening:literal`
    pub fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        let (negated, opt_name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };

        if let Some((key, value)) = opt_name.split_once(':') {
            return self.set_option(key.trim(), Some(value.trim()));
        }
        if let Some((key, value)) = opt_name.split_once('=') {
            return self.set_option(key.trim(), Some(value.trim()));
        }

        self.set_bool_option(opt_name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "wizard" => self.wizard = value,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionsError> {
        let value = value.ok_or_else(|| OptionsError::MissingValue(name.to_string()))?;
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "weakening" => {
                self.weakening = WeakeningMode::from_name(value).ok_or_else(invalid)?;
            }
            "activation_chance" => {
                self.activation_chance = value.parse().map_err(|_| invalid())?;
            }
            "cursed_chance" => {
                self.cursed_chance = value.parse().map_err(|_| invalid())?;
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| OptionsError::Io(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let lines = [
            "# hb-randart configuration file".to_string(),
            String::new(),
            format!("OPTIONS={}", if self.wizard { "wizard" } else { "!wizard" }),
            format!("OPTIONS=weakening:{}", self.weakening),
            format!("OPTIONS=activation_chance:{}", self.activation_chance),
            format!("OPTIONS=cursed_chance:{}", self.cursed_chance),
        ];
        lines.join("\n")
    }
}
