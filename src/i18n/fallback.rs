// SPDX-License-Identifier: MPL-2.0
//! Fallback chain construction.
//!
//! The chain for a requested locale is, without duplicates:
//!
//! 1. the requested locale itself, then its aliases
//!    (e.g. `zh-HK` → `yue-HK`, `zh-TW`),
//! 2. each truncation (`zh-Hant-HK` → `zh-Hant` → `zh`), each followed by
//!    its own aliases, so `yue-MO` reaches `yue-HK` through `yue`,
//! 3. the default locale.
//!
//! The default locale always terminates the chain, so every walk ends on a
//! table that defines every key.

use super::locale::{parse_locale, truncations};
use crate::config::defaults::{DEFAULT_FALLBACK_ALIASES, DEFAULT_LOCALE};
use crate::config::Config;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::iter;
use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackPolicy {
    default_locale: LanguageIdentifier,
    aliases: HashMap<LanguageIdentifier, Vec<LanguageIdentifier>>,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(parse_locale(DEFAULT_LOCALE).unwrap_or_default())
    }
}

impl FallbackPolicy {
    /// Creates a policy with the built-in aliases.
    pub fn new(default_locale: LanguageIdentifier) -> Self {
        let aliases = DEFAULT_FALLBACK_ALIASES
            .iter()
            .filter_map(|(tag, targets)| {
                let tag = parse_locale(tag)?;
                let targets: Vec<_> = targets.iter().filter_map(|t| parse_locale(t)).collect();
                Some((tag, targets))
            })
            .collect();
        Self {
            default_locale,
            aliases,
        }
    }

    /// Builds the policy from settings. User aliases replace built-in ones
    /// for the same tag.
    pub fn from_config(config: &Config) -> Result<Self> {
        let default_locale = parse_locale(&config.default_locale).ok_or_else(|| {
            Error::Config(format!(
                "invalid default locale '{}'",
                config.default_locale
            ))
        })?;
        let mut policy = Self::new(default_locale);

        for (tag, targets) in &config.fallback {
            let tag = parse_locale(tag)
                .ok_or_else(|| Error::Config(format!("invalid fallback locale '{tag}'")))?;
            let targets = targets
                .iter()
                .map(|t| {
                    parse_locale(t).ok_or_else(|| {
                        Error::Config(format!("invalid fallback target '{t}' for '{tag}'"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            policy.set_aliases(tag, targets);
        }
        Ok(policy)
    }

    pub fn default_locale(&self) -> &LanguageIdentifier {
        &self.default_locale
    }

    pub fn set_aliases(&mut self, locale: LanguageIdentifier, targets: Vec<LanguageIdentifier>) {
        self.aliases.insert(locale, targets);
    }

    pub fn aliases(&self, locale: &LanguageIdentifier) -> &[LanguageIdentifier] {
        self.aliases.get(locale).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Chain for a raw, possibly malformed tag. Malformed tags get the
    /// default locale alone.
    pub fn chain_for_tag(&self, requested: &str) -> Vec<LanguageIdentifier> {
        match parse_locale(requested) {
            Some(locale) => self.chain_for(&locale),
            None => vec![self.default_locale.clone()],
        }
    }

    pub fn chain_for(&self, requested: &LanguageIdentifier) -> Vec<LanguageIdentifier> {
        let mut chain: Vec<LanguageIdentifier> = Vec::new();
        let mut push = |locale: &LanguageIdentifier| {
            if !chain.contains(locale) {
                chain.push(locale.clone());
            }
        };

        for locale in iter::once(requested.clone()).chain(truncations(requested)) {
            push(&locale);
            for alias in self.aliases(&locale) {
                push(alias);
            }
        }
        push(&self.default_locale);
        chain
    }
}
