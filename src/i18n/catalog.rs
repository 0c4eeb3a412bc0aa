// SPDX-License-Identifier: MPL-2.0
//! The locale resource table: every loaded locale plus the fallback policy.
//!
//! # Invariants
//!
//! 1. **Default is complete**: a catalog only exists if the default locale
//!    is loaded, and (in strict mode) no other table defines a key the
//!    default lacks. Every walk therefore ends on a table with the key.
//!
//! 2. **Required keys are the default's**: every required key is defined
//!    by the default table; other tables missing one are reported, not
//!    rejected, since fallback still serves them.
//!
//! 3. **Immutable after load**: no method takes `&mut self`, so a catalog is
//!    shared across threads behind an `Arc` without locking.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unsupported locale | No table on the chain | Default locale's text |
//! | Malformed locale tag | Unparsable request | Default locale's text |
//! | Unknown key | Not in the default table | `MISSING: <key>`, warning logged |

use super::completeness::{self, CompletenessReport};
use super::fallback::FallbackPolicy;
use super::locale::parse_locale;
use super::resource::LocaleResource;
use crate::config::defaults::MISSING_MARKER;
use crate::error::{Error, Result};
use fluent_bundle::FluentArgs;
use std::collections::HashMap;
use std::fmt;
use std::iter;
use unic_langid::LanguageIdentifier;

/// Text found for a key, with the locale whose table supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub locale: LanguageIdentifier,
    pub text: String,
}

pub struct Catalog {
    tables: HashMap<LanguageIdentifier, LocaleResource>,
    policy: FallbackPolicy,
    required_keys: Vec<String>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("default_locale", self.policy.default_locale())
            .field("locales", &self.supported_locales())
            .finish()
    }
}

impl Catalog {
    /// Assembles a catalog from parsed tables and checks completeness.
    ///
    /// Fails when the default locale has no table, when two tables share a
    /// locale, or (with `strict`) when any table defines keys the default
    /// lacks. Without `strict`, such keys are logged and kept.
    pub fn new(policy: FallbackPolicy, tables: Vec<LocaleResource>, strict: bool) -> Result<Self> {
        let mut by_locale = HashMap::with_capacity(tables.len());
        for table in tables {
            let locale = table.locale().clone();
            if by_locale.insert(locale.clone(), table).is_some() {
                return Err(Error::DuplicateLocale(locale.to_string()));
            }
        }

        let catalog = Self {
            tables: by_locale,
            policy,
            required_keys: Vec::new(),
        };
        let default = catalog
            .tables
            .get(catalog.default_locale())
            .ok_or_else(|| Error::MissingDefaultLocale(catalog.default_locale().to_string()))?;

        let report = CompletenessReport::build(default, catalog.tables.values(), &[]);
        for locale in report.orphans() {
            if strict {
                return Err(Error::OrphanKeys {
                    locale: locale.locale.clone(),
                    keys: locale.orphaned.clone(),
                });
            }
            tracing::warn!(
                locale = %locale.locale,
                keys = ?locale.orphaned,
                "keys missing from the default locale"
            );
        }

        tracing::debug!(
            default = %catalog.default_locale(),
            locales = catalog.tables.len(),
            keys = default.len(),
            "catalog ready"
        );
        Ok(catalog)
    }

    /// Sets the keys every locale must define itself.
    ///
    /// Fails when the default locale lacks any of them. Other locales
    /// missing one are logged; `completeness_report` lists them.
    pub fn with_required_keys(mut self, keys: Vec<String>) -> Result<Self> {
        if let Some(default) = self.default_table() {
            let missing = completeness::missing_required(default, &keys);
            if !missing.is_empty() {
                return Err(Error::MissingRequiredKeys {
                    locale: self.default_locale().to_string(),
                    keys: missing,
                });
            }
        }
        self.required_keys = keys;

        for locale in self.completeness_report().missing_required() {
            tracing::warn!(
                locale = %locale.locale,
                keys = ?locale.missing_required,
                "required keys left to fallback"
            );
        }
        Ok(self)
    }

    pub fn required_keys(&self) -> &[String] {
        &self.required_keys
    }

    pub fn policy(&self) -> &FallbackPolicy {
        &self.policy
    }

    pub fn default_locale(&self) -> &LanguageIdentifier {
        self.policy.default_locale()
    }

    pub fn table(&self, locale: &LanguageIdentifier) -> Option<&LocaleResource> {
        self.tables.get(locale)
    }

    /// Loaded locales, sorted by tag.
    pub fn supported_locales(&self) -> Vec<&LanguageIdentifier> {
        let mut locales: Vec<_> = self.tables.keys().collect();
        locales.sort_by_key(|l| l.to_string());
        locales
    }

    fn default_table(&self) -> Option<&LocaleResource> {
        self.tables.get(self.default_locale())
    }

    /// Keys of the default locale, which are all keys the catalog serves.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.default_table().into_iter().flat_map(|t| t.keys())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.default_table().is_some_and(|t| t.contains(key))
    }

    pub fn fallback_chain(&self, requested: &str) -> Vec<LanguageIdentifier> {
        self.policy.chain_for_tag(requested)
    }

    /// Whether `requested` is served in its own language: its chain reaches
    /// a loaded table other than the default's, or it is a form of the
    /// default's language (`en-GB` for `en`).
    pub fn is_supported(&self, requested: &str) -> bool {
        parse_locale(requested).is_some_and(|locale| self.is_supported_locale(&locale))
    }

    pub fn is_supported_locale(&self, locale: &LanguageIdentifier) -> bool {
        if locale.language == self.default_locale().language {
            return true;
        }
        self.policy
            .chain_for(locale)
            .iter()
            .any(|l| l != self.default_locale() && self.tables.contains_key(l))
    }

    /// Walks `chain`, then the default locale, returning the first table's
    /// text for `key`.
    pub fn resolve_in(
        &self,
        chain: &[LanguageIdentifier],
        key: &str,
        args: Option<&FluentArgs>,
    ) -> Option<Resolved> {
        chain
            .iter()
            .chain(iter::once(self.default_locale()))
            .filter_map(|locale| self.tables.get(locale))
            .find_map(|table| {
                table.format(key, args).map(|text| Resolved {
                    locale: table.locale().clone(),
                    text,
                })
            })
    }

    pub fn resolve(
        &self,
        requested: &str,
        key: &str,
        args: Option<&FluentArgs>,
    ) -> Option<Resolved> {
        self.resolve_in(&self.fallback_chain(requested), key, args)
    }

    /// Text for `key`, or `None` if no table (the default included) has it.
    pub fn get(&self, requested: &str, key: &str) -> Option<String> {
        self.resolve(requested, key, None).map(|r| r.text)
    }

    pub fn lookup(&self, requested: &str, key: &str) -> String {
        self.lookup_inner(requested, key, None)
    }

    pub fn lookup_with_args(&self, requested: &str, key: &str, args: &FluentArgs) -> String {
        self.lookup_inner(requested, key, Some(args))
    }

    fn lookup_inner(&self, requested: &str, key: &str, args: Option<&FluentArgs>) -> String {
        match self.resolve(requested, key, args) {
            Some(resolved) => resolved.text,
            None => missing(key),
        }
    }

    pub fn completeness_report(&self) -> CompletenessReport {
        match self.default_table() {
            Some(default) => {
                CompletenessReport::build(default, self.tables.values(), &self.required_keys)
            }
            None => CompletenessReport {
                default_locale: self.default_locale().to_string(),
                total_keys: 0,
                required_keys: self.required_keys.clone(),
                locales: Vec::new(),
            },
        }
    }
}

pub(crate) fn missing(key: &str) -> String {
    tracing::warn!(key, "key missing from every locale");
    format!("{MISSING_MARKER}{key}")
}
