// SPDX-License-Identifier: MPL-2.0
//! A catalog handle bound to the locale the user interface currently shows.

use super::catalog::{missing, Catalog};
use super::locale::parse_locale;
use crate::config::Config;
use fluent_bundle::FluentArgs;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

pub struct Localizer {
    catalog: Arc<Catalog>,
    current_locale: LanguageIdentifier,
    chain: Vec<LanguageIdentifier>,
}

impl Localizer {
    /// Picks the locale from the CLI value, then the settings, then the
    /// operating system, keeping the first one the catalog supports.
    pub fn new(catalog: Arc<Catalog>, cli_lang: Option<String>, config: &Config) -> Self {
        let system = sys_locale::get_locale();
        let current_locale = resolve_locale(
            [cli_lang.as_deref(), config.language.as_deref(), system.as_deref()],
            &catalog,
        )
        .unwrap_or_else(|| catalog.default_locale().clone());
        Self::with_locale(catalog, current_locale)
    }

    pub fn with_locale(catalog: Arc<Catalog>, locale: LanguageIdentifier) -> Self {
        let chain = catalog.policy().chain_for(&locale);
        tracing::debug!(%locale, ?chain, "selected locale");
        Self {
            catalog,
            current_locale: locale,
            chain,
        }
    }

    /// Switches locale. Unsupported locales are ignored; returns whether the
    /// switch happened.
    pub fn set_locale(&mut self, locale: LanguageIdentifier) -> bool {
        if !self.catalog.is_supported_locale(&locale) {
            tracing::debug!(%locale, "ignoring unsupported locale");
            return false;
        }
        self.chain = self.catalog.policy().chain_for(&locale);
        self.current_locale = locale;
        true
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn fallback_chain(&self) -> &[LanguageIdentifier] {
        &self.chain
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn tr(&self, key: &str) -> String {
        self.translate(key, None)
    }

    pub fn tr_with_args(&self, key: &str, args: &FluentArgs) -> String {
        self.translate(key, Some(args))
    }

    fn translate(&self, key: &str, args: Option<&FluentArgs>) -> String {
        match self.catalog.resolve_in(&self.chain, key, args) {
            Some(resolved) => resolved.text,
            None => missing(key),
        }
    }
}

/// First candidate that parses and that `catalog` supports.
fn resolve_locale<'a>(
    candidates: impl IntoIterator<Item = Option<&'a str>>,
    catalog: &Catalog,
) -> Option<LanguageIdentifier> {
    candidates
        .into_iter()
        .flatten()
        .filter_map(parse_locale)
        .find(|locale| catalog.is_supported_locale(locale))
}
