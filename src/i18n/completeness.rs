// SPDX-License-Identifier: MPL-2.0
//! Key-set comparison between the default locale and every other table.
//!
//! The default table must be a superset of every other table. Keys found
//! elsewhere but not in the default are *orphaned*; keys only the default
//! defines are *untranslated* and are served by fallback, except for
//! *required* keys, which every locale must translate itself.

use super::resource::LocaleResource;
use std::fmt;

/// Coverage of every non-default locale against the default locale.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletenessReport {
    pub default_locale: String,
    /// Number of keys in the default table.
    pub total_keys: usize,
    /// Keys every locale must define itself.
    pub required_keys: Vec<String>,
    /// Per-locale data, sorted by locale tag.
    pub locales: Vec<LocaleCompleteness>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCompleteness {
    pub locale: String,
    /// Default keys this locale defines itself.
    pub translated: usize,
    /// Default keys this locale leaves to fallback, sorted.
    pub untranslated: Vec<String>,
    /// Keys unknown to the default locale, sorted.
    pub orphaned: Vec<String>,
    /// Required keys this locale leaves to fallback, in required order.
    pub missing_required: Vec<String>,
    /// `translated / total_keys` as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}

impl CompletenessReport {
    pub fn build<'a>(
        default: &LocaleResource,
        others: impl IntoIterator<Item = &'a LocaleResource>,
        required_keys: &[String],
    ) -> Self {
        let reference = default.key_set();
        let total = reference.len();

        let mut locales: Vec<LocaleCompleteness> = others
            .into_iter()
            .filter(|table| table.locale() != default.locale())
            .map(|table| {
                let keys = table.key_set();
                let untranslated: Vec<String> = reference.difference(keys).cloned().collect();
                let orphaned: Vec<String> = keys.difference(reference).cloned().collect();
                let translated = total - untranslated.len();
                let missing_required = missing_required(table, required_keys);
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (translated as f32 / total as f32) * 100.0
                };
                LocaleCompleteness {
                    locale: table.locale().to_string(),
                    translated,
                    untranslated,
                    orphaned,
                    missing_required,
                    coverage_percent,
                }
            })
            .collect();
        locales.sort_by(|a, b| a.locale.cmp(&b.locale));

        Self {
            default_locale: default.locale().to_string(),
            total_keys: total,
            required_keys: required_keys.to_vec(),
            locales,
        }
    }

    /// True when every table's keys are a subset of the default's.
    pub fn is_consistent(&self) -> bool {
        self.locales.iter().all(|l| l.orphaned.is_empty())
    }

    /// True when consistent and every locale defines every required key.
    pub fn is_complete(&self) -> bool {
        self.is_consistent() && self.missing_required().next().is_none()
    }

    /// Locales carrying orphaned keys.
    pub fn orphans(&self) -> impl Iterator<Item = &LocaleCompleteness> {
        self.locales.iter().filter(|l| !l.orphaned.is_empty())
    }

    /// Locales that leave a required key to fallback.
    pub fn missing_required(&self) -> impl Iterator<Item = &LocaleCompleteness> {
        self.locales.iter().filter(|l| !l.missing_required.is_empty())
    }
}

/// Entries of `required_keys` that `table` does not define.
pub(crate) fn missing_required(table: &LocaleResource, required_keys: &[String]) -> Vec<String> {
    required_keys
        .iter()
        .filter(|key| !table.contains(key))
        .cloned()
        .collect()
}

impl fmt::Display for CompletenessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (default): {} keys", self.default_locale, self.total_keys)?;
        for locale in &self.locales {
            write!(
                f,
                "{}: {}/{} ({:.1}%)",
                locale.locale, locale.translated, self.total_keys, locale.coverage_percent
            )?;
            if !locale.orphaned.is_empty() {
                write!(f, ", orphaned: {}", locale.orphaned.join(", "))?;
            }
            if !locale.missing_required.is_empty() {
                write!(f, ", missing required: {}", locale.missing_required.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
