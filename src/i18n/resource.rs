// SPDX-License-Identifier: MPL-2.0
//! A single locale's table, parsed from one Fluent (`.ftl`) file.
//!
//! Keys follow Fluent addressing: `id` is a message value, `id.attr` is one
//! of its attributes. Terms (`-brand`) are private to the file and are not
//! keys.

use crate::error::{Error, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use fluent_syntax::ast;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use unic_langid::LanguageIdentifier;

pub struct LocaleResource {
    locale: LanguageIdentifier,
    bundle: FluentBundle<FluentResource>,
    keys: BTreeSet<String>,
}

impl fmt::Debug for LocaleResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleResource")
            .field("locale", &self.locale)
            .field("keys", &self.keys.len())
            .finish()
    }
}

impl LocaleResource {
    /// Parses `source` as the table for `locale`.
    ///
    /// Any syntax error or duplicated message id rejects the whole file.
    pub fn parse(locale: LanguageIdentifier, source: String, use_isolating: bool) -> Result<Self> {
        let keys = collect_keys(&locale, &source)?;

        let resource = FluentResource::try_new(source).map_err(|(_, errors)| Error::Parse {
            locale: locale.to_string(),
            message: join_errors(errors.iter()),
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        bundle.set_use_isolating(use_isolating);
        bundle.add_resource(resource).map_err(|errors| Error::Parse {
            locale: locale.to_string(),
            message: join_errors(errors.iter()),
        })?;

        tracing::debug!(%locale, keys = keys.len(), "parsed locale table");
        Ok(Self {
            locale,
            bundle,
            keys,
        })
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn key_set(&self) -> &BTreeSet<String> {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Formats `key` with optional placeholder arguments.
    ///
    /// Returns `None` when this table does not define the key. Formatting
    /// errors (such as a missing argument) still yield the rendered text.
    pub fn format(&self, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let (id, attribute) = split_key(key);
        let message = self.bundle.get_message(id)?;
        let pattern = match attribute {
            Some(name) => message.get_attribute(name)?.value(),
            None => message.value()?,
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::warn!(locale = %self.locale, key, ?errors, "formatting errors");
        }
        Some(value.into_owned())
    }
}

/// Splits `id.attr` into its message id and attribute name.
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('.') {
        Some((id, attribute)) => (id, Some(attribute)),
        None => (key, None),
    }
}

fn collect_keys(locale: &LanguageIdentifier, source: &str) -> Result<BTreeSet<String>> {
    let resource = fluent_syntax::parser::parse(source).map_err(|(_, errors)| Error::Parse {
        locale: locale.to_string(),
        message: errors
            .iter()
            .map(|e| format!("{e} at {}..{}", e.pos.start, e.pos.end))
            .collect::<Vec<_>>()
            .join("; "),
    })?;

    let mut ids = HashSet::new();
    let mut keys = BTreeSet::new();
    for entry in &resource.body {
        let ast::Entry::Message(message) = entry else {
            continue;
        };
        let id = message.id.name;
        if !ids.insert(id) {
            return Err(Error::DuplicateKey {
                locale: locale.to_string(),
                key: id.to_string(),
            });
        }
        if message.value.is_some() {
            keys.insert(id.to_string());
        }
        for attribute in &message.attributes {
            keys.insert(format!("{id}.{}", attribute.id.name));
        }
    }
    Ok(keys)
}

fn join_errors<E: fmt::Display>(errors: impl Iterator<Item = E>) -> String {
    errors.map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}
