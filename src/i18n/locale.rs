// SPDX-License-Identifier: MPL-2.0
//! Lenient parsing of locale tags coming from users, settings, and the OS,
//! and of Android resource directory names.

use crate::config::defaults::ANDROID_RESOURCE_PREFIX;
use unic_langid::LanguageIdentifier;

/// Parses a locale tag, accepting POSIX-style values such as `zh_HK.UTF-8`
/// or `de_DE@euro`.
///
/// Returns `None` for empty, `C`/`POSIX`, undetermined (`und`), or
/// malformed tags. The result is canonicalized (`zh-hk` becomes `zh-HK`).
pub fn parse_locale(raw: &str) -> Option<LanguageIdentifier> {
    let tag = raw
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");

    if tag.is_empty() || tag.eq_ignore_ascii_case("C") || tag.eq_ignore_ascii_case("POSIX") {
        return None;
    }

    let locale = tag.parse::<LanguageIdentifier>().ok()?;
    if locale.language.is_empty() {
        return None;
    }
    Some(locale)
}

/// Maps an Android resource qualifier to a locale: `values-zh-rHK` is
/// `zh-HK`, `values-ru` is `ru`, `values-b+sr+Latn` is `sr-Latn`.
///
/// Bare `values` and non-locale qualifiers (`values-night`, `values-v21`)
/// give `None`.
pub fn parse_android_qualifier(name: &str) -> Option<LanguageIdentifier> {
    let qualifier = name
        .strip_prefix(ANDROID_RESOURCE_PREFIX)?
        .strip_prefix('-')?;
    if let Some(bcp47) = qualifier.strip_prefix("b+") {
        return parse_locale(&bcp47.replace('+', "-"));
    }

    let mut parts = qualifier.split('-');
    let language = parts.next()?;
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let tag = match parts.next() {
        Some(region) => format!("{language}-{}", region.strip_prefix('r')?),
        None => language.to_string(),
    };
    if parts.next().is_some() {
        return None;
    }
    parse_locale(&tag)
}

/// Successively shorter forms of `locale`: variants dropped, then region,
/// then script. The input itself is not included.
pub fn truncations(locale: &LanguageIdentifier) -> Vec<LanguageIdentifier> {
    let mut out = Vec::new();
    let mut current = locale.clone();

    if current.variants().next().is_some() {
        current.clear_variants();
        out.push(current.clone());
    }
    if current.region.take().is_some() {
        out.push(current.clone());
    }
    if current.script.take().is_some() {
        out.push(current.clone());
    }
    out
}
