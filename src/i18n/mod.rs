// SPDX-License-Identifier: MPL-2.0
//! Locale resource tables with fallback lookup.
//!
//! Translations are Fluent (`.ftl`) files, one directory per locale split
//! by string category (`values-zh-rHK/strings_battery.ftl`), either embedded
//! from `assets/i18n/` or read from a directory at startup. Lookups walk a
//! fallback chain that always ends at the default locale, which is required
//! to define every key.
//!
//! # Features
//!
//! - Lenient locale parsing (`zh_HK.UTF-8`, `ZH-hk`)
//! - Android resource directory names (`values-yue-rCN` is `yue-CN`)
//! - Configurable fallback aliases (`zh-HK` → `yue-HK` → `zh-TW`)
//! - Load-time completeness check against the default locale
//! - Required message templates every locale must translate itself
//! - Placeholder substitution through [`FluentArgs`]
//! - Lock-free concurrent reads after load

pub mod catalog;
pub mod completeness;
pub mod fallback;
pub mod loader;
pub mod locale;
pub mod localizer;
pub mod resource;

pub use catalog::{Catalog, Resolved};
pub use completeness::{CompletenessReport, LocaleCompleteness};
pub use fallback::FallbackPolicy;
pub use fluent_bundle::FluentArgs;
pub use loader::{load_dir, load_embedded, load_from_config, load_or_embedded, LoadOptions};
pub use locale::{parse_android_qualifier, parse_locale};
pub use localizer::Localizer;
pub use resource::LocaleResource;
pub use unic_langid::LanguageIdentifier;
