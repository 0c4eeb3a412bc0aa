// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Locales**: Default (terminal) locale, built-in fallback aliases and
//!   keys every locale must translate
//! - **Loading**: Strictness and formatting options applied at load time

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale that defines every message key. Terminal element of every chain.
pub const DEFAULT_LOCALE: &str = "en";

/// Built-in fallback aliases. Each is tried right after its tag, whether
/// that tag was requested or reached by truncation.
///
/// Hong Kong and Macau Chinese go through Cantonese (Hong Kong) first, then
/// Taiwan Traditional Chinese. Script-only and bare-language tags point at
/// the regional tables that ship.
pub const DEFAULT_FALLBACK_ALIASES: &[(&str, &[&str])] = &[
    ("zh-HK", &["yue-HK", "zh-TW"]),
    ("zh-MO", &["zh-HK", "yue-HK", "zh-TW"]),
    ("zh-Hant-HK", &["zh-HK", "yue-HK", "zh-TW"]),
    ("zh-Hant-MO", &["zh-HK", "yue-HK", "zh-TW"]),
    ("zh-Hant", &["zh-TW"]),
    ("zh-Hans", &["zh-CN"]),
    ("zh-SG", &["zh-CN"]),
    ("yue", &["yue-HK"]),
    ("yue-Hant", &["yue-HK"]),
    ("yue-Hans", &["yue-CN"]),
    ("yue-CN", &["zh-CN"]),
    ("ja", &["ja-JP"]),
    ("es", &["es-ES"]),
];

/// Message templates every locale must define itself rather than inherit.
/// These are the texts forwarded to the chat, so falling back to another
/// language there is reported by `check`.
pub const DEFAULT_REQUIRED_KEYS: &[&str] = &[
    "TPL_system_message",
    "TPL_battery",
    "TPL_send_USSD_chat",
    "TPL_receiving_call",
];

// ==========================================================================
// Loading Defaults
// ==========================================================================

/// Whether keys missing from the default locale fail the load.
pub const DEFAULT_STRICT: bool = true;

/// Whether placeables are wrapped in Unicode isolation marks (FSI/PDI).
/// Off: rendered templates are sent as plain chat text.
pub const DEFAULT_USE_ISOLATING: bool = false;

/// Prefix of Android resource directory names (`values-zh-rHK`).
pub const ANDROID_RESOURCE_PREFIX: &str = "values";

/// Marker prefix returned for keys unknown to every table.
pub const MISSING_MARKER: &str = "MISSING: ";
