// SPDX-License-Identifier: MPL-2.0
//! `messenger_locales` holds the messenger's translated strings and the
//! lookup that serves them.
//!
//! Each locale is a Fluent table; a [`Catalog`](i18n::Catalog) maps a
//! requested locale and a message key to text, walking a fallback chain that
//! ends at the default locale.
//!
//! ```
//! use messenger_locales::i18n::{load_embedded, LoadOptions};
//!
//! let catalog = load_embedded(&LoadOptions::default()).unwrap();
//! assert_eq!(
//!     catalog.lookup("xx-unknown", "app.title"),
//!     catalog.lookup("en", "app.title"),
//! );
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;

pub use error::{Error, Result};
