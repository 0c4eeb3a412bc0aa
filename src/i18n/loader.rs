// SPDX-License-Identifier: MPL-2.0
//! Loading locale tables, either embedded in the binary or from a directory.
//!
//! A locale is either one `<locale>.ftl` file or a directory of `.ftl` files
//! (one per string category: `strings_battery.ftl`, `template.ftl`, ...),
//! concatenated in name order into one table. Directories are named after
//! the locale (`zh-HK/`) or in Android style (`values-zh-rHK/`, with bare
//! `values/` holding the default locale).
//!
//! Loading is all-or-nothing: one bad file fails the whole load, so a
//! partially-loaded catalog is never served.

use super::catalog::Catalog;
use super::fallback::FallbackPolicy;
use super::locale::{parse_android_qualifier, parse_locale};
use super::resource::LocaleResource;
use crate::config::defaults::ANDROID_RESOURCE_PREFIX;
use crate::config::Config;
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

const RESOURCE_EXTENSION: &str = "ftl";

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Options applied while turning files into a catalog.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub policy: FallbackPolicy,
    pub strict: bool,
    pub use_isolating: bool,
    pub required_keys: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            policy: FallbackPolicy::default(),
            strict: crate::config::DEFAULT_STRICT,
            use_isolating: crate::config::DEFAULT_USE_ISOLATING,
            required_keys: crate::config::DEFAULT_REQUIRED_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl LoadOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            policy: FallbackPolicy::from_config(config)?,
            strict: config.strict,
            use_isolating: config.use_isolating,
            required_keys: config.required_keys.clone(),
        })
    }
}

/// Sources gathered per top-level entry (file or directory), keyed by
/// entry name so iteration follows name order.
#[derive(Default)]
struct Sources {
    entries: BTreeMap<String, (LanguageIdentifier, Vec<String>)>,
}

impl Sources {
    fn add(&mut self, entry: &str, locale: LanguageIdentifier, source: String) {
        self.entries
            .entry(entry.to_string())
            .or_insert_with(|| (locale, Vec::new()))
            .1
            .push(source);
    }

    fn into_catalog(self, options: &LoadOptions) -> Result<Catalog> {
        let mut tables = Vec::with_capacity(self.entries.len());
        for (entry, (locale, sources)) in self.entries {
            tracing::debug!(entry = %entry, %locale, files = sources.len(), "parsing locale");
            tables.push(LocaleResource::parse(
                locale,
                sources.join("\n"),
                options.use_isolating,
            )?);
        }
        Catalog::new(options.policy.clone(), tables, options.strict)?
            .with_required_keys(options.required_keys.clone())
    }
}

/// Loads the tables compiled into the binary.
pub fn load_embedded(options: &LoadOptions) -> Result<Catalog> {
    let mut paths: Vec<String> = Asset::iter().map(|f| f.into_owned()).collect();
    paths.sort();

    let default = options.policy.default_locale();
    let mut sources = Sources::default();
    for path in paths {
        let (entry, locale) = match path.split_once('/') {
            Some((dir, file)) => {
                if file.contains('/') || !is_resource_file(file) {
                    continue;
                }
                match locale_from_dir_name(dir, default) {
                    Some(locale) => (dir, locale),
                    None => continue,
                }
            }
            None => match locale_from_file_name(&path) {
                Some(locale) => (path.as_str(), locale),
                None => continue,
            },
        };
        if let Some(content) = Asset::get(&path) {
            let source = decode(&locale, &path, content.data.as_ref())?;
            sources.add(entry, locale, source);
        }
    }
    sources.into_catalog(options)
}

/// Loads every locale file and locale directory found directly in `dir`.
pub fn load_dir(dir: &Path, options: &LoadOptions) -> Result<Catalog> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        paths.push(entry?.path());
    }
    paths.sort();

    let default = options.policy.default_locale();
    let mut sources = Sources::default();
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_dir() {
            let Some(locale) = locale_from_dir_name(name, default) else {
                tracing::debug!(dir = name, "skipping directory not named after a locale");
                continue;
            };
            for file in resource_files(&path)? {
                let source = decode(&locale, &file.display().to_string(), &fs::read(&file)?)?;
                sources.add(name, locale.clone(), source);
            }
        } else if let Some(locale) = locale_from_file_name(name) {
            let source = decode(&locale, name, &fs::read(&path)?)?;
            sources.add(name, locale, source);
        }
    }
    tracing::debug!(dir = %dir.display(), tables = sources.entries.len(), "read locale directory");
    sources.into_catalog(options)
}

/// Loads from `dir` when given, falling back to the embedded tables if that
/// load fails for any reason.
pub fn load_or_embedded(dir: Option<&Path>, options: &LoadOptions) -> Result<Catalog> {
    if let Some(dir) = dir {
        match load_dir(dir, options) {
            Ok(catalog) => return Ok(catalog),
            Err(err) => {
                tracing::warn!(dir = %dir.display(), %err, "falling back to embedded locales");
            }
        }
    }
    load_embedded(options)
}

/// Loads the catalog described by `config`.
pub fn load_from_config(config: &Config) -> Result<Catalog> {
    let options = LoadOptions::from_config(config)?;
    load_or_embedded(config.resources_dir.as_deref(), &options)
}

/// `.ftl` files directly inside `dir`, sorted by name.
fn resource_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_resource = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_resource_file);
        if path.is_file() && is_resource {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_resource_file(name: &str) -> bool {
    name.strip_suffix(RESOURCE_EXTENSION)
        .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
}

/// Resource files must be UTF-8; anything else fails the load for `locale`.
fn decode(locale: &LanguageIdentifier, name: &str, bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|err| Error::Parse {
            locale: locale.to_string(),
            message: format!("{name}: {err}"),
        })
}

/// Locale named by a resource file, or `None` for files to ignore.
fn locale_from_file_name(name: &str) -> Option<LanguageIdentifier> {
    let stem = name.strip_suffix(RESOURCE_EXTENSION)?.strip_suffix('.')?;
    let locale = locale_from_name(stem);
    if locale.is_none() {
        tracing::warn!(file = name, "skipping resource file not named after a locale");
    }
    locale
}

/// Locale named by a resource directory. Bare `values` is the default
/// locale, as in an Android resource tree.
fn locale_from_dir_name(name: &str, default: &LanguageIdentifier) -> Option<LanguageIdentifier> {
    if name == ANDROID_RESOURCE_PREFIX {
        return Some(default.clone());
    }
    locale_from_name(name)
}

fn locale_from_name(name: &str) -> Option<LanguageIdentifier> {
    let android = name
        .strip_prefix(ANDROID_RESOURCE_PREFIX)
        .is_some_and(|rest| rest.starts_with('-'));
    if android {
        parse_android_qualifier(name)
    } else {
        parse_locale(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;
    use unic_langid::langid;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).expect("failed to write resource");
    }

    fn write_in(dir: &Path, sub: &str, name: &str, content: &str) {
        fs::create_dir_all(dir.join(sub)).expect("failed to create locale dir");
        write(&dir.join(sub), name, content);
    }

    fn plain_text() -> LoadOptions {
        LoadOptions {
            use_isolating: false,
            required_keys: Vec::new(),
            ..LoadOptions::default()
        }
    }

    #[test]
    fn file_names_map_to_locales() {
        assert_eq!(
            locale_from_file_name("zh-HK.ftl").map(|l| l.to_string()),
            Some("zh-HK".to_string())
        );
        assert_eq!(
            locale_from_file_name("pt_BR.ftl").map(|l| l.to_string()),
            Some("pt-BR".to_string())
        );
        assert_eq!(locale_from_file_name("README.md"), None);
        assert_eq!(locale_from_file_name("not a locale.ftl"), None);
        assert_eq!(locale_from_file_name("enftl"), None);
        assert_eq!(
            locale_from_file_name("values-zh-rHK.ftl").map(|l| l.to_string()),
            Some("zh-HK".to_string())
        );
        assert_eq!(locale_from_file_name("values-night.ftl"), None);
    }

    #[test]
    fn directory_names_map_to_locales() {
        let en = langid!("en");
        let name = |dir: &str| locale_from_dir_name(dir, &en).map(|l| l.to_string());
        assert_eq!(name("values").as_deref(), Some("en"));
        assert_eq!(name("values-yue-rCN").as_deref(), Some("yue-CN"));
        assert_eq!(name("values-vi").as_deref(), Some("vi"));
        assert_eq!(name("ja-JP").as_deref(), Some("ja-JP"));
        assert_eq!(name("values-night"), None);
        assert_eq!(name(".git"), None);
    }

    #[test]
    fn android_tree_with_category_files_loads() {
        let dir = tempdir().expect("failed to create temp dir");
        write_in(dir.path(), "values", "strings_battery.ftl", "charging = Charging\n");
        write_in(
            dir.path(),
            "values",
            "template.ftl",
            "TPL_battery = Battery: { $BatteryLevel }%\nTPL_system_message = { $Message }\n",
        );
        write_in(dir.path(), "values-yue-rHK", "strings_battery.ftl", "charging = 充緊電\n");
        write_in(dir.path(), "values-zh-rHK", "template.ftl", "TPL_battery = 電池: { $BatteryLevel }%\n");
        write_in(dir.path(), "values-night", "colors.ftl", "ignored = yes\n");
        write_in(dir.path(), "values-ru", "strings.xml", "<resources/>");

        let catalog = load_dir(dir.path(), &plain_text()).expect("load should succeed");
        let tags: Vec<String> = catalog
            .supported_locales()
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(tags, vec!["en", "yue-HK", "zh-HK"]);

        let mut args = crate::i18n::FluentArgs::new();
        args.set("BatteryLevel", 15);
        assert_eq!(catalog.lookup_with_args("zh-HK", "TPL_battery", &args), "電池: 15%");
        assert_eq!(catalog.lookup("zh-HK", "charging"), "充緊電");
        args.set("Message", "SIM1 ready");
        let system = catalog.resolve("zh-HK", "TPL_system_message", Some(&args)).unwrap();
        assert_eq!(system.locale, langid!("en"));
        assert_eq!(system.text, "SIM1 ready");
    }

    #[test]
    fn key_repeated_across_category_files_fails() {
        let dir = tempdir().expect("failed to create temp dir");
        write_in(dir.path(), "values", "strings.ftl", "status = Status\n");
        write_in(dir.path(), "values", "strings_common.ftl", "status = State\n");

        let result = load_dir(dir.path(), &plain_text());
        assert!(matches!(result, Err(Error::DuplicateKey { key, .. }) if key == "status"));
    }

    #[test]
    fn directory_and_file_for_one_locale_fail() {
        let dir = tempdir().expect("failed to create temp dir");
        write_in(dir.path(), "values", "strings.ftl", "status = Status\n");
        write(dir.path(), "en.ftl", "status = Status\n");

        let result = load_dir(dir.path(), &plain_text());
        assert!(matches!(result, Err(Error::DuplicateLocale(l)) if l == "en"));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let dir = tempdir().expect("failed to create temp dir");
        write(dir.path(), "en.ftl", "greeting = Hello\n");
        fs::write(dir.path().join("ru.ftl"), b"greeting = \xff\xfe\n").expect("failed to write");

        let result = load_dir(dir.path(), &plain_text());
        assert!(matches!(result, Err(Error::Parse { locale, .. }) if locale == "ru"));

        let err = decode(&langid!("vi"), "vi.ftl", b"a = \xc3").unwrap_err();
        assert!(err.to_string().starts_with("parse error in locale 'vi': vi.ftl:"));
    }

    #[test]
    fn required_keys_are_checked_on_load() {
        let dir = tempdir().expect("failed to create temp dir");
        write(dir.path(), "en.ftl", "TPL_battery = Battery\nstatus = Status\n");
        write(dir.path(), "ru.ftl", "status = Статус\n");

        let options = LoadOptions {
            required_keys: vec!["TPL_battery".to_string()],
            ..plain_text()
        };
        let catalog = load_dir(dir.path(), &options).expect("missing translations only warn");
        let report = catalog.completeness_report();
        assert!(!report.is_complete());
        assert_eq!(report.locales[0].missing_required, vec!["TPL_battery"]);

        let options = LoadOptions {
            required_keys: vec!["TPL_send_USSD_chat".to_string()],
            ..plain_text()
        };
        let result = load_dir(dir.path(), &options);
        assert!(matches!(result, Err(Error::MissingRequiredKeys { locale, .. }) if locale == "en"));
    }

    #[test]
    fn loads_directory_and_ignores_other_files() {
        let dir = tempdir().expect("failed to create temp dir");
        write(dir.path(), "en.ftl", "greeting = Hello\nfarewell = Bye\n");
        write(dir.path(), "fr.ftl", "greeting = Bonjour\n");
        write(dir.path(), "notes.txt", "not a table");
        write(dir.path(), "contributors.ftl", "ignored = yes\n");

        let catalog = load_dir(dir.path(), &plain_text()).expect("load should succeed");
        let tags: Vec<String> = catalog
            .supported_locales()
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(tags, vec!["en", "fr"]);
        assert_eq!(catalog.lookup("fr-CA", "greeting"), "Bonjour");
        assert_eq!(catalog.lookup("fr-CA", "farewell"), "Bye");
    }

    #[test]
    fn malformed_file_fails_the_whole_load() {
        let dir = tempdir().expect("failed to create temp dir");
        write(dir.path(), "en.ftl", "greeting = Hello\n");
        write(dir.path(), "ja.ftl", "greeting = こんにちは\n= broken\n");

        let result = load_dir(dir.path(), &plain_text());
        assert!(matches!(result, Err(Error::Parse { locale, .. }) if locale == "ja"));
    }

    #[test]
    fn two_files_for_one_locale_fail() {
        let dir = tempdir().expect("failed to create temp dir");
        write(dir.path(), "en.ftl", "greeting = Hello\n");
        write(dir.path(), "pt-BR.ftl", "greeting = Olá\n");
        write(dir.path(), "pt_BR.ftl", "greeting = Oi\n");

        let result = load_dir(dir.path(), &plain_text());
        assert!(matches!(result, Err(Error::DuplicateLocale(l)) if l == "pt-BR"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = load_dir(&dir.path().join("absent"), &plain_text());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn broken_directory_falls_back_to_embedded() {
        let dir = tempdir().expect("failed to create temp dir");
        write(dir.path(), "en.ftl", "= broken\n");

        let catalog = load_or_embedded(Some(dir.path()), &plain_text()).expect("embedded load");
        assert_eq!(catalog.lookup("en", "app.title"), "Telegram SMS");
    }

    #[test]
    fn embedded_tables_load_strictly() {
        let catalog = load_embedded(&LoadOptions::default()).expect("embedded load");
        let report = catalog.completeness_report();
        assert!(report.is_complete(), "{report}");
        assert_eq!(catalog.default_locale(), &langid!("en"));
        assert_eq!(catalog.supported_locales().len(), 10);
    }

    #[test]
    fn config_drives_directory_and_default_locale() {
        let dir = tempdir().expect("failed to create temp dir");
        write(dir.path(), "de.ftl", "greeting = Hallo\n");
        write(dir.path(), "de-CH.ftl", "greeting = Grüezi\n");

        let config = Config {
            default_locale: "de".to_string(),
            resources_dir: Some(dir.path().to_path_buf()),
            required_keys: Vec::new(),
            ..Config::default()
        };
        let catalog = load_from_config(&config).expect("load should succeed");
        assert_eq!(catalog.default_locale().to_string(), "de");
        assert_eq!(catalog.lookup("xx", "greeting"), "Hallo");
        assert_eq!(catalog.lookup("de-CH", "greeting"), "Grüezi");
    }
}
