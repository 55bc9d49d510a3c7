//! Resource bundles: per-language collections of string tables.
//!
//! A [`BundleProvider`] resolves a [`Language`] to its [`Bundle`]. Two
//! providers ship with the crate: [`MemoryBundles`] for tests and embedded
//! catalogs, and [`LprojBundles`] for `<root>/<identifier>.lproj/*.strings`
//! directory layouts.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{error::Error, language::Language, strings::StringsFile};

/// Directory name of the development-language bundle used as the main bundle.
pub const BASE_LOCALIZATION: &str = "Base";

/// Named string tables for one localization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bundle {
    identifier: String,
    tables: BTreeMap<String, HashMap<String, String>>,
}

impl Bundle {
    pub fn new(identifier: impl Into<String>) -> Self {
        Bundle {
            identifier: identifier.into(),
            tables: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a table, builder style.
    pub fn with_table<K, V>(mut self, name: &str, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert_table(
            name,
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn insert_table(&mut self, name: &str, entries: HashMap<String, String>) {
        self.tables.insert(name.to_string(), entries);
    }

    /// Loads every `*.strings` file in an `.lproj` directory; the file stem is the table name.
    pub fn load_lproj<P: AsRef<Path>>(path: P) -> Result<Bundle, Error> {
        let path = path.as_ref();
        let identifier = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| Error::InvalidBundle(path.display().to_string()))?
            .to_string();

        let mut bundle = Bundle::new(identifier);
        for entry in fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.extension().and_then(|ext| ext.to_str()) != Some("strings") {
                continue;
            }
            let Some(table_name) = file_path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match StringsFile::read_from(&file_path) {
                Ok(file) => bundle.insert_table(table_name, file.into_table()),
                Err(error) => {
                    tracing::warn!(path = %file_path.display(), %error, "skipping unreadable string table");
                }
            }
        }
        tracing::debug!(bundle = %bundle.identifier, tables = bundle.tables.len(), "loaded bundle");
        Ok(bundle)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Looks up `key` in `table`. `None` when the table or the key is missing.
    pub fn localized_string(&self, key: &str, table: &str) -> Option<&str> {
        self.tables
            .get(table)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

/// Resolves languages to bundles.
pub trait BundleProvider {
    /// The bundle for `language`, or `None` if the app ships no such localization.
    fn bundle(&self, language: Language) -> Option<Rc<Bundle>>;

    /// The bundle consulted when the selected language has none.
    fn main_bundle(&self) -> Option<Rc<Bundle>>;
}

/// Bundles held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundles {
    bundles: HashMap<Language, Rc<Bundle>>,
    main: Option<Rc<Bundle>>,
}

impl MemoryBundles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(mut self, language: Language, bundle: Bundle) -> Self {
        self.bundles.insert(language, Rc::new(bundle));
        self
    }

    pub fn with_main_bundle(mut self, bundle: Bundle) -> Self {
        self.main = Some(Rc::new(bundle));
        self
    }
}

impl BundleProvider for MemoryBundles {
    fn bundle(&self, language: Language) -> Option<Rc<Bundle>> {
        self.bundles.get(&language).cloned()
    }

    fn main_bundle(&self) -> Option<Rc<Bundle>> {
        self.main.clone()
    }
}

/// Bundles read lazily from `<root>/<identifier>.lproj` directories and cached.
///
/// The main bundle is `<root>/Base.lproj`.
#[derive(Debug)]
pub struct LprojBundles {
    root: PathBuf,
    cache: RefCell<HashMap<String, Option<Rc<Bundle>>>>,
}

impl LprojBundles {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        LprojBundles {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Languages with an `.lproj` directory under the root.
    pub fn localizations(&self) -> Result<Vec<Language>, Error> {
        let mut languages = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("lproj") {
                continue;
            }
            if let Some(language) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(Language::from_identifier)
            {
                languages.push(language);
            }
        }
        languages.sort();
        Ok(languages)
    }

    fn load(&self, identifier: &str) -> Option<Rc<Bundle>> {
        if let Some(cached) = self.cache.borrow().get(identifier) {
            return cached.clone();
        }

        let path = self.root.join(format!("{}.lproj", identifier));
        let bundle = if path.is_dir() {
            match Bundle::load_lproj(&path) {
                Ok(bundle) => Some(Rc::new(bundle)),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "failed to load bundle");
                    None
                }
            }
        } else {
            None
        };
        self.cache
            .borrow_mut()
            .insert(identifier.to_string(), bundle.clone());
        bundle
    }
}

impl BundleProvider for LprojBundles {
    fn bundle(&self, language: Language) -> Option<Rc<Bundle>> {
        self.load(language.identifier())
    }

    fn main_bundle(&self) -> Option<Rc<Bundle>> {
        self.load(BASE_LOCALIZATION)
    }
}
