//! The language state: which language is selected, which one the app first
//! ran with, and everything derived from the selection.
//!
//! A [`LanguageContext`] is created once per app through
//! [`LanguageContext::builder`] and shared through `Rc`. Both languages live in
//! a [`Storage`], so they survive restarts.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use unic_langid::LanguageIdentifier;

use crate::{
    bundle::{Bundle, BundleProvider, MemoryBundles},
    config::Config,
    error::Error,
    format::{FormatArg, format_with},
    host::{ComponentInitHook, Host, NoopHost, StringResolver},
    language::{Direction, Language, LanguagePreference, TextAlignment},
    numbers::{NumberFormatter, localize_numbers},
    storage::{MemoryStorage, Storage, StorageKey},
    ui::{Localizable, Localizer},
};

/// Identifies a registered change observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Which branch [`LanguageContext::set_default_language`] took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultLanguageOutcome {
    /// No default existed; this language is now both default and selected.
    Established(Language),
    /// A default already existed and was kept; the selected language was re-applied.
    AlreadySet {
        default: Language,
        selected: Language,
    },
}

type DeviceLocale = Box<dyn Fn() -> Option<String>>;

/// Builds a [`LanguageContext`].
pub struct LanguageContextBuilder {
    config: Config,
    storage: Option<Box<dyn Storage>>,
    bundles: Option<Box<dyn BundleProvider>>,
    host: Option<Rc<dyn Host>>,
    device_locale: Option<DeviceLocale>,
}

impl LanguageContextBuilder {
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn bundles(mut self, bundles: impl BundleProvider + 'static) -> Self {
        self.bundles = Some(Box::new(bundles));
        self
    }

    pub fn host(mut self, host: Rc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Overrides how the operating system locale is read (defaults to `sys-locale`).
    pub fn device_locale(mut self, device_locale: impl Fn() -> Option<String> + 'static) -> Self {
        self.device_locale = Some(Box::new(device_locale));
        self
    }

    pub fn build(self) -> Rc<LanguageContext> {
        let localize_numbers = self.config.localize_numbers;
        Rc::new_cyclic(|this| LanguageContext {
            config: self.config,
            storage: self.storage.unwrap_or_else(|| Box::new(MemoryStorage::new())),
            bundles: self
                .bundles
                .unwrap_or_else(|| Box::new(MemoryBundles::new())),
            host: self.host.unwrap_or_else(|| Rc::new(NoopHost)),
            device_locale: self
                .device_locale
                .unwrap_or_else(|| Box::new(sys_locale::get_locale)),
            localize_numbers: Cell::new(localize_numbers),
            hooks_installed: Cell::new(false),
            observers: RefCell::new(Vec::new()),
            next_observer: Cell::new(0),
            this: this.clone(),
        })
    }
}

/// Single source of truth for the active language.
pub struct LanguageContext {
    config: Config,
    storage: Box<dyn Storage>,
    bundles: Box<dyn BundleProvider>,
    host: Rc<dyn Host>,
    device_locale: DeviceLocale,
    localize_numbers: Cell<bool>,
    hooks_installed: Cell<bool>,
    observers: RefCell<Vec<(ObserverId, Rc<dyn Fn(Language)>)>>,
    next_observer: Cell<u64>,
    this: Weak<LanguageContext>,
}

impl LanguageContext {
    pub fn builder() -> LanguageContextBuilder {
        LanguageContextBuilder {
            config: Config::default(),
            storage: None,
            bundles: None,
            host: None,
            device_locale: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &Rc<dyn Host> {
        &self.host
    }

    fn read_language(&self, key: StorageKey) -> Option<Result<Language, Error>> {
        let identifier = self.storage.get(&self.config.storage_key(key))?;
        if identifier.is_empty() {
            return None;
        }
        Some(identifier.parse())
    }

    fn write_language(&self, key: StorageKey, language: Language) -> Result<(), Error> {
        self.storage
            .set(&self.config.storage_key(key), Some(language.identifier()))
    }

    pub fn is_default_language_set(&self) -> bool {
        self.read_language(StorageKey::DefaultLanguage).is_some()
    }

    /// The language the app ran with the first time.
    ///
    /// Reading it before [`LanguageContext::set_default_language`] was ever
    /// called is a misconfiguration and fails with
    /// [`Error::DefaultLanguageNotSet`].
    pub fn default_language(&self) -> Result<Language, Error> {
        self.read_language(StorageKey::DefaultLanguage)
            .unwrap_or(Err(Error::DefaultLanguageNotSet))
    }

    /// Establishes the default language on first run.
    ///
    /// Installs the host hooks (once). When a default is already persisted it
    /// is kept and the selected language's direction is re-applied instead,
    /// so calling this on every launch is safe.
    pub fn set_default_language(
        &self,
        preference: impl Into<LanguagePreference>,
    ) -> Result<DefaultLanguageOutcome, Error> {
        self.install_hooks();

        if self.is_default_language_set() {
            let default = self.default_language()?;
            let selected = self.selected_language()?;
            tracing::debug!(%default, %selected, "default language already set, re-applying selection");
            self.host.apply_layout_direction(selected.direction());
            return Ok(DefaultLanguageOutcome::AlreadySet { default, selected });
        }

        let language = self.resolve_preference(preference.into());
        self.write_language(StorageKey::DefaultLanguage, language)?;
        self.select(language)?;
        self.host.apply_layout_direction(language.direction());
        tracing::debug!(%language, "default language established");
        Ok(DefaultLanguageOutcome::Established(language))
    }

    /// The active language: the persisted selection, or the default when
    /// nothing (or nothing recognizable) was selected.
    ///
    /// Fails like [`LanguageContext::default_language`] while no default is
    /// stored, even if a selection is.
    pub fn selected_language(&self) -> Result<Language, Error> {
        let default = self.default_language()?;
        match self.read_language(StorageKey::SelectedLanguage) {
            Some(Ok(language)) => Ok(language),
            Some(Err(error)) => {
                tracing::warn!(%error, "ignoring unrecognized selected language");
                Ok(default)
            }
            None => Ok(default),
        }
    }

    /// The operating system language if supported, else the configured fallback.
    pub fn device_language(&self) -> Language {
        (self.device_locale)()
            .and_then(|locale| Language::best_match(&locale))
            .unwrap_or(self.config.fallback_language)
    }

    fn resolve_preference(&self, preference: LanguagePreference) -> Language {
        match preference {
            LanguagePreference::Fixed(language) => language,
            LanguagePreference::Device => self.device_language(),
        }
    }

    /// Persists `language` as selected. Returns whether anything changed;
    /// observers are notified only then.
    pub(crate) fn select(&self, language: Language) -> Result<bool, Error> {
        if let Some(Ok(current)) = self.read_language(StorageKey::SelectedLanguage) {
            if current == language {
                return Ok(false);
            }
        }
        self.write_language(StorageKey::SelectedLanguage, language)?;
        tracing::debug!(%language, "selected language changed");
        self.notify(language);
        Ok(true)
    }

    pub fn is_right_to_left(&self) -> Result<bool, Error> {
        Ok(self.selected_language()?.is_right_to_left())
    }

    pub fn direction(&self) -> Result<Direction, Error> {
        Ok(self.selected_language()?.direction())
    }

    /// Direction to lay the whole app out in. Same as [`LanguageContext::direction`].
    pub fn layout_direction(&self) -> Result<Direction, Error> {
        self.direction()
    }

    /// Locale of the selected language, for dates and currency.
    pub fn locale(&self) -> Result<LanguageIdentifier, Error> {
        Ok(self.selected_language()?.locale())
    }

    /// Bundle of the selected language; `None` if the app ships none for it.
    pub fn bundle(&self) -> Result<Option<Rc<Bundle>>, Error> {
        Ok(self.bundles.bundle(self.selected_language()?))
    }

    pub fn text_alignment(&self) -> Result<TextAlignment, Error> {
        Ok(self.selected_language()?.text_alignment())
    }

    pub fn decimal_separator(&self) -> Result<char, Error> {
        Ok(self.selected_language()?.decimal_separator())
    }

    pub fn should_localize_numbers(&self) -> bool {
        self.localize_numbers.get()
    }

    pub fn set_should_localize_numbers(&self, enabled: bool) {
        self.localize_numbers.set(enabled);
    }

    /// Registers a callback fired after every actual change of the selected language.
    pub fn on_change(&self, callback: impl Fn(Language) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer.get());
        self.next_observer.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(observer, _)| *observer != id);
        observers.len() != before
    }

    fn notify(&self, language: Language) {
        let callbacks: Vec<_> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback(language);
        }
    }

    /// Hands the string resolver and the component-init hook to the host.
    /// Runs at most once per context.
    pub(crate) fn install_hooks(&self) {
        if self.hooks_installed.replace(true) {
            return;
        }
        self.host.install_string_resolver(Rc::new(SelectedBundleResolver {
            context: self.this.clone(),
        }));
        self.host.install_component_init_hook(Rc::new(RelocalizeOnInit {
            context: self.this.clone(),
        }));
        tracing::debug!("installed string resolver and component init hook");
    }

    pub fn hooks_installed(&self) -> bool {
        self.hooks_installed.get()
    }

    /// Looks `key` up for `language` in `table`: the language's own bundle
    /// first, then the main bundle.
    fn translate(&self, key: &str, language: Language, table: &str) -> Option<String> {
        [self.bundles.bundle(language), self.bundles.main_bundle()]
            .into_iter()
            .flatten()
            .find_map(|bundle| bundle.localized_string(key, table).map(str::to_string))
    }

    /// Translation of `key` in the selected language, numbers included.
    pub fn localized(&self, key: &str) -> Result<String, Error> {
        Ok(self.localized_in(key, self.selected_language()?))
    }

    /// Translation of `key` in `language`; `key` itself when there is none.
    pub fn localized_in(&self, key: &str, language: Language) -> String {
        let expression = self
            .translate(key, language, &self.config.default_table)
            .unwrap_or_else(|| key.to_string());
        self.finish(expression, language)
    }

    /// Translates the format string `key`, substitutes `args`, then localizes numbers.
    pub fn localized_with(&self, key: &str, args: &[FormatArg]) -> Result<String, Error> {
        Ok(self.localized_with_in(key, self.selected_language()?, args))
    }

    pub fn localized_with_in(&self, key: &str, language: Language, args: &[FormatArg]) -> String {
        let expression = self
            .translate(key, language, &self.config.default_table)
            .unwrap_or_else(|| key.to_string());
        self.finish(format_with(&expression, args), language)
    }

    fn finish(&self, text: String, language: Language) -> String {
        if self.should_localize_numbers() {
            localize_numbers(&text, language)
        } else {
            text
        }
    }

    /// Raw table lookup in `language`'s own bundle. `None` when the bundle,
    /// the table or the key is missing. Numbers are not localized.
    pub fn expression_localized(&self, key: &str, language: Language, table: &str) -> Option<String> {
        self.bundles
            .bundle(language)?
            .localized_string(key, table)
            .map(str::to_string)
    }

    /// Every translation of `key` across the tables of `language`'s bundle,
    /// keyed by table name.
    pub fn all_expression_localizations(
        &self,
        key: &str,
        language: Language,
    ) -> BTreeMap<String, String> {
        let Some(bundle) = self.bundles.bundle(language) else {
            return BTreeMap::new();
        };
        bundle
            .table_names()
            .filter_map(|table| {
                bundle
                    .localized_string(key, table)
                    .map(|value| (table.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Localizes the numbers in `text` for the selected language.
    pub fn numbers_localized(&self, text: &str) -> Result<String, Error> {
        Ok(localize_numbers(text, self.selected_language()?))
    }

    pub fn localized_integer(&self, value: i64) -> Result<String, Error> {
        Ok(NumberFormatter::new(self.selected_language()?).format_integer(value))
    }

    pub fn localized_float(&self, value: f64) -> Result<String, Error> {
        Ok(NumberFormatter::new(self.selected_language()?).format_float(value))
    }

    /// Walks `component` and its descendants in the selected language.
    pub fn relocalize(&self, component: &mut dyn Localizable) -> Result<(), Error> {
        let language = self.selected_language()?;
        component.localize(&Localizer::new(self, language));
        Ok(())
    }
}

struct SelectedBundleResolver {
    context: Weak<LanguageContext>,
}

impl StringResolver for SelectedBundleResolver {
    fn resolve(&self, key: &str, table: Option<&str>) -> String {
        let Some(context) = self.context.upgrade() else {
            return key.to_string();
        };
        let table = table.unwrap_or(&context.config.default_table);
        match context.selected_language() {
            Ok(language) => context
                .translate(key, language, table)
                .unwrap_or_else(|| key.to_string()),
            Err(error) => {
                tracing::warn!(%error, key, "string lookup before a language was configured");
                key.to_string()
            }
        }
    }
}

struct RelocalizeOnInit {
    context: Weak<LanguageContext>,
}

impl ComponentInitHook for RelocalizeOnInit {
    fn component_did_initialize(&self, component: &mut dyn Localizable) {
        let Some(context) = self.context.upgrade() else {
            return;
        };
        if let Err(error) = context.relocalize(component) {
            tracing::warn!(%error, "skipping relocalization of new component");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Rc<LanguageContext> {
        LanguageContext::builder()
            .bundles(
                MemoryBundles::new()
                    .with_bundle(
                        Language::En,
                        Bundle::new("en").with_table("Localizable", [("key", "not key")]),
                    )
                    .with_bundle(
                        Language::Ar,
                        Bundle::new("ar").with_table("Localizable", [("key", "ليس مفتاحا")]),
                    ),
            )
            .device_locale(|| Some("ar-EG".to_string()))
            .build()
    }

    #[test]
    fn test_reads_fail_before_default_is_set() {
        let ctx = context();
        assert!(matches!(ctx.default_language(), Err(Error::DefaultLanguageNotSet)));
        assert!(matches!(ctx.selected_language(), Err(Error::DefaultLanguageNotSet)));
        assert!(ctx.localized("key").is_err());
        assert!(!ctx.is_default_language_set());
    }

    #[test]
    fn test_device_preference_resolves_os_language() {
        let ctx = context();
        let outcome = ctx.set_default_language(LanguagePreference::Device).unwrap();
        assert_eq!(outcome, DefaultLanguageOutcome::Established(Language::Ar));
        assert_eq!(ctx.default_language().unwrap(), Language::Ar);
    }

    #[test]
    fn test_unsupported_device_language_uses_fallback() {
        let ctx = LanguageContext::builder()
            .device_locale(|| Some("xx-YY".to_string()))
            .build();
        assert_eq!(ctx.device_language(), Language::En);
        let ctx = LanguageContext::builder().device_locale(|| None).build();
        assert_eq!(ctx.device_language(), Language::En);
    }

    #[test]
    fn test_localized_in_missing_bundle_uses_key() {
        let ctx = context();
        assert_eq!(ctx.localized_in("key", Language::Fr), "key");
        assert_eq!(ctx.localized_in("missing", Language::En), "missing");
        assert_eq!(ctx.localized_in("key", Language::Ar), "ليس مفتاحا");
    }

    #[test]
    fn test_observer_removal() {
        let ctx = context();
        ctx.set_default_language(Language::En).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = ctx.on_change(move |language| sink.borrow_mut().push(language));
        ctx.select(Language::Ar).unwrap();
        assert!(ctx.remove_observer(id));
        ctx.select(Language::En).unwrap();
        assert_eq!(*seen.borrow(), vec![Language::Ar]);
        assert!(!ctx.remove_observer(id));
    }

    #[test]
    fn test_stray_selection_without_default_is_rejected() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set("langswitch.selectedLanguage", Some("ar")).unwrap();
        let ctx = LanguageContext::builder().storage(storage).build();
        assert!(matches!(ctx.selected_language(), Err(Error::DefaultLanguageNotSet)));
    }

    #[test]
    fn test_corrupt_selection_falls_back_to_default() {
        let storage = Rc::new(MemoryStorage::new());
        let ctx = LanguageContext::builder().storage(storage.clone()).build();
        ctx.set_default_language(Language::En).unwrap();
        storage
            .set("langswitch.selectedLanguage", Some("klingon"))
            .unwrap();
        assert_eq!(ctx.selected_language().unwrap(), Language::En);
    }
}
