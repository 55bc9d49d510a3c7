//! Switching the language at runtime.
//!
//! [`LanguageContext::set_language`] persists the choice, flips the host's
//! layout direction and, when asked to, rebuilds every root so the whole UI
//! comes back in the new language behind an animated snapshot.

use std::rc::Rc;

use crate::{
    context::LanguageContext,
    error::Error,
    language::Language,
    ui::{Localizable, Localizer, Snapshot, View, WindowHandle},
};

type RootFactory = Rc<dyn Fn(Option<&str>) -> View>;
type Transition = Rc<dyn Fn(&mut Snapshot)>;
type Completion = Rc<dyn Fn()>;

/// Fades the outgoing snapshot out. The default transition.
pub fn cross_fade(snapshot: &mut Snapshot) {
    snapshot.opacity = 0.0;
}

/// Blows the outgoing snapshot up while fading it.
pub fn zoom_out(snapshot: &mut Snapshot) {
    snapshot.scale = 2.0;
    snapshot.opacity = 0.0;
}

/// A request to switch language, optionally rebuilding the UI.
///
/// ```
/// use langswitch::{Language, LanguageChange, ui::View};
///
/// let change = LanguageChange::new(Language::Ar)
///     .with_root_factory(|_label| View::container(vec![]))
///     .on_complete(|| println!("done"));
/// assert_eq!(change.language(), Language::Ar);
/// ```
#[derive(Clone)]
pub struct LanguageChange {
    language: Language,
    targets: Option<Vec<WindowHandle>>,
    root_factory: Option<RootFactory>,
    transition: Option<Transition>,
    on_complete: Option<Completion>,
}

impl LanguageChange {
    pub fn new(language: Language) -> Self {
        LanguageChange {
            language,
            targets: None,
            root_factory: None,
            transition: None,
            on_complete: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Windows to rebuild. Every window the host knows about when unset.
    pub fn with_targets(mut self, targets: Vec<WindowHandle>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Builds a fresh root for a window, given its label. Without a factory
    /// nothing is rebuilt.
    pub fn with_root_factory(mut self, factory: impl Fn(Option<&str>) -> View + 'static) -> Self {
        self.root_factory = Some(Rc::new(factory));
        self
    }

    /// Animates the outgoing snapshot; [`cross_fade`] when unset.
    pub fn with_transition(mut self, transition: impl Fn(&mut Snapshot) + 'static) -> Self {
        self.transition = Some(Rc::new(transition));
        self
    }

    /// Called once per rebuilt window, after its transition ended.
    pub fn on_complete(mut self, completion: impl Fn() + 'static) -> Self {
        self.on_complete = Some(Rc::new(completion));
        self
    }
}

impl From<Language> for LanguageChange {
    fn from(language: Language) -> Self {
        LanguageChange::new(language)
    }
}

impl LanguageContext {
    /// Makes `change.language` the selected language.
    ///
    /// Fails with [`Error::DefaultLanguageNotSet`], touching nothing, until
    /// [`LanguageContext::set_default_language`] ran once. The selection is
    /// persisted (and observers notified) only when it differs from the
    /// current one, but the layout direction is always re-applied and roots
    /// are rebuilt whenever a factory is given.
    pub fn set_language(&self, change: impl Into<LanguageChange>) -> Result<(), Error> {
        let change = change.into();
        let language = change.language;
        self.default_language()?;

        self.install_hooks();
        self.select(language)?;
        self.host().apply_layout_direction(language.direction());

        let Some(factory) = change.root_factory.as_ref() else {
            return Ok(());
        };
        let targets = change
            .targets
            .clone()
            .unwrap_or_else(|| self.host().windows());
        tracing::debug!(%language, windows = targets.len(), "rebuilding roots");

        for window in &targets {
            self.rebuild_root(window, language, factory, &change);
        }
        Ok(())
    }

    fn rebuild_root(
        &self,
        window: &WindowHandle,
        language: Language,
        factory: &RootFactory,
        change: &LanguageChange,
    ) {
        let snapshot = window.borrow().snapshot();
        let Some(snapshot) = snapshot else {
            tracing::debug!("window has nothing on screen, skipping transition");
            if let Some(completion) = &change.on_complete {
                completion();
            }
            return;
        };

        let label = window.borrow().label().map(str::to_string);
        let mut root = factory(label.as_deref());
        root.localize(&Localizer::new(self, language));

        let id = snapshot.id();
        {
            let mut window = window.borrow_mut();
            window.set_root(root);
            window.add_overlay(snapshot);
        }

        let animated = Rc::clone(window);
        let transition = change.transition.clone();
        let finished = Rc::clone(window);
        let completion = change.on_complete.clone();
        self.host().animate(
            self.config().transition_duration(),
            Box::new(move || {
                let mut window = animated.borrow_mut();
                let Some(overlay) = window.overlay_mut(id) else {
                    return;
                };
                match transition {
                    Some(transition) => transition(overlay),
                    None => cross_fade(overlay),
                }
            }),
            Box::new(move || {
                finished.borrow_mut().remove_overlay(id);
                if let Some(completion) = completion {
                    completion();
                }
            }),
        );
    }
}
