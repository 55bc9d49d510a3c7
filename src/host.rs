//! Seams between the language state and the host UI toolkit.
//!
//! Instead of patching the toolkit, the context hands the host a
//! [`StringResolver`] and a [`ComponentInitHook`] once; the host routes its
//! default string lookups and its "component finished initializing" event
//! through them.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use crate::{
    language::Direction,
    ui::{Localizable, WindowHandle},
};

/// Answers the host's default string lookups.
pub trait StringResolver {
    /// Translation of `key` in `table` (the default table when `None`),
    /// or `key` itself when there is none.
    fn resolve(&self, key: &str, table: Option<&str>) -> String;
}

/// Called by the host for every component that finished initializing.
pub trait ComponentInitHook {
    fn component_did_initialize(&self, component: &mut dyn Localizable);
}

/// The host UI toolkit.
pub trait Host {
    /// Sets the app-wide layout direction (the global "render right-to-left" flag).
    fn apply_layout_direction(&self, direction: Direction);

    fn install_string_resolver(&self, resolver: Rc<dyn StringResolver>);

    fn install_component_init_hook(&self, hook: Rc<dyn ComponentInitHook>);

    /// Every currently known top-level root.
    fn windows(&self) -> Vec<WindowHandle> {
        Vec::new()
    }

    /// Runs `animations` over `duration`, then `completion`. Hosts without an
    /// animation facility run both immediately.
    fn animate(
        &self,
        duration: Duration,
        animations: Box<dyn FnOnce()>,
        completion: Box<dyn FnOnce()>,
    ) {
        let _ = duration;
        animations();
        completion();
    }
}

/// A host that ignores everything; for contexts used only for lookups.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl Host for NoopHost {
    fn apply_layout_direction(&self, _direction: Direction) {}

    fn install_string_resolver(&self, _resolver: Rc<dyn StringResolver>) {}

    fn install_component_init_hook(&self, _hook: Rc<dyn ComponentInitHook>) {}
}

struct PendingCompletion {
    due: Duration,
    completion: Box<dyn FnOnce()>,
}

/// An in-memory host with a manual animation clock.
///
/// Animations run when scheduled; completions fire when [`HeadlessHost::advance`]
/// moves the clock past their deadline.
#[derive(Default)]
pub struct HeadlessHost {
    layout_direction: Cell<Option<Direction>>,
    direction_updates: Cell<usize>,
    resolver: RefCell<Option<Rc<dyn StringResolver>>>,
    resolver_installs: Cell<usize>,
    init_hooks: RefCell<Vec<Rc<dyn ComponentInitHook>>>,
    windows: RefCell<Vec<WindowHandle>>,
    now: Cell<Duration>,
    pending: RefCell<Vec<PendingCompletion>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&self, window: WindowHandle) -> WindowHandle {
        self.windows.borrow_mut().push(window.clone());
        window
    }

    /// The last direction applied, if any.
    pub fn layout_direction(&self) -> Option<Direction> {
        self.layout_direction.get()
    }

    pub fn direction_updates(&self) -> usize {
        self.direction_updates.get()
    }

    /// How many times a string resolver was installed.
    pub fn resolver_installs(&self) -> usize {
        self.resolver_installs.get()
    }

    pub fn init_hook_count(&self) -> usize {
        self.init_hooks.borrow().len()
    }

    /// A default string lookup as the toolkit would perform it.
    pub fn localized_string(&self, key: &str, table: Option<&str>) -> String {
        let resolver = self.resolver.borrow().clone();
        match resolver {
            Some(resolver) => resolver.resolve(key, table),
            None => key.to_string(),
        }
    }

    /// Signals that `component` finished initializing from a template.
    pub fn initialize_component(&self, component: &mut dyn Localizable) {
        let hooks = self.init_hooks.borrow().clone();
        for hook in hooks {
            hook.component_did_initialize(component);
        }
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_animations(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Moves the clock forward, firing due completions in deadline order.
    /// Returns how many fired.
    pub fn advance(&self, by: Duration) -> usize {
        let now = self.now.get() + by;
        self.now.set(now);

        let mut fired = 0;
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let index = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= now)
                    .min_by_key(|(_, entry)| entry.due)
                    .map(|(index, _)| index);
                index.map(|index| pending.remove(index))
            };
            match next {
                Some(entry) => {
                    (entry.completion)();
                    fired += 1;
                }
                None => break,
            }
        }
        fired
    }

    /// Advances until no animation is pending.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        loop {
            let latest = self.pending.borrow().iter().map(|entry| entry.due).max();
            let Some(latest) = latest else {
                break;
            };
            fired += self.advance(latest.saturating_sub(self.now.get()));
        }
        fired
    }
}

impl Host for HeadlessHost {
    fn apply_layout_direction(&self, direction: Direction) {
        self.layout_direction.set(Some(direction));
        self.direction_updates.set(self.direction_updates.get() + 1);
    }

    fn install_string_resolver(&self, resolver: Rc<dyn StringResolver>) {
        *self.resolver.borrow_mut() = Some(resolver);
        self.resolver_installs.set(self.resolver_installs.get() + 1);
    }

    fn install_component_init_hook(&self, hook: Rc<dyn ComponentInitHook>) {
        self.init_hooks.borrow_mut().push(hook);
    }

    fn windows(&self) -> Vec<WindowHandle> {
        self.windows.borrow().clone()
    }

    fn animate(
        &self,
        duration: Duration,
        animations: Box<dyn FnOnce()>,
        completion: Box<dyn FnOnce()>,
    ) {
        animations();
        self.pending.borrow_mut().push(PendingCompletion {
            due: self.now.get() + duration,
            completion,
        });
    }
}
