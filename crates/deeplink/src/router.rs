//! The navigation engine.
//!
//! A [`Router`] owns the two route registries ("on navigate" and "after
//! navigate"), the current path and query state, and the lifecycle event
//! fan-out. It is constructed once per application and passed by reference
//! to whatever registers routes or triggers navigation; there are no
//! ambient globals.
//!
//! Execution is single-threaded and synchronous: a navigation runs to
//! completion once triggered, and a superseding navigation is simply the
//! next call. The engine suspends only at the host boundary: a tracked
//! route change goes out through the [`HistoryBackend`] and comes back in
//! through [`Router::execute_route`] when the host's location moves, and
//! [`Router::loaded`] is the host's signal that async work behind a route
//! finished.

use tracing::{debug, trace, warn};

use deeplink_router::{
    absolute_path, match_all, segments, split_query, CaptureMap, MatchOptions, MatchSet, Pattern,
    QueryMap,
};

use crate::config::{DeeplinkConfig, DEFAULT_CONFIG};
use crate::error::NavigateError;
use crate::events::RouterEvent;
use crate::history::{HistoryBackend, NullHistory};
use crate::lexicon::Lexicon;
use crate::title;

/// Listener fired for a matched route with `(captures, query)`.
pub type RouteListener = Box<dyn FnMut(&CaptureMap, &QueryMap)>;

/// Listener fired for every lifecycle event.
pub type EventListener = Box<dyn FnMut(&RouterEvent)>;

#[derive(Clone, Copy)]
enum Registry {
    OnRoute,
    AfterRoute,
}

struct RouteEntry {
    key: String,
    pattern: Pattern,
    listeners: Vec<RouteListener>,
}

/// Options for [`Router::activate`] and [`Router::activate_static`].
#[derive(Default)]
pub struct Activation {
    start: Option<String>,
    hold_until: Option<Box<dyn Fn() -> bool>>,
    base_title: Option<String>,
    title_separator: Option<String>,
    use_history: Option<bool>,
}

impl Activation {
    /// Activation with no start route and no readiness gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route to navigate to when the initial path is empty.
    pub fn with_start(mut self, route: impl Into<String>) -> Self {
        self.start = Some(route.into());
        self
    }

    /// Gate that must return true before any route may dispatch. Checked
    /// at activation and again on every [`Router::try_ready`] call.
    pub fn with_hold_until(mut self, gate: impl Fn() -> bool + 'static) -> Self {
        self.hold_until = Some(Box::new(gate));
        self
    }

    /// Base page title, overriding the lexicon's `deeplink.baseTitle`.
    pub fn with_base_title(mut self, title: impl Into<String>) -> Self {
        self.base_title = Some(title.into());
        self
    }

    /// Separator between title parts.
    pub fn with_title_separator(mut self, separator: impl Into<String>) -> Self {
        self.title_separator = Some(separator.into());
        self
    }

    /// Enables or disables history tracking for navigations.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.use_history = Some(enabled);
        self
    }
}

/// Hash-fragment navigation engine.
///
/// # Examples
///
/// ```
/// use deeplink::{Activation, Router};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut router = Router::new();
/// router.activate("", Activation::new());
///
/// let seen = Rc::new(RefCell::new(None));
/// let sink = seen.clone();
/// router.route("user/:id", move |caps, _query| {
///     *sink.borrow_mut() = caps.get("id").map(String::from);
/// });
///
/// router.execute_route("#/user/42");
/// assert_eq!(seen.borrow().as_deref(), Some("42"));
/// ```
pub struct Router {
    on_routes: Vec<RouteEntry>,
    after_routes: Vec<RouteEntry>,
    event_listeners: Vec<EventListener>,

    history: Box<dyn HistoryBackend>,
    lexicon: Option<Box<dyn Lexicon>>,
    config: DeeplinkConfig,

    full_path: String,
    current_path: String,
    query: QueryMap,

    document_title: String,
    page_title_base: String,
    root_title: Option<String>,

    is_loading: bool,
    is_error: bool,
    soft_change: bool,
    soft_change_next: bool,
    ignore_next: bool,

    activated: bool,
    static_mode: bool,
    history_enabled: bool,

    can_ready: bool,
    ready_queue: Option<String>,
    hold_until: Option<Box<dyn Fn() -> bool>>,
}

impl Router {
    /// Creates a router with the default configuration, a null history
    /// backend, and no lexicon.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CONFIG.clone())
    }

    /// Creates a router with an explicit configuration.
    pub fn with_config(config: DeeplinkConfig) -> Self {
        let history_enabled = config.history_enabled;
        Self {
            on_routes: Vec::new(),
            after_routes: Vec::new(),
            event_listeners: Vec::new(),
            history: Box::new(NullHistory),
            lexicon: None,
            config,
            full_path: String::new(),
            current_path: String::new(),
            query: QueryMap::new(),
            document_title: String::new(),
            page_title_base: String::new(),
            root_title: None,
            is_loading: false,
            is_error: false,
            soft_change: false,
            soft_change_next: false,
            ignore_next: false,
            activated: false,
            static_mode: false,
            history_enabled,
            can_ready: false,
            ready_queue: None,
            hold_until: None,
        }
    }

    /// Attaches a localization document for title lookups.
    pub fn with_lexicon(mut self, lexicon: impl Lexicon + 'static) -> Self {
        self.lexicon = Some(Box::new(lexicon));
        self
    }

    /// Attaches a history backend for tracked navigations.
    pub fn with_history(mut self, history: impl HistoryBackend + 'static) -> Self {
        self.history = Box::new(history);
        self
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a listener for a route pattern on the navigate registry.
    ///
    /// Listeners for the same pattern accumulate and fire in add order.
    /// Registering against an already-activated router immediately tests
    /// the current path and fires the pattern's listeners on a hit.
    pub fn route(
        &mut self,
        pattern: &str,
        listener: impl FnMut(&CaptureMap, &QueryMap) + 'static,
    ) {
        self.bind(Registry::OnRoute, pattern, Box::new(listener));
    }

    /// Registers a listener on the after-navigate registry, evaluated once
    /// a navigation completes without error (see [`Router::loaded`]).
    pub fn after_route(
        &mut self,
        pattern: &str,
        listener: impl FnMut(&CaptureMap, &QueryMap) + 'static,
    ) {
        self.bind(Registry::AfterRoute, pattern, Box::new(listener));
    }

    /// Registers a lifecycle event listener.
    pub fn on_event(&mut self, listener: impl FnMut(&RouterEvent) + 'static) {
        self.event_listeners.push(Box::new(listener));
    }

    /// Removes every route and event listener from the engine.
    pub fn purge_routes(&mut self) {
        self.on_routes.clear();
        self.after_routes.clear();
        self.event_listeners.clear();
    }

    /// Pattern keys on the navigate registry, in registration order.
    pub fn tracked_routes(&self) -> Vec<&str> {
        self.on_routes.iter().map(|e| e.key.as_str()).collect()
    }

    /// Pattern keys on the after-navigate registry, in registration order.
    pub fn notify_routes(&self) -> Vec<&str> {
        self.after_routes.iter().map(|e| e.key.as_str()).collect()
    }

    fn bind(&mut self, registry: Registry, raw: &str, listener: RouteListener) {
        let pattern = Pattern::parse(raw);
        let key = pattern.key().to_string();

        let activated = self.activated;
        let current = self.current_path.clone();
        let query = self.query.clone();

        let entries = self.registry_mut(registry);
        let idx = match entries.iter().position(|e| e.key == key) {
            Some(i) => i,
            None => {
                trace!(route = %key, "tracking route");
                entries.push(RouteEntry {
                    key,
                    pattern,
                    listeners: Vec::new(),
                });
                entries.len() - 1
            }
        };
        entries[idx].listeners.push(listener);

        if !activated {
            return;
        }

        // Test the current path for a match, and execute if we find one.
        if let Some(caps) = entries[idx]
            .pattern
            .captures(&current, MatchOptions::default())
        {
            for listener in entries[idx].listeners.iter_mut() {
                listener(&caps, &query);
            }
        }
    }

    fn registry_mut(&mut self, registry: Registry) -> &mut Vec<RouteEntry> {
        match registry {
            Registry::OnRoute => &mut self.on_routes,
            Registry::AfterRoute => &mut self.after_routes,
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Attempts to execute a path as a route.
    ///
    /// This is the entry point the host feeds location changes into. A
    /// miss (or a hit consisting only of positional wildcard captures)
    /// raises a single [`RouterEvent::Error`] carrying `not_found` and the
    /// offending path; it is not retried.
    pub fn execute_route(&mut self, path: &str) {
        if self.ignore_next {
            self.ignore_next = false;
            return;
        }

        if self.soft_change || self.soft_change_next {
            self.set_current(path);
            self.emit(RouterEvent::Completed);
            self.soft_change_next = false;
            return;
        }

        self.loading(Some(path));

        if !self.can_ready {
            self.ready_queue = Some(path.to_string());
            return;
        }

        let matches = match_all(
            path,
            self.on_routes.iter().map(|e| &e.pattern),
            MatchOptions::default(),
        );
        self.set_current(path);

        let has_matches = !matches.is_empty() && !matches.only_positional();
        if has_matches {
            debug!(path, routes = matches.len(), "route matched");
            self.apply_current_title();
            self.dispatch(Registry::OnRoute, &matches);
        } else {
            let error_title = title::loc(self.lexicon.as_deref(), &["errorTitle"], false);
            self.error(NavigateError::NotFound {
                path: path.to_string(),
            });
            match error_title {
                Some(t) => self.page_title(&[t.as_str()]),
                None => self.page_title(&[]),
            }
        }

        self.emit(RouterEvent::Completed);
    }

    /// Re-executes the current path.
    pub fn reload(&mut self) {
        let path = self.full_path.clone();
        self.execute_route(&path);
    }

    /// Changes the current route.
    ///
    /// An absolute route (leading `/`) is canonicalized as given; a
    /// relative one appends to the current path and merges the current
    /// query with its own (empty values dropped, new keys winning). With
    /// `track` unset, the configured history default applies. Tracked
    /// changes go out through the history backend; untracked ones execute
    /// immediately and only replace the visible fragment.
    pub fn set_route(&mut self, route: &str, title: Option<&[&str]>, track: Option<bool>) {
        let track = track.unwrap_or(self.history_enabled);
        self.page_title(title.unwrap_or(&[]));

        let route = route.strip_prefix('#').unwrap_or(route);
        let target = if route.starts_with('/') {
            absolute_path(route)
        } else {
            let (relative_abs, new_query) = split_query(route);
            let relative = relative_abs.strip_prefix('/').unwrap_or(relative_abs.as_str());

            let mut merged = self.query.clone();
            merged.merge(&new_query);
            merged.retain(|_, v| !v.is_empty());

            let mut target = format!("{}{}", self.current_path, relative);
            if !merged.is_empty() {
                target.push('?');
                target.push_str(&merged.serialize());
            }
            target
        };

        debug!(route = %target, track, "set route");

        if self.static_mode || track {
            self.history.go(&target);
        } else {
            self.execute_route(&target);
            self.ignore_next = true;
            self.history.replace(&format!("#{}", target));
        }
    }

    /// Changes the current route softly: the next execution only updates
    /// state and emits [`RouterEvent::Completed`], firing no listeners.
    pub fn soft_set_route(&mut self, route: &str, title: Option<&[&str]>, track: Option<bool>) {
        self.soft_change_next = true;
        self.set_route(route, title, track);
    }

    /// Updates the current route in place before setting it.
    ///
    /// A `$` segment in `route` copies the corresponding segment of the
    /// current path; `params` merge into the route's query.
    pub fn update_route(
        &mut self,
        route: &str,
        params: &QueryMap,
        title: Option<&[&str]>,
        track: Option<bool>,
    ) {
        let (abs, mut query) = split_query(route);
        let current: Vec<String> = segments(&self.current_path)
            .into_iter()
            .map(String::from)
            .collect();

        let parts: Vec<String> = segments(&abs)
            .into_iter()
            .enumerate()
            .map(|(i, seg)| {
                if seg == "$" {
                    current.get(i).cloned().unwrap_or_default()
                } else {
                    seg.to_string()
                }
            })
            .collect();

        query.merge(params);

        let mut target = if parts.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", parts.join("/"))
        };
        if !query.is_empty() {
            target.push('?');
            target.push_str(&query.serialize());
        }

        self.set_route(&target, title, track);
    }

    /// Tests whether any comma-separated pattern alternate matches the
    /// current full path. `exact` disables partial matching; `query` also
    /// enforces query constraints. This is the affiliation check a host
    /// uses to highlight navigation elements for the active route.
    pub fn path_matches(&self, spec: &str, exact: bool, query: bool) -> bool {
        if spec.is_empty() {
            return false;
        }
        spec.split(',').any(|part| {
            Pattern::parse(part)
                .captures(
                    &self.full_path,
                    MatchOptions {
                        partial: !exact,
                        query,
                    },
                )
                .is_some()
        })
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Marks the start of a navigation; with a path, also re-points the
    /// current path and query at it.
    pub fn loading(&mut self, path: Option<&str>) {
        self.is_error = false;
        if let Some(path) = path {
            let (current, query) = split_query(path);
            self.current_path = current;
            self.query = query;
        }
        self.is_loading = true;
        self.emit(RouterEvent::Loading);
    }

    /// Marks the current navigation complete.
    ///
    /// The host calls this once the work behind the matched routes has
    /// finished; it fires the after-navigate registry against the current
    /// path. A navigation that errored stays errored; this is a no-op.
    pub fn loaded(&mut self) {
        if self.is_error {
            return;
        }
        self.is_loading = false;
        self.emit(RouterEvent::Loaded);

        let matches = match_all(
            &self.current_path,
            self.after_routes.iter().map(|e| &e.pattern),
            MatchOptions::default(),
        );
        self.dispatch(Registry::AfterRoute, &matches);

        self.soft_change_next = false;
        self.emit(RouterEvent::AfterLoaded);
    }

    /// Raises a navigation error event.
    pub fn error(&mut self, error: NavigateError) {
        warn!(reason = error.reason(), path = error.path(), "navigation error");
        self.is_error = true;
        self.emit(RouterEvent::Error(error));
    }

    /// Display string for an error reason, drawn from the lexicon's
    /// `error` block with the reason itself as fallback.
    pub fn error_message(&self, reason: &str) -> String {
        title::error_text(self.lexicon.as_deref(), reason)
    }

    // ========================================================================
    // Engine
    // ========================================================================

    /// Activates the engine against the host's initial location fragment.
    ///
    /// Idempotent: a second activation is ignored. With an empty initial
    /// path and a start route configured, navigates there (carrying any
    /// initial query along), or queues it behind the readiness gate.
    pub fn activate(&mut self, initial_path: &str, activation: Activation) {
        if self.activated {
            return;
        }
        self.activated = true;

        self.page_title_base = activation
            .base_title
            .or_else(|| title::loc(self.lexicon.as_deref(), &["baseTitle"], false))
            .or_else(|| self.config.base_title.clone())
            .unwrap_or_default();
        self.root_title = title::loc(self.lexicon.as_deref(), &["rootTitle"], false)
            .or_else(|| self.config.root_title.clone());

        self.hold_until = activation.hold_until;
        self.can_ready = match &self.hold_until {
            Some(gate) => gate(),
            None => true,
        };

        if let Some(separator) = activation.title_separator {
            self.config.title_separator = separator;
        }
        if let Some(enabled) = activation.use_history {
            self.history_enabled = enabled;
        }

        self.emit(RouterEvent::Activated);
        if self.can_ready {
            self.emit(RouterEvent::Ready);
        }

        self.page_title(&[]);
        self.set_current(initial_path);

        if self.current_path.is_empty() {
            if let Some(start) = activation.start.or_else(|| self.config.start_route.clone()) {
                let query = self.query.serialize();
                let start = if !query.is_empty() && start == "/" {
                    // Avoids a doubled slash in this corner case.
                    String::new()
                } else {
                    start
                };
                let target = if query.is_empty() {
                    start
                } else {
                    format!("{}?{}", start, query)
                };
                if self.can_ready {
                    self.set_route(&target, None, None);
                } else {
                    self.ready_queue = Some(target);
                }
            }
        }
    }

    /// Activates in static mode: the query string is the path, history is
    /// always tracked, and no readiness gate applies.
    pub fn activate_static(&mut self, initial_search: &str, activation: Activation) {
        if self.activated {
            return;
        }
        self.activated = true;
        self.static_mode = true;

        self.page_title_base = activation
            .base_title
            .or_else(|| title::loc(self.lexicon.as_deref(), &["baseTitle"], false))
            .or_else(|| self.config.base_title.clone())
            .unwrap_or_default();
        self.root_title = title::loc(self.lexicon.as_deref(), &["rootTitle"], false)
            .or_else(|| self.config.root_title.clone());

        if let Some(separator) = activation.title_separator {
            self.config.title_separator = separator;
        }
        self.history_enabled = true;
        self.can_ready = true;

        self.emit(RouterEvent::Activated);
        self.page_title(&[]);

        let search = if initial_search.is_empty() {
            "?"
        } else {
            initial_search
        };
        self.set_current(search);

        if self.query.is_empty() {
            if let Some(start) = activation.start.or_else(|| self.config.start_route.clone()) {
                self.set_route(&start, None, None);
            }
        } else {
            let search = search.to_string();
            self.execute_route(&search);
        }
    }

    /// Re-checks the readiness gate; on opening, emits
    /// [`RouterEvent::Ready`] and executes any queued navigation. Returns
    /// whether the engine can dispatch.
    pub fn try_ready(&mut self) -> bool {
        if !self.can_ready {
            let open = self.hold_until.as_ref().map(|gate| gate()).unwrap_or(false);
            if open {
                self.can_ready = true;
                self.emit(RouterEvent::Ready);
                if let Some(path) = self.ready_queue.take() {
                    self.execute_route(&path);
                }
            }
        }
        self.can_ready
    }

    // ========================================================================
    // Titles
    // ========================================================================

    /// Sets the document title from the given parts plus the base title.
    pub fn page_title(&mut self, parts: &[&str]) {
        self.document_title =
            title::join_title(parts, &self.page_title_base, &self.config.title_separator);
    }

    fn apply_current_title(&mut self) {
        let parts = title::current_title_parts(
            self.lexicon.as_deref(),
            &self.current_path,
            self.root_title.as_deref(),
        );
        if !parts.is_empty() {
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            self.page_title(&refs);
        }
    }

    // ========================================================================
    // State Accessors
    // ========================================================================

    /// The current path in absolute form, query split off.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// The full path as last navigated, query included.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// The current query state.
    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    /// The rendered document title; applying it is the host's concern.
    pub fn document_title(&self) -> &str {
        &self.document_title
    }

    /// True while a navigation is in flight (between loading and loaded).
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True when the last navigation errored.
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// True once the engine has been activated.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Marks every following change as soft until cleared.
    pub fn set_soft_change(&mut self, soft: bool) {
        self.soft_change = soft;
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn set_current(&mut self, path: &str) {
        self.full_path = path.to_string();
        let (current, query) = split_query(path);
        self.current_path = current;
        self.query = query;
    }

    fn dispatch(&mut self, registry: Registry, matches: &MatchSet) {
        let query = self.query.clone();
        for (key, caps) in matches.iter() {
            let entries = self.registry_mut(registry);
            if let Some(entry) = entries.iter_mut().find(|e| e.key == key) {
                trace!(route = key, listeners = entry.listeners.len(), "dispatching");
                for listener in entry.listeners.iter_mut() {
                    listener(caps, &query);
                }
            }
        }
    }

    fn emit(&mut self, event: RouterEvent) {
        trace!(event = event.name(), "emit");
        for listener in self.event_listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
