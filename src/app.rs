//! Root application module.
//!
//! Contains the main App component, AppContext definition, ToastState,
//! and application-level setup logic following Leptos conventions.

use gloo_timers::future::TimeoutFuture;
use leptos::logging::{error, warn};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::AppRouter;
use crate::components::shell::FatalPanel;
use crate::components::router::follow_route;
use crate::config::TOAST_DURATION_MS;
use crate::core::document::load_document;
use crate::core::loader::{expand_directory, toggle_directory};
use crate::core::error::ConfigLoadError;
use crate::core::source::{load_order_spec, load_site_config};
use crate::core::{DocumentNavigator, GitHubSource, SidebarTree, prefs};
use crate::models::{DocRoute, OrderSpec, Preferences, SiteConfig};
use crate::utils::dom;

// ============================================================================
// SidebarHint
// ============================================================================

/// Status line shown under the sidebar search box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SidebarHint {
    #[default]
    Loading,
    Ready,
    Error,
}

impl SidebarHint {
    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "Loading…",
            Self::Ready => "Ready",
            Self::Error => "Error",
        }
    }
}

// ============================================================================
// ToastState
// ============================================================================

/// Short-lived notification.
///
/// Each [`ToastState::show`] replaces the current message and restarts the
/// timer; an older timer never hides a newer message.
#[derive(Clone, Copy)]
pub struct ToastState {
    pub message: RwSignal<Option<String>>,
    seq: RwSignal<u64>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            seq: RwSignal::new(0),
        }
    }

    pub fn show(&self, message: &str) {
        let seq = self.seq.get_untracked() + 1;
        self.seq.set(seq);
        self.message.set(Some(message.to_string()));

        let (message, current) = (self.message, self.seq);
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            if current.try_get_untracked() == Some(seq) {
                message.try_set(None);
            }
        });
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals, which are
/// cheap to copy (they're just pointers to the underlying reactive state).
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Site configuration, once loaded.
    pub site: RwSignal<Option<SiteConfig>>,

    /// Lazily loaded sidebar tree.
    pub tree: RwSignal<SidebarTree>,

    /// Desired document and content pane state.
    pub navigator: RwSignal<DocumentNavigator>,

    /// Persisted UI preferences.
    pub prefs: RwSignal<Preferences>,

    /// Sidebar status line.
    pub hint: RwSignal<SidebarHint>,

    pub toast: ToastState,

    /// Heading highlighted in the table of contents.
    pub active_heading: RwSignal<Option<String>>,

    /// Unrecoverable startup failure, raised into the root error boundary.
    pub fatal: RwSignal<Option<ConfigLoadError>>,
}

impl AppContext {
    /// Creates a context with restored preferences and an empty tree.
    pub fn new(prefs: Preferences) -> Self {
        Self {
            site: RwSignal::new(None),
            tree: RwSignal::new(SidebarTree::new("", OrderSpec::default())),
            navigator: RwSignal::new(DocumentNavigator::new()),
            prefs: RwSignal::new(prefs),
            hint: RwSignal::new(SidebarHint::Loading),
            toast: ToastState::new(),
            active_heading: RwSignal::new(None),
            fatal: RwSignal::new(None),
        }
    }

    fn source(&self) -> Option<GitHubSource> {
        self.site.get_untracked().map(GitHubSource::new)
    }

    // ------------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------------

    /// Open a document in the content pane.
    ///
    /// With `update_route` the location fragment is pointed at the document;
    /// the resulting `hashchange` resolves to the already-desired path.
    pub fn open_document(&self, path: &str, update_route: bool) {
        self.load(path, update_route, None);
    }

    /// Open a document and scroll to `heading` once it is rendered.
    pub fn open_document_at(&self, path: &str, heading: Option<String>) {
        self.load(path, false, heading);
    }

    fn load(&self, path: &str, update_route: bool, heading: Option<String>) {
        let Some(source) = self.source() else {
            warn!("Ignoring {}: site not loaded", path);
            return;
        };
        let Some(ticket) = self.navigator.try_update(|n| n.begin(path)) else {
            return;
        };
        self.active_heading.set(None);

        if update_route {
            dom::set_hash(&DocRoute::document(path).to_hash());
        }

        let ctx = *self;
        spawn_local(async move {
            let result = load_document(&source, &ticket).await;
            let failure = result.as_ref().err().map(ToString::to_string);

            let applied = ctx
                .navigator
                .try_update(|n| n.finish(&ticket, result))
                .unwrap_or(false);
            if !applied {
                return;
            }

            match failure {
                None => {
                    ctx.tree.update(|t| t.set_active(Some(&ticket.path)));
                    ctx.toast.show("Loaded");
                    if let Some(id) = heading {
                        dom::next_frame(move || {
                            dom::scroll_to_id(&id);
                        });
                    }
                }
                Some(err) => {
                    error!("Unable to load {}: {}", ticket.path, err);
                    ctx.toast.show("Error");
                }
            }
        });
    }

    // ------------------------------------------------------------------------
    // Sidebar
    // ------------------------------------------------------------------------

    /// Expand or collapse a directory, loading its listing on first open.
    pub fn toggle_directory(&self, path: &str) {
        let Some(source) = self.source() else {
            return;
        };
        let ctx = *self;
        let path = path.to_string();
        spawn_local(async move {
            if let Err(err) = toggle_directory(&source, &ctx.tree, &path).await {
                ctx.report_listing_error(&path, &err.to_string());
            }
        });
    }

    /// Load (or reload) the root listing, reporting progress in the hint.
    async fn load_root(&self, source: &GitHubSource) {
        let root = self.tree.with_untracked(|t| t.root().to_string());
        self.hint.set(SidebarHint::Loading);
        match expand_directory(source, &self.tree, &root).await {
            Ok(_) => self.hint.set(SidebarHint::Ready),
            Err(err) => self.report_listing_error(&root, &err.to_string()),
        }
    }

    /// Retry a failed root listing; the root has no row to click.
    pub fn retry_root(&self) {
        let Some(source) = self.source() else {
            return;
        };
        let ctx = *self;
        spawn_local(async move {
            ctx.load_root(&source).await;
        });
    }

    fn report_listing_error(&self, path: &str, err: &str) {
        self.hint.set(SidebarHint::Error);
        self.navigator
            .update(|n| n.fail(format!("Unable to read dir \"{}\": {}", path, err)));
    }

    /// Filter the sidebar and persist the query.
    pub fn search(&self, query: &str) {
        self.tree.update(|t| t.apply_filter(query));
        let query = query.trim().to_string();
        prefs::save_search_query(&query);
        self.prefs.update(|p| p.search_query = query);
    }

    pub fn toggle_sidebar(&self) {
        self.prefs.update(|p| {
            p.sidebar_collapsed = !p.sidebar_collapsed;
            prefs::save_sidebar_collapsed(p.sidebar_collapsed);
        });
    }

    pub fn toggle_theme(&self) {
        self.prefs.update(|p| {
            p.theme = p.theme.toggled();
            prefs::save_theme(p.theme);
        });
    }
}

// ============================================================================
// Startup
// ============================================================================

/// Load site documents, build the tree and resolve the initial route.
async fn boot(ctx: AppContext) {
    let config = match load_site_config().await {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            ctx.hint.set(SidebarHint::Error);
            ctx.fatal.set(Some(err));
            return;
        }
    };
    let order = load_order_spec().await;

    let root = config.content_dir.clone();
    let source = GitHubSource::new(config.clone());
    let query = ctx.prefs.with_untracked(|p| p.search_query.clone());

    ctx.site.set(Some(config));
    ctx.tree.set(SidebarTree::new(&root, order));
    ctx.tree.update(|t| t.apply_filter(&query));

    ctx.load_root(&source).await;
    follow_route(ctx);
}

/// Root application component with error boundary.
///
/// This component:
/// - Restores preferences and provides the global AppContext
/// - Starts loading the site in the background
/// - Wraps the app in an ErrorBoundary whose fallback is the fatal panel
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(prefs::load());
    provide_context(ctx);

    spawn_local(boot(ctx));

    view! {
        <ErrorBoundary
            fallback=|errors| {
                let messages = Signal::derive(move || {
                    errors
                        .get()
                        .into_iter()
                        .map(|(_, e)| e.to_string())
                        .collect::<Vec<_>>()
                });
                view! { <FatalPanel messages=messages /> }
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}
