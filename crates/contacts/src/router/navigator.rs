//! Navigation controller.
//!
//! Resolves a location against the [`RouteTable`], runs loaders from the
//! root down, renders each view into its parent's outlet and routes errors
//! to the nearest error boundary. Form submissions run the deepest matched
//! route's action and follow its redirect.
//!
//! Only the most recently started navigation may commit its page. An older
//! navigation that finishes later resolves as [`Navigation::Superseded`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::contact::FormData;
use crate::error::{Error, Result};

use super::outcome::Outcome;
use super::path::{Location, Params};
use super::route::{ActionArgs, ErrorView, LoaderArgs, RouteMatch, RouteTable};

/// Default number of redirects followed by one navigation.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Error caught by a boundary, as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageError {
    /// Route whose error view rendered the error.
    pub route: String,
    /// Status code, if the error carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// The raw error message.
    pub message: String,
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Location that produced the page, after redirects.
    pub location: String,
    /// Ids of the rendered routes, root first.
    pub routes: Vec<String>,
    /// Loader data keyed by route id.
    pub data: BTreeMap<String, Value>,
    /// Data returned by the action that produced this page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_data: Option<Value>,
    /// Error caught by a boundary, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<PageError>,
    /// Rendered text.
    pub body: String,
}

/// Result of a navigation or submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// The page became the current page.
    Committed(Page),
    /// A newer navigation started meanwhile; the result was discarded.
    Superseded {
        /// Location this navigation was resolving.
        location: String,
    },
}

impl Navigation {
    /// The committed page, if any.
    #[must_use]
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Committed(page) => Some(page),
            Self::Superseded { .. } => None,
        }
    }

    /// Consume into the committed page, if any.
    #[must_use]
    pub fn into_page(self) -> Option<Page> {
        match self {
            Self::Committed(page) => Some(page),
            Self::Superseded { .. } => None,
        }
    }

    /// Check if this navigation lost to a newer one.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

/// Result of running the loaders of a matched chain.
#[derive(Debug)]
pub enum LoadResult {
    /// Every loader returned data. Keyed by route id.
    Loaded(BTreeMap<String, Value>),
    /// A loader asked to go elsewhere.
    Redirect(String),
    /// A loader failed. `data` holds what loaded before it.
    Failed {
        /// Position of the failing route in the chain.
        index: usize,
        /// Data of the routes above the failing one.
        data: BTreeMap<String, Value>,
        /// The error it returned.
        error: Error,
    },
}

enum Step {
    Page(Page),
    Redirect(String),
}

/// The navigation controller.
#[derive(Debug)]
pub struct Navigator {
    routes: RouteTable,
    max_redirects: usize,
    generation: AtomicU64,
    current: RwLock<Option<Page>>,
}

impl Navigator {
    /// Create a navigator over `routes`.
    #[must_use]
    pub fn new(routes: RouteTable, max_redirects: usize) -> Self {
        Self {
            routes,
            max_redirects,
            generation: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }

    /// The route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The most recently committed page.
    pub async fn current(&self) -> Option<Page> {
        self.current.read().await.clone()
    }

    /// Match `path` against the route table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] when nothing matches.
    pub fn match_path(&self, path: &str) -> Result<Vec<RouteMatch<'_>>> {
        self.routes.match_path(path)
    }

    /// Run the loaders of `chain` root first, stopping at the first redirect
    /// or failure.
    pub async fn load(location: &Location, chain: &[RouteMatch<'_>]) -> LoadResult {
        let mut data = BTreeMap::new();
        for (index, matched) in chain.iter().enumerate() {
            let Some(loader) = matched.node.loader_fn() else {
                continue;
            };

            debug!("Running loader for route {}", matched.node.id());
            let args = LoaderArgs {
                params: matched.params.clone(),
                location: location.clone(),
            };
            match loader.load(args).await {
                Ok(Outcome::Data { value }) => {
                    data.insert(matched.node.id().to_string(), value);
                }
                Ok(Outcome::Redirect { to }) => return LoadResult::Redirect(to),
                Err(error) => return LoadResult::Failed { index, data, error },
            }
        }
        LoadResult::Loaded(data)
    }

    /// Navigate to `path`: match, load, render and commit.
    ///
    /// # Errors
    ///
    /// Returns the error when no route in the chain declares an error view,
    /// or [`Error::RedirectLimit`] when redirects do not settle.
    pub async fn navigate(&self, path: &str) -> Result<Navigation> {
        let generation = self.begin();
        let location = Location::parse(path);
        debug!("Navigating to {}", location);

        let result = match self.visit(&location, None).await {
            Ok(step) => self.settle(step).await,
            Err(error) => Err(error),
        };
        self.finish(generation, &location, result).await
    }

    /// Submit `form` to the deepest route matching `path`.
    ///
    /// # Errors
    ///
    /// Same as [`Navigator::navigate`].
    pub async fn submit(&self, path: &str, form: FormData) -> Result<Navigation> {
        let generation = self.begin();
        let location = Location::parse(path);
        debug!("Submitting {} field(s) to {}", form.len(), location);

        let result = match self.submit_step(&location, form).await {
            Ok(step) => self.settle(step).await,
            Err(error) => Err(error),
        };
        self.finish(generation, &location, result).await
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    async fn finish(
        &self,
        generation: u64,
        location: &Location,
        result: Result<Page>,
    ) -> Result<Navigation> {
        let page = match result {
            Ok(page) => page,
            Err(error) if self.is_stale(generation) => {
                debug!("Dropping error of superseded navigation to {}: {}", location, error);
                return Ok(Navigation::Superseded {
                    location: location.to_string(),
                });
            }
            Err(error) => return Err(error),
        };

        let mut current = self.current.write().await;
        if self.is_stale(generation) {
            debug!("Discarding superseded navigation to {}", page.location);
            return Ok(Navigation::Superseded {
                location: page.location,
            });
        }
        info!("Navigated to {}", page.location);
        *current = Some(page.clone());
        Ok(Navigation::Committed(page))
    }

    async fn settle(&self, mut step: Step) -> Result<Page> {
        let mut hops = 0;
        loop {
            match step {
                Step::Page(page) => return Ok(page),
                Step::Redirect(to) => {
                    hops += 1;
                    if hops > self.max_redirects {
                        return Err(Error::RedirectLimit {
                            path: to,
                            limit: self.max_redirects,
                        });
                    }
                    debug!("Redirecting to {}", to);
                    step = self.visit(&Location::parse(&to), None).await?;
                }
            }
        }
    }

    async fn visit(&self, location: &Location, action_data: Option<Value>) -> Result<Step> {
        let chain = match self.routes.match_location(location) {
            Ok(chain) => chain,
            Err(error) => {
                let root = [self.root_match()];
                return self.catch(location, &root, 0, error, None).await;
            }
        };

        match Self::load(location, &chain).await {
            LoadResult::Loaded(data) => Ok(Step::Page(Self::page(
                location,
                &chain,
                data,
                action_data,
            ))),
            LoadResult::Redirect(to) => Ok(Step::Redirect(to)),
            LoadResult::Failed { index, data, error } => {
                self.catch(location, &chain, index, error, Some(data)).await
            }
        }
    }

    async fn submit_step(&self, location: &Location, form: FormData) -> Result<Step> {
        let chain = match self.routes.match_location(location) {
            Ok(chain) => chain,
            Err(error) => {
                let root = [self.root_match()];
                return self.catch(location, &root, 0, error, None).await;
            }
        };

        let target = chain.len() - 1;
        let matched = &chain[target];
        let Some(action) = matched.node.action_fn() else {
            let error = Error::MethodNotAllowed {
                route: matched.node.id().to_string(),
            };
            return self.catch(location, &chain, target, error, None).await;
        };

        debug!("Running action for route {}", matched.node.id());
        let args = ActionArgs {
            params: matched.params.clone(),
            form,
            location: location.clone(),
        };
        match action.act(args).await {
            Ok(None) => Ok(Step::Redirect("/".to_string())),
            Ok(Some(Outcome::Redirect { to })) => Ok(Step::Redirect(to)),
            Ok(Some(Outcome::Data { value })) => self.visit(location, Some(value)).await,
            Err(error) => self.catch(location, &chain, target, error, None).await,
        }
    }

    /// Route `error`, raised at `chain[failing]`, to the nearest boundary.
    ///
    /// `data` is the loader data already gathered above the failure; when
    /// absent, the loaders above the boundary are run first.
    async fn catch(
        &self,
        location: &Location,
        chain: &[RouteMatch<'_>],
        mut failing: usize,
        mut error: Error,
        mut data: Option<BTreeMap<String, Value>>,
    ) -> Result<Step> {
        loop {
            let Some((boundary, error_view)) = find_boundary(chain, failing) else {
                return Err(error);
            };

            let loaded = match data.take() {
                Some(loaded) => loaded,
                None => match Self::load(location, &chain[..boundary]).await {
                    LoadResult::Loaded(loaded) => loaded,
                    LoadResult::Redirect(to) => return Ok(Step::Redirect(to)),
                    LoadResult::Failed {
                        index,
                        data: partial,
                        error: next,
                    } => {
                        failing = index;
                        error = next;
                        data = Some(partial);
                        continue;
                    }
                },
            };

            warn!(
                "Route {} caught error at {}: {}",
                chain[boundary].node.id(),
                location,
                error
            );
            return Ok(Step::Page(Self::boundary_page(
                location, chain, boundary, error_view, loaded, &error,
            )));
        }
    }

    fn root_match(&self) -> RouteMatch<'_> {
        RouteMatch {
            node: self.routes.root(),
            params: Params::new(),
        }
    }

    fn page(
        location: &Location,
        chain: &[RouteMatch<'_>],
        data: BTreeMap<String, Value>,
        action_data: Option<Value>,
    ) -> Page {
        Page {
            location: location.to_string(),
            routes: route_ids(chain),
            body: render_chain(chain, &data, None),
            data,
            action_data,
            error: None,
        }
    }

    fn boundary_page(
        location: &Location,
        chain: &[RouteMatch<'_>],
        boundary: usize,
        error_view: &dyn ErrorView,
        mut data: BTreeMap<String, Value>,
        error: &Error,
    ) -> Page {
        let ancestors = &chain[..boundary];
        data.retain(|id, _| ancestors.iter().any(|m| m.node.id() == id));

        Page {
            location: location.to_string(),
            routes: route_ids(&chain[..=boundary]),
            body: render_chain(ancestors, &data, Some(error_view.render(error))),
            data,
            action_data: None,
            error: Some(PageError {
                route: chain[boundary].node.id().to_string(),
                status: error.status(),
                message: error.to_string(),
            }),
        }
    }
}

fn find_boundary<'c>(
    chain: &'c [RouteMatch<'_>],
    failing: usize,
) -> Option<(usize, &'c dyn ErrorView)> {
    chain[..=failing]
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, m)| m.node.error_view_fn().map(|view| (index, view.as_ref())))
}

fn route_ids(chain: &[RouteMatch<'_>]) -> Vec<String> {
    chain.iter().map(|m| m.node.id().to_string()).collect()
}

/// Render leaf first, handing each result to the parent's outlet.
/// Routes without a view pass their outlet through unchanged.
fn render_chain(
    chain: &[RouteMatch<'_>],
    data: &BTreeMap<String, Value>,
    innermost: Option<String>,
) -> String {
    let mut outlet = innermost;
    for matched in chain.iter().rev() {
        if let Some(view) = matched.node.view_fn() {
            outlet = Some(view.render(data.get(matched.node.id()), outlet.as_deref()));
        }
    }
    outlet.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::*;
    use crate::router::route::{Action, Loader, RouteNode, View};

    struct Fixed(&'static str);

    #[async_trait::async_trait]
    impl Loader for Fixed {
        async fn load(&self, _args: LoaderArgs) -> Result<Outcome> {
            Outcome::data(self.0)
        }
    }

    struct Echo;

    #[async_trait::async_trait]
    impl Loader for Echo {
        async fn load(&self, args: LoaderArgs) -> Result<Outcome> {
            Outcome::data(args.params)
        }
    }

    struct Failing;

    #[async_trait::async_trait]
    impl Loader for Failing {
        async fn load(&self, _args: LoaderArgs) -> Result<Outcome> {
            Err(Error::operation("broken", "loader exploded"))
        }
    }

    struct RedirectTo(&'static str);

    #[async_trait::async_trait]
    impl Loader for RedirectTo {
        async fn load(&self, _args: LoaderArgs) -> Result<Outcome> {
            Ok(Outcome::redirect(self.0))
        }
    }

    #[async_trait::async_trait]
    impl Action for RedirectTo {
        async fn act(&self, _args: ActionArgs) -> Result<Option<Outcome>> {
            Ok(Some(Outcome::redirect(self.0)))
        }
    }

    struct Silent;

    #[async_trait::async_trait]
    impl Action for Silent {
        async fn act(&self, _args: ActionArgs) -> Result<Option<Outcome>> {
            Ok(None)
        }
    }

    struct EchoForm;

    #[async_trait::async_trait]
    impl Action for EchoForm {
        async fn act(&self, args: ActionArgs) -> Result<Option<Outcome>> {
            Outcome::data(args.form).map(Some)
        }
    }

    struct FailingAction;

    #[async_trait::async_trait]
    impl Action for FailingAction {
        async fn act(&self, _args: ActionArgs) -> Result<Option<Outcome>> {
            Err(Error::operation("destroy", "Error!!"))
        }
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait::async_trait]
    impl Loader for Counting {
        async fn load(&self, _args: LoaderArgs) -> Result<Outcome> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Outcome::data(n)
        }
    }

    struct Gated {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait::async_trait]
    impl Loader for Gated {
        async fn load(&self, _args: LoaderArgs) -> Result<Outcome> {
            self.entered.notify_one();
            self.release.notified().await;
            Outcome::data("slow")
        }
    }

    /// Renders `name[data](outlet)`.
    struct Wrap(&'static str);

    impl View for Wrap {
        fn render(&self, data: Option<&Value>, outlet: Option<&str>) -> String {
            let data = data.map_or_else(|| "-".to_string(), Value::to_string);
            format!("{}[{}]({})", self.0, data, outlet.unwrap_or(""))
        }
    }

    struct Oops(&'static str);

    impl ErrorView for Oops {
        fn render(&self, error: &Error) -> String {
            let detail = error
                .status_text()
                .map_or_else(|| error.to_string(), str::to_string);
            format!("{}!{}", self.0, detail)
        }
    }

    fn node(id: &str, pattern: &str) -> RouteNode {
        RouteNode::new(id, pattern).unwrap()
    }

    fn navigator(root: RouteNode) -> Navigator {
        Navigator::new(RouteTable::new(root).unwrap(), DEFAULT_MAX_REDIRECTS)
    }

    fn app() -> Navigator {
        let root = node("root", "/")
            .loader(Fixed("r"))
            .view(Wrap("root"))
            .error_view(Oops("root-error"))
            .action(EchoForm)
            .child(node("item", "items/:id").loader(Echo).view(Wrap("item")))
            .child(node("plain", "plain").view(Wrap("plain")))
            .child(
                node("section", "section")
                    .loader(Fixed("s"))
                    .view(Wrap("section"))
                    .error_view(Oops("section-error"))
                    .child(node("broken", "broken").loader(Failing).view(Wrap("broken")))
                    .child(node("destroy", "destroy").action(FailingAction)),
            )
            .child(node("new", "new").action(RedirectTo("/items/42")))
            .child(node("silent", "silent").action(Silent))
            .child(node("moved", "moved").loader(RedirectTo("/plain")))
            .child(node("loop", "loop").loader(RedirectTo("/loop")));
        navigator(root)
    }

    fn committed(nav: Navigation) -> Page {
        nav.into_page().expect("navigation should commit")
    }

    #[tokio::test]
    async fn test_nested_render_into_outlets() {
        let nav = app();
        let page = committed(nav.navigate("/items/7").await.unwrap());

        assert_eq!(page.routes, vec!["root", "item"]);
        assert_eq!(page.body, r#"root["r"](item[{"id":"7"}]())"#);
        assert_eq!(page.data["root"], Value::from("r"));
        assert!(page.error.is_none());
    }

    #[tokio::test]
    async fn test_route_without_loader_has_no_data() {
        let nav = app();
        let page = committed(nav.navigate("/plain").await.unwrap());

        assert!(!page.data.contains_key("plain"));
        assert_eq!(page.body, r#"root["r"](plain[-]())"#);
    }

    #[tokio::test]
    async fn test_failing_loader_hits_nearest_boundary() {
        crate::logging::init_test_logging();
        let nav = app();
        let page = committed(nav.navigate("/section/broken").await.unwrap());

        let error = page.error.as_ref().unwrap();
        assert_eq!(error.route, "section");
        assert!(error.message.contains("loader exploded"));
        assert_eq!(page.routes, vec!["root", "section"]);
        assert!(page.body.starts_with(r#"root["r"]("#));
        assert!(page.body.contains("section-error!"));
        assert!(page.data.contains_key("root"));
        assert!(!page.data.contains_key("section"));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_root_boundary() {
        let nav = app();
        let page = committed(nav.navigate("/does/not/exist").await.unwrap());

        let error = page.error.as_ref().unwrap();
        assert_eq!(error.route, "root");
        assert_eq!(error.status, Some(404));
        assert_eq!(page.body, "root-error!Not Found");
    }

    #[tokio::test]
    async fn test_error_without_boundary_is_returned() {
        let root = node("root", "/")
            .view(Wrap("root"))
            .child(node("broken", "broken").loader(Failing));
        let nav = navigator(root);

        let err = nav.navigate("/broken").await.unwrap_err();
        assert!(matches!(err, Error::OperationFailure { .. }));
        assert!(nav.current().await.is_none());
    }

    #[tokio::test]
    async fn test_loader_redirect_is_followed() {
        let nav = app();
        let page = committed(nav.navigate("/moved").await.unwrap());
        assert_eq!(page.location, "/plain");
    }

    #[tokio::test]
    async fn test_redirect_loop_stops_at_limit() {
        let nav = app();
        let err = nav.navigate("/loop").await.unwrap_err();
        assert!(
            matches!(err, Error::RedirectLimit { limit, .. } if limit == DEFAULT_MAX_REDIRECTS)
        );
    }

    #[tokio::test]
    async fn test_submit_redirect_navigates() {
        let nav = app();
        let page = committed(nav.submit("/new", FormData::new()).await.unwrap());
        assert_eq!(page.location, "/items/42");
        assert_eq!(page.routes, vec!["root", "item"]);
    }

    #[tokio::test]
    async fn test_submit_without_result_goes_to_root() {
        let nav = app();
        let page = committed(nav.submit("/silent", FormData::new()).await.unwrap());
        assert_eq!(page.location, "/");
        assert_eq!(page.routes, vec!["root"]);
    }

    #[tokio::test]
    async fn test_submit_data_becomes_action_data() {
        let nav = app();
        let mut form = FormData::new();
        form.insert("first".to_string(), "Ada".to_string());

        let page = committed(nav.submit("/", form).await.unwrap());
        assert_eq!(page.location, "/");
        assert_eq!(page.action_data, Some(serde_json::json!({"first": "Ada"})));
        assert_eq!(page.data["root"], Value::from("r"));
    }

    #[tokio::test]
    async fn test_submit_failure_renders_boundary_with_ancestor_data() {
        let nav = app();
        let page = committed(nav.submit("/section/destroy", FormData::new()).await.unwrap());

        let error = page.error.as_ref().unwrap();
        assert_eq!(error.route, "section");
        assert!(error.message.contains("Error!!"));
        assert_eq!(page.data["root"], Value::from("r"));
        assert!(page.body.starts_with(r#"root["r"]("#));
    }

    #[tokio::test]
    async fn test_ancestor_failure_moves_error_to_outer_boundary() {
        let root = node("root", "/")
            .loader(Failing)
            .view(Wrap("root"))
            .error_view(Oops("root-error"))
            .child(
                node("destroy", "destroy")
                    .error_view(Oops("child-error"))
                    .action(FailingAction),
            );
        let nav = navigator(root);

        let page = committed(nav.submit("/destroy", FormData::new()).await.unwrap());

        let error = page.error.as_ref().unwrap();
        assert_eq!(error.route, "root");
        assert!(error.message.contains("loader exploded"));
        assert_eq!(page.routes, vec!["root"]);
        assert!(page.body.starts_with("root-error!"));
        assert!(!page.body.contains("child-error"));
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_action_is_method_not_allowed() {
        let nav = app();
        let page = committed(nav.submit("/plain", FormData::new()).await.unwrap());

        let error = page.error.as_ref().unwrap();
        assert_eq!(error.route, "root");
        assert_eq!(error.status, Some(405));
        assert_eq!(page.body, "root-error!Method Not Allowed");
    }

    #[tokio::test]
    async fn test_current_tracks_committed_page() {
        let nav = app();
        assert!(nav.current().await.is_none());
        nav.navigate("/plain").await.unwrap();
        assert_eq!(nav.current().await.unwrap().location, "/plain");
    }

    #[tokio::test]
    async fn test_loaders_rerun_on_each_navigation() {
        let count = Arc::new(AtomicUsize::new(0));
        let root = node("root", "/").loader(Counting(Arc::clone(&count)));
        let nav = navigator(root);

        nav.navigate("/").await.unwrap();
        let page = committed(nav.navigate("/").await.unwrap());
        assert_eq!(page.data["root"], Value::from(2));
    }

    #[tokio::test]
    async fn test_load_short_circuits_on_failure() {
        let nav = app();
        let location = Location::parse("/section/broken");
        let chain = nav.match_path("/section/broken").unwrap();

        match Navigator::load(&location, &chain).await {
            LoadResult::Failed { index, data, error } => {
                assert_eq!(index, 2);
                assert_eq!(data.len(), 2);
                assert!(error.to_string().contains("loader exploded"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_superseded_navigation_is_discarded() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let root = node("root", "/")
            .child(node("slow", "slow").loader(Gated {
                entered: Arc::clone(&entered),
                release: Arc::clone(&release),
            }))
            .child(node("fast", "fast").loader(Fixed("fast")));
        let nav = Arc::new(navigator(root));

        let slow = {
            let nav = Arc::clone(&nav);
            tokio::spawn(async move { nav.navigate("/slow").await })
        };
        entered.notified().await;

        let fast = nav.navigate("/fast").await.unwrap();
        assert!(!fast.is_superseded());

        release.notify_one();
        let slow = slow.await.unwrap().unwrap();
        assert!(slow.is_superseded());
        assert_eq!(nav.current().await.unwrap().location, "/fast");
    }

    #[test]
    fn test_page_serializes_without_empty_fields() {
        let page = Page {
            location: "/".to_string(),
            routes: vec!["root".to_string()],
            data: BTreeMap::new(),
            action_data: None,
            error: None,
            body: String::new(),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("action_data").is_none());
    }
}
