//! Route descriptors and the route table.
//!
//! A route node binds a path pattern to an optional [`Loader`], an optional
//! [`Action`], an optional [`View`] and an optional [`ErrorView`]. Nodes
//! form a tree; a child's pattern is relative to its parent and the
//! child's view renders into the parent's outlet.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::contact::FormData;
use crate::error::{Error, Result};

use super::outcome::Outcome;
use super::path::{Location, Params, PathPattern};

/// Arguments passed to a loader.
#[derive(Debug, Clone)]
pub struct LoaderArgs {
    /// Params captured from the root down to this node.
    pub params: Params,
    /// The location being loaded.
    pub location: Location,
}

/// Arguments passed to an action.
#[derive(Debug, Clone)]
pub struct ActionArgs {
    /// Params captured from the root down to this node.
    pub params: Params,
    /// The submitted form fields.
    pub form: FormData,
    /// The location the form was submitted to.
    pub location: Location,
}

/// Fetches data for a route before it renders.
#[async_trait::async_trait]
pub trait Loader: Send + Sync {
    /// Load data for the matched route.
    ///
    /// # Errors
    ///
    /// Any error is routed to the nearest error view.
    async fn load(&self, args: LoaderArgs) -> Result<Outcome>;
}

/// Handles a form submission to a route.
#[async_trait::async_trait]
pub trait Action: Send + Sync {
    /// Perform the mutation. `None` means "no result", which redirects to `/`.
    ///
    /// # Errors
    ///
    /// Any error is routed to the nearest error view.
    async fn act(&self, args: ActionArgs) -> Result<Option<Outcome>>;
}

/// Renders a route's data, wrapping the child's output.
pub trait View: Send + Sync {
    /// Render with this route's loader data (if any) and the rendered child
    /// (if any) for the outlet.
    fn render(&self, data: Option<&Value>, outlet: Option<&str>) -> String;
}

/// Renders an error caught at this route.
pub trait ErrorView: Send + Sync {
    /// Render the raw error.
    fn render(&self, error: &Error) -> String;
}

/// One node of the route tree.
pub struct RouteNode {
    id: String,
    pattern: PathPattern,
    loader: Option<Arc<dyn Loader>>,
    action: Option<Arc<dyn Action>>,
    view: Option<Arc<dyn View>>,
    error_view: Option<Arc<dyn ErrorView>>,
    children: Vec<RouteNode>,
}

impl RouteNode {
    /// Create a node with the given id and path pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid.
    pub fn new(id: impl Into<String>, pattern: &str) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            pattern: PathPattern::parse(pattern)?,
            loader: None,
            action: None,
            view: None,
            error_view: None,
            children: Vec::new(),
        })
    }

    /// Attach a loader.
    #[must_use]
    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Attach an action.
    #[must_use]
    pub fn action(mut self, action: impl Action + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Attach a view.
    #[must_use]
    pub fn view(mut self, view: impl View + 'static) -> Self {
        self.view = Some(Arc::new(view));
        self
    }

    /// Attach an error view, making this node an error boundary.
    #[must_use]
    pub fn error_view(mut self, view: impl ErrorView + 'static) -> Self {
        self.error_view = Some(Arc::new(view));
        self
    }

    /// Append a child route.
    #[must_use]
    pub fn child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }

    /// Route id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path pattern relative to the parent.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Child routes in declaration order.
    #[must_use]
    pub fn children(&self) -> &[RouteNode] {
        &self.children
    }

    pub(crate) fn loader_fn(&self) -> Option<&Arc<dyn Loader>> {
        self.loader.as_ref()
    }

    pub(crate) fn action_fn(&self) -> Option<&Arc<dyn Action>> {
        self.action.as_ref()
    }

    pub(crate) fn view_fn(&self) -> Option<&Arc<dyn View>> {
        self.view.as_ref()
    }

    pub(crate) fn error_view_fn(&self) -> Option<&Arc<dyn ErrorView>> {
        self.error_view.as_ref()
    }

    /// Whether this node catches errors.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.error_view.is_some()
    }

    fn visit<'a>(&'a self, depth: usize, out: &mut Vec<(usize, &'a RouteNode)>) {
        out.push((depth, self));
        for child in self.children() {
            child.visit(depth + 1, out);
        }
    }
}

impl fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("id", &self.id)
            .field("pattern", &self.pattern.as_str())
            .field("loader", &self.loader.is_some())
            .field("action", &self.action.is_some())
            .field("view", &self.view.is_some())
            .field("error_view", &self.error_view.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// A route node matched against a location.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The matched node.
    pub node: &'a RouteNode,
    /// Params captured from the root down to this node.
    pub params: Params,
}

/// The whole route tree.
#[derive(Debug)]
pub struct RouteTable {
    root: RouteNode,
}

impl RouteTable {
    /// Build a table from its root node.
    ///
    /// # Errors
    ///
    /// Returns an error if two nodes share an id.
    pub fn new(root: RouteNode) -> Result<Self> {
        let mut nodes = Vec::new();
        root.visit(0, &mut nodes);

        let mut seen = HashSet::new();
        for (_, node) in &nodes {
            if !seen.insert(node.id()) {
                return Err(Error::InvalidPattern {
                    pattern: node.pattern().to_string(),
                    message: format!("duplicate route id '{}'", node.id()),
                });
            }
        }

        Ok(Self { root })
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &RouteNode {
        &self.root
    }

    /// Match a location, returning the chain from the root to the deepest
    /// matching node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] when no branch consumes the whole path.
    pub fn match_location(&self, location: &Location) -> Result<Vec<RouteMatch<'_>>> {
        let chain = match_node(&self.root, location.segments(), &Params::new())
            .map(|(_, chain)| chain)
            .ok_or_else(|| Error::RouteNotFound {
                path: location.path(),
            })?;

        debug!(
            "Matched {} to [{}]",
            location.path(),
            chain
                .iter()
                .map(|m| m.node.id())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(chain)
    }

    /// Match a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RouteNotFound`] when nothing matches.
    pub fn match_path(&self, path: &str) -> Result<Vec<RouteMatch<'_>>> {
        self.match_location(&Location::parse(path))
    }

    /// One line per node, indented by depth, for display.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        let mut nodes = Vec::new();
        self.root.visit(0, &mut nodes);
        nodes
            .into_iter()
            .map(|(depth, node)| {
                let mut traits = Vec::new();
                if node.loader.is_some() {
                    traits.push("loader");
                }
                if node.action.is_some() {
                    traits.push("action");
                }
                if node.is_boundary() {
                    traits.push("error view");
                }
                format!(
                    "{}{} [{}] {}",
                    "  ".repeat(depth),
                    node.pattern(),
                    node.id(),
                    traits.join(", ")
                )
                .trim_end()
                .to_string()
            })
            .collect()
    }
}

/// Match `node` and its subtree against `path`, returning the best-ranked
/// full match with its score.
fn match_node<'a>(
    node: &'a RouteNode,
    path: &[String],
    inherited: &Params,
) -> Option<(u32, Vec<RouteMatch<'a>>)> {
    let mut params = inherited.clone();
    let consumed = node.pattern.match_prefix(path, &mut params)?;
    let rest = &path[consumed..];
    let score = node.pattern.score();
    let here = RouteMatch {
        node,
        params: params.clone(),
    };

    if rest.is_empty() {
        return Some((score, vec![here]));
    }

    let mut best: Option<(u32, Vec<RouteMatch<'a>>)> = None;
    for child in node.children() {
        if let Some((child_score, chain)) = match_node(child, rest, &params) {
            if best.as_ref().map_or(true, |(b, _)| child_score > *b) {
                best = Some((child_score, chain));
            }
        }
    }

    best.map(|(child_score, tail)| {
        let mut chain = Vec::with_capacity(tail.len() + 1);
        chain.push(here);
        chain.extend(tail);
        (score + child_score, chain)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait::async_trait]
    impl Loader for Fixed {
        async fn load(&self, _args: LoaderArgs) -> Result<Outcome> {
            Outcome::data(self.0)
        }
    }

    fn table() -> RouteTable {
        let root = RouteNode::new("root", "/")
            .unwrap()
            .loader(Fixed("root"))
            .child(RouteNode::new("contact", "contacts/:contactId").unwrap())
            .child(RouteNode::new("edit", "contacts/:contactId/edit").unwrap())
            .child(RouteNode::new("new", "contacts/new").unwrap())
            .child(
                RouteNode::new("teams", "teams")
                    .unwrap()
                    .child(RouteNode::new("team", ":teamId").unwrap()),
            );
        RouteTable::new(root).unwrap()
    }

    fn ids(chain: &[RouteMatch<'_>]) -> Vec<String> {
        chain.iter().map(|m| m.node.id().to_string()).collect()
    }

    #[test]
    fn test_match_root() {
        let table = table();
        let chain = table.match_path("/").unwrap();
        assert_eq!(ids(&chain), vec!["root"]);
    }

    #[test]
    fn test_match_contact_params() {
        let table = table();
        let chain = table.match_path("/contacts/123").unwrap();
        assert_eq!(ids(&chain), vec!["root", "contact"]);
        assert_eq!(
            chain[1].params.get("contactId").map(String::as_str),
            Some("123")
        );
        assert!(chain[0].params.is_empty());
    }

    #[test]
    fn test_match_requires_full_consumption() {
        let table = table();
        let chain = table.match_path("/contacts/123/edit").unwrap();
        assert_eq!(ids(&chain), vec!["root", "edit"]);
    }

    #[test]
    fn test_static_segment_outranks_param() {
        let table = table();
        let chain = table.match_path("/contacts/new").unwrap();
        assert_eq!(ids(&chain), vec!["root", "new"]);
    }

    #[test]
    fn test_nested_params_are_inherited() {
        let table = table();
        let chain = table.match_path("/teams/7").unwrap();
        assert_eq!(ids(&chain), vec!["root", "teams", "team"]);
        assert_eq!(chain[2].params.get("teamId").map(String::as_str), Some("7"));
        let chain = table.match_path("/teams").unwrap();
        assert_eq!(ids(&chain), vec!["root", "teams"]);
    }

    #[test]
    fn test_match_not_found() {
        let table = table();
        let err = table.match_path("/contacts/1/edit/extra").unwrap_err();
        assert!(
            matches!(err, Error::RouteNotFound { ref path } if path == "/contacts/1/edit/extra")
        );
        assert!(table.match_path("/unknown").unwrap_err().is_not_found());
    }

    #[test]
    fn test_match_ignores_search() {
        let table = table();
        let chain = table.match_path("/contacts/9?tab=notes").unwrap();
        assert_eq!(ids(&chain), vec!["root", "contact"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let root = RouteNode::new("root", "/")
            .unwrap()
            .child(RouteNode::new("root", "x").unwrap());
        assert!(RouteTable::new(root).is_err());
    }

    #[test]
    fn test_describe() {
        let table = table();
        let lines = table.describe();
        assert_eq!(lines[0], "/ [root] loader");
        assert_eq!(lines[1], "  contacts/:contactId [contact]");
        assert!(lines.iter().any(|l| l == "    :teamId [team]"));
    }

    struct Plain;

    impl ErrorView for Plain {
        fn render(&self, error: &Error) -> String {
            error.to_string()
        }
    }

    #[test]
    fn test_describe_marks_boundaries() {
        let root = RouteNode::new("root", "/")
            .unwrap()
            .error_view(Plain)
            .child(RouteNode::new("child", "child").unwrap());
        assert!(root.is_boundary());
        assert!(!root.children()[0].is_boundary());

        let lines = RouteTable::new(root).unwrap().describe();
        assert_eq!(lines, vec!["/ [root] error view", "  child [child]"]);
    }

    #[tokio::test]
    async fn test_loader_is_callable() {
        let table = table();
        let loader = table.root().loader_fn().unwrap();
        let outcome = loader
            .load(LoaderArgs {
                params: Params::new(),
                location: Location::parse("/"),
            })
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::data("root").unwrap());
    }
}
