//! Route table and navigation.
//!
//! Routes are declared as a tree of [`RouteNode`]s. The [`Navigator`]
//! matches a location against the tree, runs loaders root first, renders
//! views into their parents' outlets and dispatches form submissions to
//! actions.

mod navigator;
mod outcome;
mod path;
mod route;

pub use navigator::{LoadResult, Navigation, Navigator, Page, PageError, DEFAULT_MAX_REDIRECTS};
pub use outcome::Outcome;
pub use path::{Location, Params, PathPattern, Segment};
pub use route::{
    Action, ActionArgs, ErrorView, Loader, LoaderArgs, RouteMatch, RouteNode, RouteTable, View,
};
