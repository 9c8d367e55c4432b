//! The contact manager's routes.
//!
//! `/` lists contacts and creates new ones. Below it sit the contact
//! detail page, its edit form and the destroy endpoint. Views render plain
//! text; the root view is the sidebar and wraps every child page.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::RouterConfig;
use crate::contact::{Contact, ContactId, ContactUpdate};
use crate::error::{Error, Result};
use crate::router::{
    Action, ActionArgs, ErrorView, Loader, LoaderArgs, Navigator, Outcome, Params, RouteNode,
    RouteTable, View,
};
use crate::store::ContactStore;

/// Id of the root route.
pub const ROOT_ROUTE: &str = "root";
/// Id of the contact detail route.
pub const CONTACT_ROUTE: &str = "contact";
/// Id of the edit form route.
pub const EDIT_ROUTE: &str = "edit";
/// Id of the destroy route.
pub const DESTROY_ROUTE: &str = "destroy";

const CONTACT_PARAM: &str = "contactId";

/// Build the route table over `store`.
///
/// # Errors
///
/// Returns an error if a route pattern is invalid.
pub fn build_routes(store: Arc<dyn ContactStore>) -> Result<RouteTable> {
    let root = RouteNode::new(ROOT_ROUTE, "/")?
        .loader(RootLoader(Arc::clone(&store)))
        .action(RootAction(Arc::clone(&store)))
        .view(RootView)
        .error_view(ErrorPage)
        .child(
            RouteNode::new(CONTACT_ROUTE, "contacts/:contactId")?
                .loader(ContactLoader(Arc::clone(&store)))
                .action(FavoriteAction(Arc::clone(&store)))
                .view(ContactView),
        )
        .child(
            RouteNode::new(EDIT_ROUTE, "contacts/:contactId/edit")?
                .loader(ContactLoader(Arc::clone(&store)))
                .action(EditAction(Arc::clone(&store)))
                .view(EditView),
        )
        .child(
            RouteNode::new(DESTROY_ROUTE, "contacts/:contactId/destroy")?
                .action(DestroyAction(store))
                .error_view(DestroyErrorView),
        );

    RouteTable::new(root)
}

/// Build a navigator over `store` with the router settings from `config`.
///
/// # Errors
///
/// Returns an error if the route table cannot be built.
pub fn build_navigator(store: Arc<dyn ContactStore>, config: &RouterConfig) -> Result<Navigator> {
    Ok(Navigator::new(build_routes(store)?, config.max_redirects))
}

/// Data produced by the root loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootData {
    /// Contacts shown in the sidebar.
    pub contacts: Vec<Contact>,
    /// Active search query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

/// Data produced by the contact loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactData {
    /// The loaded contact.
    pub contact: Contact,
}

fn contact_id(params: &Params) -> Result<ContactId> {
    params
        .get(CONTACT_PARAM)
        .map(|id| ContactId::new(id.as_str()))
        .ok_or_else(|| Error::internal(format!("route has no :{CONTACT_PARAM} param")))
}

fn decode<T: DeserializeOwned>(data: Option<&Value>) -> Option<T> {
    data.and_then(|value| serde_json::from_value(value.clone()).ok())
}

struct RootLoader(Arc<dyn ContactStore>);

#[async_trait::async_trait]
impl Loader for RootLoader {
    async fn load(&self, args: LoaderArgs) -> Result<Outcome> {
        let q = args.location.query("q").map(str::to_string);
        let contacts = self.0.list_contacts(q.as_deref()).await?;
        Outcome::data(RootData { contacts, q })
    }
}

struct RootAction(Arc<dyn ContactStore>);

#[async_trait::async_trait]
impl Action for RootAction {
    async fn act(&self, _args: ActionArgs) -> Result<Option<Outcome>> {
        let contact = self.0.create_contact().await?;
        Ok(Some(Outcome::redirect(format!("/contacts/{}/edit", contact.id))))
    }
}

struct ContactLoader(Arc<dyn ContactStore>);

#[async_trait::async_trait]
impl Loader for ContactLoader {
    async fn load(&self, args: LoaderArgs) -> Result<Outcome> {
        let id = contact_id(&args.params)?;
        let contact = self.0.get_contact(&id).await?;
        Outcome::data(ContactData { contact })
    }
}

/// Sets the favorite flag from the `favorite` field.
struct FavoriteAction(Arc<dyn ContactStore>);

#[async_trait::async_trait]
impl Action for FavoriteAction {
    async fn act(&self, args: ActionArgs) -> Result<Option<Outcome>> {
        let id = contact_id(&args.params)?;
        let favorite = ContactUpdate::from_form(&args.form)?
            .favorite
            .ok_or_else(|| Error::invalid_field("favorite", "field is required"))?;

        let update = ContactUpdate {
            favorite: Some(favorite),
            ..ContactUpdate::default()
        };
        let contact = self.0.update_contact(&id, &update).await?;
        info!("Marked contact {} favorite={}", id, favorite);
        Outcome::data(ContactData { contact }).map(Some)
    }
}

struct EditAction(Arc<dyn ContactStore>);

#[async_trait::async_trait]
impl Action for EditAction {
    async fn act(&self, args: ActionArgs) -> Result<Option<Outcome>> {
        let id = contact_id(&args.params)?;
        let update = ContactUpdate::from_form(&args.form)?;
        self.0.update_contact(&id, &update).await?;
        Ok(Some(Outcome::redirect(format!("/contacts/{id}"))))
    }
}

struct DestroyAction(Arc<dyn ContactStore>);

#[async_trait::async_trait]
impl Action for DestroyAction {
    async fn act(&self, args: ActionArgs) -> Result<Option<Outcome>> {
        let id = contact_id(&args.params)?;
        if !self.0.delete_contact(&id).await? {
            info!("Contact {} was already gone", id);
        }
        Ok(Some(Outcome::redirect("/")))
    }
}

/// Sidebar with the contact list, wrapping the selected page.
struct RootView;

impl View for RootView {
    fn render(&self, data: Option<&Value>, outlet: Option<&str>) -> String {
        let data: RootData = decode(data).unwrap_or_default();

        let mut out = String::from("Contacts\n");
        if let Some(q) = &data.q {
            out.push_str(&format!("Search: {q}\n"));
        }
        if data.contacts.is_empty() {
            out.push_str("  No contacts\n");
        }
        for contact in &data.contacts {
            let name = contact
                .display_name()
                .unwrap_or_else(|| "No Name".to_string());
            let star = if contact.favorite { " ★" } else { "" };
            out.push_str(&format!("  {name}{star}  /contacts/{}\n", contact.id));
        }

        if let Some(outlet) = outlet {
            out.push('\n');
            out.push_str(outlet);
        }
        out
    }
}

struct ContactView;

impl View for ContactView {
    fn render(&self, data: Option<&Value>, _outlet: Option<&str>) -> String {
        let Some(ContactData { contact }) = decode(data) else {
            return String::new();
        };

        let name = contact
            .display_name()
            .unwrap_or_else(|| "No Name".to_string());
        let star = if contact.favorite { "★" } else { "☆" };
        let mut out = format!("{name} {star}\n");
        for line in [&contact.twitter, &contact.avatar, &contact.notes] {
            if !line.is_empty() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(&format!(
            "[Edit] /contacts/{id}/edit  [Delete] /contacts/{id}/destroy\n",
            id = contact.id
        ));
        out
    }
}

struct EditView;

impl View for EditView {
    fn render(&self, data: Option<&Value>, _outlet: Option<&str>) -> String {
        let Some(ContactData { contact }) = decode(data) else {
            return String::new();
        };

        let mut out = format!("Edit /contacts/{}\n", contact.id);
        for (field, value) in [
            ("first", &contact.first),
            ("last", &contact.last),
            ("twitter", &contact.twitter),
            ("avatar", &contact.avatar),
            ("notes", &contact.notes),
        ] {
            out.push_str(&format!("  {field}: {value}\n"));
        }
        out
    }
}

/// Generic error page.
struct ErrorPage;

impl ErrorView for ErrorPage {
    fn render(&self, error: &Error) -> String {
        let detail = error
            .status_text()
            .map_or_else(|| error.to_string(), str::to_string);
        format!("Oops!\nSorry, an unexpected error has occurred.\n{detail}\n")
    }
}

struct DestroyErrorView;

impl ErrorView for DestroyErrorView {
    fn render(&self, error: &Error) -> String {
        format!("Oops! There was an error.\n{error}\n")
    }
}
