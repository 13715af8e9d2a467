//! Typed clients for the organization and user resources.
//!
//! Each resource client wraps a shared [`AuthClient`], so every call gets
//! bearer authentication, correlation-id forwarding, and the 401 recovery
//! protocol. Failures surface as [`Error`]; use
//! [`Error::status`](crate::Error::status) or [`Error::is_not_found`] to
//! branch on the HTTP outcome.
//!
//! | Client | Resource paths |
//! |--------|----------------|
//! | [`OrganizationsApi`] | `/organizations`, `/organizations/:organizationID` |
//! | [`UsersApi`] | `/organizations/:organizationID/users[/:userID]` |

pub mod models;

use crate::client::AuthClient;
use crate::error::{Error, Result};
use crate::types::{CallContext, Method, PathParams, QueryParams};
use models::{
    ListOptions, NewOrganization, NewUser, Organization, OrganizationUpdate, User, UserUpdate,
};
use uuid::Uuid;

const ORGANIZATIONS: &str = "/organizations";
const ORGANIZATION: &str = "/organizations/:organizationID";
const USERS: &str = "/organizations/:organizationID/users";
const USER: &str = "/organizations/:organizationID/users/:userID";

fn params(pairs: &[(&str, Uuid)]) -> PathParams {
    pairs
        .iter()
        .map(|(name, id)| (name.to_string(), id.to_string()))
        .collect()
}

/// A success that should have carried a body but did not.
fn required<T>(value: Option<T>) -> Result<T> {
    value.ok_or_else(|| Error::ResponseDecode("empty response body".to_string()))
}

/// Client for `/organizations`.
#[derive(Debug, Clone)]
pub struct OrganizationsApi {
    client: AuthClient,
}

impl OrganizationsApi {
    /// Wrap an authenticated client.
    pub fn new(client: AuthClient) -> Self {
        OrganizationsApi { client }
    }

    /// List organizations.
    pub async fn list(&self, ctx: &CallContext, options: ListOptions) -> Result<Vec<Organization>> {
        let orgs = self
            .client
            .get(ctx, ORGANIZATIONS, &PathParams::new(), &options.to_query())
            .await?;
        Ok(orgs.unwrap_or_default())
    }

    /// Fetch one organization.
    pub async fn get(&self, ctx: &CallContext, id: Uuid) -> Result<Organization> {
        let org = self
            .client
            .get(ctx, ORGANIZATION, &params(&[("organizationID", id)]), &QueryParams::new())
            .await?;
        required(org)
    }

    /// Create an organization.
    pub async fn create(&self, ctx: &CallContext, input: &NewOrganization) -> Result<Organization> {
        let org = self
            .client
            .post(ctx, ORGANIZATIONS, &PathParams::new(), &QueryParams::new(), input)
            .await?;
        required(org)
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        ctx: &CallContext,
        id: Uuid,
        input: &OrganizationUpdate,
    ) -> Result<Organization> {
        let org = self
            .client
            .put(
                ctx,
                ORGANIZATION,
                &params(&[("organizationID", id)]),
                &QueryParams::new(),
                input,
            )
            .await?;
        required(org)
    }

    /// Delete an organization.
    pub async fn delete(&self, ctx: &CallContext, id: Uuid) -> Result<()> {
        let request = self
            .client
            .request(Method::Delete, ORGANIZATION)
            .with_path_params(params(&[("organizationID", id)]));
        self.client.execute(ctx, &request).await
    }

    /// Users of the organization `id`.
    pub fn users(&self, id: Uuid) -> UsersApi {
        UsersApi::new(self.client.clone(), id)
    }
}

/// Client for the users of one organization.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: AuthClient,
    organization_id: Uuid,
}

impl UsersApi {
    /// Wrap an authenticated client for the users of `organization_id`.
    pub fn new(client: AuthClient, organization_id: Uuid) -> Self {
        UsersApi {
            client,
            organization_id,
        }
    }

    /// Organization these users belong to
    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    fn org_params(&self) -> PathParams {
        params(&[("organizationID", self.organization_id)])
    }

    fn user_params(&self, user_id: Uuid) -> PathParams {
        params(&[("organizationID", self.organization_id), ("userID", user_id)])
    }

    /// List users.
    pub async fn list(&self, ctx: &CallContext, options: ListOptions) -> Result<Vec<User>> {
        let users = self
            .client
            .get(ctx, USERS, &self.org_params(), &options.to_query())
            .await?;
        Ok(users.unwrap_or_default())
    }

    /// Fetch one user.
    pub async fn get(&self, ctx: &CallContext, user_id: Uuid) -> Result<User> {
        let user = self
            .client
            .get(ctx, USER, &self.user_params(user_id), &QueryParams::new())
            .await?;
        required(user)
    }

    /// Create a user.
    pub async fn create(&self, ctx: &CallContext, input: &NewUser) -> Result<User> {
        let user = self
            .client
            .post(ctx, USERS, &self.org_params(), &QueryParams::new(), input)
            .await?;
        required(user)
    }

    /// Apply a partial update.
    pub async fn update(&self, ctx: &CallContext, user_id: Uuid, input: &UserUpdate) -> Result<User> {
        let user = self
            .client
            .put(ctx, USER, &self.user_params(user_id), &QueryParams::new(), input)
            .await?;
        required(user)
    }

    /// Delete a user.
    pub async fn delete(&self, ctx: &CallContext, user_id: Uuid) -> Result<()> {
        let request = self
            .client
            .request(Method::Delete, USER)
            .with_path_params(self.user_params(user_id));
        self.client.execute(ctx, &request).await
    }
}
