//! List organizations and their users
//!
//! Demonstrates an authenticated client whose token supplier issues a new
//! token when the server rejects the current one.
//!
//! Run with: API_URL=http://localhost:3000 API_TOKEN=secret cargo run --example list_organizations

use rest_auth_http::api::{models::ListOptions, OrganizationsApi};
use rest_auth_http::{AuthClient, CallContext, ClientConfig, FnTokenSupplier, RestTransport};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let token = std::env::var("API_TOKEN").unwrap_or_else(|_| "secret".into());

    println!("Organizations at {}", base_url);
    println!("==========================\n");

    let transport = RestTransport::with_config(ClientConfig {
        enable_logging: true,
        ..Default::default()
    })?;
    let tokens = FnTokenSupplier::new(move |is_retry| {
        let token = token.clone();
        async move {
            if is_retry {
                tracing::info!("issuing a fresh token");
            }
            Ok(token)
        }
    });
    let orgs = OrganizationsApi::new(AuthClient::new(&base_url, transport, Arc::new(tokens)));

    let ctx = CallContext::new()
        .with_request_id("demo-list-organizations")
        .with_timeout(Duration::from_secs(10));

    for org in orgs.list(&ctx, ListOptions::default()).await? {
        println!("{} {}", org.id, org.name);
        let users = orgs
            .users(org.id)
            .list(
                &ctx,
                ListOptions {
                    limit: Some(10),
                    offset: None,
                },
            )
            .await?;
        for user in users {
            println!("    {} <{}>", user.name, user.email);
        }
    }

    Ok(())
}
