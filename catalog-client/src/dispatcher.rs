//! Executes store commands against the catalog API.
//!
//! Each command is exactly one request. The result is turned back into an
//! outcome [`Action`]; the underlying error is logged here and never reaches
//! the user.

use crate::api::ProductApi;
use crate::error::ClientError;
use crate::store::{Action, Command};
use crate::HttpClient;

#[derive(Debug, Clone)]
pub struct Dispatcher<C> {
    api: ProductApi<C>,
}

impl<C: HttpClient> Dispatcher<C> {
    pub fn new(http: C) -> Self {
        Self {
            api: ProductApi::new(http),
        }
    }

    pub fn api(&self) -> &ProductApi<C> {
        &self.api
    }

    /// Run `command` and report its outcome, with the error if it failed
    pub async fn execute(&self, command: Command) -> (Action, Option<ClientError>) {
        match command {
            Command::Load { seq } => match self.api.list().await {
                Ok(products) => {
                    tracing::debug!(seq, count = products.len(), "Loaded products");
                    (Action::LoadSucceeded { seq, products }, None)
                }
                Err(e) => {
                    tracing::error!(seq, "Failed to fetch products: {}", e);
                    (Action::LoadFailed { seq }, Some(e))
                }
            },
            Command::Create { payload } => match self.api.create(&payload).await {
                Ok(()) => {
                    tracing::info!(name = %payload.name, "Product created");
                    (Action::CreateSucceeded, None)
                }
                Err(e) => {
                    tracing::error!("Failed to create product: {}", e);
                    (Action::CreateFailed, Some(e))
                }
            },
            Command::Replace { id, payload } => match self.api.replace(&id, &payload).await {
                Ok(()) => {
                    tracing::info!(%id, "Product updated");
                    (Action::UpdateSucceeded, None)
                }
                Err(e) => {
                    tracing::error!(%id, "Failed to update product: {}", e);
                    (Action::UpdateFailed, Some(e))
                }
            },
            Command::Remove { id } => match self.api.remove(&id).await {
                Ok(()) => {
                    tracing::info!(%id, "Product deleted");
                    (Action::DeleteSucceeded { id }, None)
                }
                Err(e) => {
                    tracing::error!(%id, "Failed to delete product: {}", e);
                    (Action::DeleteFailed { id }, Some(e))
                }
            },
        }
    }
}
