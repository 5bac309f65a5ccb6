//! Catalog sync controller.
//!
//! Owns the [`CatalogState`], carries out the effects the reducer emits and
//! is the single subscriber of the invalidation signal: every
//! [`Effect::Invalidate`] becomes exactly one read of the collection.
//!
//! Two ways to drive it:
//! - [`CatalogController::run`] awaits requests inline until the state is
//!   quiescent (scripts, tests);
//! - [`CatalogController::apply`] only returns the commands to send, so an
//!   event loop can spawn them and feed the outcomes back in as they settle.

use crate::config::ClientConfig;
use crate::dispatcher::Dispatcher;
use crate::error::{Field, SyncError};
use crate::notifier::Notifier;
use crate::store::{Action, CatalogState, Command, Effect, Rejection};
use crate::HttpClient;
use shared::{Product, ProductId};
use std::collections::VecDeque;

impl From<Rejection> for SyncError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Busy => SyncError::Busy,
            Rejection::Invalid(err) => SyncError::Validation(err),
            Rejection::NotEditing => SyncError::NotEditing,
        }
    }
}

pub struct CatalogController<C, N> {
    state: CatalogState,
    dispatcher: Dispatcher<C>,
    notifier: N,
}

impl<C: HttpClient, N: Notifier> CatalogController<C, N> {
    pub fn new(config: &ClientConfig, http: C, notifier: N) -> Self {
        Self {
            state: CatalogState::new(config.require_image_url),
            dispatcher: Dispatcher::new(http),
            notifier,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Reduce `action`, deliver notices and resolve invalidation.
    ///
    /// Returns the commands the caller must execute, in order.
    pub fn apply(&mut self, action: Action) -> Result<Vec<Command>, SyncError> {
        let mut pending = VecDeque::from([action]);
        let mut commands = Vec::new();
        let mut rejected = None;

        while let Some(action) = pending.pop_front() {
            let transition = self.state.reduce(action);
            for effect in transition.effects {
                match effect {
                    Effect::Dispatch(command) => commands.push(command),
                    Effect::Notify(notice) => self.notifier.notify(&notice),
                    Effect::Invalidate => pending.push_back(Action::LoadRequested),
                }
            }
            rejected = rejected.or(transition.rejected);
        }

        match rejected {
            Some(rejection) => Err(rejection.into()),
            None => Ok(commands),
        }
    }

    /// Apply `action` and execute everything it triggers before returning.
    ///
    /// Fails with the error of the request the action itself issued; a
    /// failed follow-up read is only notified.
    pub async fn run(&mut self, action: Action) -> Result<(), SyncError> {
        let mut queue: VecDeque<Command> = self.apply(action)?.into();
        let mut primary = None;

        while let Some(command) = queue.pop_front() {
            let (outcome, error) = self.dispatcher.execute(command).await;
            if primary.is_none() {
                primary = Some(error);
            }
            queue.extend(self.apply(outcome)?);
        }

        match primary.flatten() {
            Some(err) => Err(SyncError::Network(err)),
            None => Ok(()),
        }
    }

    /// Initial load
    pub async fn mount(&mut self) -> Result<(), SyncError> {
        self.refresh().await
    }

    /// Re-read the whole collection
    pub async fn refresh(&mut self) -> Result<(), SyncError> {
        self.run(Action::LoadRequested).await
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        // typing is never rejected
        let _ = self.apply(Action::set_field(field, value));
    }

    pub fn open_edit(&mut self, product: Product) -> Result<(), SyncError> {
        self.apply(Action::OpenEdit(product)).map(drop)
    }

    pub fn cancel_edit(&mut self) -> Result<(), SyncError> {
        self.apply(Action::CancelEdit).map(drop)
    }

    /// Submit the draft as a new product
    pub async fn create(&mut self) -> Result<(), SyncError> {
        self.run(Action::CreateRequested).await
    }

    /// Submit the draft as a full replacement of the product being edited
    pub async fn update(&mut self) -> Result<(), SyncError> {
        self.run(Action::UpdateRequested).await
    }

    pub async fn delete(&mut self, id: ProductId) -> Result<(), SyncError> {
        self.run(Action::DeleteRequested { id }).await
    }
}
