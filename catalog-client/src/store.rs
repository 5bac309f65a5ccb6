//! Catalog state container.
//!
//! All state changes go through [`CatalogState::reduce`], a pure transition
//! keyed by [`Action`]. Side effects come back as data ([`Effect`]) for the
//! controller to carry out: requests to dispatch, notices to show, and the
//! invalidation signal that triggers a re-read of the collection.
//!
//! Two ordering rules live here:
//! - single-flight: mutating triggers are rejected while any request is
//!   outstanding;
//! - read sequencing: every read carries a sequence number and a result older
//!   than the last applied snapshot is dropped.

use crate::draft::{Draft, FormState};
use crate::error::{Field, ValidationError};
use shared::{Product, ProductId, ProductPayload};

// ============================================================================
// User-facing messages (用户提示)
// ============================================================================

pub const MSG_REQUIRED: &str = "All fields are required!";
pub const MSG_BAD_PRICE: &str = "Price must be a number!";
pub const MSG_CREATED: &str = "Product added successfully!";
pub const MSG_CREATE_FAILED: &str = "Error while posting product!";
pub const MSG_LOAD_FAILED: &str = "Error fetching products";
pub const MSG_UPDATED: &str = "Product updated!";
pub const MSG_UPDATE_FAILED: &str = "Edit failed";
pub const MSG_DELETED: &str = "Product deleted!";
pub const MSG_DELETE_FAILED: &str = "Delete failed";

// ============================================================================
// Actions and commands
// ============================================================================

/// Kind of mutating request in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

/// User intents and request outcomes
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetField { field: Field, value: String },
    OpenEdit(Product),
    CancelEdit,

    LoadRequested,
    LoadSucceeded { seq: u64, products: Vec<Product> },
    LoadFailed { seq: u64 },

    CreateRequested,
    CreateSucceeded,
    CreateFailed,

    UpdateRequested,
    UpdateSucceeded,
    UpdateFailed,

    DeleteRequested { id: ProductId },
    DeleteSucceeded { id: ProductId },
    DeleteFailed { id: ProductId },
}

impl Action {
    pub fn set_field(field: Field, value: impl Into<String>) -> Self {
        Self::SetField {
            field,
            value: value.into(),
        }
    }

    /// Whether the action is a control that the busy flag disables
    fn is_guarded(&self) -> bool {
        matches!(
            self,
            Action::OpenEdit(_)
                | Action::CancelEdit
                | Action::CreateRequested
                | Action::UpdateRequested
                | Action::DeleteRequested { .. }
        )
    }
}

/// Outbound request, one per accepted trigger
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load { seq: u64 },
    Create { payload: ProductPayload },
    Replace { id: ProductId, payload: ProductPayload },
    Remove { id: ProductId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Message for the notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Dispatch(Command),
    Notify(Notice),
    /// The collection is stale and must be re-read
    Invalidate,
}

/// Why a trigger was refused without issuing a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    Invalid(ValidationError),
    NotEditing,
}

// ============================================================================
// Transitions
// ============================================================================

/// Result of one transition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub effects: Vec<Effect>,
    pub rejected: Option<Rejection>,
}

impl Transition {
    fn effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            rejected: None,
        }
    }

    fn rejected(rejection: Rejection, effects: Vec<Effect>) -> Self {
        Self {
            effects,
            rejected: Some(rejection),
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Dispatch(cmd) => Some(cmd),
            _ => None,
        })
    }
}

// ============================================================================
// State (状态容器)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    form: FormState,
    products: Vec<Product>,
    require_image_url: bool,
    in_flight: Option<Mutation>,
    /// Sequence of the most recently issued read
    issued_seq: u64,
    /// Highest sequence that has settled, successfully or not
    settled_seq: u64,
    /// Sequence of the snapshot currently held in `products`
    applied_seq: u64,
}

impl CatalogState {
    pub fn new(require_image_url: bool) -> Self {
        Self {
            require_image_url,
            ..Default::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn draft(&self) -> &Draft {
        self.form.draft()
    }

    /// Collection cache, in server order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn in_flight(&self) -> Option<Mutation> {
        self.in_flight
    }

    /// A read is outstanding
    pub fn is_loading(&self) -> bool {
        self.settled_seq < self.issued_seq
    }

    /// Any request is outstanding; all mutating controls are disabled
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.is_loading()
    }

    pub fn create_label(&self) -> &'static str {
        if self.is_busy() { "Adding..." } else { "Add Product" }
    }

    pub fn update_label(&self) -> &'static str {
        if self.is_busy() { "Updating..." } else { "Update" }
    }

    /// Placeholder shown instead of the grid while a read is outstanding
    pub fn grid_placeholder(&self) -> Option<&'static str> {
        self.is_loading().then_some("Loading products...")
    }

    pub fn reduce(&mut self, action: Action) -> Transition {
        if action.is_guarded() && self.is_busy() {
            tracing::debug!(?action, in_flight = ?self.in_flight, "Rejected while busy");
            return Transition::rejected(Rejection::Busy, Vec::new());
        }

        match action {
            Action::SetField { field, value } => {
                self.form.set_field(field, value);
                Transition::default()
            }
            Action::OpenEdit(product) => {
                self.form.load_for_edit(&product);
                Transition::default()
            }
            Action::CancelEdit => {
                self.form.reset();
                Transition::default()
            }

            Action::LoadRequested => {
                self.issued_seq += 1;
                Transition::effects(vec![Effect::Dispatch(Command::Load {
                    seq: self.issued_seq,
                })])
            }
            Action::LoadSucceeded { seq, products } => {
                self.settle_read(seq);
                if seq > self.applied_seq {
                    self.products = products;
                    self.applied_seq = seq;
                } else {
                    tracing::debug!(seq, applied = self.applied_seq, "Dropped stale snapshot");
                }
                Transition::default()
            }
            Action::LoadFailed { seq } => {
                self.settle_read(seq);
                notify(Notice::error(MSG_LOAD_FAILED))
            }

            Action::CreateRequested => match self.validated_payload() {
                Ok(payload) => {
                    self.in_flight = Some(Mutation::Create);
                    Transition::effects(vec![Effect::Dispatch(Command::Create { payload })])
                }
                Err(rejection) => rejection,
            },
            Action::CreateSucceeded => {
                self.in_flight = None;
                self.form.reset();
                Transition::effects(vec![
                    Effect::Notify(Notice::success(MSG_CREATED)),
                    Effect::Invalidate,
                ])
            }
            Action::CreateFailed => {
                self.in_flight = None;
                notify(Notice::error(MSG_CREATE_FAILED))
            }

            Action::UpdateRequested => {
                let Some(id) = self.form.edit_target().cloned() else {
                    return Transition::rejected(Rejection::NotEditing, Vec::new());
                };
                match self.validated_payload() {
                    Ok(payload) => {
                        self.in_flight = Some(Mutation::Update);
                        Transition::effects(vec![Effect::Dispatch(Command::Replace {
                            id,
                            payload,
                        })])
                    }
                    Err(rejection) => rejection,
                }
            }
            Action::UpdateSucceeded => {
                self.in_flight = None;
                self.form.reset();
                Transition::effects(vec![
                    Effect::Notify(Notice::success(MSG_UPDATED)),
                    Effect::Invalidate,
                ])
            }
            Action::UpdateFailed => {
                self.in_flight = None;
                notify(Notice::error(MSG_UPDATE_FAILED))
            }

            Action::DeleteRequested { id } => {
                self.in_flight = Some(Mutation::Delete);
                Transition::effects(vec![Effect::Dispatch(Command::Remove { id })])
            }
            Action::DeleteSucceeded { .. } => {
                self.in_flight = None;
                Transition::effects(vec![
                    Effect::Notify(Notice::success(MSG_DELETED)),
                    Effect::Invalidate,
                ])
            }
            Action::DeleteFailed { .. } => {
                self.in_flight = None;
                notify(Notice::error(MSG_DELETE_FAILED))
            }
        }
    }

    fn settle_read(&mut self, seq: u64) {
        self.settled_seq = self.settled_seq.max(seq);
    }

    fn validated_payload(&self) -> Result<ProductPayload, Transition> {
        self.form
            .draft()
            .to_payload(self.require_image_url)
            .map_err(|err| {
                let message = match err {
                    ValidationError::MissingField(_) => MSG_REQUIRED,
                    ValidationError::InvalidPrice(_) => MSG_BAD_PRICE,
                };
                Transition::rejected(
                    Rejection::Invalid(err),
                    vec![Effect::Notify(Notice::error(message))],
                )
            })
    }
}

fn notify(notice: Notice) -> Transition {
    Transition::effects(vec![Effect::Notify(notice)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.into(),
            price: Decimal::from(3),
            description: format!("{name} description"),
            img_url: Some(format!("https://img/{id}.png")),
        }
    }

    fn fill(state: &mut CatalogState) {
        state.reduce(Action::set_field(Field::Name, "Pen"));
        state.reduce(Action::set_field(Field::Price, "10"));
        state.reduce(Action::set_field(Field::Description, "Blue pen"));
        state.reduce(Action::set_field(Field::ImageUrl, "https://img/pen.png"));
    }

    #[test]
    fn test_blank_field_rejected_without_request() {
        let mut state = CatalogState::new(true);
        state.reduce(Action::set_field(Field::Name, "Pen"));
        let t = state.reduce(Action::CreateRequested);
        assert_eq!(
            t.rejected,
            Some(Rejection::Invalid(ValidationError::MissingField(Field::Price)))
        );
        assert_eq!(t.commands().count(), 0);
        assert_eq!(t.effects, vec![Effect::Notify(Notice::error(MSG_REQUIRED))]);
        assert!(!state.is_busy());
        assert_eq!(state.draft().name, "Pen");
    }

    #[test]
    fn test_create_success_clears_draft_and_invalidates() {
        let mut state = CatalogState::new(true);
        fill(&mut state);
        let t = state.reduce(Action::CreateRequested);
        assert!(matches!(t.effects[..], [Effect::Dispatch(Command::Create { .. })]));
        assert_eq!(state.in_flight(), Some(Mutation::Create));
        assert_eq!(state.create_label(), "Adding...");

        let t = state.reduce(Action::CreateSucceeded);
        assert_eq!(
            t.effects,
            vec![
                Effect::Notify(Notice::success(MSG_CREATED)),
                Effect::Invalidate
            ]
        );
        assert!(state.draft().is_empty());
        assert!(!state.is_busy());
    }

    #[test]
    fn test_create_failure_keeps_draft() {
        let mut state = CatalogState::new(true);
        fill(&mut state);
        state.reduce(Action::CreateRequested);
        let t = state.reduce(Action::CreateFailed);
        assert_eq!(t.effects, vec![Effect::Notify(Notice::error(MSG_CREATE_FAILED))]);
        assert_eq!(state.draft().name, "Pen");
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn test_single_flight() {
        let mut state = CatalogState::new(true);
        fill(&mut state);
        state.reduce(Action::CreateRequested);

        for action in [
            Action::CreateRequested,
            Action::DeleteRequested { id: "1".into() },
            Action::OpenEdit(product("1", "Cup")),
            Action::CancelEdit,
        ] {
            let t = state.reduce(action);
            assert_eq!(t.rejected, Some(Rejection::Busy));
            assert!(t.effects.is_empty());
        }

        // typing and reads are never blocked
        assert_eq!(state.reduce(Action::set_field(Field::Name, "Pencil")).rejected, None);
        assert_eq!(state.reduce(Action::LoadRequested).commands().count(), 1);
    }

    #[test]
    fn test_update_failure_keeps_overlay_and_cache() {
        let mut state = CatalogState::new(true);
        state.reduce(Action::LoadRequested);
        state.reduce(Action::LoadSucceeded {
            seq: 1,
            products: vec![product("42", "Cup")],
        });
        state.reduce(Action::OpenEdit(product("42", "Cup")));
        state.reduce(Action::set_field(Field::Name, "Mug"));
        let before = state.draft().clone();

        let t = state.reduce(Action::UpdateRequested);
        assert!(matches!(
            &t.effects[..],
            [Effect::Dispatch(Command::Replace { id, .. })] if id.as_str() == "42"
        ));
        let t = state.reduce(Action::UpdateFailed);
        assert_eq!(t.effects, vec![Effect::Notify(Notice::error(MSG_UPDATE_FAILED))]);
        assert!(state.form().is_overlay_open());
        assert_eq!(state.draft(), &before);
        assert_eq!(state.products(), &[product("42", "Cup")]);
    }

    #[test]
    fn test_update_requires_edit_target() {
        let mut state = CatalogState::new(true);
        fill(&mut state);
        let t = state.reduce(Action::UpdateRequested);
        assert_eq!(t.rejected, Some(Rejection::NotEditing));
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_stale_snapshot_dropped() {
        let mut state = CatalogState::new(true);
        state.reduce(Action::LoadRequested); // seq 1
        state.reduce(Action::LoadRequested); // seq 2
        assert!(state.is_loading());
        assert_eq!(state.grid_placeholder(), Some("Loading products..."));

        state.reduce(Action::LoadSucceeded {
            seq: 2,
            products: vec![product("1", "New")],
        });
        assert!(!state.is_loading());
        state.reduce(Action::LoadSucceeded {
            seq: 1,
            products: vec![product("1", "Old")],
        });
        assert_eq!(state.products()[0].name, "New");
    }

    #[test]
    fn test_load_failure_keeps_cache() {
        let mut state = CatalogState::new(true);
        state.reduce(Action::LoadRequested);
        state.reduce(Action::LoadSucceeded {
            seq: 1,
            products: vec![product("1", "Cup")],
        });
        state.reduce(Action::LoadRequested);
        let t = state.reduce(Action::LoadFailed { seq: 2 });
        assert_eq!(t.effects, vec![Effect::Notify(Notice::error(MSG_LOAD_FAILED))]);
        assert_eq!(state.products().len(), 1);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_bad_price_message() {
        let mut state = CatalogState::new(false);
        fill(&mut state);
        state.reduce(Action::set_field(Field::Price, "ten"));
        let t = state.reduce(Action::CreateRequested);
        assert_eq!(t.effects, vec![Effect::Notify(Notice::error(MSG_BAD_PRICE))]);
    }

    #[test]
    fn test_delete_settles_and_invalidates() {
        let mut state = CatalogState::new(true);
        assert_eq!(state.update_label(), "Update");

        let t = state.reduce(Action::DeleteRequested { id: "7".into() });
        assert!(matches!(
            &t.effects[..],
            [Effect::Dispatch(Command::Remove { id })] if id.as_str() == "7"
        ));
        assert_eq!(state.update_label(), "Updating...");

        let t = state.reduce(Action::DeleteSucceeded { id: "7".into() });
        assert_eq!(
            t.effects,
            vec![
                Effect::Notify(Notice::success(MSG_DELETED)),
                Effect::Invalidate
            ]
        );
        assert_eq!(state.in_flight(), None);
    }
}
