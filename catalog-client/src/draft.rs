//! Form state: the unsaved draft and the edit target.
//!
//! One draft is shared by the create form and the edit overlay. The overlay
//! is open exactly when an edit target is recorded.

use crate::error::{Field, ValidationError};
use rust_decimal::Decimal;
use shared::{Product, ProductId, ProductPayload};
use std::str::FromStr;

/// In-progress form values, all held as entered text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub price: String,
    pub description: String,
    pub img_url: String,
}

impl Draft {
    /// Copy every field of `product`; an absent image URL becomes empty text
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            img_url: product.img_url.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::Description => &self.description,
            Field::ImageUrl => &self.img_url,
        }
    }

    /// Accepts any text; the price is only parsed on submit
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Price => &mut self.price,
            Field::Description => &mut self.description,
            Field::ImageUrl => &mut self.img_url,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check required fields and convert to a wire payload.
    ///
    /// Every field is trimmed before it is checked or sent, so a field
    /// holding only whitespace counts as blank. Fields are checked in form
    /// order and the first blank one is reported.
    pub fn to_payload(&self, require_image_url: bool) -> Result<ProductPayload, ValidationError> {
        let mut required = vec![Field::Name, Field::Price, Field::Description];
        if require_image_url {
            required.push(Field::ImageUrl);
        }
        if let Some(field) = required
            .into_iter()
            .find(|f| self.get(*f).trim().is_empty())
        {
            return Err(ValidationError::MissingField(field));
        }

        let price = Decimal::from_str(self.price.trim())
            .map_err(|_| ValidationError::InvalidPrice(self.price.clone()))?;

        let img_url = Some(self.img_url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(ProductPayload {
            name: self.name.trim().to_string(),
            price,
            description: self.description.trim().to_string(),
            img_url,
        })
    }
}

/// Draft plus the id of the product being edited (none in create mode)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    draft: Draft,
    editing: Option<ProductId>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn edit_target(&self) -> Option<&ProductId> {
        self.editing.as_ref()
    }

    pub fn is_overlay_open(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Replace the whole draft with `product` and open the edit overlay
    pub fn load_for_edit(&mut self, product: &Product) {
        self.draft = Draft::from_product(product);
        self.editing = Some(product.id.clone());
    }

    /// Clear the draft and edit target, closing the overlay
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> Product {
        Product {
            id: ProductId::from("42"),
            name: "Pen".into(),
            price: Decimal::from_str("10.50").unwrap(),
            description: "Blue pen".into(),
            img_url: Some("https://img/pen.png".into()),
        }
    }

    fn filled() -> Draft {
        Draft {
            name: "Pen".into(),
            price: "10".into(),
            description: "Blue pen".into(),
            img_url: "https://img/pen.png".into(),
        }
    }

    #[test]
    fn test_load_then_reset_is_empty() {
        let mut form = FormState::new();
        form.set_field(Field::Name, "half typed");
        form.load_for_edit(&pen());
        assert!(form.is_overlay_open());
        assert_eq!(form.edit_target(), Some(&ProductId::from("42")));
        assert_eq!(form.draft().price, "10.50");
        assert_eq!(form.draft().name, "Pen");

        form.reset();
        assert!(form.draft().is_empty());
        assert!(form.edit_target().is_none());
        assert!(!form.is_overlay_open());
    }

    #[test]
    fn test_load_overwrites_every_field() {
        let mut form = FormState::new();
        form.set_field(Field::ImageUrl, "stale.png");
        let mut product = pen();
        product.img_url = None;
        form.load_for_edit(&product);
        assert_eq!(form.draft().img_url, "");
    }

    #[test]
    fn test_each_blank_field_is_reported() {
        for field in [Field::Name, Field::Price, Field::Description, Field::ImageUrl] {
            let mut draft = filled();
            draft.set(field, "   ");
            assert_eq!(
                draft.to_payload(true),
                Err(ValidationError::MissingField(field))
            );
        }
    }

    #[test]
    fn test_image_url_optional_when_not_required() {
        let mut draft = filled();
        draft.img_url.clear();
        let payload = draft.to_payload(false).unwrap();
        assert!(payload.img_url.is_none());
        assert_eq!(payload.price.to_string(), "10");
    }

    #[test]
    fn test_price_must_parse() {
        let mut draft = filled();
        draft.price = "ten".into();
        assert_eq!(
            draft.to_payload(true),
            Err(ValidationError::InvalidPrice("ten".into()))
        );
    }

    #[test]
    fn test_every_field_sent_trimmed() {
        let draft = Draft {
            name: "  Pen ".into(),
            price: " 10 ".into(),
            description: "\tBlue pen\n".into(),
            img_url: " u ".into(),
        };
        let payload = draft.to_payload(true).unwrap();
        assert_eq!(payload.name, "Pen");
        assert_eq!(payload.price.to_string(), "10");
        assert_eq!(payload.description, "Blue pen");
        assert_eq!(payload.img_url.as_deref(), Some("u"));
    }
}
