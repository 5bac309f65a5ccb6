//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned product identifier.
///
/// Opaque to the client. Servers may emit it as a JSON string or an
/// integer; both are normalised to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
        })
    }
}

/// Product entity, as listed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Accepts a JSON number or a numeric string
    pub price: Decimal,
    /// Free-text summary, shown as the product title
    pub description: String,
    #[serde(rename = "imgUrl", default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

impl Product {
    /// Price with currency prefix, e.g. `$10.50`
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }
}

/// Create / replace payload.
///
/// Always carries every field: products are replaced, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    #[serde(rename = "imgUrl", default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

impl ProductPayload {
    /// Materialise the payload as a product with the given id
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            img_url: self.img_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_product_accepts_numeric_and_text_fields() {
        let p: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "Pen",
            "price": 10.5,
            "description": "Blue pen"
        }))
        .unwrap();
        assert_eq!(p.id.as_str(), "7");
        assert_eq!(p.price, Decimal::from_str("10.5").unwrap());
        assert!(p.img_url.is_none());

        let p: Product = serde_json::from_value(json!({
            "_id": "abc",
            "name": "Cup",
            "price": "3",
            "description": "Mug",
            "imgUrl": "https://img/cup.png"
        }))
        .unwrap();
        assert_eq!(p.id, ProductId::from("abc"));
        assert_eq!(p.img_url.as_deref(), Some("https://img/cup.png"));
        assert_eq!(p.display_price(), "$3");
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = ProductPayload {
            name: "Pen".into(),
            price: Decimal::from_str("10").unwrap(),
            description: "Blue pen".into(),
            img_url: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"name": "Pen", "price": "10", "description": "Blue pen"})
        );

        let payload = ProductPayload {
            img_url: Some("https://img/pen.png".into()),
            ..payload
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["imgUrl"], "https://img/pen.png");
    }
}
