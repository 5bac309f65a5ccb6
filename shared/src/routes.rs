//! Catalog API routes
//!
//! Paths are relative to the deployment base URL and always start with `/`.

use urlencoding::encode;

/// List all products
pub const LIST_PRODUCTS: &str = "/get-product";

/// Create a product
pub const CREATE_PRODUCT: &str = "/post-product";

/// Route pattern for replacing a product (axum syntax)
pub const EDIT_PRODUCT: &str = "/edit-product/{id}";

/// Route pattern for removing a product (axum syntax)
pub const DELETE_PRODUCT: &str = "/product-delete/{id}";

/// Concrete path for replacing product `id` (percent-encoded)
pub fn edit_product(id: &str) -> String {
    format!("/edit-product/{}", encode(id))
}

/// Concrete path for removing product `id` (percent-encoded)
pub fn delete_product(id: &str) -> String {
    format!("/product-delete/{}", encode(id))
}
