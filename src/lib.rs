//! shapeguard - A strict, synchronous runtime data-validation engine
//!
//! Build a schema once, then validate untrusted JSON against it as often
//! as needed, from any thread:
//!
//! ```
//! use shapeguard::prelude::*;
//! use serde_json::json;
//!
//! let user = object(
//!     Shape::new()
//!         .field("name", string().trim().min(1))
//!         .field("age", number().int().min(0.0).optional()),
//! );
//!
//! let result = user.validate(&json!({"name": "  Ada ", "extra": true}));
//! assert!(result.is_valid());
//! ```

pub mod patterns;
pub mod schema;

/// Factory functions, schema traits and result types
pub mod prelude {
    pub use crate::patterns::IpVersion;
    pub use crate::schema::{
        array, boolean, date, enumeration, literal, number, object, string, AnySchema,
        BoolishConfig, DateValue, Input, Modifiable, Resolved, Schema, SchemaError, Shape,
        ValidationResult,
    };
}
