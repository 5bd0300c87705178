//! Collaborator contracts defined in `alquiler-core` and implemented by
//! other crates (or by the embedding UI).

pub mod date_picker;
pub mod identity;

pub use date_picker::{DatePicker, FixedDatePicker, SystemDatePicker};
pub use identity::IdentityProvider;
