//! Interactive terminal form for filing a support ticket

pub mod components;
pub mod form;
pub mod theme;

pub use form::{FormField, SupportForm, SupportFormProps};
pub use theme::Theme;
