pub mod alert;
pub mod button;
pub mod card;
pub mod form_field;
pub mod input;
pub mod native_select;
pub mod spinner;
pub mod textarea;

// Callers import from `crate::components::ui` directly.
pub use alert::*;
pub use button::*;
pub use card::*;
pub use form_field::*;
pub use input::*;
pub use native_select::*;
pub use spinner::*;
pub use textarea::*;
