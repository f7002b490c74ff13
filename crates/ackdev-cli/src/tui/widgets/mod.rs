//! Interactive widgets shared by the views.
//!
//! Widgets only know their own state. They turn key events into local
//! changes, a "changed" report, or a deferred intent; the owning view decides
//! what that means for the document.

pub mod button;
pub mod row_table;
pub mod text_field;

pub use button::{Button, ButtonId};
pub use row_table::RowTable;
pub use text_field::TextField;
