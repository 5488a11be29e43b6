//! Form control implementations for formkit.

pub mod helpers;
pub mod select;

pub use helpers::{create_select_box, RenderItem, SelectBoxOptions};
pub use select::SelectBox;
