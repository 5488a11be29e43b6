//! formkit: server-side HTML form controls.
//!
//! Re-exports the core types, the controls and the manifest parser, and
//! adds [`Form`] for loading, validating and rendering a set of controls.
//!
//! ```
//! use formkit::{controls::SelectBox, OptionSet};
//!
//! let mut select = SelectBox::new("fruit");
//! select
//!     .set_options(OptionSet::from_flat([("a", "Apple"), ("b", "Banana")]), true)
//!     .set_prompt("Choose");
//! select.load_http_data(Some("b"));
//! select.validate();
//! assert!(!select.has_errors());
//! assert!(select.render().to_string().contains(r#"<option value="b" selected>Banana</option>"#));
//! ```

pub use formkit_controls as controls;
pub use formkit_core::*;
pub use formkit_yaml as yaml;

mod form;

pub use form::Form;
