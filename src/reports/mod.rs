//! Output documents: JSON records and the cross-design HTML table.

mod html;
mod json;

pub use html::generate_html;
pub use json::{render_batch, render_record};
