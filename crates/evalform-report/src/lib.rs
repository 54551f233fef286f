//! evalform-report: renders evaluation forms for review.

pub mod html;

pub use html::{generate_html, write_html_preview};
