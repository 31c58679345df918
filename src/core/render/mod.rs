//! Output rendering for annotated articles and flow graphs

pub mod flow_export;
pub mod page;

pub use flow_export::{to_json, to_mermaid, ExportFormat};
pub use page::render_page;
