pub mod error;
pub mod inventory;
pub mod models;
pub mod playbook;
pub mod projection;
pub mod survey;
pub mod template;

pub use error::{InventoryError, PlaybookError, TemplateError};
