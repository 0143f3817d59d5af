//! stmtx-core: statement page model, response validation, and account-info extraction

pub mod account_info;
pub mod statement;
pub mod validate;

pub use account_info::{AccountInfo, extract_account_info};
pub use statement::{Row, StatementPage};
pub use validate::{ValidationError, validate_pages};
