//! Filing document parsing: Form 4 ownership transactions and long-form
//! narrative sections.

mod model;
mod parse;

pub use model::{
    FilingSection, OwnerRole, OwnershipTransaction, ParsedFiling, SectionName, TransactionCode,
};
pub use parse::parse;
