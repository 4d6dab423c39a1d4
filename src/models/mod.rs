pub mod academy;

pub use academy::{Branch, PersonRecord, Role};
