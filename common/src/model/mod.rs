pub mod certificate;
pub mod document;
pub mod field;
pub mod template;
