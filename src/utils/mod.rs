pub mod error;
pub mod hex_text;
pub mod logger;
pub mod validation;
