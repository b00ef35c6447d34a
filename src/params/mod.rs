//! Named parameter extraction and validation
//!
//! Report SQL refers to its inputs with `:name` placeholders. This module
//! finds them while ignoring anything inside comments and string literals,
//! and compares what it finds against a declared parameter list.
//!
//! The pipeline is linear: [`sanitize`] → [`extract_params`] →
//! [`validate_params`]. Every function here is pure and never fails.

mod extractor;
mod sanitizer;
mod validator;

pub use extractor::{extract_params, extract_params_opt};
pub use sanitizer::{sanitize, sanitize_opt};
pub use validator::{is_params_match, validate_params, validate_params_opt, ParamValidation};
