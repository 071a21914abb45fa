// URL handling utilities
pub mod url_parser;
pub mod query_string;

// Parsing utilities
pub mod parse_flag;
pub mod parse_int;

// Display utilities
pub mod json_converter;
pub mod status_formatter;

// Re-export all utilities for convenient access
pub use url_parser::hostname_from_url;
pub use query_string::build_query_string;
pub use parse_flag::parse_flag;
pub use parse_int::parse_form_u32;
pub use json_converter::value_to_pretty_string;
pub use status_formatter::status_badge_class;
