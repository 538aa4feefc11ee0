//! Model input construction and instruction prompt loading.

pub mod builder;
pub mod instructions;

pub use builder::{MISSING_STATUS_LABEL, build_input, filter_diff_lines, is_significant_line};
pub use instructions::load_instructions;
