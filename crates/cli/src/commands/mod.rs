//! CLI Commands

pub mod check;
pub mod fmt;
pub mod parse;
pub mod tokens;
