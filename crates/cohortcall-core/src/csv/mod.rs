//! CSV text handling.
//!
//! The tokenizer is deliberately permissive: spreadsheet exports from a
//! variety of tools are accepted without ever failing, and malformed quoting
//! degrades to literal characters. The writer mirrors the quoting the report
//! consumers expect.

pub mod tokenizer;
pub mod writer;

pub use tokenizer::{parse_csv, RawRow};
pub use writer::{quote_field, write_rows};
