//! Parsers for the upstream list formats.

mod stream_list;
mod text;

pub use stream_list::{extract_plain_domains, rewrite_stream_list, StreamListRewrite};
pub use text::CategoryParser;
