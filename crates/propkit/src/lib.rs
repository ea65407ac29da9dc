#![forbid(unsafe_code)]

pub use propkit_core::{
    ParseSummary, PropertySink, PropertyStore, parse_lines, parse_str, split_lines,
};
pub use propkit_io::{
    Charset, CharsetChoice, CharsetError, CharsetName, ConfigError, LoadError, LoadOptions,
    LoadResult, load_bytes, load_file, load_options, load_options_or_default, load_reader,
    read_store, resolve_charset,
};
