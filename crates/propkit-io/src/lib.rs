#![forbid(unsafe_code)]

mod charset;
mod config;
mod error;
mod loader;

pub use crate::charset::{Charset, CharsetChoice, CharsetError, CharsetName, resolve_charset};
pub use crate::config::{LoadOptions, load_options, load_options_or_default};
pub use crate::error::{ConfigError, LoadError, LoadResult};
pub use crate::loader::{load_bytes, load_file, load_reader, read_store};
