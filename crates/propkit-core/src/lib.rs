#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod parser;
mod sink;
mod store;

pub use parser::{ParseSummary, parse_lines, parse_str, split_lines};
pub use sink::PropertySink;
pub use store::PropertyStore;
