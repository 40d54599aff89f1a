//! quick-xml backed output.

pub mod sink;
pub mod utils;

pub use sink::QuickXmlSink;
