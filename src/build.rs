mod converter;
mod directives;
mod markup;
mod page;
mod paths;
mod pipeline;
mod substitute;

pub use converter::{ConvertError, ConvertOptions, ConvertResult, Converter};
pub use substitute::Rule;
