pub mod args;
pub mod compile;
pub mod completions;
pub mod options;
