//! CLI plumbing for the `quill-bind` binary: argument parsing and the
//! per-file resolution driver.

pub mod args;
pub mod driver;
