//! Build flows backed by external toolchains

pub mod docker;
