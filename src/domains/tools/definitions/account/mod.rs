//! Account tools.

pub mod info;

pub use info::{AccountInfoParams, AccountInfoTool};
