//! Input loading module

pub mod json;
pub mod files;
