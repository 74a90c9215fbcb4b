//! Command implementations

pub mod init;
pub mod stream;
pub mod validate;
