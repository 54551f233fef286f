pub mod build;
pub mod init;
pub mod list;
pub mod preview;
pub mod show;
pub mod submit;
pub mod validate;
