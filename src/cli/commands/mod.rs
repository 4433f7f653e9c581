pub mod compare;
pub mod extract;
pub mod init;
