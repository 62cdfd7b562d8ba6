pub mod generate;
pub mod init;
pub mod schema;
pub mod snapshots;
