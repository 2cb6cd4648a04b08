pub mod directory;

pub use directory::{ClientError, DirectoryClient};
