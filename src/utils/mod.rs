pub mod file_uri;
pub mod paths;
pub mod unicode;
