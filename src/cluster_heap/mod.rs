/// File content stored in data region clusters
pub mod file;
