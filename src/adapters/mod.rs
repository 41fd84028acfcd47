// Adapters layer: concrete implementations for the network, the filesystem and the terminal.

pub mod archive;
pub mod http;
pub mod prompt;
pub mod workspace;
