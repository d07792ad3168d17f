pub mod cli;
pub mod config;
pub mod credentials;
pub mod encoder;
pub mod environment;
pub mod errors;
pub mod gh;
pub mod transcode;
pub mod transfer;
