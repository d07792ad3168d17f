//! One module per subcommand, each exposing an `execute` function.

pub mod completions;
pub mod delete;
pub mod list;
pub mod seed;
pub mod upload;
pub mod verify;
