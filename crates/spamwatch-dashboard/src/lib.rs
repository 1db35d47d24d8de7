pub mod cli;
pub mod client;
pub mod examples;
pub mod server;

pub use cli::*;
pub use client::*;
pub use examples::*;
pub use server::*;
