pub mod cache;
pub mod client;
pub mod source;

pub use cache::*;
pub use client::*;
pub use source::*;
