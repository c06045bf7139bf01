pub mod client;
pub mod errors;
pub mod source;
pub mod types;

pub use client::WordPressClient;
pub use errors::FetchError;
pub use source::ContentSource;
