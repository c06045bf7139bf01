pub mod dtos;
pub mod handlers;

pub use dtos::PostPage;
pub use handlers::{get_post, passthrough};
