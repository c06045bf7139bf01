pub mod classifier;
pub mod redirect;

pub use classifier::{RequestHeaders, is_embedded_app_traffic};
pub use redirect::{RedirectDecision, decide, redirect_guard_middleware};
