pub mod body_limit;
pub mod error_details;

pub use body_limit::content_length_limit_middleware;
pub use error_details::error_details_middleware;
