pub mod health_handlers;
pub mod upload_handlers;

pub use health_handlers::*;
pub use upload_handlers::*;
