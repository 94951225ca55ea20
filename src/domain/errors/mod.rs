mod storage_errors;
mod upload_errors;
mod validation_errors;

pub use storage_errors::*;
pub use upload_errors::*;
pub use validation_errors::*;
