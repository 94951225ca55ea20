pub mod object;
pub mod signing;
pub mod upload;

pub use object::*;
pub use signing::*;
pub use upload::*;
