// crates/core/src/lib.rs
pub mod datetime;
pub mod request;
pub mod response;
pub mod result;

pub use datetime::*;
pub use request::*;
pub use response::*;
pub use result::*;
