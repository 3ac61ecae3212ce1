/// D-Bus proxy trait definitions
pub mod proxy;
/// Session-bus player source
pub mod source;

pub use proxy::*;
pub use source::*;
