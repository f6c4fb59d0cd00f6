//! Prelude module for scaile-server.
//!
//! ```rust
//! use scaile_server::prelude::*;
//! ```

pub use crate::handler::routes;
pub use crate::middleware::*;
pub use crate::service::*;
