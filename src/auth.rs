//! Auth-domain identifiers, scope lists, credentials, and session state.

pub mod credentials;
pub mod id;
pub mod scope;
pub mod secret;
pub mod session;

pub use credentials::*;
pub use id::*;
pub use scope::*;
pub use secret::*;
pub use session::*;
