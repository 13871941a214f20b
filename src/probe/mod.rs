pub mod http;
pub mod status;

pub use http::{DEFAULT_TIMEOUT, HttpProbe};
pub use status::{ProbeError, StatusProbe, status_text};
