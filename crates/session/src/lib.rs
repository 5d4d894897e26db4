mod cookies;
pub mod domain;
mod error;
mod resolver;

pub use cookies::{CookieStore, MemoryCookieStore};
pub use domain::{api_host_for, is_platform_host, tab_origin, PLATFORM_SUFFIXES};
pub use error::{Result, SessionError};
pub use resolver::SessionResolver;
