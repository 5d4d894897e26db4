mod error;
mod router;
pub mod soql;
mod strategy;
mod term;
mod transport;

pub use error::{Result, RouterError};
pub use router::{QueryRouter, RouteOutcome};
pub use term::SearchTerm;
pub use transport::{QueryApi, QueryTransport, RestTransport, DEFAULT_REQUEST_TIMEOUT};
