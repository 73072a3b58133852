pub mod http_lookup;
pub mod lookup;
pub mod metrics;

pub use http_lookup::HttpCardLookup;
pub use lookup::{CardLookup, LookupError, LookupResponse};
pub use metrics::{get_metrics, init_metrics, record_lookup};
