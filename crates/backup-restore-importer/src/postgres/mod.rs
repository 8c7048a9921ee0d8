mod extract;
mod restore;

pub use extract::{ALIVE_SSNS_QUERY, Extractor, PgExtractor};
pub use restore::{PsqlRestorer, Restorer};
