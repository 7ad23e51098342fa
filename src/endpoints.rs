//! The API endpoint URIs.

/// The route that fetches the seed dataset and bulk-loads it into the store.
pub const INITIALIZE: &str = "/initialize";
/// The route for paginated transaction search.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the combined monthly statistics.
pub const MONTHLY_DATA: &str = "/data";
