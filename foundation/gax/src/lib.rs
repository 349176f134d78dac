//! Transport independent RPC plumbing shared by the BigQuery client: status codes, backoff and
//! the retry loop.

pub mod retry;
pub mod status;
