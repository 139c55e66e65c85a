/// Classification for retry policy.
///
/// Used by the batch fetcher to decide how to respond to a provider error.
///
/// # Behavior Summary
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the request is fundamentally invalid |
/// | `WithBackoff` | Yes, sequential retries with exponential backoff, up to the configured cap |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, missing data, or a rejected credential.
    /// Retrying won't change the outcome.
    Never,

    /// Retry with exponential backoff.
    ///
    /// Used for transient errors like rate limiting (429), timeouts and
    /// network failures. Retries are sequential, never concurrent, so a
    /// struggling vendor is not hammered harder.
    WithBackoff,
}
