/// How an error should be surfaced to the host.
///
/// No component in this crate retries; the class only tells the caller
/// whether the failure is the user's to fix, a passing upstream condition,
/// or a bug in the provider's own configuration.
///
/// | Class | Caused by | Retrying later helps? |
/// |-------|-----------|-----------------------|
/// | `UserFacing` | bad symbol, no data for date, bad params | No |
/// | `Transient` | upstream down, timeout, bad status | Maybe |
/// | `Fatal` | calendar or schema bug | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request itself cannot be served as asked.
    /// Report the message to the user verbatim.
    UserFacing,

    /// The upstream venue could not be reached or answered with an error.
    /// The same request may succeed later.
    Transient,

    /// An internal invariant failed (e.g. the holiday calendar never
    /// converged). Treat as a configuration bug.
    Fatal,
}
