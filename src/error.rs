//! Error type shared across the crate.
//!
//! The teacher propagates `&'static str` everywhere (`ensure!` in its `helpers.rs`). That reads
//! fine for a single scheme with one failure mode per call site, but named error kinds let
//! callers branch on what went wrong without string matching, so this crate uses a small
//! `no_std`-compatible enum instead.

use core::fmt;

/// Everything that can go wrong calling into this crate.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A byte slice handed to a decode/deserialize routine was the wrong length.
    InvalidLength,
    /// A numeric parameter (compression depth, security level) was out of its valid range.
    InvalidParameter,
    /// Internal: an operation received operands from mismatched NTT/normal domains.
    ///
    /// The public API is typed so this can't actually be constructed by callers; it's kept as a
    /// named variant because distinguishing it is part of the interface contract, even though
    /// `poly.rs`'s domain markers make it unreachable in practice.
    DomainMismatch,
    /// Internal: a vector/matrix operation received operands of mismatched length `K`.
    ShapeMismatch,
    /// The supplied or system randomness source failed to produce output.
    RandomnessFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidLength => "byte slice has the wrong length for this operation",
            Error::InvalidParameter => "parameter is out of its valid range",
            Error::DomainMismatch => "operands come from mismatched NTT/normal domains",
            Error::ShapeMismatch => "vector or matrix operands have mismatched dimension",
            Error::RandomnessFailure => "randomness source failed",
        };
        f.write_str(msg)
    }
}
