//! The login handshake and session token operations.
//!
//! Cronometer has no public API; this reproduces what the browser does. The
//! handshake is ordered and stateful: each step feeds the next, and any
//! failure aborts the remaining steps without touching previously stored
//! identity.

mod login;
mod token;
