//! Caboose-number search engine.
//!
//! A caboose number is a positive integer c for which the Euler polynomial
//! n² − n + c is prime for every n in [0, c). The crate provides the three
//! layers of that computation, leaves first:
//!
//! - [`arith`] — overflow-safe modular exponentiation (u128 intermediates and
//!   Montgomery form for a fixed modulus).
//! - [`primality`] — deterministic Miller-Rabin over the full u64 range.
//! - [`caboose`] — the tiled parallel search with ascending emission.
//!
//! [`progress`] carries the atomic counters behind the background status
//! reporter used by the CLI.

pub mod arith;
pub mod caboose;
pub mod primality;
pub mod progress;
