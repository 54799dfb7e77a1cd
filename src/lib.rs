//! # Threshold Secret Sharing over GF(2^8)
//!
//! This library implements Shamir's Secret Sharing (SSS) for arbitrary byte strings, plus the
//! small amount of plumbing a command-line tool needs around it: a text encoding for shares,
//! input reading, and layered configuration.
//!
//! ## Shamir's Secret Sharing (SSS)
//!
//! A secret is divided into `n` shares such that any `k` of them rebuild it exactly, while any
//! `k - 1` of them reveal nothing about it.
//!
//! ### The Mathematics Behind SSS
//!
//! Each byte `S` of the secret is shared on its own. The algorithm picks a random polynomial of
//! degree `k-1` over GF(2^8):
//!
//! ```ignore
//! f(x) = a0 + a1*x + a2*x^2 + ... + a(k-1)*x^(k-1)
//! ```
//!
//! where `a0 = S` and `a1, ..., a(k-1)` are random bytes. Share `i` holds `f(i)` for every byte
//! position, tagged with `i`. With at least `k` points Lagrange interpolation at `x = 0` gives
//! back `a0`.
//!
//! Reconstruction performs no integrity check. Too few shares, shares from different splits, or
//! corrupted shares still produce a byte string of the right length, just not the secret.
//!
//! ### Proactive Refresh
//!
//! Shares can be refreshed without changing the secret by adding the evaluations of random
//! polynomials whose constant term is zero. Old and refreshed shares cannot be mixed.
//!
//! ### Example: Splitting and Combining
//!
//! ```rust
//! use sharesplit::sss::{combine, split};
//!
//! let parts = split(b"correct horse battery staple", 5, 3).unwrap();
//! assert_eq!(parts.len(), 5);
//!
//! let secret = combine(&[&parts[0], &parts[2], &parts[4]]).unwrap();
//! assert_eq!(secret, b"correct horse battery staple");
//! ```
//!
//! ### Example: Deterministic Shares for Tests
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use sharesplit::sss::split_secret_with_rng;
//!
//! let a = split_secret_with_rng(b"seeded", 4, 2, &mut StdRng::seed_from_u64(1)).unwrap();
//! let b = split_secret_with_rng(b"seeded", 4, 2, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(a, b);
//! ```

/// The `field` module implements GF(2^8) arithmetic on top of log/exp tables that are built once
/// per process and only read afterwards.
pub mod field;

/// The `polynomial` module evaluates polynomials over GF(2^8) and draws random ones with a fixed
/// constant term from an injected randomness source.
pub mod polynomial;

/// The `sss` (Shamir's Secret Sharing) module splits secrets into shares, combines shares back
/// into secrets, and refreshes share sets.
pub mod sss;

/// The `codec` module converts shares to and from line-based hex text.
pub mod codec;

/// The `config` module loads split defaults from a config file and the environment.
pub mod config;

/// The `error` module defines the crate-wide error type.
pub mod error;

/// The `util` module reads command input from a file or a pipe.
pub mod util;

pub use error::{Error, Result};
