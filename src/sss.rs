use crate::error::{Error, Result};
use crate::field::Gf256;
use crate::polynomial::Polynomial;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;

/// Largest number of shares a single split can produce: one per nonzero field element.
pub const MAX_SHARES: usize = 255;

/// Smallest usable threshold. A threshold of one would publish the secret in every share.
pub const MIN_THRESHOLD: usize = 2;

/// One share of a split secret.
///
/// `data[p]` is the evaluation of the polynomial for byte position `p` at
/// the point `id`. On the wire the identifier travels as a trailing tag
/// byte, see [`Share::to_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// The nonzero x-coordinate this share was evaluated at.
    pub id: u8,
    /// One evaluation per byte of the secret.
    pub data: Vec<u8>,
}

impl Share {
    /// Serializes the share as its data bytes followed by the identifier byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() + 1);
        bytes.extend_from_slice(&self.data);
        bytes.push(self.id);
        bytes
    }

    /// Parses a share laid out as by [`Share::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedShareSet`] if the buffer holds fewer than two
    /// bytes or the identifier tag is zero.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Some((&id, data)) = bytes.split_last() else {
            return Err(Error::malformed("share is empty"));
        };
        if data.is_empty() {
            return Err(Error::malformed("share must be at least two bytes"));
        }
        if id == 0 {
            return Err(Error::malformed("share identifier must be nonzero"));
        }
        Ok(Share {
            id,
            data: data.to_vec(),
        })
    }
}

/// Splits a secret into `parts` shares, any `threshold` of which rebuild it.
///
/// Randomness comes from the operating system.
///
/// # Examples
/// ```rust
/// use sharesplit::sss::{combine_shares, split_secret};
///
/// let secret = b"hello world";
/// let shares = split_secret(secret, 5, 3).unwrap();
/// assert_eq!(shares.len(), 5);
///
/// let recovered = combine_shares(&shares[1..4]).unwrap();
/// assert_eq!(recovered, secret);
/// ```
pub fn split_secret(secret: &[u8], parts: usize, threshold: usize) -> Result<Vec<Share>> {
    split_secret_with_rng(secret, parts, threshold, &mut OsRng)
}

/// Splits a secret using the supplied randomness source.
///
/// Share identifiers are `1..=parts`. Every byte position gets its own
/// polynomial of degree `threshold - 1`, so exactly
/// `secret.len() * (threshold - 1)` random bytes are drawn.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] before drawing any randomness if the
/// secret is empty, `threshold` is below 2, `parts` is above 255, or
/// `threshold` is above `parts`.
pub fn split_secret_with_rng<R: RngCore + CryptoRng>(
    secret: &[u8],
    parts: usize,
    threshold: usize,
    rng: &mut R,
) -> Result<Vec<Share>> {
    validate_split(secret, parts, threshold)?;
    debug!(
        parts,
        threshold,
        secret_len = secret.len(),
        "splitting secret"
    );

    let mut shares: Vec<Share> = (1..=parts as u8)
        .map(|id| Share {
            id,
            data: Vec::with_capacity(secret.len()),
        })
        .collect();

    for &byte in secret {
        let poly = Polynomial::random(Gf256::new(byte), threshold - 1, rng);
        for share in shares.iter_mut() {
            share.data.push(poly.evaluate(Gf256::new(share.id)).into());
        }
    }

    Ok(shares)
}

fn validate_split(secret: &[u8], parts: usize, threshold: usize) -> Result<()> {
    if secret.is_empty() {
        return Err(Error::invalid_parameters("cannot split an empty secret"));
    }
    if threshold < MIN_THRESHOLD {
        return Err(Error::invalid_parameters(format!(
            "threshold must be at least {MIN_THRESHOLD}, got {threshold}"
        )));
    }
    if parts > MAX_SHARES {
        return Err(Error::invalid_parameters(format!(
            "parts cannot exceed {MAX_SHARES}, got {parts}"
        )));
    }
    if threshold > parts {
        return Err(Error::invalid_parameters(format!(
            "threshold {threshold} cannot exceed parts {parts}"
        )));
    }
    Ok(())
}

/// Rebuilds a secret from a set of shares.
///
/// The shares may come in any order. There is no integrity check: fewer than
/// the original threshold, shares from different splits, or tampered shares
/// all yield a byte string of the right length that has nothing to do with
/// the secret, and no error is reported.
///
/// # Errors
///
/// Returns [`Error::MalformedShareSet`] if the set is empty, the shares
/// differ in length or are empty, or identifiers are zero or repeated.
pub fn combine_shares(shares: &[Share]) -> Result<Vec<u8>> {
    let secret_len = validate_combine(shares)?;
    debug!(shares = shares.len(), secret_len, "combining shares");

    let xs: Vec<Gf256> = shares.iter().map(|s| Gf256::new(s.id)).collect();
    let weights = lagrange_weights(&xs, Gf256::ZERO)?;

    let secret = (0..secret_len)
        .map(|p| {
            u8::from(
                shares
                    .iter()
                    .zip(&weights)
                    .fold(Gf256::ZERO, |acc, (share, &w)| {
                        acc + w * Gf256::new(share.data[p])
                    }),
            )
        })
        .collect();

    Ok(secret)
}

fn validate_combine(shares: &[Share]) -> Result<usize> {
    let first = shares
        .first()
        .ok_or_else(|| Error::malformed("no shares supplied"))?;
    let secret_len = first.data.len();
    if secret_len == 0 {
        return Err(Error::malformed("shares carry no data"));
    }

    let mut seen = [false; 256];
    for share in shares {
        if share.data.len() != secret_len {
            return Err(Error::malformed(format!(
                "all shares must be the same length, got {} and {}",
                secret_len,
                share.data.len()
            )));
        }
        if share.id == 0 {
            return Err(Error::malformed("share identifier must be nonzero"));
        }
        if seen[share.id as usize] {
            return Err(Error::malformed(format!(
                "duplicate share identifier {}",
                share.id
            )));
        }
        seen[share.id as usize] = true;
    }

    Ok(secret_len)
}

/// Lagrange basis weights for the points `xs` evaluated at `x`.
///
/// `weights[i] = Π_{j≠i} (x - xs[j]) / (xs[i] - xs[j])`. They only depend on
/// the identifiers, so one set serves every byte position.
fn lagrange_weights(xs: &[Gf256], x: Gf256) -> Result<Vec<Gf256>> {
    xs.iter()
        .enumerate()
        .map(|(i, &x_i)| {
            xs.iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .try_fold(Gf256::ONE, |weight, (_, &x_j)| -> Result<Gf256> {
                    Ok(weight * (x - x_j).checked_div(x_i - x_j)?)
                })
        })
        .collect()
}

/// Performs Lagrange interpolation on a set of points to find the value of
/// the polynomial through them at `x`.
///
/// # Errors
///
/// Returns [`Error::DivisionByZero`] if two points share an x-coordinate.
///
/// # Examples
///
/// ```rust
/// use sharesplit::field::Gf256;
/// use sharesplit::sss::interpolate;
///
/// // A line through (1, 5) and (2, 10) evaluated back at 1.
/// let points = [(Gf256(1), Gf256(5)), (Gf256(2), Gf256(10))];
/// assert_eq!(interpolate(&points, Gf256(1)).unwrap(), Gf256(5));
/// ```
pub fn interpolate(points: &[(Gf256, Gf256)], x: Gf256) -> Result<Gf256> {
    let xs: Vec<Gf256> = points.iter().map(|&(x_i, _)| x_i).collect();
    let weights = lagrange_weights(&xs, x)?;
    Ok(points
        .iter()
        .zip(weights)
        .fold(Gf256::ZERO, |acc, (&(_, y), w)| acc + w * y))
}

/// Splits a secret into opaque byte buffers, each the share data followed by
/// its identifier byte. Every buffer is `secret.len() + 1` bytes long.
pub fn split(secret: &[u8], parts: usize, threshold: usize) -> Result<Vec<Vec<u8>>> {
    Ok(split_secret(secret, parts, threshold)?
        .iter()
        .map(Share::to_bytes)
        .collect())
}

/// Rebuilds a secret from buffers produced by [`split`].
pub fn combine<B: AsRef<[u8]>>(parts: &[B]) -> Result<Vec<u8>> {
    let shares = parts
        .iter()
        .map(|part| Share::from_bytes(part.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    combine_shares(&shares)
}

/// https://en.wikipedia.org/wiki/Proactive_secret_sharing#Mathematics
///
/// Generates a refresh key: one polynomial per byte position, each with a
/// zero constant term, so adding its evaluations to a set of shares changes
/// every share without changing the secret.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] if `threshold` is below 2 or above 255.
pub fn generate_refresh_key<R: RngCore + CryptoRng>(
    threshold: usize,
    secret_len: usize,
    rng: &mut R,
) -> Result<Vec<Polynomial>> {
    if threshold < MIN_THRESHOLD {
        return Err(Error::invalid_parameters(format!(
            "threshold must be at least {MIN_THRESHOLD}, got {threshold}"
        )));
    }
    if threshold > MAX_SHARES {
        return Err(Error::invalid_parameters(format!(
            "threshold cannot exceed {MAX_SHARES}, got {threshold}"
        )));
    }

    Ok((0..secret_len)
        .map(|_| Polynomial::random(Gf256::ZERO, threshold - 1, rng))
        .collect())
}

/// Refreshes a single share with a key from [`generate_refresh_key`].
///
/// Every holder of a share set must apply the same key for the set to stay
/// consistent.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] if the share is empty or its length
/// differs from the number of polynomials in the key.
pub fn refresh_share(share: &mut Share, refresh_key: &[Polynomial]) -> Result<()> {
    if share.data.is_empty() {
        return Err(Error::invalid_parameters("cannot refresh an empty share"));
    }
    if share.data.len() != refresh_key.len() {
        return Err(Error::invalid_parameters(format!(
            "share length {} does not match refresh key length {}",
            share.data.len(),
            refresh_key.len()
        )));
    }

    let x = Gf256::new(share.id);
    for (y, poly) in share.data.iter_mut().zip(refresh_key) {
        *y = (Gf256::new(*y) + poly.evaluate(x)).into();
    }

    Ok(())
}

/// Refreshes a whole share set in place with a freshly drawn key.
///
/// `threshold` must be the one the set was split with. A larger one raises
/// the degree of every polynomial, so the supplied shares would no longer
/// be enough to restore the secret.
///
/// # Errors
///
/// Returns [`Error::InvalidParameters`] for a threshold below 2 or above the
/// number of shares, and [`Error::MalformedShareSet`] if the shares cannot
/// form a set. Shares are left untouched on error.
pub fn refresh_shares<R: RngCore + CryptoRng>(
    shares: &mut [Share],
    threshold: usize,
    rng: &mut R,
) -> Result<()> {
    let secret_len = validate_combine(shares)?;
    if threshold > shares.len() {
        return Err(Error::invalid_parameters(format!(
            "threshold {threshold} cannot exceed the {} shares supplied",
            shares.len()
        )));
    }
    let refresh_key = generate_refresh_key(threshold, secret_len, rng)?;
    debug!(shares = shares.len(), threshold, "refreshing shares");

    for share in shares.iter_mut() {
        refresh_share(share, &refresh_key)?;
    }
    Ok(())
}
