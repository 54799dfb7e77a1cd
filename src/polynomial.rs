use crate::field::Gf256;
use rand::{CryptoRng, RngCore};

/// Represents a polynomial over the Galois field GF(2^8).
///
/// Coefficients are stored lowest degree first, so `coefficients[0]` is the
/// constant term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    /// The coefficients of the polynomial, where each coefficient is an element of GF(2^8).
    pub coefficients: Vec<Gf256>,
}

impl Polynomial {
    /// Constructs a polynomial of the given degree whose constant term is
    /// `constant` and whose remaining coefficients are drawn from `rng`.
    ///
    /// Consumes exactly `degree` bytes of randomness. Random coefficients may
    /// be zero, including the leading one.
    ///
    /// # Arguments
    ///
    /// * `constant` - The constant term, typically one byte of the secret.
    /// * `degree` - The degree of the polynomial (threshold - 1).
    /// * `rng` - A cryptographically secure randomness source.
    pub fn random<R: RngCore + CryptoRng>(constant: Gf256, degree: usize, rng: &mut R) -> Self {
        let mut random = vec![0u8; degree];
        rng.fill_bytes(&mut random);

        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(constant);
        coefficients.extend(random.into_iter().map(Gf256::new));

        Polynomial { coefficients }
    }

    /// The degree of the polynomial as stored, counting zero leading coefficients.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `x` using Horner's method.
    ///
    /// # Returns
    ///
    /// The value of the polynomial at point `x`.
    pub fn evaluate(&self, x: Gf256) -> Gf256 {
        self.coefficients
            .iter()
            .rev()
            .fold(Gf256::ZERO, |acc, &coeff| acc * x + coeff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_constant_term_is_kept() {
        let mut rng = StdRng::seed_from_u64(7);
        for secret in 0..=255u8 {
            let poly = Polynomial::random(Gf256(secret), 4, &mut rng);
            assert_eq!(poly.coefficients.len(), 5);
            assert_eq!(poly.coefficients[0], Gf256(secret));
            assert_eq!(poly.evaluate(Gf256::ZERO), Gf256(secret));
        }
    }

    #[test]
    fn test_evaluate_matches_power_sum() {
        let mut rng = StdRng::seed_from_u64(42);
        let poly = Polynomial::random(Gf256(0x2a), 6, &mut rng);

        for x in 0..=255u8 {
            let x = Gf256(x);
            let mut expected = Gf256::ZERO;
            let mut term = Gf256::ONE;
            for &coeff in &poly.coefficients {
                expected += coeff * term;
                term *= x;
            }
            assert_eq!(poly.evaluate(x), expected);
        }
    }

    #[test]
    fn test_known_polynomial() {
        // f(x) = 3 + 2x + x^2
        let poly = Polynomial {
            coefficients: vec![Gf256(3), Gf256(2), Gf256(1)],
        };
        assert_eq!(poly.evaluate(Gf256(1)), Gf256(3 ^ 2 ^ 1));
        assert_eq!(poly.evaluate(Gf256(2)), Gf256(3) + Gf256(2) * Gf256(2) + Gf256(4));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let poly = Polynomial::random(Gf256(1), 3, &mut rng);
        let first: Vec<_> = (1..=255u8).map(|x| poly.evaluate(Gf256(x))).collect();
        let second: Vec<_> = (1..=255u8).map(|x| poly.evaluate(Gf256(x))).collect();
        assert_eq!(first, second);

        let mut rng = StdRng::seed_from_u64(99);
        let again = Polynomial::random(Gf256(1), 3, &mut rng);
        assert_eq!(poly, again);
    }

    #[test]
    fn test_degree() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Polynomial::random(Gf256(5), 1, &mut rng).degree(), 1);
        assert_eq!(Polynomial::random(Gf256(5), 254, &mut rng).degree(), 254);
    }
}
