use crate::error::{Error, Result};
use lazy_static::lazy_static;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

/// Irreducible polynomial x^8 + x^4 + x^3 + x^2 + 1.
pub const POLYNOMIAL: u16 = 0x11d;

/// Primitive element used to walk the multiplicative group.
pub const GENERATOR: u8 = 0x02;

/// Log and exp tables for GF(2^8) multiplication and division.
struct Tables {
    log: [u8; 256],
    exp: [u8; 255],
}

impl Tables {
    fn new() -> Self {
        let mut log = [0u8; 256];
        let mut exp = [0u8; 255];

        let mut val: u8 = 1;
        for (i, slot) in exp.iter_mut().enumerate() {
            *slot = val;
            log[val as usize] = i as u8;
            val = mul_slow(val, GENERATOR);
        }

        Tables { log, exp }
    }
}

lazy_static! {
    static ref TABLES: Tables = Tables::new();
}

/// Carry-less multiplication reduced by `POLYNOMIAL`. Only used to build the tables.
fn mul_slow(mut a: u8, mut b: u8) -> u8 {
    let mut product: u8 = 0;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= (POLYNOMIAL & 0xff) as u8;
        }
        b >>= 1;
    }
    product
}

/// An element of the Galois field GF(2^8).
///
/// Addition and subtraction are both XOR. Multiplication and division go
/// through the process-wide log/exp tables, which are built on first use and
/// never written again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gf256(pub u8);

impl Gf256 {
    pub const ZERO: Gf256 = Gf256(0);
    pub const ONE: Gf256 = Gf256(1);

    pub fn new(value: u8) -> Self {
        Gf256(value)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Divides `self` by `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] when `rhs` is zero.
    pub fn checked_div(self, rhs: Gf256) -> Result<Gf256> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Gf256::ZERO);
        }
        let tables = &*TABLES;
        let log_a = tables.log[self.0 as usize] as usize;
        let log_b = tables.log[rhs.0 as usize] as usize;
        Ok(Gf256(tables.exp[(log_a + 255 - log_b) % 255]))
    }

    /// Multiplicative inverse.
    pub fn inverse(self) -> Result<Gf256> {
        Gf256::ONE.checked_div(self)
    }
}

impl From<u8> for Gf256 {
    fn from(value: u8) -> Self {
        Gf256(value)
    }
}

impl From<Gf256> for u8 {
    fn from(value: Gf256) -> Self {
        value.0
    }
}

impl fmt::Display for Gf256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Add for Gf256 {
    type Output = Gf256;

    fn add(self, rhs: Gf256) -> Gf256 {
        Gf256(self.0 ^ rhs.0)
    }
}

impl AddAssign for Gf256 {
    fn add_assign(&mut self, rhs: Gf256) {
        *self = *self + rhs;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Gf256 {
    type Output = Gf256;

    fn sub(self, rhs: Gf256) -> Gf256 {
        Gf256(self.0 ^ rhs.0)
    }
}

impl SubAssign for Gf256 {
    fn sub_assign(&mut self, rhs: Gf256) {
        *self = *self - rhs;
    }
}

impl Mul for Gf256 {
    type Output = Gf256;

    fn mul(self, rhs: Gf256) -> Gf256 {
        if self.is_zero() || rhs.is_zero() {
            return Gf256::ZERO;
        }
        let tables = &*TABLES;
        let log_sum = tables.log[self.0 as usize] as usize + tables.log[rhs.0 as usize] as usize;
        Gf256(tables.exp[log_sum % 255])
    }
}

impl MulAssign for Gf256 {
    fn mul_assign(&mut self, rhs: Gf256) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_xor_and_self_inverse() {
        assert_eq!(Gf256(0x53) + Gf256(0xca), Gf256(0x53 ^ 0xca));
        for a in 0..=255u8 {
            assert_eq!(Gf256(a) + Gf256(a), Gf256::ZERO);
            assert_eq!(Gf256(a) - Gf256(a), Gf256::ZERO);
        }
    }

    #[test]
    fn test_generator_reduction() {
        // 0x80 * 2 overflows into x^8 and must reduce by the polynomial.
        assert_eq!(Gf256(0x80) * Gf256(GENERATOR), Gf256(0x1d));
    }

    #[test]
    fn test_tables_cover_multiplicative_group() {
        let tables = &*TABLES;
        let mut seen = [false; 256];
        for &e in tables.exp.iter() {
            assert!(!seen[e as usize], "generator is not primitive");
            seen[e as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_mul_identity_and_zero() {
        for a in 0..=255u8 {
            assert_eq!(Gf256(a) * Gf256::ONE, Gf256(a));
            assert_eq!(Gf256(a) * Gf256::ZERO, Gf256::ZERO);
            assert_eq!(Gf256::ZERO * Gf256(a), Gf256::ZERO);
        }
    }

    #[test]
    fn test_mul_matches_slow_path() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(Gf256(a) * Gf256(b), Gf256(mul_slow(a, b)));
            }
        }
    }

    #[test]
    fn test_mul_matches_gf256_crate() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                let expected: u8 = (gf256::gf256::new(a) * gf256::gf256::new(b)).into();
                assert_eq!(u8::from(Gf256(a) * Gf256(b)), expected);
            }
        }
    }

    #[test]
    fn test_div_inverts_mul() {
        for a in 0..=255u8 {
            for b in 1..=255u8 {
                let product = Gf256(a) * Gf256(b);
                assert_eq!(product.checked_div(Gf256(b)).unwrap(), Gf256(a));
            }
        }
    }

    #[test]
    fn test_div_zero_numerator() {
        for b in 1..=255u8 {
            assert_eq!(Gf256::ZERO.checked_div(Gf256(b)).unwrap(), Gf256::ZERO);
        }
    }

    #[test]
    fn test_div_by_zero() {
        for a in 0..=255u8 {
            assert!(matches!(
                Gf256(a).checked_div(Gf256::ZERO),
                Err(Error::DivisionByZero)
            ));
        }
        assert!(matches!(Gf256::ZERO.inverse(), Err(Error::DivisionByZero)));
    }

    #[test]
    fn test_inverse() {
        for a in 1..=255u8 {
            let inv = Gf256(a).inverse().unwrap();
            assert_eq!(Gf256(a) * inv, Gf256::ONE);
        }
    }

    #[test]
    fn test_distributive() {
        for a in (0..=255u8).step_by(7) {
            for b in (0..=255u8).step_by(11) {
                for c in (0..=255u8).step_by(13) {
                    let (a, b, c) = (Gf256(a), Gf256(b), Gf256(c));
                    assert_eq!(a * (b + c), a * b + a * c);
                }
            }
        }
    }
}
