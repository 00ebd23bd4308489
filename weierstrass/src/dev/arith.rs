//! Big integer arithmetic modulo a prime, backing the `dev` field types.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Decode a hex string into a right aligned big endian array.
pub(crate) const fn decode_hex<const N: usize>(hex: &str) -> [u8; N] {
    let hex = hex.as_bytes();
    let mut out = [0u8; N];
    let mut i = hex.len();
    let mut j = N;

    while i > 0 {
        assert!(j > 0, "hex value does not fit");
        j -= 1;
        let lo = nibble(hex[i - 1]);
        let hi = if i >= 2 { nibble(hex[i - 2]) } else { 0 };
        out[j] = (hi << 4) | lo;
        i = i.saturating_sub(2);
    }

    out
}

const fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

/// Number of significant bits of a big endian integer.
pub(crate) const fn bit_length(bytes: &[u8]) -> u32 {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != 0 {
            return (bytes.len() - i) as u32 * 8 - bytes[i].leading_zeros();
        }
        i += 1;
    }
    0
}

pub(crate) fn to_uint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encode `value`, which must be below `2^(8N)`.
pub(crate) fn to_array<const N: usize>(value: &BigUint) -> [u8; N] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(&bytes);
    out
}

pub(crate) fn add<const N: usize>(a: &[u8; N], b: &[u8; N], m: &[u8; N]) -> [u8; N] {
    to_array(&((to_uint(a) + to_uint(b)) % to_uint(m)))
}

pub(crate) fn sub<const N: usize>(a: &[u8; N], b: &[u8; N], m: &[u8; N]) -> [u8; N] {
    let m = to_uint(m);
    to_array(&((to_uint(a) + &m - to_uint(b)) % &m))
}

pub(crate) fn mul<const N: usize>(a: &[u8; N], b: &[u8; N], m: &[u8; N]) -> [u8; N] {
    to_array(&((to_uint(a) * to_uint(b)) % to_uint(m)))
}

pub(crate) fn neg<const N: usize>(a: &[u8; N], m: &[u8; N]) -> [u8; N] {
    let a = to_uint(a);
    if a.is_zero() {
        return [0u8; N];
    }
    to_array(&(to_uint(m) - a))
}

/// Inversion by Fermat's little theorem; `m` must be prime.
pub(crate) fn invert<const N: usize>(a: &[u8; N], m: &[u8; N]) -> Option<[u8; N]> {
    let a = to_uint(a);
    if a.is_zero() {
        return None;
    }
    let m = to_uint(m);
    let e = &m - 2u32;
    Some(to_array(&a.modpow(&e, &m)))
}

/// Reduce an arbitrary length big endian integer.
pub(crate) fn reduce<const N: usize>(wide: &[u8], m: &[u8; N]) -> [u8; N] {
    to_array(&(to_uint(wide) % to_uint(m)))
}

/// Whether `a < m`, both big endian of the same length.
pub(crate) fn is_canonical(a: &[u8], m: &[u8]) -> bool {
    a.len() == m.len() && a < m
}

/// Whether `a > (m - 1) / 2`.
pub(crate) fn is_negative<const N: usize>(a: &[u8; N], m: &[u8; N]) -> bool {
    let half = (to_uint(m) - 1u32) >> 1;
    to_uint(a) > half
}

/// Square root modulo a prime by Tonelli-Shanks.
pub(crate) fn sqrt<const N: usize>(a: &[u8; N], m: &[u8; N]) -> Option<[u8; N]> {
    let a = to_uint(a);
    let p = to_uint(m);
    sqrt_uint(&a, &p).map(|r| to_array(&r))
}

fn sqrt_uint(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    if a.is_zero() {
        return Some(BigUint::zero());
    }

    let one = BigUint::one();
    let p_minus_one = p - &one;
    let legendre = &p_minus_one >> 1;

    if a.modpow(&legendre, p) != one {
        return None;
    }

    if (p % 4u32) == BigUint::from(3u32) {
        return Some(a.modpow(&((p + &one) >> 2), p));
    }

    let s = p_minus_one.trailing_zeros()?;
    let q = &p_minus_one >> s;

    let mut z = BigUint::from(2u32);
    while z.modpow(&legendre, p) == one {
        z += 1u32;
    }

    let mut m = s;
    let mut c = z.modpow(&q, p);
    let mut t = a.modpow(&q, p);
    let mut r = a.modpow(&((&q + &one) >> 1), p);

    while t != one {
        let mut i = 0u64;
        let mut t2 = t.clone();
        while t2 != one {
            t2 = &t2 * &t2 % p;
            i += 1;
        }

        let b = c.modpow(&(BigUint::one() << (m - i - 1)), p);
        m = i;
        c = &b * &b % p;
        t = t * &c % p;
        r = r * &b % p;
    }

    Some(r)
}
