//! Field element contracts consumed by the group arithmetic.
//!
//! The base field `F` of a curve and its scalar field `S` are supplied by the
//! caller. Beyond [`Field`], the group law only needs a handful of extra
//! operations: a canonical byte encoding, parity, sign and a text form.

use alloc::{string::String, vec};
use core::cmp::Ordering;
use elliptic_curve::{
    ff::Field,
    subtle::{Choice, CtOption},
};
use num_bigint::BigUint;

/// Radix of the text representation of field elements.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Radix {
    /// Base 10.
    #[default]
    Decimal,

    /// Base 16, written without a prefix. A leading `0x` is accepted when
    /// reading.
    Hex,
}

impl Radix {
    pub(crate) fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }
}

/// Base field of a curve.
pub trait CurveField: Field {
    /// Characteristic of the underlying prime field, hex encoded.
    const MODULUS: &'static str;

    /// Number of bytes written by [`CurveField::to_be_bytes`].
    const BYTE_SIZE: usize;

    /// Bit size of the underlying prime field.
    const BIT_SIZE: u32;

    /// Embed a small integer.
    fn from_u64(value: u64) -> Self;

    /// Write the canonical big endian encoding into `out`, which must be
    /// exactly [`CurveField::BYTE_SIZE`] bytes long.
    fn to_be_bytes(&self, out: &mut [u8]);

    /// Parse the canonical big endian encoding.
    ///
    /// Fails on a wrong length or a value which isn't fully reduced.
    fn from_be_bytes(bytes: &[u8]) -> CtOption<Self>;

    /// Parity of the canonical integer representative.
    fn is_odd(&self) -> Choice;

    /// Sign as used by the ETH point encoding.
    ///
    /// For a prime field this is `self > (p - 1) / 2`. Extension fields report
    /// the sign of the component defining the encoding, not of the whole value.
    fn is_negative(&self) -> Choice;

    /// Order on canonical encodings.
    fn compare(&self, other: &Self) -> Ordering {
        let mut lhs = vec![0u8; Self::BYTE_SIZE];
        let mut rhs = vec![0u8; Self::BYTE_SIZE];
        self.to_be_bytes(&mut lhs);
        other.to_be_bytes(&mut rhs);
        lhs.cmp(&rhs)
    }

    /// Convert an integer, failing if it doesn't fit the canonical encoding.
    fn from_uint(value: &BigUint) -> Option<Self> {
        let bytes = value.to_bytes_be();
        if bytes.len() > Self::BYTE_SIZE {
            return None;
        }

        let mut buf = vec![0u8; Self::BYTE_SIZE];
        buf[Self::BYTE_SIZE - bytes.len()..].copy_from_slice(&bytes);
        Self::from_be_bytes(&buf).into()
    }

    /// Append the text form to `out`.
    ///
    /// Elements made of several components separate them with `separator`.
    fn write_text(&self, radix: Radix, separator: char, out: &mut String) {
        let _ = separator;
        let mut buf = vec![0u8; Self::BYTE_SIZE];
        self.to_be_bytes(&mut buf);
        out.push_str(&BigUint::from_bytes_be(&buf).to_str_radix(radix.base()));
    }

    /// Read the text form from already separated tokens.
    fn read_text<'a, I>(tokens: &mut I, radix: Radix) -> Option<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = tokens.next()?;
        let digits = match radix {
            Radix::Decimal => token,
            Radix::Hex => token.strip_prefix("0x").unwrap_or(token),
        };
        let value = BigUint::parse_bytes(digits.as_bytes(), radix.base())?;
        Self::from_uint(&value)
    }
}

/// Scalar field of a curve, i.e. integers modulo the prime subgroup order.
pub trait CurveScalar: Field {
    /// Field modulus, hex encoded.
    const MODULUS: &'static str;

    /// Bit size of the modulus.
    const NUM_BITS: u32;

    /// Canonical integer representative.
    fn to_biguint(&self) -> BigUint;

    /// Reduce an integer into the field.
    fn from_biguint(value: &BigUint) -> Self;
}
