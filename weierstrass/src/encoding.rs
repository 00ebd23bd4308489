//! Binary point encodings.
//!
//! Decoding runs in two stages: a format specific decoder recovers raw
//! coordinates, then one shared step validates them.

use crate::{
    Error, Result,
    curve::{Curve, Mode},
    field::{CurveField, CurveScalar},
    point::Point,
    point_arithmetic::is_zero,
};
use alloc::{vec, vec::Vec};
use elliptic_curve::ff::Field;

/// ETH "compressed" flag.
const C_FLAG: u8 = 0x80;

/// ETH "infinity" flag.
const B_FLAG: u8 = 0x40;

/// ETH "sign of y" flag.
const A_FLAG: u8 = 0x20;

/// Binary point encodings.
///
/// `N` is [`CurveField::BYTE_SIZE`]; field elements are big endian.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Format {
    /// `'4' || X || Y || Z` in the curve's coordinate system, not normalized.
    /// Decoding checks the point like [`Point::check`].
    Projective,

    /// `'1' || x || y`, or `'0'` alone for the identity.
    AffinePair,

    /// `x || y` without a tag, all zero for the identity. Unavailable on
    /// curves with `b = 0`, where `(0, 0)` is a finite point.
    AffineRaw,

    /// `'2' || x` or `'3' || x` for even or odd `y`, or `'0'` alone for the
    /// identity.
    Compressed,

    /// `N` bytes with the parity of `y` in the top bit if the field leaves it
    /// unused and `b != 0`, otherwise `2` or `3` followed by `N` bytes. All
    /// zero for the identity.
    ///
    /// When the parity sits in the top bit, a finite point with `x = 0` and
    /// even `y` also encodes as all zero and decodes as the identity.
    Fixed,

    /// Zcash/Ethereum style: `N` bytes of `x` whose top three bits carry the
    /// compressed (`0x80`), infinity (`0x40`) and sign of `y` (`0x20`) flags.
    Eth,
}

/// Validation still owed by decoded coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Check {
    /// Affine curve equation, then subgroup order.
    Equation,

    /// Subgroup order only; `y` was derived from the curve equation.
    Order,

    /// [`Point::check`].
    Full,
}

/// Output of a format specific decoder.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Decoded<F> {
    Identity,
    Raw { x: F, y: F, z: F, check: Check },
}

impl<F, S> Curve<F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Length of the encoding of a finite point.
    pub fn serialized_len(&self, format: Format) -> usize {
        let n = F::BYTE_SIZE;
        match format {
            Format::Projective => 1 + 3 * n,
            Format::AffinePair => 1 + 2 * n,
            Format::AffineRaw => 2 * n,
            Format::Compressed => 1 + n,
            Format::Fixed => n + self.fixed_adj(),
            Format::Eth => n,
        }
    }

    /// Whether [`Format::Fixed`] needs a leading parity byte.
    fn fixed_adj(&self) -> usize {
        if !is_zero(&self.b) && F::BIT_SIZE % 8 != 0 {
            0
        } else {
            1
        }
    }

    /// Decode and validate a point.
    ///
    /// Fails with [`Error::InvalidEncoding`] on a wrong length, a bad tag or
    /// flag byte, a non-canonical field element or an `x` without a matching
    /// `y`, and with [`Error::InvalidPoint`] or [`Error::InvalidOrder`] if
    /// the coordinates fail validation.
    pub fn decode(&self, bytes: &[u8], format: Format) -> Result<Point<'_, F, S>> {
        let result = self
            .decode_coordinates(bytes, format)
            .and_then(|decoded| self.validate(decoded));

        if let Err(err) = &result {
            tracing::trace!(?format, len = bytes.len(), %err, "rejected point encoding");
        }

        result
    }

    fn decode_coordinates(&self, bytes: &[u8], format: Format) -> Result<Decoded<F>> {
        let n = F::BYTE_SIZE;

        match format {
            Format::Projective => {
                if bytes.len() != 1 + 3 * n || bytes[0] != b'4' {
                    return Err(Error::InvalidEncoding);
                }
                let x = read_fe(&bytes[1..1 + n])?;
                let y = read_fe(&bytes[1 + n..1 + 2 * n])?;
                let z = read_fe(&bytes[1 + 2 * n..])?;
                self.projective_coordinates(x, y, z)
            }
            Format::AffinePair => match bytes.first() {
                Some(b'0') if bytes.len() == 1 => Ok(Decoded::Identity),
                Some(b'1') if bytes.len() == 1 + 2 * n => Ok(Decoded::Raw {
                    x: read_fe(&bytes[1..1 + n])?,
                    y: read_fe(&bytes[1 + n..])?,
                    z: F::ONE,
                    check: Check::Equation,
                }),
                _ => Err(Error::InvalidEncoding),
            },
            Format::AffineRaw => {
                if is_zero(&self.b) || bytes.len() != 2 * n {
                    return Err(Error::InvalidEncoding);
                }
                let x = read_fe::<F>(&bytes[..n])?;
                let y = read_fe::<F>(&bytes[n..])?;
                if is_zero(&x) && is_zero(&y) {
                    return Ok(Decoded::Identity);
                }
                Ok(Decoded::Raw {
                    x,
                    y,
                    z: F::ONE,
                    check: Check::Equation,
                })
            }
            Format::Compressed => match bytes.first() {
                Some(b'0') if bytes.len() == 1 => Ok(Decoded::Identity),
                Some(&tag @ (b'2' | b'3')) if bytes.len() == 1 + n => {
                    self.decompress(read_fe(&bytes[1..])?, tag == b'3')
                }
                _ => Err(Error::InvalidEncoding),
            },
            Format::Fixed => {
                let adj = self.fixed_adj();
                if bytes.len() != n + adj {
                    return Err(Error::InvalidEncoding);
                }
                if bytes.iter().all(|&b| b == 0) {
                    return Ok(Decoded::Identity);
                }

                if adj == 1 {
                    let odd = match bytes[0] {
                        2 => false,
                        3 => true,
                        _ => return Err(Error::InvalidEncoding),
                    };
                    self.decompress(read_fe(&bytes[1..])?, odd)
                } else {
                    let mut buf = bytes.to_vec();
                    let odd = buf[0] & 0x80 != 0;
                    buf[0] &= 0x7f;
                    self.decompress(read_fe(&buf)?, odd)
                }
            }
            Format::Eth => {
                if bytes.len() != n {
                    return Err(Error::InvalidEncoding);
                }

                let flags = bytes[0];
                if flags & C_FLAG == 0 {
                    return Err(Error::InvalidEncoding);
                }
                if flags & B_FLAG != 0 {
                    if flags != C_FLAG | B_FLAG || bytes[1..].iter().any(|&b| b != 0) {
                        return Err(Error::InvalidEncoding);
                    }
                    return Ok(Decoded::Identity);
                }

                let negative = flags & A_FLAG != 0;
                let mut buf = bytes.to_vec();
                buf[0] &= !(C_FLAG | B_FLAG | A_FLAG);
                let x = read_fe::<F>(&buf)?;

                let mut y: F =
                    Option::from(self.weierstrass(&x).sqrt()).ok_or(Error::InvalidEncoding)?;
                if bool::from(y.is_negative()) != negative {
                    y = -y;
                }

                Ok(Decoded::Raw {
                    x,
                    y,
                    z: F::ONE,
                    check: Check::Order,
                })
            }
        }
    }

    /// Raw coordinates in this curve's coordinate system.
    pub(crate) fn projective_coordinates(&self, x: F, y: F, z: F) -> Result<Decoded<F>> {
        if is_zero(&z) {
            return Ok(Decoded::Identity);
        }
        if self.mode == Mode::Affine && z != F::ONE {
            return Err(Error::InvalidPoint);
        }
        Ok(Decoded::Raw {
            x,
            y,
            z,
            check: Check::Full,
        })
    }

    /// Recover `y` of the given parity.
    pub(crate) fn decompress(&self, x: F, odd: bool) -> Result<Decoded<F>> {
        let y = self.y_from_x(&x, odd).ok_or(Error::InvalidEncoding)?;
        Ok(Decoded::Raw {
            x,
            y,
            z: F::ONE,
            check: Check::Order,
        })
    }

    /// Shared validation of decoded coordinates.
    pub(crate) fn validate(&self, decoded: Decoded<F>) -> Result<Point<'_, F, S>> {
        let (x, y, z, check) = match decoded {
            Decoded::Identity => return Ok(self.identity()),
            Decoded::Raw { x, y, z, check } => (x, y, z, check),
        };

        let point = Point::from_raw(self, x, y, z);
        match check {
            Check::Full => point.check()?,
            Check::Equation => {
                if !point.is_on_curve_affine() {
                    return Err(Error::InvalidPoint);
                }
                self.check_order(&point)?;
            }
            Check::Order => self.check_order(&point)?,
        }

        Ok(point)
    }

    fn check_order(&self, point: &Point<'_, F, S>) -> Result<()> {
        if self.verify_order && !point.is_in_subgroup() {
            return Err(Error::InvalidOrder);
        }
        Ok(())
    }
}

impl<F, S> Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Encode this point.
    ///
    /// Fails with [`Error::InvalidEncoding`] for [`Format::AffineRaw`] on a
    /// curve with `b = 0`, and for [`Format::Eth`] if the field leaves no room
    /// for the flag bits.
    pub fn encode(&self, format: Format) -> Result<Vec<u8>> {
        let n = F::BYTE_SIZE;
        let curve = self.curve;
        let affine = match format {
            Format::Projective => None,
            _ => self.to_affine(),
        };

        let out = match format {
            Format::Projective => {
                let mut out = vec![0u8; 1 + 3 * n];
                out[0] = b'4';
                self.x.to_be_bytes(&mut out[1..1 + n]);
                self.y.to_be_bytes(&mut out[1 + n..1 + 2 * n]);
                self.z.to_be_bytes(&mut out[1 + 2 * n..]);
                out
            }
            Format::AffinePair => match affine {
                None => vec![b'0'],
                Some((x, y)) => {
                    let mut out = vec![0u8; 1 + 2 * n];
                    out[0] = b'1';
                    x.to_be_bytes(&mut out[1..1 + n]);
                    y.to_be_bytes(&mut out[1 + n..]);
                    out
                }
            },
            Format::AffineRaw => {
                if is_zero(&curve.b) {
                    return Err(Error::InvalidEncoding);
                }
                let mut out = vec![0u8; 2 * n];
                if let Some((x, y)) = affine {
                    x.to_be_bytes(&mut out[..n]);
                    y.to_be_bytes(&mut out[n..]);
                }
                out
            }
            Format::Compressed => match affine {
                None => vec![b'0'],
                Some((x, y)) => {
                    let mut out = vec![0u8; 1 + n];
                    out[0] = if bool::from(y.is_odd()) { b'3' } else { b'2' };
                    x.to_be_bytes(&mut out[1..]);
                    out
                }
            },
            Format::Fixed => {
                let adj = curve.fixed_adj();
                let mut out = vec![0u8; n + adj];
                if let Some((x, y)) = affine {
                    let odd = bool::from(y.is_odd());
                    x.to_be_bytes(&mut out[adj..]);
                    if adj == 1 {
                        out[0] = 2 + u8::from(odd);
                    } else if odd {
                        out[0] |= 0x80;
                    }
                }
                out
            }
            Format::Eth => {
                let mut out = vec![0u8; n];
                match affine {
                    None => out[0] = C_FLAG | B_FLAG,
                    Some((x, y)) => {
                        x.to_be_bytes(&mut out);
                        if out[0] & (C_FLAG | B_FLAG | A_FLAG) != 0 {
                            return Err(Error::InvalidEncoding);
                        }
                        out[0] |= C_FLAG;
                        if bool::from(y.is_negative()) {
                            out[0] |= A_FLAG;
                        }
                    }
                }
                out
            }
        };

        Ok(out)
    }

    /// Decode into this point. On failure the point is cleared and `false`
    /// is returned.
    pub fn load(&mut self, bytes: &[u8], format: Format) -> bool {
        match self.curve.decode(bytes, format) {
            Ok(p) => {
                *self = p;
                true
            }
            Err(_) => {
                self.clear();
                false
            }
        }
    }
}

fn read_fe<F: CurveField>(bytes: &[u8]) -> Result<F> {
    Option::from(F::from_be_bytes(bytes)).ok_or(Error::InvalidEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        curve::init_curve,
        dev::{
            BLS12_381_G1, Bls12Fp, Bls12Fr, SECP256K1, Secp256k1Fp, Secp256k1Fr, TOY, ToyFp, ToyFr,
        },
    };
    use hex_literal::hex;
    use num_bigint::BigUint;

    const FORMATS: [Format; 6] = [
        Format::Projective,
        Format::AffinePair,
        Format::AffineRaw,
        Format::Compressed,
        Format::Fixed,
        Format::Eth,
    ];

    fn toy(mode: Mode) -> Curve<ToyFp, ToyFr> {
        init_curve(&TOY, mode).unwrap()
    }

    #[test]
    fn round_trips() {
        for mode in [Mode::Jacobi, Mode::Projective, Mode::Affine] {
            let curve = toy(mode);
            let g = curve.generator().unwrap();
            let points = [curve.identity(), g, -g, g.double() + g, g.mul_i64(100)];

            for format in FORMATS {
                for p in &points {
                    let bytes = p.encode(format).unwrap();
                    if !p.is_identity() {
                        assert_eq!(bytes.len(), curve.serialized_len(format));
                    }
                    let q = curve.decode(&bytes, format).unwrap();
                    assert_eq!(&q, p, "{format:?} {mode:?}");
                }
            }
        }
    }

    #[test]
    fn toy_vectors() {
        let curve = toy(Mode::Jacobi);
        let g = curve.generator().unwrap();

        // G = (391, 8), -G = (391, 1001)
        assert_eq!(g.encode(Format::Compressed).unwrap(), hex!("32 0187"));
        assert_eq!((-g).encode(Format::Compressed).unwrap(), hex!("33 0187"));
        assert_eq!(g.encode(Format::AffinePair).unwrap(), hex!("31 0187 0008"));
        assert_eq!(g.encode(Format::AffineRaw).unwrap(), hex!("0187 0008"));
        assert_eq!(g.encode(Format::Fixed).unwrap(), hex!("0187"));
        assert_eq!((-g).encode(Format::Fixed).unwrap(), hex!("8187"));
        assert_eq!(g.encode(Format::Eth).unwrap(), hex!("8187"));
        assert_eq!((-g).encode(Format::Eth).unwrap(), hex!("a187"));
        assert_eq!(curve.identity().encode(Format::Eth).unwrap(), hex!("c000"));
        assert_eq!(curve.identity().encode(Format::Fixed).unwrap(), hex!("0000"));
        assert_eq!(curve.identity().encode(Format::Compressed).unwrap(), b"0");
    }

    #[test]
    fn projective_is_not_normalized() {
        let curve = toy(Mode::Projective);
        let g = curve.generator().unwrap();
        let p = g.double();
        let bytes = p.encode(Format::Projective).unwrap();
        let q = curve.decode(&bytes, Format::Projective).unwrap();
        assert_eq!((q.x, q.y, q.z), (p.x, p.y, p.z));
    }

    #[test]
    fn rejects_wrong_length() {
        let curve = toy(Mode::Jacobi);
        let g = curve.generator().unwrap();

        for format in FORMATS {
            let mut bytes = g.encode(format).unwrap();
            bytes.push(0);
            assert_eq!(curve.decode(&bytes, format), Err(Error::InvalidEncoding));
            bytes.truncate(bytes.len() - 2);
            assert_eq!(curve.decode(&bytes, format), Err(Error::InvalidEncoding));
        }

        assert_eq!(curve.decode(&[], Format::Compressed), Err(Error::InvalidEncoding));
        assert_eq!(curve.decode(b"00", Format::AffinePair), Err(Error::InvalidEncoding));
    }

    #[test]
    fn rejects_bad_tags_and_flags() {
        let curve = toy(Mode::Jacobi);
        assert_eq!(curve.decode(&hex!("34 0187"), Format::Compressed), Err(Error::InvalidEncoding));
        assert_eq!(
            curve.decode(&hex!("32 0187 0008"), Format::AffinePair),
            Err(Error::InvalidEncoding)
        );
        assert_eq!(
            curve.decode(&hex!("31 0187 0008 0001"), Format::Projective),
            Err(Error::InvalidEncoding)
        );

        // missing compression flag
        assert_eq!(curve.decode(&hex!("0187"), Format::Eth), Err(Error::InvalidEncoding));
        // infinity with sign, or with trailing data
        assert_eq!(curve.decode(&hex!("e000"), Format::Eth), Err(Error::InvalidEncoding));
        assert_eq!(curve.decode(&hex!("c001"), Format::Eth), Err(Error::InvalidEncoding));
    }

    #[test]
    fn rejects_non_canonical_coordinates() {
        let curve = toy(Mode::Jacobi);
        // 0x03f1 = 1009 is the modulus
        assert_eq!(curve.decode(&hex!("32 03f1"), Format::Compressed), Err(Error::InvalidEncoding));
        assert_eq!(
            curve.decode(&hex!("31 03f1 0008"), Format::AffinePair),
            Err(Error::InvalidEncoding)
        );
    }

    #[test]
    fn rejects_non_residue() {
        // x³ + 2x + 7 is not a square for x = 2
        let curve = toy(Mode::Jacobi);
        assert_eq!(curve.decode(&hex!("32 0002"), Format::Compressed), Err(Error::InvalidEncoding));
        assert_eq!(curve.decode(&hex!("0002"), Format::Fixed), Err(Error::InvalidEncoding));
        assert_eq!(curve.decode(&hex!("8002"), Format::Eth), Err(Error::InvalidEncoding));
    }

    #[test]
    fn rejects_off_curve_points() {
        let curve = toy(Mode::Jacobi);
        assert_eq!(
            curve.decode(&hex!("31 0187 0009"), Format::AffinePair),
            Err(Error::InvalidPoint)
        );
        assert_eq!(curve.decode(&hex!("0187 0009"), Format::AffineRaw), Err(Error::InvalidPoint));
        assert_eq!(
            curve.decode(&hex!("34 0187 0009 0001"), Format::Projective),
            Err(Error::InvalidPoint)
        );

        let affine = toy(Mode::Affine);
        assert_eq!(
            affine.decode(&hex!("34 0187 0008 0002"), Format::Projective),
            Err(Error::InvalidPoint)
        );
    }

    #[test]
    fn subgroup_verification() {
        let mut curve = toy(Mode::Jacobi);
        // (0, 45) generates the whole group of order 3 * 349
        let full = hex!("32 0000");
        // order 3
        let encoded: Vec<_> = {
            let t = curve.point_unchecked(ToyFp::from(471), ToyFp::from(159));
            FORMATS
                .iter()
                .map(|&format| (format, t.encode(format).unwrap()))
                .collect()
        };

        assert!(curve.decode(&full, Format::Compressed).is_ok());
        for (format, bytes) in &encoded {
            assert!(curve.decode(bytes, *format).is_ok(), "{format:?}");
        }

        curve.set_order(BigUint::from(349u32));
        assert!(curve.verifies_order());
        for (format, bytes) in &encoded {
            assert_eq!(curve.decode(bytes, *format), Err(Error::InvalidOrder), "{format:?}");
        }
        assert_eq!(curve.decode(&full, Format::Compressed), Err(Error::InvalidOrder));

        curve.set_order(BigUint::from(0u32));
        assert!(!curve.verifies_order());
        assert!(curve.decode(&full, Format::Compressed).is_ok());
        for (format, bytes) in &encoded {
            assert!(curve.decode(bytes, *format).is_ok(), "{format:?}");
        }
    }

    #[test]
    fn fixed_encoding_aliases_zero_x_with_identity() {
        let curve = toy(Mode::Projective);
        let p = curve.point(ToyFp::ZERO, ToyFp::from(964)).unwrap();
        assert!(!p.is_identity());

        let bytes = p.encode(Format::Fixed).unwrap();
        assert_eq!(bytes, curve.identity().encode(Format::Fixed).unwrap());
        assert!(curve.decode(&bytes, Format::Fixed).unwrap().is_identity());

        // the odd root keeps its parity bit
        let q = -p;
        assert_eq!(curve.decode(&q.encode(Format::Fixed).unwrap(), Format::Fixed), Ok(q));
    }

    #[test]
    fn load_clears_on_failure() {
        let curve = toy(Mode::Projective);
        let g = curve.generator().unwrap();
        let bytes = g.encode(Format::Compressed).unwrap();

        let mut p = g.double();
        assert!(p.load(&bytes, Format::Compressed));
        assert_eq!(p, g);

        assert!(!p.load(&hex!("32 0002"), Format::Compressed));
        assert!(p.is_identity());
    }

    #[test]
    fn affine_raw_needs_nonzero_b() {
        let curve = init_curve::<Secp256k1Fp, Secp256k1Fr>(&SECP256K1, Mode::Jacobi).unwrap();
        let g = curve.generator().unwrap();
        assert!(g.encode(Format::AffineRaw).is_ok());

        let zero_b = Curve::<ToyFp, ToyFr>::parse_coefficients("1", "0", Mode::Jacobi).unwrap();
        let p = zero_b.identity();
        assert_eq!(p.encode(Format::AffineRaw), Err(Error::InvalidEncoding));
        assert_eq!(zero_b.decode(&[0; 4], Format::AffineRaw), Err(Error::InvalidEncoding));
        // the fixed format falls back to a parity byte
        assert_eq!(zero_b.serialized_len(Format::Fixed), 3);
    }

    #[test]
    fn fixed_width_with_parity_byte() {
        // 256-bit field: no spare top bit
        let curve = init_curve::<Secp256k1Fp, Secp256k1Fr>(&SECP256K1, Mode::Jacobi).unwrap();
        let g = curve.generator().unwrap();
        let bytes = g.encode(Format::Fixed).unwrap();
        assert_eq!(bytes.len(), 33);
        let compressed = g.encode(Format::Compressed).unwrap();
        assert_eq!(bytes[0], compressed[0] - b'0');
        assert_eq!(bytes[1..], compressed[1..]);
        assert_eq!(curve.decode(&bytes, Format::Fixed).unwrap(), g);
        assert_eq!(curve.decode(&[0; 33], Format::Fixed).unwrap(), curve.identity());
    }

    #[test]
    fn eth_g1_generator() {
        let curve = init_curve::<Bls12Fp, Bls12Fr>(&BLS12_381_G1, Mode::Jacobi).unwrap();
        let g = curve.generator().unwrap();
        let bytes = g.encode(Format::Eth).unwrap();
        assert_eq!(
            bytes,
            hex!(
                "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
            )
        );
        assert_eq!(curve.decode(&bytes, Format::Eth).unwrap(), g);
        assert_eq!((-g).encode(Format::Eth).unwrap()[0], 0xb7);
    }
}
