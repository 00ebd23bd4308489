//! Text point encodings.
//!
//! The text forms mirror the binary tags: `0` for the identity, `1 x y`,
//! `2 x` / `3 x` and `4 X Y Z`, with field elements in the curve's
//! [`Radix`](crate::Radix) and tokens split by its separator.

use crate::{
    Error, Result,
    curve::{Curve, TextForm},
    encoding::{Check, Decoded},
    field::{CurveField, CurveScalar},
    point::Point,
};
use alloc::string::String;
use core::fmt;
use elliptic_curve::ff::Field;

impl<F, S> fmt::Display for Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.curve.text;
        let (radix, sep) = (text.radix, text.separator);
        let mut out = String::new();

        if text.form == TextForm::Projective {
            out.push('4');
            for c in [&self.x, &self.y, &self.z] {
                out.push(sep);
                c.write_text(radix, sep, &mut out);
            }
            return f.write_str(&out);
        }

        match self.to_affine() {
            None => out.push('0'),
            Some((x, y)) if text.form == TextForm::Compressed => {
                out.push(if bool::from(y.is_odd()) { '3' } else { '2' });
                out.push(sep);
                x.write_text(radix, sep, &mut out);
            }
            Some((x, y)) => {
                out.push('1');
                out.push(sep);
                x.write_text(radix, sep, &mut out);
                out.push(sep);
                y.write_text(radix, sep, &mut out);
            }
        }

        f.write_str(&out)
    }
}

impl<F, S> Curve<F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Parse and validate the text form of a point.
    ///
    /// Tokens may be separated by the configured separator or whitespace.
    pub fn parse(&self, s: &str) -> Result<Point<'_, F, S>> {
        let result = self
            .parse_coordinates(s)
            .and_then(|decoded| self.validate(decoded));

        if let Err(err) = &result {
            tracing::trace!(len = s.len(), %err, "rejected point text");
        }

        result
    }

    fn parse_coordinates(&self, s: &str) -> Result<Decoded<F>> {
        let radix = self.text.radix;
        let sep = self.text.separator;
        let mut tokens = s
            .split(|c: char| c == sep || c.is_whitespace())
            .filter(|t| !t.is_empty());

        let read = |tokens: &mut _| F::read_text(tokens, radix).ok_or(Error::InvalidEncoding);

        let decoded = match tokens.next() {
            Some("0") => Decoded::Identity,
            Some("1") => Decoded::Raw {
                x: read(&mut tokens)?,
                y: read(&mut tokens)?,
                z: F::ONE,
                check: Check::Equation,
            },
            Some(tag @ ("2" | "3")) => self.decompress(read(&mut tokens)?, tag == "3")?,
            Some("4") => {
                let x = read(&mut tokens)?;
                let y = read(&mut tokens)?;
                let z = read(&mut tokens)?;
                self.projective_coordinates(x, y, z)?
            }
            _ => return Err(Error::InvalidEncoding),
        };

        if tokens.next().is_some() {
            return Err(Error::InvalidEncoding);
        }

        Ok(decoded)
    }
}

impl<F, S> Point<'_, F, S>
where
    F: CurveField,
    S: CurveScalar,
{
    /// Parse into this point. On failure the point is cleared and `false` is
    /// returned.
    pub fn load_str(&mut self, s: &str) -> bool {
        match self.curve.parse(s) {
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

#[cfg(test)]
mod tests {
    use crate::{
        Error, Radix,
        curve::{Curve, Mode, TextForm, TextMode, init_curve},
        dev::{TOY, ToyFp, ToyFr},
    };
    use alloc::string::ToString;

    fn toy(mode: Mode) -> Curve<ToyFp, ToyFr> {
        init_curve(&TOY, mode).unwrap()
    }

    #[test]
    fn display_forms() {
        let mut curve = toy(Mode::Jacobi);
        assert_eq!(curve.identity().to_string(), "0");
        assert_eq!(curve.generator().unwrap().to_string(), "1 391 8");

        curve.set_text_mode(TextMode {
            form: TextForm::Compressed,
            ..TextMode::default()
        });
        assert_eq!(curve.generator().unwrap().to_string(), "2 391");
        assert_eq!((-curve.generator().unwrap()).to_string(), "3 391");

        curve.set_text_mode(TextMode {
            form: TextForm::Projective,
            radix: Radix::Hex,
            separator: ':',
        });
        assert_eq!(curve.generator().unwrap().to_string(), "4:187:8:1");
        assert_eq!(curve.identity().to_string(), "4:0:0:0");
    }

    #[test]
    fn parse_round_trips() {
        for form in [TextForm::Affine, TextForm::Compressed, TextForm::Projective] {
            for radix in [Radix::Decimal, Radix::Hex] {
                let mut curve = toy(Mode::Projective);
                curve.set_text_mode(TextMode {
                    form,
                    radix,
                    separator: ',',
                });
                let g = curve.generator().unwrap();
                for p in [curve.identity(), g, g.double(), -g.mul_i64(5)] {
                    let s = p.to_string();
                    assert_eq!(curve.parse(&s).unwrap(), p, "{s}");
                }
            }
        }
    }

    #[test]
    fn parse_accepts_whitespace_and_hex_prefix() {
        let mut curve = toy(Mode::Jacobi);
        let g = curve.generator().unwrap();
        assert_eq!(curve.parse("  1   391\t8 ").unwrap(), g);

        curve.set_text_mode(TextMode {
            radix: Radix::Hex,
            ..TextMode::default()
        });
        let g = curve.generator().unwrap();
        assert_eq!(curve.parse("1 0x187 0x8").unwrap(), g);
    }

    #[test]
    fn parse_rejects_malformed_text() {
        let curve = toy(Mode::Jacobi);
        assert_eq!(curve.parse(""), Err(Error::InvalidEncoding));
        assert_eq!(curve.parse("5 1 2"), Err(Error::InvalidEncoding));
        assert_eq!(curve.parse("1 391"), Err(Error::InvalidEncoding));
        assert_eq!(curve.parse("1 391 8 1"), Err(Error::InvalidEncoding));
        assert_eq!(curve.parse("1 391 x"), Err(Error::InvalidEncoding));
        assert_eq!(curve.parse("1 1009 8"), Err(Error::InvalidEncoding));
        assert_eq!(curve.parse("2 2"), Err(Error::InvalidEncoding));
        assert_eq!(curve.parse("1 391 9"), Err(Error::InvalidPoint));
    }

    #[test]
    fn load_str_clears_on_failure() {
        let curve = toy(Mode::Affine);
        let mut p = curve.generator().unwrap();
        assert!(p.load_str("1 750 125"));
        assert_eq!(p, curve.generator().unwrap().double());
        assert!(!p.load_str("1 750 126"));
        assert!(p.is_identity());
    }
}
