//! Macros for defining the `dev` field element types.

/// Implements a prime field element type backed by `num-bigint` arithmetic.
///
/// The generated type stores the canonical big endian encoding and implements
/// [`ff::Field`](crate::ff::Field), [`CurveField`](crate::CurveField) and
/// [`CurveScalar`](crate::CurveScalar) along with the usual operator traits.
/// It is meant for tests and for curves where speed is not a concern: every
/// operation round trips through a heap allocated big integer and nothing is
/// constant time.
///
/// Accepts the following parameters:
///
/// - name of the field element type
/// - hex serialization of the modulus, which must be prime
/// - number of bytes in an encoded field element
/// - documentation string for the field element type
macro_rules! impl_prime_field {
    (
        name: $name:ident,
        modulus: $modulus:expr,
        bytes: $bytes:expr,
        doc: $doc:expr
    ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $bytes]);

        impl $name {
            /// Big endian encoding of the modulus.
            pub const MODULUS_BYTES: [u8; $bytes] =
                $crate::dev::arith::decode_hex::<$bytes>($modulus);

            /// Bit size of the modulus.
            pub const BITS: u32 = $crate::dev::arith::bit_length(&Self::MODULUS_BYTES);

            /// Parse a canonical big endian encoding.
            pub fn from_bytes(bytes: &[u8; $bytes]) -> Option<Self> {
                if $crate::dev::arith::is_canonical(bytes, &Self::MODULUS_BYTES) {
                    Some(Self(*bytes))
                } else {
                    None
                }
            }

            /// Canonical big endian encoding.
            pub fn to_bytes(&self) -> [u8; $bytes] {
                self.0
            }

            /// Parse a hex string, reducing it modulo the field modulus.
            pub fn from_hex(hex: &str) -> Option<Self> {
                let value = $crate::num_bigint::BigUint::parse_bytes(hex.as_bytes(), 16)?;
                Some(Self::reduce_uint(&value))
            }

            fn reduce_uint(value: &$crate::num_bigint::BigUint) -> Self {
                let m = $crate::dev::arith::to_uint(&Self::MODULUS_BYTES);
                Self($crate::dev::arith::to_array(&(value % m)))
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}(0x", stringify!($name))?;
                for byte in &self.0 {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, ")")
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $bytes])
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self::reduce_uint(&$crate::num_bigint::BigUint::from(value))
            }
        }

        impl $crate::subtle::ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> $crate::subtle::Choice {
                $crate::subtle::ConstantTimeEq::ct_eq(&self.0[..], &other.0[..])
            }
        }

        impl $crate::subtle::ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: $crate::subtle::Choice) -> Self {
                let mut out = [0u8; $bytes];
                for i in 0..$bytes {
                    out[i] = <u8 as $crate::subtle::ConditionallySelectable>::conditional_select(
                        &a.0[i], &b.0[i], choice,
                    );
                }
                Self(out)
            }
        }

        impl $crate::ff::Field for $name {
            const ZERO: Self = Self([0u8; $bytes]);
            const ONE: Self = {
                let mut bytes = [0u8; $bytes];
                bytes[$bytes - 1] = 1;
                Self(bytes)
            };

            fn random(mut rng: impl $crate::rand_core::RngCore) -> Self {
                let mut wide = [0u8; $bytes + 16];
                rng.fill_bytes(&mut wide);
                Self($crate::dev::arith::reduce(&wide, &Self::MODULUS_BYTES))
            }

            fn square(&self) -> Self {
                *self * self
            }

            fn double(&self) -> Self {
                *self + self
            }

            fn invert(&self) -> $crate::subtle::CtOption<Self> {
                match $crate::dev::arith::invert(&self.0, &Self::MODULUS_BYTES) {
                    Some(inv) => $crate::subtle::CtOption::new(Self(inv), 1u8.into()),
                    None => $crate::subtle::CtOption::new(Self([0u8; $bytes]), 0u8.into()),
                }
            }

            fn sqrt(&self) -> $crate::subtle::CtOption<Self> {
                match $crate::dev::arith::sqrt(&self.0, &Self::MODULUS_BYTES) {
                    Some(root) => $crate::subtle::CtOption::new(Self(root), 1u8.into()),
                    None => $crate::subtle::CtOption::new(Self([0u8; $bytes]), 0u8.into()),
                }
            }

            /// Returns `(false, 0)` when `num / div` is not a square.
            fn sqrt_ratio(num: &Self, div: &Self) -> ($crate::subtle::Choice, Self) {
                let zero = <Self as $crate::ff::Field>::ZERO;
                let ratio = <Self as $crate::ff::Field>::invert(div).unwrap_or(zero) * num;
                let root = <Self as $crate::ff::Field>::sqrt(&ratio);
                (root.is_some(), root.unwrap_or(zero))
            }
        }

        impl $crate::CurveField for $name {
            const MODULUS: &'static str = $modulus;
            const BYTE_SIZE: usize = $bytes;
            const BIT_SIZE: u32 = Self::BITS;

            fn from_u64(value: u64) -> Self {
                Self::from(value)
            }

            fn to_be_bytes(&self, out: &mut [u8]) {
                out.copy_from_slice(&self.0);
            }

            fn from_be_bytes(bytes: &[u8]) -> $crate::subtle::CtOption<Self> {
                let parsed = <[u8; $bytes]>::try_from(bytes)
                    .ok()
                    .and_then(|bytes| Self::from_bytes(&bytes));
                match parsed {
                    Some(fe) => $crate::subtle::CtOption::new(fe, 1u8.into()),
                    None => $crate::subtle::CtOption::new(Self([0u8; $bytes]), 0u8.into()),
                }
            }

            fn is_odd(&self) -> $crate::subtle::Choice {
                (self.0[$bytes - 1] & 1).into()
            }

            fn is_negative(&self) -> $crate::subtle::Choice {
                u8::from($crate::dev::arith::is_negative(&self.0, &Self::MODULUS_BYTES)).into()
            }
        }

        impl $crate::CurveScalar for $name {
            const MODULUS: &'static str = $modulus;
            const NUM_BITS: u32 = Self::BITS;

            fn to_biguint(&self) -> $crate::num_bigint::BigUint {
                $crate::dev::arith::to_uint(&self.0)
            }

            fn from_biguint(value: &$crate::num_bigint::BigUint) -> Self {
                Self::reduce_uint(value)
            }
        }

        $crate::macros::impl_field_op!($name, Add, add, AddAssign, add_assign, |a, b| {
            $crate::dev::arith::add(a, b, &$name::MODULUS_BYTES)
        });
        $crate::macros::impl_field_op!($name, Sub, sub, SubAssign, sub_assign, |a, b| {
            $crate::dev::arith::sub(a, b, &$name::MODULUS_BYTES)
        });
        $crate::macros::impl_field_op!($name, Mul, mul, MulAssign, mul_assign, |a, b| {
            $crate::dev::arith::mul(a, b, &$name::MODULUS_BYTES)
        });

        impl ::core::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self($crate::dev::arith::neg(&self.0, &Self::MODULUS_BYTES))
            }
        }

        impl ::core::ops::Neg for &$name {
            type Output = $name;

            fn neg(self) -> $name {
                -*self
            }
        }

        impl ::core::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(<Self as $crate::ff::Field>::ZERO, |acc, x| acc + x)
            }
        }

        impl<'a> ::core::iter::Sum<&'a $name> for $name {
            fn sum<I: Iterator<Item = &'a $name>>(iter: I) -> Self {
                iter.copied().sum()
            }
        }

        impl ::core::iter::Product for $name {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(<Self as $crate::ff::Field>::ONE, |acc, x| acc * x)
            }
        }

        impl<'a> ::core::iter::Product<&'a $name> for $name {
            fn product<I: Iterator<Item = &'a $name>>(iter: I) -> Self {
                iter.copied().product()
            }
        }
    };
}

/// Writes the by-value, by-reference and assigning impls of a binary field
/// operator in terms of a function over the big endian encodings.
macro_rules! impl_field_op {
    ($name:ident, $op:ident, $op_fn:ident, $assign:ident, $assign_fn:ident, |$a:ident, $b:ident| $body:block) => {
        impl ::core::ops::$op for $name {
            type Output = $name;

            fn $op_fn(self, rhs: $name) -> $name {
                let $a = &self.0;
                let $b = &rhs.0;
                $name($body)
            }
        }

        impl ::core::ops::$op<&$name> for $name {
            type Output = $name;

            fn $op_fn(self, rhs: &$name) -> $name {
                ::core::ops::$op::$op_fn(self, *rhs)
            }
        }

        impl ::core::ops::$op<&$name> for &$name {
            type Output = $name;

            fn $op_fn(self, rhs: &$name) -> $name {
                ::core::ops::$op::$op_fn(*self, *rhs)
            }
        }

        impl ::core::ops::$assign for $name {
            fn $assign_fn(&mut self, rhs: $name) {
                *self = ::core::ops::$op::$op_fn(*self, rhs);
            }
        }

        impl ::core::ops::$assign<&$name> for $name {
            fn $assign_fn(&mut self, rhs: &$name) {
                *self = ::core::ops::$op::$op_fn(*self, *rhs);
            }
        }
    };
}

pub(crate) use {impl_field_op, impl_prime_field};
