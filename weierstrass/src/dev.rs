//! Development-related functionality.
//!
//! Field types and parameters of a few well known curves, backed by
//! `num-bigint`. The arithmetic is slow and
//! variable time; use it for tests and benchmarks only.

pub(crate) mod arith;
mod fp2;

pub use fp2::Fp2;

use crate::curve::EcParam;

crate::macros::impl_prime_field!(
    name: Secp256k1Fp,
    modulus: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    bytes: 32,
    doc: "Base field of secp256k1."
);

crate::macros::impl_prime_field!(
    name: Secp256k1Fr,
    modulus: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    bytes: 32,
    doc: "Scalar field of secp256k1."
);

crate::macros::impl_prime_field!(
    name: P256Fp,
    modulus: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    bytes: 32,
    doc: "Base field of NIST P-256."
);

crate::macros::impl_prime_field!(
    name: P256Fr,
    modulus: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    bytes: 32,
    doc: "Scalar field of NIST P-256."
);

crate::macros::impl_prime_field!(
    name: Bls12Fp,
    modulus: "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
    bytes: 48,
    doc: "Base field of BLS12-381."
);

crate::macros::impl_prime_field!(
    name: Bls12Fr,
    modulus: "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
    bytes: 32,
    doc: "Scalar field of BLS12-381."
);

crate::macros::impl_prime_field!(
    name: ToyFp,
    modulus: "3f1",
    bytes: 2,
    doc: "Integers modulo 1009."
);

crate::macros::impl_prime_field!(
    name: ToyFr,
    modulus: "15d",
    bytes: 2,
    doc: "Integers modulo 349."
);

/// Quadratic extension of the BLS12-381 base field.
pub type Bls12Fp2 = Fp2<Bls12Fp>;

/// secp256k1: `y² = x³ + 7`.
pub const SECP256K1: EcParam = EcParam {
    name: "secp256k1",
    p: "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    a: "0",
    b: "7",
    gx: "0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    n: "0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
};

/// NIST P-256: `y² = x³ - 3x + b`.
pub const NIST_P256: EcParam = EcParam {
    name: "NIST_P256",
    p: "0xffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    a: "-3",
    b: "0x5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    gx: "0x6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "0x4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    n: "0xffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
};

/// BLS12-381 G1: `y² = x³ + 4`, with the prime order subgroup.
pub const BLS12_381_G1: EcParam = EcParam {
    name: "BLS12_381_G1",
    p: "0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
    a: "0",
    b: "4",
    gx: "0x17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb",
    gy: "0x08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1",
    n: "0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
};

/// BLS12-381 G2: `y² = x³ + 4(1 + i)` over [`Bls12Fp2`].
///
/// Extension field elements are written as the integer `c1 · 2^384 + c0`,
/// matching their big endian encoding.
pub const BLS12_381_G2: EcParam = EcParam {
    name: "BLS12_381_G2",
    p: "0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
    a: "0",
    b: "0x000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000004000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000004",
    gx: "0x13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8",
    gy: "0x0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801",
    n: "0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
};

/// `y² = x³ + 2x + 7` over GF(1009).
///
/// The group has order `1047 = 3 · 349`; the generator spans the subgroup of
/// order 349.
pub const TOY: EcParam = EcParam {
    name: "toy",
    p: "1009",
    a: "2",
    b: "7",
    gx: "391",
    gy: "8",
    n: "349",
};
