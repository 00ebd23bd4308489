#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(any(test, feature = "dev"))]
mod macros;

#[cfg(any(test, feature = "dev"))]
pub mod dev;
pub mod field;
pub mod hooks;

mod curve;
mod encoding;
mod error;
mod lookup_table;
mod msm;
mod mul;
mod naf;
mod normalize;
mod point;
mod point_arithmetic;
mod text;

pub use crate::{
    curve::{Curve, EcParam, Mode, TextForm, TextMode, init_curve},
    encoding::Format,
    error::{Error, Result},
    field::{CurveField, CurveScalar, Radix},
    msm::MAX_MUL_VEC_N,
    point::{Point, Relation},
};
pub use elliptic_curve::{self, ff, rand_core, subtle};
pub use num_bigint;
