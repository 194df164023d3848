#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap, clippy::cast_lossless, clippy::cast_sign_loss)]
#![allow(clippy::similar_names, clippy::many_single_char_names)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod types;
pub use types::*;

mod errors;
pub use self::errors::Error;

pub mod lattice;
pub use self::lattice::{Lattice2D, Layer, TwistedBilayer, reciprocal};

mod parameters;
pub use self::parameters::PlaneWaveParameters;

pub mod basis;
pub use self::basis::{BasisEntry, PlaneWaveBasis, IndexBounds, CellAreas};

mod hamiltonian;
pub use self::hamiltonian::{Hamiltonian, build_hamiltonian};
