//! Description of the two layers of an incommensurate bilayer, and of their
//! real-space and reciprocal lattices.

mod cell;
pub use self::cell::{Lattice2D, reciprocal};
pub(crate) use self::cell::parallelogram_area;

mod bilayer;
pub use self::bilayer::{Layer, TwistedBilayer};
pub use self::bilayer::{LayerParameters, BilayerParameters};
