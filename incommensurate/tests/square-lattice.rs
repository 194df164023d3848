//! Untwisted square bilayer, where the basis and the Hamiltonian can be
//! computed by hand.
//!
//! With `R1 = R2 = I`, both reciprocal lattices are `2π I` and a plane wave
//! `(p, q) = ((j11, j12), (j21, j22))` is in the basis if `|p + q| < 1.1` and
//! `|p - q| < 1.1`. Both `p + q` and `p - q` must then be zero or a unit
//! vector, which only leaves `p = q = 0`, and `p = 0` or `q = 0` with the
//! other one a unit vector: 9 plane waves in total.

use approx::assert_relative_eq;
use num_complex::Complex64;

use incommensurate::{Lattice2D, Layer, TwistedBilayer, Matrix2};
use incommensurate::{PlaneWaveParameters, build_hamiltonian};

const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

fn untwisted() -> TwistedBilayer {
    let layer = Layer::new(Lattice2D::new(Matrix2::one()).unwrap());
    TwistedBilayer::new(layer, layer, 0.0).unwrap()
}

#[test]
fn hand_computed() {
    let system = untwisted();
    let (b1, b2) = system.reciprocal();
    assert_eq!(b1, b2);
    assert_relative_eq!(b1[0][0], TWO_PI);
    assert_relative_eq!(b1[1][1], TWO_PI);

    let parameters = PlaneWaveParameters {
        ecut_length: 1.1 * TWO_PI,
        ecut_width: 1.1 * TWO_PI,
        gamma: 1.0,
        n_eigs: 4,
    };
    let (basis, hamiltonian) = build_hamiltonian(&system, &parameters).unwrap();

    assert_eq!(basis.len(), 9);
    let units = [[1, 0], [-1, 0], [0, 1], [0, -1]];
    for [x, y] in units {
        assert!(basis.position([x, y, 0, 0]).is_some());
        assert!(basis.position([0, 0, x, y]).is_some());
    }

    let origin = basis.position([0, 0, 0, 0]).unwrap();
    assert_eq!(hamiltonian.get(origin, origin), Complex64::new(2.0, 0.0));

    for [x, y] in units {
        let n = basis.position([x, y, 0, 0]).unwrap();
        assert_relative_eq!(hamiltonian.get(n, n).re, 0.5 * TWO_PI * TWO_PI + 2.0, max_relative = 1e-12);
        assert_relative_eq!(hamiltonian.get(origin, n).re, f64::exp(-TWO_PI * TWO_PI), max_relative = 1e-12);

        let n = basis.position([0, 0, x, y]).unwrap();
        assert_relative_eq!(hamiltonian.get(origin, n).re, f64::exp(-TWO_PI * TWO_PI), max_relative = 1e-12);
    }

    // the plane waves sharing p = 0 or q = 0 are all coupled together
    assert_eq!(hamiltonian.nnz(), 9 + 5 * 4 + 5 * 4);
    assert!(hamiltonian.is_symmetric());
}
