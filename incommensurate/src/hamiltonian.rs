//! Assembly of the plane-wave Hamiltonian `-1/2 Δ + V1 + V2` of a bilayer
//! system.
//!
//! The kinetic energy is diagonal in the plane-wave basis. The potential of
//! each layer only couples plane waves sharing the same reciprocal vector in
//! the *other* layer, with a Gaussian decay in the difference of reciprocal
//! vectors in its own layer:
//!
//! ```text
//! <n1|H|n1> = 1/2 |G1 + G2|^2 + 2
//! <n1|H|n2> = δ(G2, G2') exp(-γ |G1 - G1'|^2) + δ(G1, G1') exp(-γ |G2 - G2'|^2)
//! ```

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use num_traits::Zero;
use rayon::prelude::*;
use sprs::{CsMat, TriMat};

use crate::{Error, Matrix2, Vector2D};
use crate::basis::{BasisEntry, PlaneWaveBasis};
use crate::lattice::TwistedBilayer;
use crate::parameters::{PlaneWaveParameters, validate_gamma};

/// On-site contribution of the potential of a single layer to the diagonal
const ONSITE_POTENTIAL: f64 = 1.0;

/// Sparse Hamiltonian matrix of a bilayer system in a plane-wave basis.
///
/// Rows and columns are indexed by the position of the plane waves in the
/// corresponding [`PlaneWaveBasis`], starting at 0. The matrix is stored with
/// complex values, although all the couplings are currently real.
#[derive(Debug, Clone)]
pub struct Hamiltonian {
    /// The matrix itself, in CSR format
    matrix: CsMat<Complex64>,
    /// `G1 + G2` for each plane wave, with shape `(2, size)`
    wave_vectors: Array2<f64>,
    /// Decay parameter used for the couplings
    gamma: f64,
}

/// Positions of the plane waves in the basis, grouped by the reciprocal
/// vector they use in each of the layers. Plane waves can only be coupled
/// if they share the same index in (at least) one of the layers.
struct CouplingGroups {
    by_layer_1: BTreeMap<[i32; 2], Vec<usize>>,
    by_layer_2: BTreeMap<[i32; 2], Vec<usize>>,
}

impl CouplingGroups {
    fn new(entries: &[BasisEntry]) -> CouplingGroups {
        let mut by_layer_1 = BTreeMap::<_, Vec<usize>>::new();
        let mut by_layer_2 = BTreeMap::<_, Vec<usize>>::new();
        for (position, entry) in entries.iter().enumerate() {
            by_layer_1.entry(entry.layer_1_index()).or_default().push(position);
            by_layer_2.entry(entry.layer_2_index()).or_default().push(position);
        }

        return CouplingGroups { by_layer_1, by_layer_2 };
    }

    /// Get all the positions that could have a non-zero coupling with `entry`,
    /// sorted in increasing order. This includes the position of `entry`.
    fn partners(&self, entry: &BasisEntry) -> Vec<usize> {
        let mut partners = Vec::new();
        if let Some(positions) = self.by_layer_1.get(&entry.layer_1_index()) {
            partners.extend_from_slice(positions);
        }
        if let Some(positions) = self.by_layer_2.get(&entry.layer_2_index()) {
            partners.extend_from_slice(positions);
        }

        partners.sort_unstable();
        partners.dedup();
        return partners;
    }
}

/// Gaussian coupling between two reciprocal vectors of the same layer, whose
/// integer coordinates differ by `[d1, d2]`
#[inline]
fn gaussian_coupling(reciprocal: &Matrix2, d1: i32, d2: i32, gamma: f64) -> f64 {
    let delta = reciprocal * Vector2D::new(d1 as f64, d2 as f64);
    f64::exp(-gamma * delta.norm2())
}

/// Compute the matrix element between plane waves `first` and `second`. The
/// caller is responsible for calling this with `diagonal = true` only when
/// both entries are at the same position in the basis.
fn matrix_element(
    first: &BasisEntry,
    second: &BasisEntry,
    diagonal: bool,
    reciprocal_1: &Matrix2,
    reciprocal_2: &Matrix2,
    gamma: f64,
) -> f64 {
    if diagonal {
        let (g1, g2) = (first.g1, first.g2);
        let kinetic = 0.5 * (g1.norm2() + g2.norm2() + 2.0 * g1.dot(g2));
        return kinetic + ONSITE_POTENTIAL + ONSITE_POTENTIAL;
    }

    let [j11, j12, j21, j22] = first.indices;
    let [k11, k12, k21, k22] = second.indices;

    let mut value = 0.0;
    if j21 == k21 && j22 == k22 {
        value += gaussian_coupling(reciprocal_1, j11 - k11, j12 - k12, gamma);
    }

    if j11 == k11 && j12 == k12 {
        value += gaussian_coupling(reciprocal_2, j21 - k21, j22 - k22, gamma);
    }

    return value;
}

impl Hamiltonian {
    /// Assemble the Hamiltonian matrix in the given `basis`, using `gamma` as
    /// the decay parameter of the Gaussian couplings.
    ///
    /// Entries which are exactly zero are not stored. An empty basis gives an
    /// empty `0 x 0` matrix.
    #[time_graph::instrument(name = "Hamiltonian::assemble")]
    pub fn assemble(basis: &PlaneWaveBasis, gamma: f64) -> Result<Hamiltonian, Error> {
        validate_gamma(gamma)?;

        let entries = basis.entries();
        let size = entries.len();
        let (reciprocal_1, reciprocal_2) = basis.reciprocal();
        let groups = CouplingGroups::new(entries);

        // each row is computed independently, and the resulting triplets are
        // merged in row order afterward
        let rows = (0..size).into_par_iter()
            .map(|n1| {
                let first = &entries[n1];
                let mut row = Vec::new();
                for n2 in groups.partners(first) {
                    let value = matrix_element(
                        first,
                        &entries[n2],
                        n1 == n2,
                        &reciprocal_1,
                        &reciprocal_2,
                        gamma,
                    );

                    if value != 0.0 {
                        row.push((n2, value));
                    }
                }
                row
            })
            .collect::<Vec<_>>();

        let nnz = rows.iter().map(Vec::len).sum();
        let mut triplets = TriMat::with_capacity((size, size), nnz);
        for (n1, row) in rows.into_iter().enumerate() {
            for (n2, value) in row {
                triplets.add_triplet(n1, n2, Complex64::new(value, 0.0));
            }
        }
        let matrix: CsMat<Complex64> = triplets.to_csr();

        let wave_vectors = Array2::from_shape_fn((2, size), |(i, n)| entries[n].wave_vector()[i]);

        log::info!(
            "assembled a {}x{} Hamiltonian with {} non-zero entries (gamma = {})",
            size, size, matrix.nnz(), gamma
        );

        return Ok(Hamiltonian {
            matrix,
            wave_vectors,
            gamma,
        });
    }

    /// Get the underlying sparse matrix
    pub fn matrix(&self) -> &CsMat<Complex64> {
        &self.matrix
    }

    /// Get the sparse matrix, consuming this Hamiltonian
    pub fn into_matrix(self) -> CsMat<Complex64> {
        self.matrix
    }

    /// Get the number of rows (and columns) of this Hamiltonian, i.e. the size
    /// of the basis
    pub fn size(&self) -> usize {
        self.matrix.rows()
    }

    /// Get the number of stored entries
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Get the decay parameter used to compute the couplings
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Get the value of the entry at row `n1` and column `n2`, returning zero
    /// for entries which are not stored.
    ///
    /// # Panics
    ///
    /// If `n1` or `n2` is out of bounds.
    pub fn get(&self, n1: usize, n2: usize) -> Complex64 {
        assert!(
            n1 < self.size() && n2 < self.size(),
            "index ({}, {}) is out of bounds for a Hamiltonian of size {}", n1, n2, self.size()
        );
        self.matrix.get(n1, n2).copied().unwrap_or_else(Complex64::zero)
    }

    /// Get the diagonal of this Hamiltonian
    pub fn diagonal(&self) -> Array1<Complex64> {
        Array1::from_shape_fn(self.size(), |n| self.get(n, n))
    }

    /// Get the combined wave vector `G1 + G2` of each plane wave, as an array
    /// of shape `(2, size)`. Column `n` corresponds to row/column `n` of the
    /// Hamiltonian.
    pub fn wave_vectors(&self) -> &Array2<f64> {
        &self.wave_vectors
    }

    /// Check if this Hamiltonian is exactly symmetric, i.e. if
    /// `H[n1, n2] == H[n2, n1]` for all entries
    pub fn is_symmetric(&self) -> bool {
        self.matrix.iter().all(|(value, (n1, n2))| {
            self.matrix.get(n2, n1) == Some(value)
        })
    }

    /// Convert this Hamiltonian to a dense matrix
    #[time_graph::instrument(name = "Hamiltonian::to_dense")]
    pub fn to_dense(&self) -> Array2<Complex64> {
        let size = self.size();
        let mut dense = Array2::from_elem((size, size), Complex64::zero());
        for (&value, (n1, n2)) in self.matrix.iter() {
            dense[[n1, n2]] = value;
        }
        return dense;
    }
}

/// Build the plane-wave basis and the corresponding Hamiltonian for the given
/// `system` and `parameters`.
///
/// All parameters are validated before the enumeration of the basis starts,
/// and nothing is returned if any step fails.
pub fn build_hamiltonian(
    system: &TwistedBilayer,
    parameters: &PlaneWaveParameters,
) -> Result<(PlaneWaveBasis, Hamiltonian), Error> {
    parameters.validate()?;

    let basis = PlaneWaveBasis::new(system, parameters.ecut_length, parameters.ecut_width)?;
    let hamiltonian = Hamiltonian::assemble(&basis, parameters.gamma)?;

    return Ok((basis, hamiltonian));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Lattice2D, Layer, TwistedBilayer};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn square_basis(cutoff: f64) -> PlaneWaveBasis {
        let layer = Layer::new(Lattice2D::square(1.0).unwrap());
        let system = TwistedBilayer::new(layer, layer, 0.0).unwrap();
        PlaneWaveBasis::new(&system, cutoff, cutoff).unwrap()
    }

    #[test]
    fn matrix_elements() {
        let reciprocal = Matrix2::new([[2.0, 0.0], [0.0, 3.0]]);
        let first = BasisEntry {
            indices: [1, 0, 0, 1],
            g1: Vector2D::new(2.0, 0.0),
            g2: Vector2D::new(0.0, 3.0),
        };

        // kinetic energy plus the two on-site terms
        let diagonal = matrix_element(&first, &first, true, &reciprocal, &reciprocal, 0.5);
        assert_eq!(diagonal, 0.5 * 13.0 + 2.0);

        // same layer 2 index, layer 1 differs by (1, 0)
        let second = BasisEntry {
            indices: [0, 0, 0, 1],
            g1: Vector2D::zero(),
            g2: Vector2D::new(0.0, 3.0),
        };
        let value = matrix_element(&first, &second, false, &reciprocal, &reciprocal, 0.5);
        assert_eq!(value, f64::exp(-0.5 * 4.0));

        // same layer 1 index, layer 2 differs by (0, -1)
        let third = BasisEntry {
            indices: [1, 0, 0, 2],
            g1: Vector2D::new(2.0, 0.0),
            g2: Vector2D::new(0.0, 6.0),
        };
        let value = matrix_element(&first, &third, false, &reciprocal, &reciprocal, 0.5);
        assert_eq!(value, f64::exp(-0.5 * 9.0));

        // nothing in common
        let value = matrix_element(&second, &third, false, &reciprocal, &reciprocal, 0.5);
        assert_eq!(value, 0.0);

        // both rules apply to two distinct positions with the same indices
        let value = matrix_element(&first, &first, false, &reciprocal, &reciprocal, 0.5);
        assert_eq!(value, 2.0);
    }

    #[test]
    fn square_lattice() {
        let basis = square_basis(1.1 * 2.0 * PI);
        let hamiltonian = Hamiltonian::assemble(&basis, 1.0).unwrap();

        assert_eq!(hamiltonian.size(), 9);
        // 9 diagonal entries, and 5 plane waves sharing the zero vector of
        // each layer
        assert_eq!(hamiltonian.nnz(), 9 + 2 * 5 * 4);

        let origin = basis.position([0, 0, 0, 0]).unwrap();
        assert_eq!(hamiltonian.get(origin, origin), Complex64::new(2.0, 0.0));

        let first = basis.position([1, 0, 0, 0]).unwrap();
        let second = basis.position([-1, 0, 0, 0]).unwrap();
        let expected = f64::exp(-16.0 * PI * PI);
        assert_relative_eq!(hamiltonian.get(first, second).re, expected, max_relative = 1e-12);
        assert_eq!(hamiltonian.get(first, second).im, 0.0);

        let diagonal = hamiltonian.get(first, first);
        assert_relative_eq!(diagonal.re, 2.0 * PI * PI + 2.0, max_relative = 1e-12);

        // different indices in both layers
        let third = basis.position([0, 0, 1, 0]).unwrap();
        assert_eq!(hamiltonian.get(first, third), Complex64::new(0.0, 0.0));
        assert!(hamiltonian.matrix().get(first, third).is_none());

        assert!(hamiltonian.is_symmetric());
    }

    #[test]
    fn no_stored_zeros() {
        let basis = square_basis(3.5 * 2.0 * PI);
        // large gamma make most of the couplings underflow to zero
        let hamiltonian = Hamiltonian::assemble(&basis, 50.0).unwrap();

        for (value, _) in hamiltonian.matrix().iter() {
            assert_ne!(*value, Complex64::new(0.0, 0.0));
        }
        assert_eq!(hamiltonian.nnz(), basis.len());
    }

    #[test]
    fn gamma_zero() {
        let basis = square_basis(2.3 * 2.0 * PI);
        let hamiltonian = Hamiltonian::assemble(&basis, 0.0).unwrap();

        for (value, (n1, n2)) in hamiltonian.matrix().iter() {
            if n1 != n2 {
                assert_eq!(*value, Complex64::new(1.0, 0.0));
            }
        }
    }

    #[test]
    fn dense() {
        let basis = square_basis(2.3 * 2.0 * PI);
        let hamiltonian = Hamiltonian::assemble(&basis, 0.2).unwrap();
        let dense = hamiltonian.to_dense();

        assert_eq!(dense.shape(), [basis.len(), basis.len()]);
        let diagonal = hamiltonian.diagonal();
        for n1 in 0..basis.len() {
            assert_eq!(dense[[n1, n1]], diagonal[n1]);
            for n2 in 0..basis.len() {
                assert_eq!(dense[[n1, n2]], hamiltonian.get(n1, n2));
                assert_eq!(dense[[n1, n2]], dense[[n2, n1]]);
            }
        }
    }

    #[test]
    fn wave_vectors() {
        let basis = square_basis(2.3 * 2.0 * PI);
        let hamiltonian = Hamiltonian::assemble(&basis, 0.2).unwrap();

        let wave_vectors = hamiltonian.wave_vectors();
        assert_eq!(wave_vectors.shape(), [2, basis.len()]);
        for (n, entry) in basis.entries().iter().enumerate() {
            let expected = entry.g1 + entry.g2;
            assert_eq!(wave_vectors[[0, n]], expected[0]);
            assert_eq!(wave_vectors[[1, n]], expected[1]);
        }
    }

    #[test]
    fn empty() {
        let basis = square_basis(0.0);
        let hamiltonian = Hamiltonian::assemble(&basis, 1.0).unwrap();

        assert_eq!(hamiltonian.size(), 0);
        assert_eq!(hamiltonian.nnz(), 0);
        assert_eq!(hamiltonian.to_dense().shape(), [0, 0]);
        assert_eq!(hamiltonian.wave_vectors().shape(), [2, 0]);
        assert!(hamiltonian.diagonal().is_empty());
        assert!(hamiltonian.is_symmetric());
    }

    #[test]
    fn invalid_gamma() {
        let basis = square_basis(1.1 * 2.0 * PI);
        let error = Hamiltonian::assemble(&basis, -1.0).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));

        let error = Hamiltonian::assemble(&basis, f64::NAN).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }
}
