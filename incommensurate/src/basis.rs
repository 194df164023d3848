//! Enumeration of the plane-wave basis of an incommensurate bilayer.
//!
//! Each basis function is indexed by four integers `(j11, j12, j21, j22)`,
//! defining one reciprocal vector for each layer:
//!
//! ```text
//! G1 = j11 * b11 + j12 * b12
//! G2 = j21 * b21 + j22 * b22
//! ```
//!
//! A basis function is kept if `|G1 + G2| < ecut_width` and
//! `|G1 - G2| < ecut_length`.

use std::collections::BTreeMap;

use ndarray::Array2;

use crate::{Error, Matrix2, Vector2D};
use crate::lattice::{TwistedBilayer, parallelogram_area};
use crate::parameters::validate_cutoff;

/// A single plane wave in the basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisEntry {
    /// Integer coordinates `[j11, j12, j21, j22]` of this plane wave in the
    /// reciprocal lattices of both layers
    pub indices: [i32; 4],
    /// Reciprocal vector of the first layer, `j11 * b11 + j12 * b12`
    pub g1: Vector2D,
    /// Reciprocal vector of the second layer, `j21 * b21 + j22 * b22`
    pub g2: Vector2D,
}

impl BasisEntry {
    /// Get the `[j11, j12]` index of this plane wave in the first layer
    #[inline]
    pub fn layer_1_index(&self) -> [i32; 2] {
        [self.indices[0], self.indices[1]]
    }

    /// Get the `[j21, j22]` index of this plane wave in the second layer
    #[inline]
    pub fn layer_2_index(&self) -> [i32; 2] {
        [self.indices[2], self.indices[3]]
    }

    /// Get the combined wave vector `G1 + G2` of this plane wave
    #[inline]
    pub fn wave_vector(&self) -> Vector2D {
        self.g1 + self.g2
    }
}

/// Bounds of the box of integer indices explored during the enumeration.
/// Index `jXY` is explored in `-gmax_XY..=gmax_XY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBounds {
    pub gmax_11: i32,
    pub gmax_12: i32,
    pub gmax_21: i32,
    pub gmax_22: i32,
}

/// Areas of the primitive cells of both layers, in real and reciprocal space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAreas {
    /// Area of the primitive cell of the first layer
    pub s1: f64,
    /// Area of the primitive cell of the second layer
    pub s2: f64,
    /// Area of the reciprocal primitive cell of the first layer
    pub rs1: f64,
    /// Area of the reciprocal primitive cell of the second layer
    pub rs2: f64,
}

/// Truncated plane-wave basis for a bilayer system.
///
/// The basis is an ordered list of [`BasisEntry`]: the position of an entry
/// in this list is its row/column index in the Hamiltonian matrix. The basis
/// is immutable once created, and can be re-used to build multiple
/// Hamiltonians.
#[derive(Debug, Clone)]
pub struct PlaneWaveBasis {
    entries: Vec<BasisEntry>,
    /// reverse lookup from the four indices to the position in `entries`
    positions: BTreeMap<[i32; 4], usize>,
    reciprocal_1: Matrix2,
    reciprocal_2: Matrix2,
    bounds: IndexBounds,
    areas: CellAreas,
    ecut_length: f64,
    ecut_width: f64,
}

/// Get the largest multiple of `vector` that could fit inside `cutoff`
fn index_bound(cutoff: f64, vector: Vector2D) -> i32 {
    f64::floor(cutoff / vector.norm()) as i32
}

impl PlaneWaveBasis {
    /// Enumerate all the plane waves of the `system` inside the
    /// `ecut_length`/`ecut_width` cutoffs.
    ///
    /// The enumeration goes over `j11`, `j12`, `j21` and `j22` (from the
    /// outermost to the innermost loop), each index going from `-gmax` to
    /// `+gmax`. This fixes the order of the basis.
    ///
    /// Cutoffs that are too small for any plane wave to fit give an empty
    /// basis, this is not an error.
    #[time_graph::instrument(name = "PlaneWaveBasis::new")]
    pub fn new(system: &TwistedBilayer, ecut_length: f64, ecut_width: f64) -> Result<PlaneWaveBasis, Error> {
        validate_cutoff("ecut_length", ecut_length)?;
        validate_cutoff("ecut_width", ecut_width)?;

        let (reciprocal_1, reciprocal_2) = system.reciprocal();
        let b11 = reciprocal_1.column(0);
        let b12 = reciprocal_1.column(1);
        let b21 = reciprocal_2.column(0);
        let b22 = reciprocal_2.column(1);

        let cutoff = f64::max(ecut_length, ecut_width);
        let bounds = IndexBounds {
            gmax_11: index_bound(cutoff, b11),
            gmax_12: index_bound(cutoff, b12),
            gmax_21: index_bound(cutoff, b21),
            gmax_22: index_bound(cutoff, b22),
        };
        log::debug!("exploring plane wave indices in {:?}", bounds);

        let mut entries = Vec::new();
        for j11 in -bounds.gmax_11..=bounds.gmax_11 {
            for j12 in -bounds.gmax_12..=bounds.gmax_12 {
                let g1 = j11 as f64 * b11 + j12 as f64 * b12;
                for j21 in -bounds.gmax_21..=bounds.gmax_21 {
                    for j22 in -bounds.gmax_22..=bounds.gmax_22 {
                        let g2 = j21 as f64 * b21 + j22 as f64 * b22;
                        if (g1 + g2).norm() < ecut_width && (g1 - g2).norm() < ecut_length {
                            entries.push(BasisEntry {
                                indices: [j11, j12, j21, j22],
                                g1: g1,
                                g2: g2,
                            });
                        }
                    }
                }
            }
        }

        if entries.is_empty() {
            log::warn!(
                "no plane wave fits inside the cutoffs (ecut_length={}, ecut_width={}), the basis is empty",
                ecut_length, ecut_width
            );
        } else {
            log::info!("created a basis of {} plane waves", entries.len());
        }

        let positions = entries.iter()
            .enumerate()
            .map(|(position, entry)| (entry.indices, position))
            .collect();

        let areas = CellAreas {
            s1: system.layer_1.lattice.area(),
            s2: system.layer_2.lattice.area(),
            rs1: parallelogram_area(b11, b12),
            rs2: parallelogram_area(b21, b22),
        };

        return Ok(PlaneWaveBasis {
            entries,
            positions,
            reciprocal_1,
            reciprocal_2,
            bounds,
            areas,
            ecut_length,
            ecut_width,
        });
    }

    /// Get the number of plane waves in this basis
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this basis is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all the entries in this basis, in order
    pub fn entries(&self) -> &[BasisEntry] {
        &self.entries
    }

    /// Get the entry at the given `position`, if any
    pub fn get(&self, position: usize) -> Option<&BasisEntry> {
        self.entries.get(position)
    }

    /// Get the position of the plane wave with the given
    /// `[j11, j12, j21, j22]` indices, if it is part of this basis
    pub fn position(&self, indices: [i32; 4]) -> Option<usize> {
        self.positions.get(&indices).copied()
    }

    /// Get the reciprocal lattice matrices of both layers, with one reciprocal
    /// vector per column
    pub fn reciprocal(&self) -> (Matrix2, Matrix2) {
        (self.reciprocal_1, self.reciprocal_2)
    }

    /// Get the box of integer indices explored during the enumeration
    pub fn bounds(&self) -> IndexBounds {
        self.bounds
    }

    /// Get the areas of the primitive cells of both layers
    pub fn areas(&self) -> CellAreas {
        self.areas
    }

    /// Get the cutoff used on `|G1 - G2|`
    pub fn ecut_length(&self) -> f64 {
        self.ecut_length
    }

    /// Get the cutoff used on `|G1 + G2|`
    pub fn ecut_width(&self) -> f64 {
        self.ecut_width
    }

    /// Get the integer indices of all plane waves, as an array of shape
    /// `(len, 4)` containing `[j11, j12, j21, j22]` on each row
    pub fn indices(&self) -> Array2<i32> {
        Array2::from_shape_fn((self.len(), 4), |(i, j)| self.entries[i].indices[j])
    }

    /// Get the reciprocal vectors of all plane waves, as an array of shape
    /// `(len, 4)` containing `[G1_x, G1_y, G2_x, G2_y]` on each row
    pub fn vectors(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.len(), 4), |(i, j)| {
            let entry = &self.entries[i];
            match j {
                0 | 1 => entry.g1[j],
                _ => entry.g2[j - 2],
            }
        })
    }
}
