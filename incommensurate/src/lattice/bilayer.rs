use crate::{Error, Matrix2, Vector2D};
use super::Lattice2D;

/// A single periodic layer: its lattice and the fractional offset of its
/// origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Lattice of this layer
    pub lattice: Lattice2D,
    /// Fractional position of the origin of this layer, in units of the
    /// primitive vectors. This is part of the description of the system, but
    /// does not enter the plane-wave Hamiltonian.
    pub offset: Vector2D,
}

impl Layer {
    /// Create a layer from its lattice, without any offset
    pub fn new(lattice: Lattice2D) -> Layer {
        Layer {
            lattice: lattice,
            offset: Vector2D::zero(),
        }
    }

    /// Create a layer from its lattice and fractional offset
    pub fn with_offset(lattice: Lattice2D, offset: Vector2D) -> Result<Layer, Error> {
        if !offset.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "layer offset must be finite, got {:?}", offset
            )));
        }

        return Ok(Layer { lattice, offset });
    }
}

/// Two incommensurate periodic layers stacked on top of each other.
///
/// The lattices of the two layers already contain the relative rotation
/// between them; `twist_angle` is only kept as a description of the system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistedBilayer {
    /// First layer
    pub layer_1: Layer,
    /// Second layer
    pub layer_2: Layer,
    /// Twist angle between the two layers, in radians
    pub twist_angle: f64,
}

impl TwistedBilayer {
    /// Create a new bilayer system from two layers and the twist angle between
    /// them.
    pub fn new(layer_1: Layer, layer_2: Layer, twist_angle: f64) -> Result<TwistedBilayer, Error> {
        if !twist_angle.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "twist angle must be finite, got {}", twist_angle
            )));
        }

        return Ok(TwistedBilayer { layer_1, layer_2, twist_angle });
    }

    /// Create a twisted bilayer where the second layer is a copy of `layer`
    /// rotated by `twist_angle` radians.
    pub fn with_twist(layer: Layer, twist_angle: f64) -> Result<TwistedBilayer, Error> {
        let layer_2 = Layer {
            lattice: layer.lattice.rotated(twist_angle)?,
            offset: layer.offset,
        };

        return TwistedBilayer::new(layer, layer_2, twist_angle);
    }

    /// Create a bilayer system from its JSON description, see
    /// [`BilayerParameters`] for the format.
    pub fn from_json(json: &str) -> Result<TwistedBilayer, Error> {
        let parameters = serde_json::from_str::<BilayerParameters>(json)?;
        return parameters.build();
    }

    /// Get the reciprocal lattice matrices of both layers
    pub fn reciprocal(&self) -> (Matrix2, Matrix2) {
        (self.layer_1.lattice.reciprocal(), self.layer_2.lattice.reciprocal())
    }
}

/// JSON description of a single layer
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LayerParameters {
    /// The two primitive vectors of the lattice, in Cartesian coordinates
    pub primitive_vectors: [[f64; 2]; 2],
    /// Fractional offset of the layer origin
    #[serde(default)]
    pub offset: [f64; 2],
}

impl LayerParameters {
    fn build(&self) -> Result<Layer, Error> {
        let [a1, a2] = self.primitive_vectors;
        let lattice = Lattice2D::from_vectors(a1.into(), a2.into())?;
        return Layer::with_offset(lattice, self.offset.into());
    }
}

/// JSON description of a twisted bilayer system.
///
/// ```json
/// {
///     "layer_1": {"primitive_vectors": [[1.0, 0.0], [0.0, 1.0]]},
///     "layer_2": {"primitive_vectors": [[0.99, 0.14], [-0.14, 0.99]], "offset": [0.5, 0.0]},
///     "twist_angle": 0.1415
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BilayerParameters {
    /// First layer
    pub layer_1: LayerParameters,
    /// Second layer, already rotated with respect to the first one
    pub layer_2: LayerParameters,
    /// Twist angle between the layers, in radians
    #[serde(default)]
    pub twist_angle: f64,
}

impl BilayerParameters {
    /// Check that these parameters describe a valid system
    pub fn validate(&self) -> Result<(), Error> {
        self.build().map(|_| ())
    }

    /// Create the corresponding [`TwistedBilayer`]
    pub fn build(&self) -> Result<TwistedBilayer, Error> {
        let layer_1 = self.layer_1.build()?;
        let layer_2 = self.layer_2.build()?;
        return TwistedBilayer::new(layer_1, layer_2, self.twist_angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn twisted() {
        let layer = Layer::new(Lattice2D::hexagonal(1.0).unwrap());
        let system = TwistedBilayer::with_twist(layer, 0.2).unwrap();

        assert_eq!(system.twist_angle, 0.2);
        assert_eq!(system.layer_1, layer);
        assert_relative_eq!(system.layer_2.lattice.area(), layer.lattice.area(), epsilon = 1e-12);

        let (b1, b2) = system.reciprocal();
        let expected = Matrix2::rotation(0.2) * b1;
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(b2[i][j], expected[i][j], epsilon = 1e-12);
            }
        }

        let error = TwistedBilayer::with_twist(layer, f64::INFINITY).unwrap_err();
        assert!(matches!(error, Error::InvalidParameter(_)));
    }

    #[test]
    fn json() {
        let system = TwistedBilayer::from_json(r#"{
            "layer_1": {"primitive_vectors": [[1.0, 0.0], [0.0, 1.0]]},
            "layer_2": {"primitive_vectors": [[2.0, 0.0], [0.0, 2.0]], "offset": [0.5, 0.25]},
            "twist_angle": 0.0
        }"#).unwrap();

        assert_eq!(system.layer_1.lattice, Lattice2D::square(1.0).unwrap());
        assert_eq!(system.layer_1.offset, Vector2D::zero());
        assert_eq!(system.layer_2.lattice, Lattice2D::square(2.0).unwrap());
        assert_eq!(system.layer_2.offset, Vector2D::new(0.5, 0.25));
        assert_eq!(system.twist_angle, 0.0);
    }

    #[test]
    fn invalid_json() {
        let error = TwistedBilayer::from_json(r#"{
            "layer_1": {"primitive_vectors": [[1.0, 0.0], [0.0, 1.0]]},
            "layer_2": {"primitive_vectors": [[1.0, 1.0], [2.0, 2.0]]}
        }"#).unwrap_err();
        assert!(matches!(error, Error::DegenerateLattice(_)));

        let error = TwistedBilayer::from_json(r#"{
            "layer_1": {"primitive_vectors": [[1.0, 0.0], [0.0, 1.0]]},
            "layer_2": {"primitive_vectors": [[1.0, 0.0], [0.0, 1.0]]},
            "angle": 0.3
        }"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }
}
