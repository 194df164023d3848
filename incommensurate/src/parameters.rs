use crate::Error;

/// Parameters of the plane-wave discretization of the bilayer Hamiltonian
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PlaneWaveParameters {
    /// Energy cutoff applied to the difference `G1 - G2` of the reciprocal
    /// vectors of the two layers
    pub ecut_length: f64,
    /// Energy cutoff applied to the sum `G1 + G2` of the reciprocal vectors of
    /// the two layers
    pub ecut_width: f64,
    /// Decay parameter of the Gaussian coupling between plane waves
    pub gamma: f64,
    /// Number of eigenvalues to request from the eigensolver. This is not
    /// used when building the Hamiltonian.
    #[serde(default = "default_n_eigs")]
    pub n_eigs: usize,
}

fn default_n_eigs() -> usize {
    10
}

/// Check that `value` can be used as an energy cutoff
pub(crate) fn validate_cutoff(name: &str, value: f64) -> Result<(), Error> {
    // a zero cutoff is valid, and gives an empty basis
    if !(value >= 0.0 && value.is_finite()) {
        return Err(Error::InvalidCutoff(format!(
            "expected a non-negative finite value for {}, got {}", name, value
        )));
    }
    return Ok(());
}

/// Check that `gamma` can be used as the decay parameter of the coupling
pub(crate) fn validate_gamma(gamma: f64) -> Result<(), Error> {
    if !(gamma >= 0.0 && gamma.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "expected a non-negative finite value for gamma, got {}", gamma
        )));
    }
    return Ok(());
}

impl PlaneWaveParameters {
    /// Parse parameters from JSON, and validate them
    pub fn from_json(json: &str) -> Result<PlaneWaveParameters, Error> {
        let parameters = serde_json::from_str::<PlaneWaveParameters>(json)?;
        parameters.validate()?;
        return Ok(parameters);
    }

    pub fn validate(&self) -> Result<(), Error> {
        validate_cutoff("ecut_length", self.ecut_length)?;
        validate_cutoff("ecut_width", self.ecut_width)?;
        validate_gamma(self.gamma)?;

        if self.n_eigs == 0 {
            return Err(Error::InvalidParameter(
                "expected at least one eigenvalue in n_eigs, got 0".into()
            ));
        }

        return Ok(());
    }
}
