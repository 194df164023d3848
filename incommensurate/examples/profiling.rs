use incommensurate::{TwistedBilayer, PlaneWaveParameters, build_hamiltonian};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let twist_angle = std::env::args().nth(1)
        .map(|angle| angle.parse::<f64>())
        .transpose()?
        .unwrap_or(5.0);

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    // clear any existing collected data
    time_graph::clear_collected_data();

    let (npw, nnz) = time_graph::spanned!("Full calculation", {
        compute_hamiltonian(twist_angle.to_radians())?
    });
    println!("twist = {}°: {} plane waves, {} non-zero entries", twist_angle, npw, nnz);

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());

    // also available for saving profiling data to the disk & future analysis
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}

/// Build the Hamiltonian of twisted bilayer graphene-like hexagonal layers
fn compute_hamiltonian(twist_angle: f64) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let (sin, cos) = twist_angle.sin_cos();
    let sqrt_3_2 = 0.5 * f64::sqrt(3.0);
    let system = format!(r#"{{
        "layer_1": {{"primitive_vectors": [[1.0, 0.0], [0.5, {sqrt_3_2}]]}},
        "layer_2": {{
            "primitive_vectors": [[{cos}, {sin}], [{x}, {y}]],
            "offset": [0.0, 0.0]
        }},
        "twist_angle": {twist_angle}
    }}"#,
        x = 0.5 * cos - sqrt_3_2 * sin,
        y = 0.5 * sin + sqrt_3_2 * cos,
    );
    let system = TwistedBilayer::from_json(&system)?;

    let parameters = PlaneWaveParameters::from_json(r#"{
        "ecut_length": 40.0,
        "ecut_width": 20.0,
        "gamma": 0.05,
        "n_eigs": 10
    }"#)?;

    let (basis, hamiltonian) = build_hamiltonian(&system, &parameters)?;
    let _dense = hamiltonian.to_dense();

    Ok((basis.len(), hamiltonian.nnz()))
}
