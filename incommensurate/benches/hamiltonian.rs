use incommensurate::{Lattice2D, Layer, TwistedBilayer, PlaneWaveBasis, Hamiltonian};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn hamiltonian_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamiltonian assembly");
    group.noise_threshold(0.05);
    group.sample_size(20);

    let layer = Layer::new(Lattice2D::hexagonal(1.0).expect("valid lattice"));
    let system = TwistedBilayer::with_twist(layer, 0.1).expect("valid system");

    for &cutoff in black_box(&[10.0, 20.0, 30.0]) {
        let basis = PlaneWaveBasis::new(&system, 1.5 * cutoff, cutoff).expect("valid cutoffs");
        group.bench_function(format!("npw = {}", basis.len()), |b| b.iter(|| {
            Hamiltonian::assemble(&basis, black_box(0.05)).expect("valid gamma")
        }));
    }
}

criterion_group!(benches, hamiltonian_assembly);
criterion_main!(benches);
