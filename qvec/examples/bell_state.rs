//! Prepare a Bell pair, inspect it and sample it
//!
//! Run with `RUST_LOG=debug` to see the engine's log output.

use qvec::{PauliString, QuantumGate, Simulator, SimulatorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    println!("{}", qvec::version());

    let mut sim = Simulator::new(2, SimulatorConfig::debug())?;
    sim.run(&[QuantumGate::h(0), QuantumGate::cnot(0, 1)])?;
    println!("{}", sim.state());

    for observable in ["ZZ", "XX", "YY", "ZI"] {
        let pauli: PauliString = observable.parse()?;
        println!("<{}> = {:+.4}", observable, sim.expectation(&pauli)?);
    }

    let samples = sim.sample(1000)?;
    let mut counts: Vec<_> = samples.to_bitstring_counts(2).into_iter().collect();
    counts.sort();
    for (bits, count) in counts {
        println!("|{}⟩: {}", bits, count);
    }

    println!("\n{}", sim.statistics());
    Ok(())
}
