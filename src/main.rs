//! Phasor - AC Circuit Solver
//!
//! Builds one of a few stock circuits, solves it at a single frequency and
//! prints node voltages and branch currents.
//!
//! # Usage
//!
//! ```bash
//! phasor divider --amplitude 50 --r1 10 --r2 10
//! RUST_LOG=debug phasor rc --frequency 1000 --resistance 1000 --capacitance 1e-6
//! ```

use std::{env, io};

use clap::{Parser, Subcommand};
use phasor_core::{
    circuit::{Circuit, Network, NodeId, Pin},
    components::Component,
    error::Result,
    units::{hertz, Voltage},
    AcSolver, SolverConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Single-frequency AC circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    circuit: StockCircuit,

    /// Relative tolerance for matching source frequencies
    #[arg(long, default_value_t = 1e-9, global = true)]
    frequency_tolerance: f64,
}

#[derive(Subcommand, Debug)]
enum StockCircuit {
    /// Two resistors in series across a voltage source
    Divider {
        /// Source peak amplitude in volts
        #[arg(short, long, default_value_t = 50.0)]
        amplitude: f64,
        /// Source frequency in Hz (0 for DC)
        #[arg(short, long, default_value_t = 0.0)]
        frequency: f64,
        /// Upper resistor in ohms
        #[arg(long, default_value_t = 10.0)]
        r1: f64,
        /// Lower resistor in ohms
        #[arg(long, default_value_t = 10.0)]
        r2: f64,
    },
    /// Series capacitor feeding a resistor to ground
    Rc {
        /// Source peak amplitude in volts
        #[arg(short, long, default_value_t = 5.0)]
        amplitude: f64,
        /// Source frequency in Hz
        #[arg(short, long, default_value_t = 1_000.0)]
        frequency: f64,
        /// Resistance in ohms
        #[arg(short, long, default_value_t = 1_000.0)]
        resistance: f64,
        /// Capacitance in farads
        #[arg(short, long, default_value_t = 1e-6)]
        capacitance: f64,
    },
}

fn main() -> Result<()> {
    let spec = env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(spec.as_deref()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let (network, seed) = build(&args.circuit)?;

    let mut circuit = Circuit::auto_discover(network, seed)?;
    let config = SolverConfig::new().with_frequency_tolerance(args.frequency_tolerance);
    let solution = AcSolver::with_config(config).solve(&mut circuit)?;
    info!(
        hertz = solution.omega / (2.0 * std::f64::consts::PI),
        unknowns = solution.unknowns.len(),
        "solved"
    );

    report(&circuit)
}

/// Filter directives from `RUST_LOG`, or `info` when those are missing or
/// unparsable.
fn log_filter(spec: Option<&str>) -> EnvFilter {
    spec.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Build the requested stock circuit, returning the network and a seed node.
fn build(circuit: &StockCircuit) -> Result<(Network, NodeId)> {
    let mut net = Network::new();
    match *circuit {
        StockCircuit::Divider {
            amplitude,
            frequency,
            r1,
            r2,
        } => {
            let a = net.add_node("A");
            let b = net.add_node("B");
            let gnd = net.add_ground();
            let source = Voltage::from_peak(amplitude, 0.0, hertz(frequency));
            net.add_named("V1", Component::voltage_source(source, Pin::A), a, gnd)?;
            net.add_named("R1", Component::resistor(r1), a, b)?;
            net.add_named("R2", Component::resistor(r2), b, gnd)?;
            Ok((net, a))
        }
        StockCircuit::Rc {
            amplitude,
            frequency,
            resistance,
            capacitance,
        } => {
            let a = net.add_node("A");
            let b = net.add_node("B");
            let gnd = net.add_ground();
            let source = Voltage::from_peak(amplitude, 0.0, hertz(frequency));
            net.add_named("V1", Component::voltage_source(source, Pin::A), b, gnd)?;
            net.add_named("C1", Component::capacitor(capacitance), b, a)?;
            net.add_named("R1", Component::resistor(resistance), a, gnd)?;
            Ok((net, b))
        }
    }
}

fn report(circuit: &Circuit) -> Result<()> {
    println!("Nodes:");
    for &id in circuit.nodes() {
        let node = circuit.node(id)?;
        if let Some(v) = node.voltage {
            println!("  {:<6} {}", node.label(), v);
        }
    }

    println!("Branches:");
    for bipole in circuit.bipoles() {
        let current = bipole
            .current
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<6} {:<15} {}",
            bipole.label(),
            bipole.component.kind(),
            current
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(
            log_filter(Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(Some("phasor_core=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            log_filter(Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("phasor_core=loudest")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_build_divider() {
        let circuit = StockCircuit::Divider {
            amplitude: 50.0,
            frequency: 0.0,
            r1: 10.0,
            r2: 10.0,
        };
        let (network, seed) = build(&circuit).unwrap();
        assert_eq!(network.bipoles().count(), 3);
        assert_eq!(network.node(seed).unwrap().label(), "A");
    }
}
