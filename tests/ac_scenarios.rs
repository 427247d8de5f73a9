//! End-to-end AC analysis scenarios.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use phasor_core::algebra::{Complex, Matrix};
use phasor_core::circuit::{BipoleId, Circuit, Network, Pin};
use phasor_core::components::Component;
use phasor_core::units::{hertz, Current, Impedance, Voltage};
use phasor_core::{AcSolver, PhasorError, Result, SolverConfig};

const MILLI: f64 = 1e3;

#[test]
fn test_dc_divider_midpoint() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let gnd = net.add_ground();
    net.add(
        Component::voltage_source(Voltage::from_peak(50.0, 0.0, 0.0), Pin::A),
        a,
        gnd,
    )
    .unwrap();
    let r1 = net.add(Component::resistor(10.0), a, b).unwrap();
    let r2 = net.add(Component::resistor(10.0), b, gnd).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    AcSolver::new().solve(&mut circuit).unwrap();

    let vb = circuit.node_voltage(b).unwrap().unwrap();
    assert_abs_diff_eq!(vb.peak(), 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(vb.phase(), 0.0, epsilon = 1e-9);
    assert_eq!(vb.omega, 0.0);

    let i1 = circuit.bipole_current(r1).unwrap().unwrap();
    let i2 = circuit.bipole_current(r2).unwrap().unwrap();
    assert_abs_diff_eq!(i1.value.real(), 2.5, epsilon = 1e-9);
    assert_eq!(i1, i2);

    let across = circuit.bipole_voltage(r1).unwrap().unwrap();
    assert_abs_diff_eq!(across.value.real(), 25.0, epsilon = 1e-9);
}

#[test]
fn test_rc_high_pass() {
    let omega = hertz(1_000.0);
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let gnd = net.add_ground();
    let r = net.add(Component::resistor(1_000.0), a, gnd).unwrap();
    net.add(Component::capacitor(1e-6), b, a).unwrap();
    let source = Voltage::from_peak(5.0, 0.0, omega);
    net.add(Component::voltage_source(source, Pin::A), b, gnd)
        .unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    AcSolver::new().solve(&mut circuit).unwrap();

    let zr = Impedance(Complex::from(1_000.0));
    let zc = Impedance((omega * 1e-6).recip() * Complex::new(0.0, -1.0));
    let expected = source.value * zr.0 / Impedance::series([zr, zc]).0;

    let vr = circuit.bipole_voltage(r).unwrap().unwrap();
    assert_abs_diff_eq!(vr.value.real(), expected.real(), epsilon = 1e-9);
    assert_abs_diff_eq!(vr.value.imaginary(), expected.imaginary(), epsilon = 1e-9);
    assert_relative_eq!(vr.peak(), 4.937_852_460_756_959, max_relative = 1e-9);
}

#[test]
fn test_series_rl_divider() {
    let omega = hertz(1_000.0);
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let gnd = net.add_ground();
    let source = Voltage::from_peak(10.0, 0.0, omega);
    net.add(Component::voltage_source(source, Pin::A), a, gnd)
        .unwrap();
    net.add(Component::resistor(100.0), a, b).unwrap();
    let l = net.add(Component::inductor(10e-3), b, gnd).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    AcSolver::new().solve(&mut circuit).unwrap();

    let zr = Impedance(Complex::from(100.0));
    let zl = Impedance(Complex::new(0.0, omega * 10e-3));
    let expected = source.value * zl.0 / Impedance::series([zr, zl]).0;

    // Inductive load: the output leads the source
    let vb = circuit.node_voltage(b).unwrap().unwrap();
    assert_abs_diff_eq!(vb.value.real(), expected.real(), epsilon = 1e-9);
    assert_abs_diff_eq!(vb.value.imaginary(), expected.imaginary(), epsilon = 1e-9);
    assert!(vb.phase() > 0.0);

    let il = circuit.bipole_current(l).unwrap().unwrap();
    let expected_il = expected / zl.0;
    assert_abs_diff_eq!(il.value.real(), expected_il.real(), epsilon = 1e-9);
    assert_abs_diff_eq!(il.value.imaginary(), expected_il.imaginary(), epsilon = 1e-9);
    assert_eq!(il.omega, omega);
}

#[test]
fn test_capacitor_ladder_currents() {
    let omega = hertz(15_000.0);
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let gnd = net.add_ground();
    let vs = net
        .add_named(
            "V1",
            Component::voltage_source(Voltage::from_rms(12.0, 0.0, omega), Pin::A),
            a,
            gnd,
        )
        .unwrap();
    let c1 = net
        .add_named("C1", Component::capacitor(59.6e-9), a, gnd)
        .unwrap();
    let c2 = net
        .add_named("C2", Component::capacitor(13.6e-9), a, b)
        .unwrap();
    let r1 = net
        .add_named("R1", Component::resistor(72.0), b, gnd)
        .unwrap();
    net.add_named("R2", Component::resistor(51.0), b, gnd)
        .unwrap();

    let mut circuit = Circuit::auto_discover(net, b).unwrap();
    AcSolver::new().solve(&mut circuit).unwrap();

    let rms_ma = |id: BipoleId| circuit.bipole_current(id).unwrap().unwrap().rms() * MILLI;
    assert_abs_diff_eq!(rms_ma(vs), 82.7, epsilon = 0.2);
    assert_abs_diff_eq!(rms_ma(c2), 15.3, epsilon = 0.2);
    assert_abs_diff_eq!(rms_ma(c1), 67.3, epsilon = 0.2);
    assert_abs_diff_eq!(rms_ma(r1), 6.37, epsilon = 0.01);
}

#[test]
fn test_current_source_into_resistor() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let gnd = net.add_ground();
    let source = Current::from_peak(1.0, 0.0, hertz(50.0));
    let is = net
        .add(Component::current_source(source, Pin::A), a, gnd)
        .unwrap();
    net.add(Component::resistor(10.0), a, gnd).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    AcSolver::new().solve(&mut circuit).unwrap();

    let va = circuit.node_voltage(a).unwrap().unwrap();
    assert_abs_diff_eq!(va.value.real(), 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(va.value.imaginary(), 0.0, epsilon = 1e-9);
    assert_eq!(circuit.bipole_current(is).unwrap(), Some(source));
}

#[test]
fn test_grounds_declared_separately_are_merged() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let g1 = net.add_ground();
    let g2 = net.add_ground();
    net.add(
        Component::voltage_source(Voltage::from_peak(9.0, 0.0, 0.0), Pin::A),
        a,
        g1,
    )
    .unwrap();
    net.add(Component::resistor(2.0), a, b).unwrap();
    net.add(Component::resistor(1.0), b, g2).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    AcSolver::new().solve(&mut circuit).unwrap();

    assert_eq!(circuit.network().nodes().count(), 3);
    assert_eq!(
        circuit.node_voltage(g2).unwrap(),
        Some(Voltage::zero(0.0))
    );
    let vb = circuit.node_voltage(b).unwrap().unwrap();
    assert_abs_diff_eq!(vb.value.real(), 3.0, epsilon = 1e-9);
}

#[test]
fn test_reversed_source_polarity() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let gnd = net.add_ground();
    net.add(
        Component::voltage_source(Voltage::from_peak(5.0, 0.0, 0.0), Pin::B),
        a,
        gnd,
    )
    .unwrap();
    net.add(Component::resistor(1.0), a, gnd).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    AcSolver::new().solve(&mut circuit).unwrap();

    let va = circuit.node_voltage(a).unwrap().unwrap();
    assert_abs_diff_eq!(va.value.real(), -5.0, epsilon = 1e-9);
}

#[test]
fn test_rewired_network_solves() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let c = net.add_node("C");
    let gnd = net.add_ground();
    net.add(
        Component::voltage_source(Voltage::from_peak(12.0, 0.0, 0.0), Pin::A),
        a,
        gnd,
    )
    .unwrap();
    net.add(Component::resistor(1.0), a, b).unwrap();
    let load = net.add(Component::resistor(1.0), b, c).unwrap();
    let stray = net.add(Component::resistor(1.0), c, gnd).unwrap();

    // Short the load straight to ground and drop the stray path
    net.reassign_pin(load, Pin::B, gnd).unwrap();
    net.remove_bipole(stray).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    assert_eq!(circuit.nodes().len(), 2);
    AcSolver::new().solve(&mut circuit).unwrap();

    let vb = circuit.node_voltage(b).unwrap().unwrap();
    assert_abs_diff_eq!(vb.value.real(), 6.0, epsilon = 1e-9);
    assert_eq!(circuit.node_voltage(c).unwrap(), None);
}

#[test]
fn test_mixed_frequencies_rejected() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let gnd = net.add_ground();
    net.add(
        Component::voltage_source(Voltage::from_peak(1.0, 0.0, hertz(50.0)), Pin::A),
        a,
        gnd,
    )
    .unwrap();
    net.add(
        Component::voltage_source(Voltage::from_peak(1.0, 0.0, hertz(60.0)), Pin::A),
        b,
        gnd,
    )
    .unwrap();
    net.add(Component::resistor(100.0), a, b).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    let err = AcSolver::new().solve(&mut circuit).unwrap_err();
    assert!(matches!(err, PhasorError::FrequencyMismatch { .. }));
    assert!(err.is_contract_violation());
    assert_eq!(circuit.node_voltage(a).unwrap(), None);
}

#[test]
fn test_missing_ground_rejected() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    net.add(
        Component::voltage_source(Voltage::from_peak(1.0, 0.0, 0.0), Pin::A),
        a,
        b,
    )
    .unwrap();
    net.add(Component::resistor(100.0), a, b).unwrap();

    let err = Circuit::auto_discover(net, a).unwrap_err();
    assert_eq!(err, PhasorError::MissingGround);
    assert!(err.is_contract_violation());
}

#[test]
fn test_floating_node_is_singular() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let b = net.add_node("B");
    let c = net.add_node("C");
    let gnd = net.add_ground();
    net.add(
        Component::voltage_source(Voltage::from_peak(1.0, 0.0, 0.0), Pin::A),
        a,
        gnd,
    )
    .unwrap();
    net.add(Component::resistor(1.0), a, gnd).unwrap();
    // C is reached only through a current source
    net.add(
        Component::current_source(Current::from_peak(1.0, 0.0, 0.0), Pin::A),
        b,
        c,
    )
    .unwrap();
    net.add(Component::resistor(1.0), a, b).unwrap();

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    let err = AcSolver::new().solve(&mut circuit).unwrap_err();
    assert!(matches!(err, PhasorError::SingularMatrix { .. }));
    assert!(!err.is_contract_violation());
}

#[test]
fn test_custom_backend_sees_doubled_system() {
    let mut net = Network::new();
    let a = net.add_node("A");
    let gnd = net.add_ground();
    net.add(
        Component::voltage_source(Voltage::from_peak(2.0, 0.0, hertz(10.0)), Pin::A),
        a,
        gnd,
    )
    .unwrap();
    net.add(Component::resistor(4.0), a, gnd).unwrap();

    // One node and one source: the doubled system is 4x4
    let backend = |matrix: &Matrix<f64>, rhs: &[f64]| -> Result<Vec<f64>> {
        assert_eq!(matrix.size(), (4, 4));
        assert_eq!(rhs, &[0.0, 2.0, 0.0, 0.0]);
        Ok(vec![2.0, -0.5, 0.0, 0.0])
    };

    let mut circuit = Circuit::auto_discover(net, a).unwrap();
    let solver = AcSolver::with_backend(SolverConfig::default(), backend);
    let solution = solver.solve(&mut circuit).unwrap();

    assert_eq!(solution.unknowns, vec![Complex::from(2.0), Complex::from(-0.5)]);
    assert_eq!(
        circuit.node_voltage(a).unwrap(),
        Some(Voltage::new(hertz(10.0), Complex::from(2.0)))
    );
}
