//! MNA system assembly.
//!
//! Unknowns are ordered once per assembly: the circuit's non-ground nodes in
//! discovery order, then its voltage sources in discovery order. The same
//! order indexes G, B, C, Z and the back-substitution.

use tracing::debug;

use crate::algebra::{Complex, Matrix};
use crate::circuit::{BipoleId, Circuit, NodeId, Pin, VarIndex};
use crate::components::Component;
use crate::error::{PhasorError, Result};

/// Complex MNA system `A x = z` for one analysis frequency.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// Angular frequency the admittances were evaluated at
    pub omega: f64,
    /// Non-ground nodes, in unknown order
    pub nodes: Vec<NodeId>,
    /// Voltage sources, in unknown order
    pub sources: Vec<BipoleId>,
    /// Coefficient matrix `[[G, B], [C, D]]`
    pub a: Matrix<Complex>,
    /// Right-hand side column
    pub z: Matrix<Complex>,
}

impl MnaSystem {
    /// Assemble the system for `circuit` at `omega`.
    pub fn build(circuit: &Circuit, omega: f64) -> Result<Self> {
        let nodes: Vec<NodeId> = circuit.nodes().iter().copied().collect();
        let sources: Vec<BipoleId> = circuit
            .bipoles()
            .filter(|b| matches!(b.component, Component::VoltageSource(_)))
            .map(|b| b.id)
            .collect();

        let g = build_g(circuit, omega)?;
        let b = build_b(circuit, &sources)?;
        let c = build_c(&b);
        let d = build_d(sources.len());
        let a = build_a(g, b, c, d);
        let z = build_z(circuit, &sources)?;

        debug!(
            nodes = nodes.len(),
            sources = sources.len(),
            size = a.rows(),
            "assembled MNA system"
        );

        Ok(Self {
            omega,
            nodes,
            sources,
            a,
            z,
        })
    }

    /// Number of non-ground nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of voltage sources.
    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    /// Total number of unknowns.
    pub fn size(&self) -> usize {
        self.num_nodes() + self.num_sources()
    }

    /// Position of an unknown in the solution vector.
    pub fn index(&self, var: VarIndex) -> usize {
        var.to_index(self.num_nodes())
    }
}

/// Add `value` into a cell, treating absence as zero.
fn accumulate(matrix: &mut Matrix<Complex>, row: usize, col: usize, value: Complex) {
    match matrix.get_mut(row, col) {
        Some(cell) => *cell += value,
        None => matrix.insert(row, col, value),
    }
}

/// Stamp an admittance between two nodes (`None` is ground).
fn stamp_admittance(g: &mut Matrix<Complex>, n1: Option<usize>, n2: Option<usize>, y: Complex) {
    if let Some(i) = n1 {
        accumulate(g, i, i, y);
    }
    if let Some(j) = n2 {
        accumulate(g, j, j, y);
    }
    if let (Some(i), Some(j)) = (n1, n2) {
        accumulate(g, i, j, -y);
        accumulate(g, j, i, -y);
    }
}

fn pin_indices(circuit: &Circuit, bipole: BipoleId) -> Result<(Option<usize>, Option<usize>)> {
    let b = circuit.bipole(bipole)?;
    Ok((
        circuit.node_index(b.node(Pin::A))?,
        circuit.node_index(b.node(Pin::B))?,
    ))
}

/// Conductance block: admittances of every passive component.
pub fn build_g(circuit: &Circuit, omega: f64) -> Result<Matrix<Complex>> {
    let n = circuit.nodes().len();
    let mut g = Matrix::absent(n, n);

    for bipole in circuit.bipoles() {
        let Some(y) = bipole.component.admittance(omega) else {
            continue;
        };
        if !y.0.is_finite() {
            return Err(PhasorError::DegenerateImpedance {
                bipole: bipole.id,
                omega,
            });
        }
        let (n1, n2) = pin_indices(circuit, bipole.id)?;
        stamp_admittance(&mut g, n1, n2, y.0);
    }

    Ok(g)
}

/// Source incidence block: `+1` at the positive node, `-1` at the negative.
pub fn build_b(circuit: &Circuit, sources: &[BipoleId]) -> Result<Matrix<Complex>> {
    let n = circuit.nodes().len();
    let mut b = Matrix::absent(n, sources.len());

    for (k, &source) in sources.iter().enumerate() {
        let (pos, neg) = pin_indices(circuit, source)?;
        if let Some(i) = pos {
            accumulate(&mut b, i, k, Complex::ONE);
        }
        if let Some(j) = neg {
            accumulate(&mut b, j, k, -Complex::ONE);
        }
    }

    Ok(b)
}

/// Transpose of B; independent sources only.
pub fn build_c(b: &Matrix<Complex>) -> Matrix<Complex> {
    b.transpose()
}

/// Source coupling block, all absent.
pub fn build_d(num_sources: usize) -> Matrix<Complex> {
    Matrix::absent(num_sources, num_sources)
}

/// Compose `[[G, B], [C, D]]`.
pub fn build_a(
    g: Matrix<Complex>,
    b: Matrix<Complex>,
    c: Matrix<Complex>,
    d: Matrix<Complex>,
) -> Matrix<Complex> {
    let blocks = Matrix::from_rows(vec![vec![Some(g), Some(b)], vec![Some(c), Some(d)]]);
    Matrix::from_blocks(&blocks)
}

/// Right-hand side: injected node currents, then source voltages.
pub fn build_z(circuit: &Circuit, sources: &[BipoleId]) -> Result<Matrix<Complex>> {
    let n = circuit.nodes().len();
    let mut z = Matrix::absent(n + sources.len(), 1);

    for bipole in circuit.bipoles() {
        if let Component::CurrentSource(cs) = &bipole.component {
            let (pos, neg) = pin_indices(circuit, bipole.id)?;
            let current = cs.current.value;
            if let Some(i) = pos {
                accumulate(&mut z, i, 0, current);
            }
            if let Some(j) = neg {
                accumulate(&mut z, j, 0, -current);
            }
        }
    }

    for (k, &source) in sources.iter().enumerate() {
        if let Component::VoltageSource(vs) = &circuit.bipole(source)?.component {
            z.insert(VarIndex::Current(k).to_index(n), 0, vs.voltage.value);
        }
    }

    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::ImaginaryUnit;
    use crate::circuit::Network;
    use crate::units::{hertz, Current, Voltage};

    fn divider() -> (Circuit, NodeId, NodeId) {
        let mut net = Network::new();
        let a = net.add_node("A");
        let b = net.add_node("B");
        let g = net.add_ground();
        net.add(
            Component::voltage_source(Voltage::from_peak(50.0, 0.0, 0.0), Pin::A),
            a,
            g,
        )
        .unwrap();
        net.add(Component::resistor(10.0), a, b).unwrap();
        net.add(Component::resistor(10.0), b, g).unwrap();
        (Circuit::auto_discover(net, a).unwrap(), a, b)
    }

    #[test]
    fn test_conductance_block() {
        let (circuit, a, b) = divider();
        let g = build_g(&circuit, 0.0).unwrap();
        let ia = circuit.node_index(a).unwrap().unwrap();
        let ib = circuit.node_index(b).unwrap().unwrap();

        assert_eq!(g.size(), (2, 2));
        assert_eq!(*g.get(ia, ia).unwrap(), 0.1);
        assert_eq!(*g.get(ib, ib).unwrap(), 0.2);
        assert_eq!(*g.get(ia, ib).unwrap(), -0.1);
        assert_eq!(*g.get(ib, ia).unwrap(), -0.1);
    }

    #[test]
    fn test_full_system_layout() {
        let (circuit, a, _) = divider();
        let system = MnaSystem::build(&circuit, 0.0).unwrap();
        let ia = circuit.node_index(a).unwrap().unwrap();
        let src = system.index(VarIndex::Current(0));

        assert_eq!(system.size(), 3);
        assert_eq!(system.a.size(), (3, 3));
        assert_eq!(*system.a.get(ia, src).unwrap(), 1.0);
        assert_eq!(*system.a.get(src, ia).unwrap(), 1.0);
        assert_eq!(system.a.get(src, src), None);
        assert_eq!(*system.z.get(src, 0).unwrap(), 50.0);
        assert_eq!(system.z.get(ia, 0), None);
    }

    #[test]
    fn test_capacitor_admittance() {
        let omega = hertz(1_000.0);
        let mut net = Network::new();
        let a = net.add_node("A");
        let g = net.add_ground();
        net.add(
            Component::current_source(Current::from_peak(2.0, 0.0, omega), Pin::B),
            a,
            g,
        )
        .unwrap();
        net.add(Component::capacitor(1e-6), a, g).unwrap();
        let circuit = Circuit::auto_discover(net, a).unwrap();

        let g_block = build_g(&circuit, omega).unwrap();
        assert_eq!(*g_block.get(0, 0).unwrap(), (omega * 1e-6).j());

        let z = build_z(&circuit, &[]).unwrap();
        assert_eq!(*z.get(0, 0).unwrap(), -2.0);
    }

    #[test]
    fn test_inductor_at_dc_is_degenerate() {
        let mut net = Network::new();
        let a = net.add_node("A");
        let g = net.add_ground();
        net.add(
            Component::voltage_source(Voltage::from_peak(1.0, 0.0, 0.0), Pin::A),
            a,
            g,
        )
        .unwrap();
        let l = net.add(Component::inductor(1e-3), a, g).unwrap();
        let circuit = Circuit::auto_discover(net, a).unwrap();

        assert_eq!(
            build_g(&circuit, 0.0),
            Err(PhasorError::DegenerateImpedance {
                bipole: l,
                omega: 0.0
            })
        );
    }

    #[test]
    fn test_no_voltage_sources_leaves_a_square() {
        let d = build_d(0);
        let g = Matrix::from_rows(vec![vec![Some(Complex::ONE)]]);
        let b = Matrix::absent(1, 0);
        let c = build_c(&b);
        let a = build_a(g.clone(), b, c, d);
        assert_eq!(a, g);
    }
}
