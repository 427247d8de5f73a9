//! Single-frequency AC solve.

use std::fmt;

use tracing::{debug, trace};

use super::linear::{DenseLu, LinearSolver};
use super::mna::MnaSystem;
use crate::algebra::{complex_from_doubled, Complex};
use crate::circuit::{analysis_frequency, BipoleId, Circuit, NodeId, VarIndex};
use crate::components::Component;
use crate::error::{PhasorError, Result};
use crate::units::{Current, Voltage};

/// Solver configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// LU pivots smaller than this are treated as singular
    pub pivot_tolerance: f64,
    /// Relative tolerance for two sources to share a frequency
    pub frequency_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-15,
            frequency_tolerance: 1e-9,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the singular pivot threshold.
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Set the relative frequency matching tolerance.
    pub fn with_frequency_tolerance(mut self, tolerance: f64) -> Self {
        self.frequency_tolerance = tolerance;
        self
    }
}

/// Complex unknowns of a solved circuit.
#[derive(Debug, Clone)]
pub struct AcSolution {
    /// Analysis angular frequency
    pub omega: f64,
    /// Non-ground nodes, in unknown order
    pub nodes: Vec<NodeId>,
    /// Voltage sources, in unknown order
    pub sources: Vec<BipoleId>,
    /// Node voltages followed by voltage-source currents
    pub unknowns: Vec<Complex>,
}

impl AcSolution {
    /// Voltage of a non-ground node, by the handle it was solved under.
    pub fn node_voltage(&self, node: NodeId) -> Option<Voltage> {
        let i = self.nodes.iter().position(|&n| n == node)?;
        let index = VarIndex::Voltage(i).to_index(self.nodes.len());
        Some(Voltage::new(self.omega, self.unknowns[index]))
    }

    /// Current into the positive terminal of a voltage source.
    pub fn source_current(&self, source: BipoleId) -> Option<Current> {
        let k = self.sources.iter().position(|&s| s == source)?;
        let index = VarIndex::Current(k).to_index(self.nodes.len());
        Some(Current::new(self.omega, self.unknowns[index]))
    }
}

/// AC circuit solver.
///
/// Assembles the complex MNA system, embeds it as a real system twice the
/// size, solves it with the configured backend and writes node voltages and
/// branch currents back onto the circuit.
pub struct AcSolver {
    config: SolverConfig,
    backend: Box<dyn LinearSolver>,
}

impl fmt::Debug for AcSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcSolver")
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Default for AcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AcSolver {
    /// Create a solver with default configuration and the dense LU backend.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a solver with custom configuration and the dense LU backend.
    pub fn with_config(config: SolverConfig) -> Self {
        let backend = DenseLu::new(config.pivot_tolerance);
        Self::with_backend(config, backend)
    }

    /// Create a solver with a custom linear backend.
    pub fn with_backend(config: SolverConfig, backend: impl LinearSolver + 'static) -> Self {
        Self {
            config,
            backend: Box::new(backend),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the circuit and record the results on its nodes and bipoles.
    pub fn solve(&self, circuit: &mut Circuit) -> Result<AcSolution> {
        let omega = analysis_frequency(circuit, self.config.frequency_tolerance)?;
        let system = MnaSystem::build(circuit, omega)?;

        let size = 2 * system.size();
        let a = system.a.to_real_doubled();
        let z = system.z.to_column_vector_doubled()?.to_row_major(size, 1);
        debug!(
            size,
            backend = self.backend.name(),
            "solving doubled real system"
        );

        let x = self.backend.solve(&a, &z)?;
        if x.len() != size {
            return Err(PhasorError::MalformedSolution {
                expected: size,
                found: x.len(),
            });
        }
        let unknowns = complex_from_doubled(&x)?;

        let solution = AcSolution {
            omega,
            nodes: system.nodes,
            sources: system.sources,
            unknowns,
        };
        write_back(circuit, &solution)?;

        debug!(omega, "AC solve complete");
        Ok(solution)
    }
}

/// Record node voltages and branch currents on the circuit.
fn write_back(circuit: &mut Circuit, solution: &AcSolution) -> Result<()> {
    let omega = solution.omega;
    let ground = circuit.ground();
    circuit.network_mut().node_mut(ground)?.voltage = Some(Voltage::zero(omega));

    for (i, &node) in solution.nodes.iter().enumerate() {
        let index = VarIndex::Voltage(i).to_index(solution.nodes.len());
        let voltage = Voltage::new(omega, solution.unknowns[index]);
        trace!(%node, %voltage, "node voltage");
        circuit.network_mut().node_mut(node)?.voltage = Some(voltage);
    }

    for (k, &source) in solution.sources.iter().enumerate() {
        let index = VarIndex::Current(k).to_index(solution.nodes.len());
        let current = Current::new(omega, solution.unknowns[index]);
        circuit.network_mut().bipole_mut(source)?.current = Some(current);
    }

    let mut currents: Vec<(BipoleId, Current)> = Vec::new();
    for bipole in circuit.bipoles() {
        match &bipole.component {
            Component::CurrentSource(cs) => currents.push((bipole.id, cs.current)),
            component => {
                let Some(y) = component.admittance(omega) else {
                    continue;
                };
                if let Some(v) = circuit.bipole_voltage(bipole.id)? {
                    currents.push((bipole.id, v * y));
                }
            }
        }
    }
    for (bipole, current) in currents {
        trace!(%bipole, %current, "branch current");
        circuit.network_mut().bipole_mut(bipole)?.current = Some(current);
    }

    Ok(())
}
