//! Solve preconditions.

use crate::error::{PhasorError, Result};

use super::Circuit;

/// Determine the single analysis frequency of a circuit.
///
/// Checks:
/// - At least one independent source is present
/// - Every source runs at the same angular frequency, within a relative
///   `tolerance`
pub fn analysis_frequency(circuit: &Circuit, tolerance: f64) -> Result<f64> {
    let mut expected: Option<f64> = None;

    for bipole in circuit.bipoles() {
        let Some(found) = bipole.component.source_omega() else {
            continue;
        };
        match expected {
            None => expected = Some(found),
            Some(omega) => {
                let scale = omega.abs().max(found.abs()).max(1.0);
                if (omega - found).abs() > tolerance * scale {
                    return Err(PhasorError::FrequencyMismatch {
                        expected: omega,
                        found,
                        bipole: bipole.id,
                    });
                }
            }
        }
    }

    expected.ok_or(PhasorError::NoSources)
}
