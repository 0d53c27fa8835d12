//! Propeller thrust and power coefficient surrogates.
//!
//! Coefficients follow the `n²D⁴` / `n³D⁵` convention:
//! `F = Ct·ρ·n²·D⁴` and `P = Cp·ρ·n³·D⁵`, with `n` in rev/s.

/// Lower bound applied to every coefficient so that a surrogate evaluated
/// outside its fitting range never yields zero or negative thrust.
const MIN_COEFFICIENT: f64 = 1e-10;

/// Regression coefficients for the propeller surrogates.
///
/// The default values are fitted on APC multirotor propellers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropellerAerodynamics {
    /// Static thrust coefficient, `[a0, a1]` in `Ct = a0 + a1·β`.
    pub static_thrust: [f64; 2],
    /// Static power coefficient, `[a0, a1]` in `Cp = a0 + a1·β`.
    pub static_power: [f64; 2],
    /// Axial-flow thrust polynomial over
    /// `[1, β, β², β³, J, J², J³, βJ, β²J, βJ²]`.
    pub axial_thrust: [f64; 10],
    /// Axial-flow power polynomial, same terms as `axial_thrust`.
    pub axial_power: [f64; 10],
    pub incidence: IncidenceModel,
}

impl Default for PropellerAerodynamics {
    fn default() -> Self {
        Self {
            static_thrust: [4.27e-2, 1.44e-1],
            static_power: [-1.48e-3, 9.72e-2],
            axial_thrust: [
                0.02791, 0.11867, 0.27334, -0.28852, -0.06543, -0.23504, 0.02104, 0.0, 0.0,
                0.18677,
            ],
            axial_power: [
                0.01813, -0.06218, 0.35712, -0.23774, 0.00343, -0.1235, 0.0, 0.07549, 0.0, 0.0,
            ],
            incidence: IncidenceModel::default(),
        }
    }
}

/// Blade geometry used to correct axial coefficients for an inclined
/// rotor disk (Leng's model).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncidenceModel {
    pub blades: f64,
    /// Blade chord over tip radius.
    pub chord_to_radius: f64,
    /// Normalized radius of the representative blade section.
    pub reference_radius: f64,
    /// Zero-thrust advance ratio, `[a0, a1]` in `J0 = a0 + a1·β`.
    pub zero_thrust_advance: [f64; 2],
    /// Zero-power advance ratio, `[a0, a1]` in `J0 = a0 + a1·β`.
    pub zero_power_advance: [f64; 2],
}

impl Default for IncidenceModel {
    fn default() -> Self {
        Self {
            blades: 2.0,
            chord_to_radius: 0.15,
            reference_radius: 0.75,
            zero_thrust_advance: [0.197, 1.094],
            zero_power_advance: [0.286, 0.993],
        }
    }
}

/// Thrust and power coefficients at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Coefficients {
    pub(super) thrust: f64,
    pub(super) power: f64,
}

impl PropellerAerodynamics {
    /// Coefficients of a propeller with pitch ratio `beta` at rest.
    pub(super) fn static_coefficients(&self, beta: f64) -> Coefficients {
        Coefficients {
            thrust: self.static_thrust[0] + self.static_thrust[1] * beta,
            power: self.static_power[0] + self.static_power[1] * beta,
        }
    }

    /// Coefficients in purely axial flow at advance ratio `j`.
    pub(super) fn axial_coefficients(&self, beta: f64, j: f64) -> Coefficients {
        let terms = [
            1.0,
            beta,
            beta * beta,
            beta.powi(3),
            j,
            j * j,
            j.powi(3),
            beta * j,
            beta * beta * j,
            beta * j * j,
        ];
        let dot = |coeffs: &[f64; 10]| -> f64 {
            coeffs.iter().zip(terms).map(|(c, t)| c * t).sum()
        };

        Coefficients {
            thrust: dot(&self.axial_thrust).max(MIN_COEFFICIENT),
            power: dot(&self.axial_power).max(MIN_COEFFICIENT),
        }
    }

    /// Coefficients at advance ratio `j` with the disk inclined by `alpha`
    /// (radians) to the free stream.
    ///
    /// Reduces to the axial coefficients at `alpha = π/2`.
    pub(super) fn inclined_coefficients(&self, beta: f64, j: f64, alpha: f64) -> Coefficients {
        let axial = self.axial_coefficients(beta, j * alpha.sin());
        let model = &self.incidence;

        let solidity = model.blades * model.chord_to_radius / std::f64::consts::PI;
        let pitch = (beta / 0.7 / std::f64::consts::PI).atan();
        let delta = 1.5
            * pitch.cos()
            * (1.0
                + solidity / pitch.tan()
                    * (1.0 + (1.0 + 2.0 * pitch.tan() / solidity).sqrt())
                    * (1.0 - alpha.sin()));

        let tangential = (j * alpha.cos() / std::f64::consts::PI / model.reference_radius).powi(2);
        let factor = |zero_advance: [f64; 2]| {
            let j0 = zero_advance[0] + zero_advance[1] * beta;
            1.0 + tangential / 2.0 / (1.0 - j / j0 * alpha.sin()) * delta
        };

        Coefficients {
            thrust: (axial.thrust * factor(model.zero_thrust_advance)).max(MIN_COEFFICIENT),
            power: (axial.power * factor(model.zero_power_advance)).max(MIN_COEFFICIENT),
        }
    }
}
