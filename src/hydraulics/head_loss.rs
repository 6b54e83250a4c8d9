use std::f64::consts::PI;

use crate::config::constant::{GRAVITY, KINEMATIC_VISCOSITY};
use crate::domain::types::FlowFormula;

const HAZEN_WILLIAMS_COEFFICIENT: f64 = 10.67;
const HAZEN_WILLIAMS_FLOW_EXPONENT: f64 = 1.852;
const HAZEN_WILLIAMS_DIAMETER_EXPONENT: f64 = 4.871;
const TURBULENT_REYNOLDS: f64 = 4000.0;

/// Head loss [m] along a pipe carrying `flow` [m³/s].
///
/// `roughness` is the Hazen-Williams C, the Darcy-Weisbach absolute
/// roughness ε [m] or the Manning n, depending on `formula`. Invalid
/// geometry and zero flow give zero loss rather than an error.
pub fn head_loss(
    flow: f64,
    diameter: f64,
    length: f64,
    roughness: f64,
    formula: FlowFormula,
) -> f64 {
    if diameter <= 0.0 || length <= 0.0 {
        return 0.0;
    }

    let area = PI * (diameter / 2.0).powi(2);
    if area <= 0.0 {
        return 0.0;
    }
    let velocity = flow.abs() / area;

    match formula {
        FlowFormula::HazenWilliams => {
            if roughness <= 0.0 {
                return 0.0;
            }
            HAZEN_WILLIAMS_COEFFICIENT * flow.abs().powf(HAZEN_WILLIAMS_FLOW_EXPONENT) * length
                / (roughness.powf(HAZEN_WILLIAMS_FLOW_EXPONENT)
                    * diameter.powf(HAZEN_WILLIAMS_DIAMETER_EXPONENT))
        }
        FlowFormula::DarcyWeisbach => {
            if velocity <= 0.0 {
                return 0.0;
            }
            let friction = darcy_friction_factor(velocity, diameter, roughness);
            friction * length * velocity.powi(2) / (diameter * 2.0 * GRAVITY)
        }
        FlowFormula::Manning => {
            if roughness <= 0.0 {
                return 0.0;
            }
            let hydraulic_radius = diameter / 4.0;
            (velocity * roughness / hydraulic_radius.powf(2.0 / 3.0)).powi(2) * length
        }
    }
}

/// Explicit Colebrook-White approximation above the turbulent threshold,
/// laminar 64/Re below it.
fn darcy_friction_factor(velocity: f64, diameter: f64, roughness: f64) -> f64 {
    let reynolds = velocity * diameter / KINEMATIC_VISCOSITY;
    if reynolds > TURBULENT_REYNOLDS {
        let relative_roughness = roughness / diameter;
        0.25 / (relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9))
            .log10()
            .powi(2)
    } else {
        64.0 / reynolds
    }
}
