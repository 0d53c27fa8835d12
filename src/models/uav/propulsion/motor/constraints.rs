use uom::si::{magnetic_flux::weber, torque::newton_meter};

use crate::{models::uav::propulsion::margin, support::scenario::PerScenario};

use super::{MotorCharacteristics, MotorConstraints, MotorOperating};

/// 1st and 99th percentiles of the relative error of the speed constant
/// regression.
const KV_ERROR_LOW: f64 = -2.21;
const KV_ERROR_HIGH: f64 = 0.65;

/// Band of speed constants found on real motors with this maximum torque.
///
/// `tolerance` widens the band, in percent.
pub(super) fn speed_constant_band(motor: &MotorCharacteristics, tolerance: f64) -> (f64, f64) {
    let k = 1.0 + tolerance / 100.0;
    let kv_hat = 51.52 * motor.max_torque.get::<newton_meter>().powf(-0.43);
    (
        kv_hat / (1.0 - k * KV_ERROR_LOW),
        kv_hat / (1.0 - k * KV_ERROR_HIGH),
    )
}

pub(super) fn constraints(
    motor: &MotorCharacteristics,
    operating: &PerScenario<MotorOperating>,
    tolerance: f64,
) -> MotorConstraints {
    let max = motor.max_torque.get::<newton_meter>();
    let nominal = motor.nominal_torque.get::<newton_meter>();
    let torque = |op: &MotorOperating| op.torque.get::<newton_meter>();

    let kv = 1.0 / motor.torque_constant.get::<weber>();
    let (kv_min, kv_max) = speed_constant_band(motor, tolerance);

    MotorConstraints {
        takeoff_torque: margin(max, torque(&operating.takeoff)),
        climb_torque: margin(max, torque(&operating.climb)),
        hover_torque: margin(nominal, torque(&operating.hover)),
        cruise_torque: margin(nominal, torque(&operating.cruise)),
        speed_constant_min: (kv - kv_min) / kv,
        speed_constant_max: (kv_max - kv) / kv,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::uav::propulsion::motor::MotorReference;

    #[test]
    fn tolerance_widens_band() {
        let motor: MotorCharacteristics = MotorReference::default().into();
        let (min, max) = speed_constant_band(&motor, 0.0);
        let (wide_min, wide_max) = speed_constant_band(&motor, 10.0);

        assert!(wide_min < min);
        assert!(wide_max > max);
        assert_relative_eq!(max / min, 3.21 / 0.35, epsilon = 1e-12);
    }
}
