use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N2, P1, P2, Z0},
};

/// Motor torque constant, N·m/A in SI.
pub type TorqueConstant = Quantity<ISQ<P2, P1, N2, N1, Z0, Z0, Z0>, SI<f64>, f64>;

/// Motor speed constant, rad/(V·s) in SI.
pub type SpeedConstant = Quantity<ISQ<N2, N1, P2, P1, Z0, Z0, Z0>, SI<f64>, f64>;
