use std::f64::consts::E;

/// The closed catalog of activation/derivative pairs a network can use.
///
/// Selected by value at construction or reload time and copied into every
/// neuron; never part of the persisted snapshot, since functions are not
/// serializable data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationFunction {
    #[default]
    Logistic,
    RectifiedLinear,
    HyperbolicTangent,
}

impl ActivationFunction {
    /// Looks up a variant by its common name.  Unrecognized names fall back
    /// to `Logistic`.
    pub fn from_name(name: &str) -> ActivationFunction {
        match name.trim().to_ascii_lowercase().as_str() {
            "relu" | "rectified-linear" => ActivationFunction::RectifiedLinear,
            "tanh" | "hyperbolic-tangent" => ActivationFunction::HyperbolicTangent,
            _ => ActivationFunction::Logistic,
        }
    }

    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Logistic => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::RectifiedLinear => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            ActivationFunction::HyperbolicTangent => x.tanh(),
        }
    }

    /// Element-wise derivative, taken at the pre-activation sum.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Logistic => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::RectifiedLinear => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationFunction::HyperbolicTangent => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }
}
