#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    OutQuad,
    InOutQuad,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// Unit spring response: mass 1, released at 0 with zero velocity,
/// settling toward 1. Underdamped springs overshoot their target before
/// settling, which is what gives petal entrances their pop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
}

impl Spring {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }

    /// Position at `t` seconds after release. Not clamped: values above
    /// 1.0 are the overshoot.
    pub fn value_at(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let omega = self.stiffness.max(f64::EPSILON).sqrt();
        let zeta = self.damping / (2.0 * omega);

        if zeta < 1.0 {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega * t).exp();
            1.0 - envelope * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
        } else {
            // Critically damped / overdamped joined at the critical form.
            let envelope = (-omega * t).exp();
            1.0 - envelope * (1.0 + omega * t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    #[test]
    fn curves_pin_the_endpoints_and_clamp_outside() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert_eq!(ease.apply(-0.3), 0.0);
            assert_eq!(ease.apply(1.7), 1.0);
        }
    }

    #[test]
    fn out_curves_front_load_and_in_out_curves_stay_symmetric() {
        assert!(Ease::OutQuad.apply(0.5) > 0.5);
        assert!(Ease::OutCubic.apply(0.5) > Ease::OutQuad.apply(0.5));
        assert_eq!(Ease::InOutQuad.apply(0.5), 0.5);
        assert_eq!(Ease::InOutCubic.apply(0.5), 0.5);
        for ease in ALL {
            assert!(ease.apply(0.3) < ease.apply(0.7));
        }
    }

    #[test]
    fn spring_starts_at_zero_and_settles_at_one() {
        let s = Spring::new(100.0, 10.0);
        assert_eq!(s.value_at(0.0), 0.0);
        assert_eq!(s.value_at(-1.0), 0.0);
        assert!((s.value_at(10.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn underdamped_spring_overshoots() {
        // stiffness 100 / damping 10 is zeta = 0.5, well underdamped.
        let s = Spring::new(100.0, 10.0);
        let peak = (0..200)
            .map(|i| s.value_at(i as f64 * 0.01))
            .fold(0.0f64, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn overdamped_spring_never_overshoots() {
        let s = Spring::new(100.0, 30.0);
        for i in 0..400 {
            assert!(s.value_at(i as f64 * 0.01) <= 1.0 + 1e-9);
        }
    }
}
