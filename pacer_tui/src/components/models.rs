use pacer_sim::PacingConfig;

/// A numeric control on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Knob {
    PacemakerRate,
    Output,
    IntrinsicRate,
    IntrinsicAmplitude,
}

pub struct KnobSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub decimals: usize,
}

impl Knob {
    pub const ALL: [Knob; 4] = [
        Knob::PacemakerRate,
        Knob::Output,
        Knob::IntrinsicRate,
        Knob::IntrinsicAmplitude,
    ];

    pub fn spec(self) -> KnobSpec {
        match self {
            Knob::PacemakerRate => KnobSpec {
                name: "Pacemaker rate",
                unit: "bpm",
                min: 30.0,
                max: 200.0,
                step: 1.0,
                decimals: 0,
            },
            Knob::Output => KnobSpec {
                name: "Output",
                unit: "mA",
                min: 0.0,
                max: 25.0,
                step: 0.1,
                decimals: 1,
            },
            Knob::IntrinsicRate => KnobSpec {
                name: "Intrinsic rate",
                unit: "bpm",
                min: 0.0,
                max: 200.0,
                step: 1.0,
                decimals: 0,
            },
            Knob::IntrinsicAmplitude => KnobSpec {
                name: "Sensing amplitude",
                unit: "mV",
                min: 0.0,
                max: 10.0,
                step: 0.5,
                decimals: 1,
            },
        }
    }

    pub fn get(self, config: &PacingConfig) -> f64 {
        match self {
            Knob::PacemakerRate => config.pacemaker_rate,
            Knob::Output => config.output_ma,
            Knob::IntrinsicRate => config.intrinsic_rate,
            Knob::IntrinsicAmplitude => config.intrinsic_amplitude,
        }
    }

    fn set(self, config: &mut PacingConfig, value: f64) {
        match self {
            Knob::PacemakerRate => config.pacemaker_rate = value,
            Knob::Output => config.output_ma = value,
            Knob::IntrinsicRate => config.intrinsic_rate = value,
            Knob::IntrinsicAmplitude => config.intrinsic_amplitude = value,
        }
    }

    /// Moves the knob by `steps` increments, snapped to the step grid and clamped to its
    /// range. Returns the new value.
    pub fn adjust(self, config: &mut PacingConfig, steps: i32) -> f64 {
        let spec = self.spec();
        let current = self.get(config);
        let current = if current.is_finite() { current } else { spec.min };
        let notch = (current / spec.step).round() + f64::from(steps);
        let value = spec.round(notch * spec.step).clamp(spec.min, spec.max);
        self.set(config, value);
        value
    }

    pub fn format(self, config: &PacingConfig) -> String {
        let spec = self.spec();
        format!("{:.*} {}", spec.decimals, self.get(config), spec.unit)
    }
}

impl KnobSpec {
    fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        (value * scale).round() / scale
    }

    pub fn range_label(&self) -> String {
        format!(
            "{:.*}-{:.*}",
            self.decimals, self.min, self.decimals, self.max
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_adjust_steps_on_grid() {
        let mut config = PacingConfig::default().output_ma(5.0);
        assert_eq!(Knob::Output.adjust(&mut config, 1), 5.1);
        assert_eq!(Knob::Output.adjust(&mut config, 1), 5.2);
        assert_eq!(Knob::Output.adjust(&mut config, -3), 4.9);
        assert_eq!(config.output_ma, 4.9);
    }

    #[test]
    fn test_adjust_clamps_to_range() {
        let mut config = PacingConfig::default().pacemaker_rate(31.0);
        assert_eq!(Knob::PacemakerRate.adjust(&mut config, -5), 30.0);
        let mut config = PacingConfig::default().intrinsic_amplitude(9.5);
        assert_eq!(Knob::IntrinsicAmplitude.adjust(&mut config, 3), 10.0);
    }

    #[test]
    fn test_adjust_snaps_off_grid_value() {
        let mut config = PacingConfig::default().intrinsic_amplitude(1.3);
        assert_eq!(Knob::IntrinsicAmplitude.adjust(&mut config, 1), 2.0);
    }

    #[test]
    fn test_adjust_recovers_from_non_finite_value() {
        let mut config = PacingConfig::default().intrinsic_rate(f64::NAN);
        assert_eq!(Knob::IntrinsicRate.adjust(&mut config, 1), 1.0);
    }

    #[test]
    fn test_format() {
        let config = PacingConfig::default();
        assert_eq!(Knob::PacemakerRate.format(&config), "80 bpm");
        assert_eq!(Knob::Output.format(&config), "2.0 mA");
        assert_eq!(Knob::IntrinsicAmplitude.format(&config), "1.5 mV");
        assert_eq!(Knob::Output.spec().range_label(), "0.0-25.0");
    }
}
