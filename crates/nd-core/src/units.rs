// nd-core/src/units.rs

use std::fmt;

use uom::si::f64::Time as UomTime;

pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn to_seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

/// Unit tag attached to each dimension of a time series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Units {
    #[default]
    Unknown,
    Unitless,
    Seconds,
    Millivolts,
    Volts,
    Amps,
    MicroAmpsPerCm2,
    Spikes,
    SpikesPerSecond,
    Radians,
}

impl Units {
    /// `n` copies of the same tag.
    pub fn uniform(units: Units, n: usize) -> Vec<Units> {
        vec![units; n]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Unknown => "?",
            Self::Unitless => "",
            Self::Seconds => "s",
            Self::Millivolts => "mV",
            Self::Volts => "V",
            Self::Amps => "A",
            Self::MicroAmpsPerCm2 => "uA/cm^2",
            Self::Spikes => "spikes",
            Self::SpikesPerSecond => "spikes/s",
            Self::Radians => "rad",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
