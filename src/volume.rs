use crate::{math::Math, setting::VolumeConfig};

/// Per-frame mapping result. Only the defaults survive until the first hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeState {
    /// Top edge of the filled bar, in frame pixels.
    pub vol_bar: f32,
    /// 0..=100
    pub vol_per: f32,
    /// Device attenuation in dB relative to maximum.
    pub volume_level: f32,
}

impl Default for VolumeState {
    fn default() -> Self {
        Self {
            vol_bar: 400.,
            vol_per: 0.,
            volume_level: -65.25,
        }
    }
}

impl VolumeState {
    /// Truncated percentage, as printed and drawn.
    pub fn percent(&self) -> i32 {
        self.vol_per as i32
    }
}

/// Color of the midpoint circle between the fingertips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Default,
    Minimum,
    Maximum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeMapper {
    level_domain: [f32; 2],
    level_range: [f32; 2],
    bar_domain: [f32; 2],
    bar_range: [f32; 2],
    percent_range: [f32; 2],
}

impl Default for VolumeMapper {
    fn default() -> Self {
        Self::new(&VolumeConfig::default())
    }
}

impl VolumeMapper {
    // The level domain ends at 250 while bar and percent end at 300.
    // Both are kept as configured.
    pub fn new(config: &VolumeConfig) -> Self {
        Self {
            level_domain: config.level_domain,
            level_range: config.level_range,
            bar_domain: config.bar_domain,
            bar_range: config.bar_range,
            percent_range: config.percent_range,
        }
    }

    /// Replaces the dB range, e.g. with the one reported by the audio endpoint.
    pub fn with_level_range(mut self, range: [f32; 2]) -> Self {
        self.level_range = range;
        self
    }

    pub fn level_range(&self) -> [f32; 2] {
        self.level_range
    }

    pub fn map(&self, length: f32) -> VolumeState {
        VolumeState {
            volume_level: Math::interp(length, self.level_domain, self.level_range),
            vol_bar: Math::interp(length, self.bar_domain, self.bar_range),
            vol_per: Math::interp(length, self.bar_domain, self.percent_range),
        }
    }

    pub fn indicator(&self, length: f32) -> Indicator {
        let [min, max] = self.bar_domain;
        if length < min {
            Indicator::Minimum
        } else if length > max {
            Indicator::Maximum
        } else {
            Indicator::Default
        }
    }
}
