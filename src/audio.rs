#[cfg(not(windows))]
pub use self::pulse::PulseEndpoint;
#[cfg(windows)]
pub use self::wasapi::WasapiEndpoint;

#[cfg(not(windows))]
mod pulse;
#[cfg(windows)]
mod wasapi;

/// Attenuation limits of an endpoint in dB, `[min, max]`.
pub type VolumeRange = [f32; 2];

/// System-wide output volume control.
pub trait AudioEndpoint {
    /// Sets the master volume to `level_db` decibels relative to maximum.
    fn set_master_volume_level(&mut self, level_db: f32) -> crate::Result<()>;
    fn volume_range(&self) -> crate::Result<VolumeRange>;
}

/// The default render endpoint of this platform.
#[cfg(windows)]
pub fn default_endpoint() -> crate::Result<Box<dyn AudioEndpoint>> {
    Ok(Box::new(WasapiEndpoint::new()?))
}

/// The default render endpoint of this platform.
#[cfg(not(windows))]
pub fn default_endpoint() -> crate::Result<Box<dyn AudioEndpoint>> {
    Ok(Box::new(PulseEndpoint::new()?))
}

impl<T: AudioEndpoint + ?Sized> AudioEndpoint for Box<T> {
    fn set_master_volume_level(&mut self, level_db: f32) -> crate::Result<()> {
        (**self).set_master_volume_level(level_db)
    }

    fn volume_range(&self) -> crate::Result<VolumeRange> {
        (**self).volume_range()
    }
}
