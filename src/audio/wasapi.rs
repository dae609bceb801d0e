use windows::Win32::{
    Media::Audio::{
        eConsole, eRender, Endpoints::IAudioEndpointVolume, IMMDeviceEnumerator,
        MMDeviceEnumerator,
    },
    System::Com::{
        CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_APARTMENTTHREADED,
    },
};

use super::{AudioEndpoint, VolumeRange};
use crate::{Error, Result};

/// Pairs CoInitializeEx with CoUninitialize for the owning thread.
struct ComGuard;

impl ComGuard {
    fn init() -> Result<Self> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr.is_err() {
            return Err(Error::AudioEndpointUnavailable(format!(
                "CoInitializeEx failed: {hr:?}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for ComGuard {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// Master volume of the default console render device.
pub struct WasapiEndpoint {
    // dropped before the COM guard
    volume: IAudioEndpointVolume,
    range: VolumeRange,
    _com: ComGuard,
}

impl WasapiEndpoint {
    #[tracing::instrument(name = "Acquire audio endpoint", err)]
    pub fn new() -> Result<Self> {
        let com = ComGuard::init()?;
        let volume = unsafe { Self::activate() }?;

        let (mut min, mut max, mut step) = (0f32, 0f32, 0f32);
        unsafe { volume.GetVolumeRange(&mut min, &mut max, &mut step) }.map_err(|e| {
            Error::AudioEndpointUnavailable(format!("GetVolumeRange failed: {e}"))
        })?;
        tracing::info!(min, max, step, "Audio endpoint acquired");

        Ok(Self {
            volume,
            range: [min, max],
            _com: com,
        })
    }

    /// # Safety
    /// COM must be initialized on the calling thread.
    unsafe fn activate() -> Result<IAudioEndpointVolume> {
        let enumerator: IMMDeviceEnumerator =
            CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL).map_err(|e| {
                Error::AudioEndpointUnavailable(format!(
                    "CoCreateInstance(MMDeviceEnumerator) failed: {e}"
                ))
            })?;
        let device = enumerator
            .GetDefaultAudioEndpoint(eRender, eConsole)
            .map_err(|e| {
                Error::AudioEndpointUnavailable(format!("no default render endpoint: {e}"))
            })?;
        device
            .Activate::<IAudioEndpointVolume>(CLSCTX_ALL, None)
            .map_err(|e| {
                Error::AudioEndpointUnavailable(format!(
                    "IAudioEndpointVolume activation failed: {e}"
                ))
            })
    }
}

impl AudioEndpoint for WasapiEndpoint {
    fn set_master_volume_level(&mut self, level_db: f32) -> Result<()> {
        // the endpoint rejects levels outside its own range
        let level_db = level_db.clamp(self.range[0], self.range[1]);
        unsafe { self.volume.SetMasterVolumeLevel(level_db, std::ptr::null()) }
            .map_err(|e| Error::AudioError(format!("SetMasterVolumeLevel failed: {e}")))
    }

    fn volume_range(&self) -> Result<VolumeRange> {
        Ok(self.range)
    }
}
