use opencv::{core, prelude::*, videoio};

pub use matrix::Matrix;
pub use window::{Display, Window};

pub mod matrix;
pub mod overlay;
pub mod window;

/// Produces one frame per call. A failed read is reported as
/// [`crate::Error::DeviceUnavailable`].
pub trait FrameSource {
    fn capture(&mut self) -> crate::Result<Matrix>;
}

pub struct Camera {
    index: i32,
    cap: videoio::VideoCapture,
}

impl Camera {
    #[tracing::instrument(name = "Open camera", err)]
    pub fn new(index: i32) -> crate::Result<Self> {
        let cap = videoio::VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|err| crate::Error::DeviceUnavailable(err.to_string()))?;

        if !cap
            .is_opened()
            .map_err(|err| crate::Error::DeviceUnavailable(err.to_string()))?
        {
            return Err(crate::Error::DeviceUnavailable(format!(
                "unable to open camera {}",
                index
            )));
        }

        Ok(Self { index, cap })
    }
}

impl FrameSource for Camera {
    fn capture(&mut self) -> crate::Result<Matrix> {
        let mut frame = core::Mat::default();
        let grabbed = self
            .cap
            .read(&mut frame)
            .map_err(|err| crate::Error::DeviceUnavailable(err.to_string()))?;
        if !grabbed || frame.empty() {
            return Err(crate::Error::DeviceUnavailable(format!(
                "failed to read frame from camera {}",
                self.index
            )));
        }
        Ok(Matrix::from(frame))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        tracing::info!(index = self.index, "Releasing camera");
        if let Err(err) = self.cap.release() {
            tracing::warn!(error = %err, "Failed to release camera");
        }
    }
}
