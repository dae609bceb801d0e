use opencv::highgui;

use super::Matrix;

pub trait Display {
    fn show(&mut self, frame: &Matrix) -> crate::Result<()>;
    /// Waits up to `delay_ms` for a key press. `None` when nothing was pressed.
    fn poll_key(&mut self, delay_ms: i32) -> crate::Result<Option<i32>>;
}

pub struct Window {
    name: String,
}

impl Window {
    #[tracing::instrument(name = "Open display window", err)]
    pub fn new(name: &str) -> crate::Result<Self> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self { name: name.into() })
    }
}

impl Display for Window {
    fn show(&mut self, frame: &Matrix) -> crate::Result<()> {
        highgui::imshow(&self.name, &frame.0)?;
        Ok(())
    }

    fn poll_key(&mut self, delay_ms: i32) -> crate::Result<Option<i32>> {
        let key = highgui::wait_key(delay_ms)?;
        Ok((key >= 0).then_some(key))
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        tracing::info!(window = %self.name, "Closing display window");
        if let Err(err) = highgui::destroy_all_windows() {
            tracing::warn!(error = %err, "Failed to destroy windows");
        }
    }
}
