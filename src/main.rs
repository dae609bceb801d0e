use gesture_volume::{
    model::register_ort, processor::DeviceProcessor, result::Result, setting::Setting,
};

fn main() -> Result<()> {
    gesture_volume::tracing::init("gesture-volume")?;
    // Get Setting
    let setting = Setting::get()?;
    // Register Models
    register_ort(&setting.config.model)?;
    // Acquire devices and run until escape
    let mut processor = DeviceProcessor::from_setting(&setting)?;
    processor.run()
}
