use std::time::Duration;

use crate::{
    audio::{self, AudioEndpoint},
    cv::{overlay, Camera, Display, FrameSource, Matrix, Window},
    math::Math,
    model::{HandLandmarkModel, HandLandmarks, LandmarkDetector},
    setting::{Config, ReadFailure, Setting},
    sync::Debounce,
    volume::{VolumeMapper, VolumeState},
    Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

/// Owns every device for the lifetime of the loop. Fields drop in
/// declaration order, on normal exit and on error alike.
pub struct Processor<S, D, A, W>
where
    S: FrameSource,
    D: LandmarkDetector,
    A: AudioEndpoint,
    W: Display,
{
    source: S,
    detector: D,
    endpoint: A,
    display: W,
    config: Config,
    mapper: VolumeMapper,
    actuation: Debounce,
    state: VolumeState,
}

pub type DeviceProcessor = Processor<Camera, HandLandmarkModel, Box<dyn AudioEndpoint>, Window>;

impl DeviceProcessor {
    /// Acquires audio endpoint, model, camera and window, in that order.
    #[tracing::instrument(name = "Initializing processor", skip(setting), err)]
    pub fn from_setting(setting: &Setting) -> Result<Self> {
        let config = &setting.config;
        let endpoint = audio::default_endpoint()?;
        let detector = HandLandmarkModel::new(setting.model_path(), &config.model)?;
        let camera = Camera::new(config.camera.index)?;
        let window = Window::new(&config.display.window_name)?;
        Processor::new(camera, detector, endpoint, window, config.clone())
    }
}

impl<S, D, A, W> Processor<S, D, A, W>
where
    S: FrameSource,
    D: LandmarkDetector,
    A: AudioEndpoint,
    W: Display,
{
    pub fn new(source: S, detector: D, endpoint: A, display: W, config: Config) -> Result<Self> {
        let mut mapper = VolumeMapper::new(&config.volume);
        if config.volume.use_device_range {
            mapper = mapper.with_level_range(endpoint.volume_range()?);
        }
        tracing::info!(level_range = ?mapper.level_range(), "Volume mapper ready");

        Ok(Self {
            source,
            detector,
            endpoint,
            display,
            actuation: Debounce::new(Duration::from_millis(config.volume.actuation_interval_ms)),
            mapper,
            config,
            state: VolumeState::default(),
        })
    }

    pub fn state(&self) -> VolumeState {
        self.state
    }

    /// Processes frames until the exit key is pressed or a fatal error occurs.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("Processing frames");
        while self.process_frame()? == Step::Continue {}
        tracing::info!("Exit key pressed");
        Ok(())
    }

    pub fn process_frame(&mut self) -> Result<Step> {
        let mut frame = match self.source.capture() {
            Ok(frame) => frame,
            Err(Error::DeviceUnavailable(msg))
                if self.config.camera.on_read_failure == ReadFailure::Skip =>
            {
                tracing::warn!(reason = %msg, "Skipping unreadable frame");
                return self.poll_exit();
            }
            Err(err) => return Err(err),
        };

        let hand = self.detector.find_hand_position(
            &mut frame,
            self.config.model.hand_number,
            self.config.model.draw_skeleton,
        )?;

        match self.actuate(&mut frame, &hand) {
            Ok(state) => {
                self.state = state;
                println!("{}", state.percent());
            }
            Err(Error::NoHandDetected) => {}
            Err(err) => return Err(err),
        }

        self.display.show(&frame)?;
        self.poll_exit()
    }

    /// Maps fingertip distance to volume, sets it and draws the overlay.
    fn actuate(&mut self, frame: &mut Matrix, hand: &HandLandmarks) -> Result<VolumeState> {
        let (thumb, index) = hand.fingertips()?;
        let length = Math::distance(thumb, index);
        let state = self.mapper.map(length);

        let endpoint = &mut self.endpoint;
        if let Some(result) = self
            .actuation
            .bounce(|| endpoint.set_master_volume_level(state.volume_level))
        {
            result?;
        }
        tracing::debug!(
            length,
            volume_level = state.volume_level,
            vol_per = state.vol_per,
            "Hand mapped to volume"
        );

        overlay::draw_fingertips(frame, thumb, index, self.mapper.indicator(length))?;
        overlay::draw_volume_bar(frame, &state)?;
        Ok(state)
    }

    fn poll_exit(&mut self) -> Result<Step> {
        match self.display.poll_key(self.config.display.poll_delay_ms)? {
            Some(key) if key == self.config.display.exit_key => Ok(Step::Exit),
            _ => Ok(Step::Continue),
        }
    }
}
