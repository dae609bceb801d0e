use std::process::{Command, Output};

use super::{AudioEndpoint, VolumeRange};
use crate::{Error, Result};

const PACTL: &str = "pactl";
const DEFAULT_SINK: &str = "@DEFAULT_SINK@";
const RANGE: VolumeRange = [-65.25, 0.];

/// Default sink of a PulseAudio (or PipeWire-pulse) server, driven through `pactl`.
pub struct PulseEndpoint {
    sink: String,
}

impl PulseEndpoint {
    #[tracing::instrument(name = "Acquire audio endpoint", err)]
    pub fn new() -> Result<Self> {
        let output = run(&["get-default-sink"])
            .map_err(|e| Error::AudioEndpointUnavailable(e.to_string()))?;
        let sink = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if sink.is_empty() {
            return Err(Error::AudioEndpointUnavailable(
                "pactl reported no default sink".into(),
            ));
        }
        tracing::info!(sink = %sink, "Audio endpoint acquired");
        Ok(Self { sink })
    }

    fn volume_arg(level_db: f32) -> String {
        format!("{:.2}dB", level_db)
    }
}

fn run(args: &[&str]) -> Result<Output> {
    // "--" keeps negative dB values from being parsed as options
    let output = Command::new(PACTL)
        .arg("--")
        .args(args)
        .output()
        .map_err(|e| Error::AudioError(format!("failed to run {PACTL}: {e}")))?;
    if !output.status.success() {
        return Err(Error::AudioError(format!(
            "{PACTL} {} exited with {}: {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(output)
}

impl AudioEndpoint for PulseEndpoint {
    fn set_master_volume_level(&mut self, level_db: f32) -> Result<()> {
        let level_db = level_db.clamp(RANGE[0], RANGE[1]);
        tracing::trace!(sink = %self.sink, level_db, "Setting sink volume");
        run(&["set-sink-volume", DEFAULT_SINK, &Self::volume_arg(level_db)]).map(|_| ())
    }

    fn volume_range(&self) -> Result<VolumeRange> {
        Ok(RANGE)
    }
}

#[cfg(test)]
mod test {
    use super::PulseEndpoint;

    #[test]
    fn formats_decibel_argument() {
        assert_eq!(PulseEndpoint::volume_arg(-32.5), "-32.50dB");
        assert_eq!(PulseEndpoint::volume_arg(0.), "0.00dB");
        assert_eq!(PulseEndpoint::volume_arg(-65.25), "-65.25dB");
    }
}
