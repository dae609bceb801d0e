use crate::{cv::Matrix, setting::ModelConfig, Error, Result};

use super::{HandLandmarks, LandmarkDetector};

// [1, 224, 224, 3] rgb | outputs: 21 x (x, y, z), hand presence
pub struct HandLandmarkModel {
    session: ort::Session,
    input_size: (i32, i32),
    presence_threshold: f32,
    presence_is_logit: bool,
}

impl HandLandmarkModel {
    // hand_landmark.onnx
    #[tracing::instrument(name = "Initialize hand landmark model", skip(config), err)]
    pub fn new(onnx_path: std::path::PathBuf, config: &ModelConfig) -> Result<Self> {
        let session = super::start_session_from_file(onnx_path, config.intra_threads)?;
        if session.outputs.len() < 2 {
            return Err(Error::InvalidModelIOError(format!(
                "expected landmark and presence outputs, model has {}",
                session.outputs.len()
            )));
        }
        Ok(Self {
            session,
            input_size: (224, 224),
            presence_threshold: config.presence_threshold,
            presence_is_logit: config.presence_is_logit,
        })
    }

    /// Converts the raw presence output to a probability. Networks without a
    /// final sigmoid emit a logit, selected by `model.presence_is_logit`.
    fn presence_probability(score: f32, is_logit: bool) -> f32 {
        if is_logit {
            1. / (1. + (-score).exp())
        } else {
            score
        }
    }

    fn decode(
        landmarks: &[f32],
        presence: f32,
        threshold: f32,
        input_size: (i32, i32),
        frame_size: (i32, i32),
    ) -> Result<Vec<HandLandmarks>> {
        if presence < threshold {
            tracing::trace!(presence, "No hand above presence threshold");
            return Ok(vec![]);
        }
        Ok(vec![HandLandmarks::from_model_output(
            landmarks, input_size, frame_size,
        )?])
    }
}

impl LandmarkDetector for HandLandmarkModel {
    fn detect(&mut self, frame: &Matrix) -> Result<Vec<HandLandmarks>> {
        let tensor = frame.to_tensor_data(self.input_size)?;
        let outputs = self
            .session
            .run(ort::inputs![tensor].map_err(Error::ModelError)?)
            .map_err(Error::ModelError)?;

        let landmarks = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(Error::ModelError)?
            .iter()
            .copied()
            .collect::<Vec<f32>>();
        let presence = outputs[1]
            .try_extract_tensor::<f32>()
            .map_err(Error::ModelError)?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| Error::InvalidModelIOError("empty presence output".into()))?;

        Self::decode(
            &landmarks,
            Self::presence_probability(presence, self.presence_is_logit),
            self.presence_threshold,
            self.input_size,
            frame.dimensions(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::HandLandmarkModel;

    #[test]
    fn presence_probability_passes_through_by_default() {
        assert_eq!(HandLandmarkModel::presence_probability(0.7, false), 0.7);
        assert_eq!(HandLandmarkModel::presence_probability(0.3, false), 0.3);
    }

    #[test]
    fn presence_logit_inside_unit_interval_is_squashed() {
        let presence = HandLandmarkModel::presence_probability(0.3, true);
        assert!((presence - 0.5744).abs() < 1e-3);

        let raw = vec![0f32; 63];
        let hands = HandLandmarkModel::decode(&raw, presence, 0.5, (224, 224), (640, 480))
            .expect("Failed to decode");
        assert_eq!(hands.len(), 1);
    }

    #[test]
    fn presence_logit_extremes() {
        assert!(HandLandmarkModel::presence_probability(4., true) > 0.98);
        assert!(HandLandmarkModel::presence_probability(-4., true) < 0.02);
    }

    #[test]
    fn decodes_single_hand_above_threshold() {
        let mut raw = vec![0f32; 63];
        (raw[3], raw[4], raw[5]) = (112., 56., 1.);
        let hands = HandLandmarkModel::decode(&raw, 0.9, 0.5, (224, 224), (448, 224))
            .expect("Failed to decode");
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].len(), 21);
        assert_eq!((hands[0][1].x, hands[0][1].y), (224, 56));
    }

    #[test]
    fn drops_hand_below_threshold() {
        let raw = vec![0f32; 63];
        let hands = HandLandmarkModel::decode(&raw, 0.2, 0.5, (224, 224), (640, 480))
            .expect("Failed to decode");
        assert!(hands.is_empty());
    }

    #[test]
    fn rejects_malformed_landmark_output() {
        assert!(HandLandmarkModel::decode(&[0.; 10], 0.9, 0.5, (224, 224), (640, 480)).is_err());
    }
}
