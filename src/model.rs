pub use data::{HandLandmarks, HandPart, Landmark};
pub use hand_landmark_model::HandLandmarkModel;

use crate::{
    cv::{overlay, Matrix},
    Error, Result,
};

mod hand_landmark_model;

pub mod data;

/// Hand-pose backend. The rest of the pipeline only sees keypoints.
pub trait LandmarkDetector {
    /// Every hand visible in `frame`.
    fn detect(&mut self, frame: &Matrix) -> Result<Vec<HandLandmarks>>;

    /// Keypoints of the `hand_number`-th detected hand, empty when there is no
    /// such hand. With `draw` the hand skeleton is annotated onto `frame`.
    fn find_hand_position(
        &mut self,
        frame: &mut Matrix,
        hand_number: usize,
        draw: bool,
    ) -> Result<HandLandmarks> {
        let mut hands = self.detect(frame)?;
        if hand_number >= hands.len() {
            return Ok(HandLandmarks::default());
        }
        let hand = hands.swap_remove(hand_number);
        if draw {
            overlay::draw_skeleton(frame, &hand)?;
        }
        Ok(hand)
    }
}

#[tracing::instrument(err)]
pub fn register_ort(config: &crate::setting::ModelConfig) -> Result<()> {
    let onnx_env = ort::init().with_name("gesture_volume_hand_landmarks");

    let onnx_env = match config.cuda {
        true => onnx_env.with_execution_providers([ort::CUDAExecutionProvider::default()
            .build()
            .error_on_failure()]),
        false => onnx_env,
    };

    onnx_env.commit().map_err(Error::ModelError)?;
    Ok(())
}

fn start_session_from_file(
    onnx_path: std::path::PathBuf,
    intra_threads: usize,
) -> Result<ort::Session> {
    if !onnx_path.exists() {
        return Err(Error::InvalidModelIOError(format!(
            "model file not found: {}",
            onnx_path.display()
        )));
    }
    ort::Session::builder()
        .map_err(Error::ModelError)?
        .with_intra_threads(intra_threads)
        .map_err(Error::ModelError)?
        .commit_from_file(onnx_path)
        .map_err(Error::ModelError)
}

#[cfg(test)]
mod test {
    use super::{HandLandmarks, LandmarkDetector};
    use crate::{
        cv::Matrix,
        model::data::{Landmark, LANDMARK_COUNT},
    };

    struct FixedHands(Vec<HandLandmarks>);

    impl LandmarkDetector for FixedHands {
        fn detect(&mut self, _: &Matrix) -> crate::Result<Vec<HandLandmarks>> {
            Ok(self.0.clone())
        }
    }

    fn hand(offset: i32) -> HandLandmarks {
        HandLandmarks::new(
            (0..LANDMARK_COUNT)
                .map(|id| Landmark {
                    id,
                    x: offset + id as i32,
                    y: offset,
                })
                .collect(),
        )
    }

    #[test]
    fn selects_hand_by_number() {
        let mut detector = FixedHands(vec![hand(10), hand(300)]);
        let mut frame = Matrix::new_blank(640, 480).expect("Failed to create frame");

        let first = detector
            .find_hand_position(&mut frame, 0, false)
            .expect("Failed to find hand");
        assert_eq!(first, hand(10));

        let second = detector
            .find_hand_position(&mut frame, 1, false)
            .expect("Failed to find hand");
        assert_eq!(second, hand(300));
    }

    #[test]
    fn missing_hand_number_yields_no_landmarks() {
        let mut detector = FixedHands(vec![hand(10)]);
        let mut frame = Matrix::new_blank(640, 480).expect("Failed to create frame");
        let found = detector
            .find_hand_position(&mut frame, 1, true)
            .expect("Failed to find hand");
        assert!(found.is_empty());

        let mut detector = FixedHands(vec![]);
        let found = detector
            .find_hand_position(&mut frame, 0, true)
            .expect("Failed to find hand");
        assert!(found.is_empty());
    }

    #[test]
    fn draws_skeleton_only_when_requested() {
        use crate::cv::overlay::pixel_at;
        let mut detector = FixedHands(vec![hand(100)]);

        let mut frame = Matrix::new_blank(640, 480).expect("Failed to create frame");
        detector
            .find_hand_position(&mut frame, 0, false)
            .expect("Failed to find hand");
        assert_eq!(pixel_at(&frame, 100, 100).unwrap(), [0, 0, 0]);

        detector
            .find_hand_position(&mut frame, 0, true)
            .expect("Failed to find hand");
        assert_eq!(pixel_at(&frame, 100, 100).unwrap(), [0, 0, 255]);
    }
}
