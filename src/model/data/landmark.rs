use crate::math::Point;

pub const LANDMARK_COUNT: usize = 21;

/// Anatomical keypoint ids of a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum HandPart {
    Wrist = 0,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // palm
    (0, 1),
    (0, 5),
    (9, 13),
    (13, 17),
    (5, 9),
    (0, 17),
    // thumb
    (1, 2),
    (2, 3),
    (3, 4),
    // index
    (5, 6),
    (6, 7),
    (7, 8),
    // middle
    (9, 10),
    (10, 11),
    (11, 12),
    // ring
    (13, 14),
    (14, 15),
    (15, 16),
    // pinky
    (17, 18),
    (18, 19),
    (19, 20),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmark {
    pub id: usize,
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub fn point(&self) -> Point {
        (self.x, self.y)
    }
}

/// Keypoints of one detected hand in frame pixels, ordered by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandLandmarks(Vec<Landmark>);

impl HandLandmarks {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }

    /// Scales model-space keypoints (`[x, y, z]` triples in `input_size` pixels)
    /// into a frame of `frame_size` pixels.
    pub fn from_model_output(
        raw: &[f32],
        input_size: (i32, i32),
        frame_size: (i32, i32),
    ) -> crate::Result<Self> {
        if raw.len() != LANDMARK_COUNT * 3 {
            return Err(crate::Error::InvalidModelIOError(format!(
                "expected {} landmark values, got {}",
                LANDMARK_COUNT * 3,
                raw.len()
            )));
        }
        Ok(Self(
            raw.chunks_exact(3)
                .enumerate()
                .map(|(id, xyz)| Landmark {
                    id,
                    x: (xyz[0] / input_size.0 as f32 * frame_size.0 as f32) as i32,
                    y: (xyz[1] / input_size.1 as f32 * frame_size.1 as f32) as i32,
                })
                .collect(),
        ))
    }

    pub fn get(&self, id: usize) -> Option<&Landmark> {
        self.0.get(id)
    }

    pub fn part(&self, part: HandPart) -> Option<&Landmark> {
        self.get(part as usize)
    }

    /// Thumb tip and index fingertip, or [`crate::Error::NoHandDetected`] when
    /// either keypoint is missing.
    pub fn fingertips(&self) -> crate::Result<(Point, Point)> {
        match (self.part(HandPart::ThumbTip), self.part(HandPart::IndexFingerTip)) {
            (Some(thumb), Some(index)) => Ok((thumb.point(), index.point())),
            _ => Err(crate::Error::NoHandDetected),
        }
    }
}

impl std::ops::Deref for HandLandmarks {
    type Target = [Landmark];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::{HandLandmarks, HandPart, Landmark, HAND_CONNECTIONS, LANDMARK_COUNT};
    use crate::math::Math;

    fn hand_with_tips(thumb: (i32, i32), index: (i32, i32)) -> HandLandmarks {
        HandLandmarks::new(
            (0..LANDMARK_COUNT)
                .map(|id| {
                    let (x, y) = match id {
                        4 => thumb,
                        8 => index,
                        _ => (0, 0),
                    };
                    Landmark { id, x, y }
                })
                .collect(),
        )
    }

    #[test]
    fn fingertip_distance_is_exact_for_vertical_separation() {
        let hand = hand_with_tips((100, 100), (100, 150));
        assert_eq!(hand.len(), 21);
        let (thumb, index) = hand.fingertips().expect("Missing fingertips");
        assert_eq!(Math::distance(thumb, index), 50.);
    }

    #[test]
    fn empty_hand_has_no_fingertips() {
        assert!(matches!(
            HandLandmarks::default().fingertips(),
            Err(crate::Error::NoHandDetected)
        ));
    }

    #[test]
    fn scales_model_output_to_frame_pixels() {
        let mut raw = vec![0f32; LANDMARK_COUNT * 3];
        raw[HandPart::ThumbTip as usize * 3] = 112.;
        raw[HandPart::ThumbTip as usize * 3 + 1] = 56.;
        let hand = HandLandmarks::from_model_output(&raw, (224, 224), (640, 480))
            .expect("Failed to decode");
        assert_eq!(hand.len(), LANDMARK_COUNT);
        assert_eq!(
            hand.part(HandPart::ThumbTip),
            Some(&Landmark { id: 4, x: 320, y: 120 })
        );
        assert!(hand.iter().enumerate().all(|(idx, l)| l.id == idx));
    }

    #[test]
    fn rejects_truncated_model_output() {
        assert!(HandLandmarks::from_model_output(&[0.; 60], (224, 224), (640, 480)).is_err());
    }

    #[test]
    fn connections_reference_valid_ids() {
        assert!(HAND_CONNECTIONS
            .iter()
            .all(|(a, b)| *a < LANDMARK_COUNT && *b < LANDMARK_COUNT));
    }
}
