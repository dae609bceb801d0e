pub use landmark::{HandLandmarks, HandPart, Landmark, HAND_CONNECTIONS, LANDMARK_COUNT};

pub mod landmark;
