use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Body landmarks read by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    LeftShoulder,
    RightShoulder,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl LandmarkKind {
    pub const ALL: [LandmarkKind; 8] = [
        LandmarkKind::LeftShoulder,
        LandmarkKind::RightShoulder,
        LandmarkKind::LeftHip,
        LandmarkKind::RightHip,
        LandmarkKind::LeftKnee,
        LandmarkKind::RightKnee,
        LandmarkKind::LeftAnkle,
        LandmarkKind::RightAnkle,
    ];

    /// Index into a 33-point body-pose model (shoulders 11/12 … ankles 27/28).
    pub fn pose_index(self) -> usize {
        match self {
            LandmarkKind::LeftShoulder => 11,
            LandmarkKind::RightShoulder => 12,
            LandmarkKind::LeftHip => 23,
            LandmarkKind::RightHip => 24,
            LandmarkKind::LeftKnee => 25,
            LandmarkKind::RightKnee => 26,
            LandmarkKind::LeftAnkle => 27,
            LandmarkKind::RightAnkle => 28,
        }
    }

    fn slot(self) -> usize {
        match self {
            LandmarkKind::LeftShoulder => 0,
            LandmarkKind::RightShoulder => 1,
            LandmarkKind::LeftHip => 2,
            LandmarkKind::RightHip => 3,
            LandmarkKind::LeftKnee => 4,
            LandmarkKind::RightKnee => 5,
            LandmarkKind::LeftAnkle => 6,
            LandmarkKind::RightAnkle => 7,
        }
    }
}

/// One detected landmark in normalised image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub position: Point2<f32>,
    /// Likelihood the landmark is visible (not occluded), in `[0, 1]`.
    pub visibility: f32,
    /// Likelihood the landmark is present in the frame, in `[0, 1]`.
    pub presence: f32,
}

impl Landmark {
    pub fn new(kind: LandmarkKind, x: f32, y: f32, visibility: f32, presence: f32) -> Self {
        Self {
            kind,
            position: Point2::new(x, y),
            visibility,
            presence,
        }
    }

    pub fn is_confident(&self, conf_thresh: f32) -> bool {
        self.visibility >= conf_thresh && self.presence >= conf_thresh
    }
}

/// Landmarks detected in one video frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    landmarks: [Option<Landmark>; 8],
}

impl PoseFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from normalised landmarks. A later entry of the same
    /// kind replaces an earlier one.
    pub fn from_landmarks(landmarks: impl IntoIterator<Item = Landmark>) -> Self {
        let mut frame = Self::new();
        for lm in landmarks {
            frame.insert(lm);
        }
        frame
    }

    /// Builds a frame from pixel-space landmarks, dividing by the frame size.
    ///
    /// Returns `None` when either dimension is zero.
    pub fn from_pixels(
        landmarks: impl IntoIterator<Item = Landmark>,
        width: u32,
        height: u32,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let (w, h) = (width as f32, height as f32);
        Some(Self::from_landmarks(landmarks.into_iter().map(|mut lm| {
            lm.position = Point2::new(lm.position.x / w, lm.position.y / h);
            lm
        })))
    }

    pub fn insert(&mut self, landmark: Landmark) {
        self.landmarks[landmark.kind.slot()] = Some(landmark);
    }

    pub fn get(&self, kind: LandmarkKind) -> Option<&Landmark> {
        self.landmarks[kind.slot()].as_ref()
    }

    /// Position of `kind` when it was detected with sufficient confidence.
    pub fn confident(&self, kind: LandmarkKind, conf_thresh: f32) -> Option<Point2<f32>> {
        self.get(kind)
            .filter(|lm| lm.is_confident(conf_thresh))
            .map(|lm| lm.position)
    }
}
