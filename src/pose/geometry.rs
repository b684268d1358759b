use super::landmark::{LandmarkKind, PoseFrame};
use crate::signal::{Sample, SignalSet};
use nalgebra::{distance as euclid, Point2};
use serde::Serialize;

/// Joint flexion angle at `b`, in degrees.
///
/// Computed with the law of cosines on the triangle `a`–`b`–`c` and reported
/// as `180 − interior`, so a straight limb reads 0°. The interior angle is
/// rounded to two decimals. Missing when either limb segment has zero length.
pub fn anatomical_angle(a: &Point2<f32>, b: &Point2<f32>, c: &Point2<f32>) -> Sample {
    let ab = euclid(a, b) as f64;
    let bc = euclid(b, c) as f64;
    let ac = euclid(a, c) as f64;
    let denom = 2.0 * ab * bc;
    if denom == 0.0 {
        return None;
    }
    let cos = ((ab * ab + bc * bc - ac * ac) / denom).clamp(-1.0, 1.0);
    let interior = (cos.acos().to_degrees() * 100.0).round() / 100.0;
    Some((180.0 - interior) as f32)
}

/// Euclidean distance between two normalised positions.
pub fn distance(a: &Point2<f32>, b: &Point2<f32>) -> f32 {
    euclid(a, b)
}

/// Pixel coordinates → `[0, 1]` image coordinates.
pub fn normalize_point(p: &Point2<f32>, width: f32, height: f32) -> Point2<f32> {
    Point2::new(p.x / width, p.y / height)
}

/// Raw signal values reduced from one pose frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrameSample {
    pub values: SignalSet<Sample>,
    /// All hip, knee and ankle landmarks of at least one side were confident.
    pub detected: bool,
}

impl FrameSample {
    /// Sample for a frame in which no pose was found.
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn from_frame(frame: &PoseFrame, conf_thresh: f32) -> Self {
        use LandmarkKind::*;
        let p = |kind| frame.confident(kind, conf_thresh);

        let angle = |a, b, c| anatomical_angle(&p(a)?, &p(b)?, &p(c)?);
        let leg = |hip, knee, ankle| {
            let (hip, knee, ankle) = (p(hip)?, p(knee)?, p(ankle)?);
            Some(distance(&hip, &knee) + distance(&knee, &ankle))
        };
        let side_detected =
            |hip, knee, ankle| p(hip).is_some() && p(knee).is_some() && p(ankle).is_some();

        let values = SignalSet {
            knee_left: angle(LeftAnkle, LeftKnee, LeftHip),
            knee_right: angle(RightAnkle, RightKnee, RightHip),
            hip: angle(LeftKnee, LeftHip, LeftShoulder),
            inter_ankle: p(LeftAnkle)
                .zip(p(RightAnkle))
                .map(|(l, r)| distance(&l, &r)),
            leg_length_left: leg(LeftHip, LeftKnee, LeftAnkle),
            leg_length_right: leg(RightHip, RightKnee, RightAnkle),
        };
        Self {
            values,
            detected: side_detected(LeftHip, LeftKnee, LeftAnkle)
                || side_detected(RightHip, RightKnee, RightAnkle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;

    fn pt(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    #[test]
    fn straight_limb_is_zero_degrees() {
        let a = anatomical_angle(&pt(0.0, 0.0), &pt(0.0, 1.0), &pt(0.0, 2.0)).unwrap();
        assert!(a.abs() < 1e-4, "{a}");
    }

    #[test]
    fn right_angle_is_ninety() {
        let a = anatomical_angle(&pt(1.0, 0.0), &pt(0.0, 0.0), &pt(0.0, 1.0)).unwrap();
        assert!((a - 90.0).abs() < 1e-4, "{a}");
    }

    #[test]
    fn folded_limb_is_one_eighty() {
        let a = anatomical_angle(&pt(1.0, 0.0), &pt(0.0, 0.0), &pt(1.0, 0.0)).unwrap();
        assert!((a - 180.0).abs() < 1e-4, "{a}");
    }

    #[test]
    fn zero_length_segment_is_missing() {
        assert_eq!(
            anatomical_angle(&pt(1.0, 1.0), &pt(1.0, 1.0), &pt(0.0, 1.0)),
            None
        );
    }

    #[test]
    fn interior_angle_is_rounded_to_two_decimals() {
        // interior 60°: equilateral triangle
        let h = 3f32.sqrt() / 2.0;
        let a = anatomical_angle(&pt(0.0, 0.0), &pt(0.5, h), &pt(1.0, 0.0)).unwrap();
        assert!((a - 120.0).abs() < 1e-3, "{a}");
    }

    #[test]
    fn normalize_point_divides_by_size() {
        assert_eq!(normalize_point(&pt(320.0, 120.0), 640.0, 480.0), pt(0.5, 0.25));
    }

    fn standing(conf: f32) -> PoseFrame {
        use LandmarkKind::*;
        PoseFrame::from_landmarks([
            Landmark::new(LeftShoulder, 0.45, 0.2, 1.0, 1.0),
            Landmark::new(RightShoulder, 0.55, 0.2, 1.0, 1.0),
            Landmark::new(LeftHip, 0.45, 0.5, 1.0, 1.0),
            Landmark::new(RightHip, 0.55, 0.5, conf, 1.0),
            Landmark::new(LeftKnee, 0.45, 0.7, 1.0, 1.0),
            Landmark::new(RightKnee, 0.55, 0.7, 1.0, 1.0),
            Landmark::new(LeftAnkle, 0.45, 0.9, 1.0, 1.0),
            Landmark::new(RightAnkle, 0.55, 0.9, 1.0, 1.0),
        ])
    }

    #[test]
    fn standing_pose_reduces_to_straight_legs() {
        let s = FrameSample::from_frame(&standing(1.0), 0.5);
        assert!(s.detected);
        let v = &s.values;
        // near-collinear f32 landmarks leave a small residue in acos
        assert!(v.knee_left.unwrap().abs() < 0.5);
        assert!(v.knee_right.unwrap().abs() < 0.5);
        assert!(v.hip.unwrap().abs() < 0.5);
        assert!((v.inter_ankle.unwrap() - 0.1).abs() < 1e-5);
        assert!((v.leg_length_left.unwrap() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn unconfident_landmark_blanks_dependent_values() {
        let s = FrameSample::from_frame(&standing(0.1), 0.5);
        assert!(s.detected, "left side still complete");
        assert_eq!(s.values.knee_right, None);
        assert_eq!(s.values.leg_length_right, None);
        assert!(s.values.knee_left.is_some());
        assert!(s.values.inter_ankle.is_some());
    }

    #[test]
    fn empty_frame_is_undetected() {
        let s = FrameSample::from_frame(&PoseFrame::new(), 0.5);
        assert_eq!(s, FrameSample::missing());
    }
}
