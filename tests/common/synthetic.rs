use gait_score::pose::{Landmark, LandmarkKind, PoseFrame};
use gait_score::{RawSignals, Sample};
use std::f32::consts::TAU;

pub const THIGH: f32 = 0.22;
pub const SHANK: f32 = 0.20;

/// Gait cycle length in frames.
pub const CYCLE: f32 = 30.0;

/// Hip swing and knee flexion (degrees) of one leg at phase `t` (radians).
fn leg_angles(t: f32) -> (f32, f32) {
    let swing = 20.0 * t.sin();
    let flexion = 35.0 + 25.0 * (t + 0.6).sin();
    (swing, flexion)
}

fn leg_points(hip: (f32, f32), t: f32) -> ((f32, f32), (f32, f32)) {
    let (swing, flexion) = leg_angles(t);
    let thigh = swing.to_radians();
    let shank = (swing - flexion).to_radians();
    let knee = (hip.0 + THIGH * thigh.sin(), hip.1 + THIGH * thigh.cos());
    let ankle = (knee.0 + SHANK * shank.sin(), knee.1 + SHANK * shank.cos());
    (knee, ankle)
}

/// A side-view walker in normalised image coordinates. Every `drop_every`-th
/// frame (if non-zero) has no detection.
pub fn walking_frames(n: usize, drop_every: usize) -> Vec<Option<PoseFrame>> {
    (0..n)
        .map(|i| {
            if drop_every > 0 && i % drop_every == drop_every - 1 {
                return None;
            }
            let t = TAU * i as f32 / CYCLE;
            let hip = (0.5, 0.5);
            let (lk, la) = leg_points(hip, t);
            let (rk, ra) = leg_points(hip, t + TAU / 2.0);
            let lm = |kind, p: (f32, f32)| Landmark::new(kind, p.0, p.1, 0.95, 0.99);
            Some(PoseFrame::from_landmarks([
                lm(LandmarkKind::LeftShoulder, (0.5, 0.2)),
                lm(LandmarkKind::RightShoulder, (0.5, 0.2)),
                lm(LandmarkKind::LeftHip, hip),
                lm(LandmarkKind::RightHip, hip),
                lm(LandmarkKind::LeftKnee, lk),
                lm(LandmarkKind::RightKnee, rk),
                lm(LandmarkKind::LeftAnkle, la),
                lm(LandmarkKind::RightAnkle, ra),
            ]))
        })
        .collect()
}

fn wave(n: usize, mid: f32, amp: f32, phase: f32) -> Vec<Sample> {
    (0..n)
        .map(|i| Some(mid + amp * (TAU * i as f32 / CYCLE + phase).sin()))
        .collect()
}

/// Already-reduced signals of a regular gait.
pub fn walking_signals(n: usize) -> RawSignals {
    RawSignals {
        knee_left: wave(n, 35.0, 25.0, 0.0),
        knee_right: wave(n, 35.0, 25.0, TAU / 2.0),
        hip: wave(n, 15.0, 12.0, 0.4),
        inter_ankle: wave(n, 0.18, 0.1, 0.0),
        leg_length_left: vec![Some(THIGH + SHANK); n],
        leg_length_right: vec![Some(THIGH + SHANK); n],
    }
}

/// Triangle wave 30↔60° in 5° steps, 30 frames at 30 fps.
pub fn golden_theta() -> Vec<Sample> {
    [
        30, 35, 40, 45, 50, 55, 60, 55, 50, 45, 40, 35, 30, 35, 40, 45, 50, 55, 60, 55, 50, 45, 40,
        35, 30, 35, 40, 45, 50, 55,
    ]
    .iter()
    .map(|&v| Some(v as f32))
    .collect()
}

/// 30 distinct levels evenly spread over 30..60°, visited up then down.
pub fn oscillation_fixture() -> Vec<Sample> {
    let level = |k: usize| Some(30.0 + k as f32 * 30.0 / 29.0);
    (0..30)
        .step_by(2)
        .chain((1..30).step_by(2).rev())
        .map(level)
        .collect()
}
