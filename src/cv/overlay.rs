use opencv::{
    core::{Point, Scalar},
    imgproc,
};

use super::Matrix;
use crate::{
    math::Math,
    model::data::{HandLandmarks, HAND_CONNECTIONS},
    volume::{Indicator, VolumeState},
};

const FINGERTIP_RADIUS: i32 = 15;
const JOIN_THICKNESS: i32 = 3;
const BAR_TOP_LEFT: (i32, i32) = (50, 150);
const BAR_BOTTOM_RIGHT: (i32, i32) = (85, 400);
const PERCENT_ORIGIN: (i32, i32) = (40, 450);

// BGR
fn magenta() -> Scalar {
    Scalar::new(255., 0., 255., 0.)
}
fn green() -> Scalar {
    Scalar::new(0., 255., 0., 0.)
}
fn red() -> Scalar {
    Scalar::new(0., 0., 255., 0.)
}
fn black() -> Scalar {
    Scalar::new(0., 0., 0., 0.)
}
fn light_gray() -> Scalar {
    Scalar::new(224., 224., 224., 0.)
}

impl Indicator {
    pub fn color(&self) -> Scalar {
        match self {
            Indicator::Default => magenta(),
            Indicator::Minimum => green(),
            Indicator::Maximum => red(),
        }
    }
}

fn fill_circle(frame: &mut Matrix, center: Point, color: Scalar) -> crate::Result<()> {
    imgproc::circle(
        &mut frame.0,
        center,
        FINGERTIP_RADIUS,
        color,
        imgproc::FILLED,
        imgproc::LINE_8,
        0,
    )?;
    Ok(())
}

/// Fingertip markers, the joining line and the midpoint indicator.
pub fn draw_fingertips(
    frame: &mut Matrix,
    thumb: (i32, i32),
    index: (i32, i32),
    indicator: Indicator,
) -> crate::Result<()> {
    let (p1, p2) = (Point::new(thumb.0, thumb.1), Point::new(index.0, index.1));
    let (cx, cy) = Math::midpoint(thumb, index);

    fill_circle(frame, p1, magenta())?;
    fill_circle(frame, p2, magenta())?;
    imgproc::line(
        &mut frame.0,
        p1,
        p2,
        magenta(),
        JOIN_THICKNESS,
        imgproc::LINE_8,
        0,
    )?;
    fill_circle(frame, Point::new(cx, cy), indicator.color())
}

/// Bar outline, filled level and the integer percentage label.
pub fn draw_volume_bar(frame: &mut Matrix, state: &VolumeState) -> crate::Result<()> {
    let (top_left, bottom_right) = (
        Point::new(BAR_TOP_LEFT.0, BAR_TOP_LEFT.1),
        Point::new(BAR_BOTTOM_RIGHT.0, BAR_BOTTOM_RIGHT.1),
    );
    imgproc::rectangle_points(
        &mut frame.0,
        top_left,
        bottom_right,
        black(),
        3,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::rectangle_points(
        &mut frame.0,
        Point::new(BAR_TOP_LEFT.0, state.vol_bar as i32),
        bottom_right,
        green(),
        imgproc::FILLED,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::put_text(
        &mut frame.0,
        &format!("{} %", state.percent()),
        Point::new(PERCENT_ORIGIN.0, PERCENT_ORIGIN.1),
        imgproc::FONT_HERSHEY_COMPLEX_SMALL,
        1.,
        red(),
        2,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}

/// Hand skeleton annotation: connections first, then keypoints on top.
pub fn draw_skeleton(frame: &mut Matrix, hand: &HandLandmarks) -> crate::Result<()> {
    for (from, to) in HAND_CONNECTIONS {
        let (Some(a), Some(b)) = (hand.get(from), hand.get(to)) else {
            continue;
        };
        imgproc::line(
            &mut frame.0,
            Point::new(a.x, a.y),
            Point::new(b.x, b.y),
            light_gray(),
            2,
            imgproc::LINE_8,
            0,
        )?;
    }
    for landmark in hand.iter() {
        imgproc::circle(
            &mut frame.0,
            Point::new(landmark.x, landmark.y),
            2,
            red(),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(())
}

/// BGR pixel at (x, y).
#[cfg(test)]
pub(crate) fn pixel_at(frame: &Matrix, x: i32, y: i32) -> crate::Result<[u8; 3]> {
    use opencv::prelude::MatTraitConst;
    let px = frame.at_2d::<opencv::core::Vec3b>(y, x)?;
    Ok([px[0], px[1], px[2]])
}
