pub type Point = (i32, i32);

pub struct Math;

impl Math {
    pub fn distance(a: Point, b: Point) -> f32 {
        ((b.0 - a.0) as f32).hypot((b.1 - a.1) as f32)
    }

    /// Integer midpoint, rounded towards negative infinity.
    pub fn midpoint(a: Point, b: Point) -> Point {
        ((a.0 + b.0).div_euclid(2), (a.1 + b.1).div_euclid(2))
    }

    /// Linear interpolation of `x` from `domain` onto `range`.
    ///
    /// Inputs outside the domain clamp to the nearest range endpoint, so a
    /// descending range (e.g. `[400, 150]`) is handled the same as an ascending one.
    pub fn interp(x: f32, domain: [f32; 2], range: [f32; 2]) -> f32 {
        let [x0, x1] = domain;
        let [y0, y1] = range;
        if x <= x0 {
            return y0;
        }
        if x >= x1 {
            return y1;
        }
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}
