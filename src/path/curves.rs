use crate::prelude::*;

// this is essentially osu's math helper

pub const SLIDER_DETAIL_LEVEL: u32 = 50;

const TWO_PI: f32 = std::f32::consts::PI * 2.0;

pub(crate) fn create_bezier(input: &[Vector2]) -> Vec<Vector2> {
    let count = input.len();
    if count < 2 { return input.to_vec() }

    let mut working = vec![Vector2::ZERO; count];
    let mut output = Vec::new();

    let points = SLIDER_DETAIL_LEVEL * count as u32;
    for iteration in 0..=points {
        for i in 0..count { working[i] = input[i] }
        for level in 0..count {
            for i in 0..count - level - 1 {
                working[i] = Vector2::lerp(working[i], working[i + 1], iteration as f32 / points as f32);
            }
        }
        output.push(working[0]);
    }
    output
}

pub(crate) fn create_catmull(input: &[Vector2]) -> Vec<Vector2> {
    let mut output = Vec::new();

    for j in 0..input.len() {
        let v1 = if j >= 1 { input[j - 1] } else { input[j] };
        let v2 = input[j];
        let v3 = if j + 1 < input.len() { input[j + 1] } else { v2 + (v2 - v1) };
        let v4 = if j + 2 < input.len() { input[j + 2] } else { v3 + (v3 - v2) };

        for k in 0..=SLIDER_DETAIL_LEVEL {
            output.push(catmull_rom(v1, v2, v3, v4, k as f32 / SLIDER_DETAIL_LEVEL as f32));
        }
    }
    output
}

/// flattens a 3 point circular arc. `None` when the points are collinear
/// and the caller should fall back to a line
pub(crate) fn create_perfect_curve(a: Vector2, b: Vector2, c: Vector2) -> Option<Vec<Vector2>> {
    // all 3 points on a straight line would give an undefined circle
    if is_straight_line(a, b, c) { return None }

    let (center, radius, t_initial, t_final) = circle_through_points(a, b, c);

    let curve_length = ((t_final - t_initial) * radius).abs();
    let segments = ((curve_length * 0.125) as u32).max(2);

    let mut curve = Vec::with_capacity(segments as usize + 1);
    for i in 0..=segments {
        let progress = i as f32 / segments as f32;
        let t = t_final * progress + t_initial * (1.0 - progress);
        curve.push(circle_point(center, radius, t));
    }

    Some(curve)
}

fn catmull_rom(value1: Vector2, value2: Vector2, value3: Vector2, value4: Vector2, amount: f32) -> Vector2 {
    let num = amount * amount;
    let num2 = amount * num;

    Vector2::new(
        0.5 * (2.0 * value2.x + (-value1.x + value3.x) * amount + (2.0 * value1.x - 5.0 * value2.x + 4.0 * value3.x - value4.x) * num +
            (-value1.x + 3.0 * value2.x - 3.0 * value3.x + value4.x) * num2),
        0.5 * (2.0 * value2.y + (-value1.y + value3.y) * amount + (2.0 * value1.y - 5.0 * value2.y + 4.0 * value3.y - value4.y) * num +
            (-value1.y + 3.0 * value2.y - 3.0 * value3.y + value4.y) * num2),
    )
}

pub fn is_straight_line(a: Vector2, b: Vector2, c: Vector2) -> bool {
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y) == 0.0
}

fn circle_t_at(p: Vector2, c: Vector2) -> f32 {
    (p.y - c.y).atan2(p.x - c.x)
}

/// circle through 3 points
/// http://en.wikipedia.org/wiki/Circumscribed_circle#Cartesian_coordinates
pub fn circle_through_points(a: Vector2, b: Vector2, c: Vector2) -> (Vector2, f32, f32, f32) {
    let d = (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) * 2.0;
    let a_mag_sq = a.length_squared();
    let b_mag_sq = b.length_squared();
    let c_mag_sq = c.length_squared();

    let center = Vector2::new(
        (a_mag_sq * (b.y - c.y) + b_mag_sq * (c.y - a.y) + c_mag_sq * (a.y - b.y)) / d,
        (a_mag_sq * (c.x - b.x) + b_mag_sq * (a.x - c.x) + c_mag_sq * (b.x - a.x)) / d
    );
    let radius = center.distance(a);

    let t_initial = circle_t_at(a, center);
    let mut t_mid = circle_t_at(b, center);
    let mut t_final = circle_t_at(c, center);

    while t_mid < t_initial { t_mid += TWO_PI }
    while t_final < t_initial { t_final += TWO_PI }
    if t_mid > t_final { t_final -= TWO_PI }

    (center, radius, t_initial, t_final)
}

fn circle_point(center: Vector2, radius: f32, a: f32) -> Vector2 {
    Vector2::new(
        a.cos() * radius,
        a.sin() * radius
    ) + center
}
