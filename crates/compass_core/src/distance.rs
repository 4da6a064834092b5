use bevy::math::Vec3;

/// Straight-line distance rounded to the nearest whole unit.
pub fn rounded_distance(viewer: Vec3, target: Vec3) -> u32 {
    viewer.distance(target).round() as u32
}

/// Render a whole distance with thousands separators and a unit suffix, e.g. `1,250m`.
pub fn format_distance(distance: u32, unit: &str) -> String {
    let digits = distance.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + unit.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(unit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators() {
        assert_eq!(format_distance(0, "m"), "0m");
        assert_eq!(format_distance(999, "m"), "999m");
        assert_eq!(format_distance(1000, "m"), "1,000m");
        assert_eq!(format_distance(1234567, " ft"), "1,234,567 ft");
    }

    #[test]
    fn rounding() {
        assert_eq!(rounded_distance(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)), 5);
        assert_eq!(rounded_distance(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.5)), 3);
        assert_eq!(rounded_distance(Vec3::ZERO, Vec3::new(0.0, 10.4, 0.0)), 10);
    }
}
