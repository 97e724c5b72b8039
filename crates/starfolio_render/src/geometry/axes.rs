//! Debug axes helper

use starfolio_math::Vec3;

use crate::pipeline::PrimitiveVertex;

/// Line-list vertices for X (red), Y (green) and Z (blue) axes of `size`
pub fn axes(size: f32) -> Vec<PrimitiveVertex> {
    [
        (Vec3::X, [1.0, 0.0, 0.0, 1.0]),
        (Vec3::Y, [0.0, 1.0, 0.0, 1.0]),
        (Vec3::Z, [0.0, 0.0, 1.0, 1.0]),
    ]
    .into_iter()
    .flat_map(|(axis, color)| {
        [
            PrimitiveVertex::new(Vec3::ZERO, color),
            PrimitiveVertex::new(axis * size, color),
        ]
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_lines() {
        let lines = axes(5.0);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3].position, [0.0, 5.0, 0.0]);
        assert_eq!(lines[5].color, [0.0, 0.0, 1.0, 1.0]);
    }
}
