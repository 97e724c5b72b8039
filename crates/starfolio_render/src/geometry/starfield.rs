//! Background star shell

use rand::Rng;
use starfolio_core::StarfieldTemplate;
use starfolio_math::sphere;

use crate::pipeline::PrimitiveVertex;

/// Lightness shared by every star
const STAR_LIGHTNESS: f32 = 0.9;

/// Static star points, generated once per scene
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Starfield {
    vertices: Vec<PrimitiveVertex>,
}

impl Starfield {
    pub fn generate<R: Rng + ?Sized>(template: &StarfieldTemplate, rng: &mut R) -> Self {
        let positions = sphere::star_shell(rng, template.count, template.radius, template.depth);
        let count = positions.len().max(1) as f32;
        let vertices = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let [r, g, b] = hsl_to_rgb(i as f32 / count, template.saturation, STAR_LIGHTNESS);
                PrimitiveVertex::new(p, [r, g, b, 1.0])
            })
            .collect();
        Self { vertices }
    }

    pub fn vertices(&self) -> &[PrimitiveVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// HSL to linear RGB, all components in [0, 1]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l; 3];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
