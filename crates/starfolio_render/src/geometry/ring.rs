//! Flat annulus drawn around decorated planets

use std::f32::consts::TAU;

use starfolio_core::Decoration;
use starfolio_math::{Euler, Vec3};

use crate::pipeline::PrimitiveVertex;

/// Annulus in the local XY plane, stored as a triangle list
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    triangles: Vec<Vec3>,
}

impl Ring {
    pub const SEGMENTS: u32 = 64;
    /// Ring opacity
    pub const ALPHA: f32 = 0.5;

    pub fn new(inner: f32, outer: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut triangles = Vec::with_capacity(segments as usize * 6);
        for i in 0..segments {
            let a0 = TAU * i as f32 / segments as f32;
            let a1 = TAU * (i + 1) as f32 / segments as f32;
            let dir0 = Vec3::new(a0.cos(), a0.sin(), 0.0);
            let dir1 = Vec3::new(a1.cos(), a1.sin(), 0.0);
            let (in0, out0) = (dir0 * inner, dir0 * outer);
            let (in1, out1) = (dir1 * inner, dir1 * outer);
            triangles.extend_from_slice(&[in0, out0, out1, in0, out1, in1]);
        }
        Self { triangles }
    }

    /// Ring sized for a body of the given radius
    pub fn for_body(radius: f32) -> Self {
        let mid = radius * Decoration::RING_RADIUS_FACTOR;
        Self::new(
            mid - Decoration::RING_HALF_WIDTH,
            mid + Decoration::RING_HALF_WIDTH,
            Self::SEGMENTS,
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len()
    }

    /// World-space vertices for a ring placed at `center`
    pub fn transformed(
        &self,
        center: Vec3,
        rotation: Euler,
        color: [f32; 3],
    ) -> impl Iterator<Item = PrimitiveVertex> + '_ {
        let quat = rotation.to_quat();
        let rgba = [color[0], color[1], color[2], Self::ALPHA];
        self.triangles
            .iter()
            .map(move |p| PrimitiveVertex::new(center + quat * *p, rgba))
    }
}
