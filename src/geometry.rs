//! Vertex data for the two drawables: the torus and the particle field.

use std::f32::consts::TAU;

use crate::error::SceneError;

/// Interleaved `[px, py, pz, nx, ny, nz]` per vertex.
pub const TORUS_STRIDE: usize = 6;

#[derive(Clone, Debug)]
pub struct TorusGeometry {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
}

impl TorusGeometry {
    /// Torus in the XY plane around the origin. `radius` runs to the center
    /// of the tube. Fails when the vertex count does not fit `u16` indices.
    pub fn new(
        radius: f32,
        tube: f32,
        radial_segments: u16,
        tubular_segments: u16,
    ) -> Result<Self, SceneError> {
        let rs = radial_segments.max(3) as usize;
        let ts = tubular_segments.max(3) as usize;
        let vertex_count = (rs + 1) * (ts + 1);
        if vertex_count > u16::MAX as usize + 1 {
            return Err(SceneError::Resource("torus index range"));
        }
        let mut vertices = Vec::with_capacity(vertex_count * TORUS_STRIDE);

        for j in 0..=rs {
            let v = j as f32 / rs as f32 * TAU;
            for i in 0..=ts {
                let u = i as f32 / ts as f32 * TAU;
                let px = (radius + tube * v.cos()) * u.cos();
                let py = (radius + tube * v.cos()) * u.sin();
                let pz = tube * v.sin();
                // Normal points from the tube's center line to the surface.
                let cx = radius * u.cos();
                let cy = radius * u.sin();
                let n = glam::Vec3::new(px - cx, py - cy, pz).normalize_or_zero();
                vertices.extend_from_slice(&[px, py, pz, n.x, n.y, n.z]);
            }
        }

        // Every index is below `vertex_count`, checked above to fit u16.
        let mut indices = Vec::with_capacity(rs * ts * 6);
        let row = ts + 1;
        for j in 1..=rs {
            for i in 1..=ts {
                let a = (row * j + i - 1) as u16;
                let b = (row * (j - 1) + i - 1) as u16;
                let c = (row * (j - 1) + i) as u16;
                let d = (row * j + i) as u16;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Ok(Self { vertices, indices })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / TORUS_STRIDE
    }
}

/// Randomly scattered points filling the scrolled depth of the page. All
/// points share one tint, set on the material.
#[derive(Clone, Debug)]
pub struct ParticleField {
    /// `[x, y, z]` per point.
    pub positions: Vec<f32>,
}

impl ParticleField {
    /// `rng` must yield uniform samples in [0, 1). Points spread 25 units
    /// wide, span every section vertically, and sit mostly behind the
    /// torus.
    pub fn generate<R>(count: usize, object_distance: f32, mesh_count: usize, mut rng: R) -> Self
    where
        R: FnMut() -> f32,
    {
        let mut positions = Vec::with_capacity(count * 3);
        let span = object_distance * (mesh_count + 2) as f32;
        for _ in 0..count {
            positions.push((rng() - 0.5) * 25.0);
            positions.push((object_distance * 0.5 - rng() * span) * 2.0 + 5.0);
            positions.push((rng() - 0.5) * 200.0 - 20.0);
        }
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in for `Math.random`.
    fn lcg(seed: u32) -> impl FnMut() -> f32 {
        let mut state = seed;
        move || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 8) as f32 / (1u32 << 24) as f32
        }
    }

    #[test]
    fn torus_counts() {
        let torus = TorusGeometry::new(1.2, 0.11, 20, 100).unwrap();
        assert_eq!(torus.vertex_count(), 21 * 101);
        assert_eq!(torus.indices.len(), 20 * 100 * 6);
        let max = *torus.indices.iter().max().unwrap() as usize;
        assert!(max < torus.vertex_count());
    }

    #[test]
    fn torus_vertices_lie_on_surface() {
        let (r, tube) = (1.2f32, 0.11f32);
        let torus = TorusGeometry::new(r, tube, 8, 16).unwrap();
        for v in torus.vertices.chunks(TORUS_STRIDE) {
            let ring = (v[0] * v[0] + v[1] * v[1]).sqrt() - r;
            let d = (ring * ring + v[2] * v[2]).sqrt();
            assert!((d - tube).abs() < 1e-4);
            let n = glam::Vec3::new(v[3], v[4], v[5]);
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_rejects_segments_past_u16_indices() {
        // 256 * 256 vertices is exactly the u16 index space.
        let torus = TorusGeometry::new(1.0, 0.1, 255, 255).unwrap();
        assert_eq!(*torus.indices.iter().max().unwrap(), u16::MAX);
        assert!(matches!(
            TorusGeometry::new(1.0, 0.1, 256, 256),
            Err(SceneError::Resource(_))
        ));
        assert!(TorusGeometry::new(1.0, 0.1, 20, 4000).is_err());
    }

    #[test]
    fn particles_stay_in_bounds() {
        let field = ParticleField::generate(500, 4.0, 1, lcg(7));
        assert_eq!(field.len(), 500);
        assert_eq!(field.positions.len(), 1500);
        for p in field.positions.chunks(3) {
            assert!(p[0] >= -12.5 && p[0] < 12.5);
            // y in ((2 - 12) * 2 + 5, 2 * 2 + 5] = (-15, 9]
            assert!(p[1] > -15.0 && p[1] <= 9.0);
            assert!(p[2] >= -120.0 && p[2] < 80.0);
        }
    }

    #[test]
    fn empty_field() {
        let field = ParticleField::generate(0, 4.0, 1, lcg(1));
        assert!(field.is_empty());
    }
}
