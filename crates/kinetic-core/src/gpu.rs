//! GPU-facing data layouts. Plain `Pod` structs so both frontends can upload
//! them with `bytemuck` whether or not the `render` feature is enabled.

use crate::animator::{CloudRotation, PositionSink};
use crate::state::OrbitCamera;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// One sprite centre, read by the vertex shader at instance rate.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
}

impl From<Vec3> for ParticleInstance {
    fn from(v: Vec3) -> Self {
        Self {
            position: v.to_array(),
        }
    }
}

impl PositionSink for [ParticleInstance] {
    #[inline]
    fn write_position(&mut self, index: usize, position: Vec3) {
        if let Some(slot) = self.get_mut(index) {
            slot.position = position.to_array();
        }
    }
}

impl PositionSink for Vec<ParticleInstance> {
    #[inline]
    fn write_position(&mut self, index: usize, position: Vec3) {
        if index >= self.len() {
            self.resize(index + 1, ParticleInstance::default());
        }
        self[index].position = position.to_array();
    }
}

/// Matches `Scene` in `particles.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// rgb, opacity
    pub color: [f32; 4],
    /// x: sprite size in world units, yzw unused
    pub params: [f32; 4],
}

impl SceneUniforms {
    pub fn new(camera: &OrbitCamera, model: Mat4, rgb: [f32; 3], opacity: f32, size: f32) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], opacity],
            params: [size, 0.0, 0.0, 0.0],
        }
    }
}

/// Whole-cloud transform for a frame's rotation: spin about Y, tilt about Z.
pub fn model_matrix(rotation: CloudRotation) -> Mat4 {
    Mat4::from_rotation_y(rotation.y) * Mat4::from_rotation_z(rotation.z)
}

/// Two triangles covering a unit quad centred on the origin.
pub const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];
