use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use math_monsters::config::{AMBIENT_LIGHT, DIRECTIONAL_LIGHT, FOG_FAR, FOG_NEAR, LIGHT_POSITION};

use crate::gpu::{camera_bind_group_layout, create_uniform_buffer};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// Linear sky color, also the fog color.
    pub sky: [f32; 4],
    pub light_dir: [f32; 4],
    /// x: ambient, y: directional, z: fog near, w: fog far
    pub params: [f32; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4, eye: Vec3, sky: [f32; 3]) -> Self {
        let light = Vec3::from(LIGHT_POSITION).normalize();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            sky: [sky[0], sky[1], sky[2], 1.0],
            light_dir: light.extend(0.0).to_array(),
            params: [AMBIENT_LIGHT, DIRECTIONAL_LIGHT, FOG_NEAR, FOG_FAR],
        }
    }
}

pub struct CameraState {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl CameraState {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let uniform = CameraUniform::new(Mat4::IDENTITY, Vec3::ZERO, [0.0; 3]);
        let uniform_buffer = create_uniform_buffer(device, &uniform, "Camera Uniform");

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            uniform_buffer,
            bind_group,
        }
    }

    pub fn layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        camera_bind_group_layout(device)
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: CameraUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }
}
