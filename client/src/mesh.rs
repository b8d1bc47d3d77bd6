use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable, Debug)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Unit cube centred on the origin. Every block in the scene is an instance of it,
/// scaled by the block's size.
pub fn unit_cube() -> (Vec<Vertex>, Vec<u16>) {
    let (lo, hi) = (-0.5, 0.5);
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[lo, lo, hi], [hi, lo, hi], [hi, hi, hi], [lo, hi, hi]]),
        ([0.0, 0.0, -1.0], [[hi, lo, lo], [lo, lo, lo], [lo, hi, lo], [hi, hi, lo]]),
        ([-1.0, 0.0, 0.0], [[lo, lo, lo], [lo, lo, hi], [lo, hi, hi], [lo, hi, lo]]),
        ([1.0, 0.0, 0.0], [[hi, lo, hi], [hi, lo, lo], [hi, hi, lo], [hi, hi, hi]]),
        ([0.0, 1.0, 0.0], [[lo, hi, hi], [hi, hi, hi], [hi, hi, lo], [lo, hi, lo]]),
        ([0.0, -1.0, 0.0], [[lo, lo, lo], [hi, lo, lo], [hi, lo, hi], [lo, lo, hi]]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, positions) in faces {
        let base = vertices.len() as u16;
        for position in positions {
            vertices.push(Vertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}
