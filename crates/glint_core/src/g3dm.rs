//! G3DM binary model codec.
//!
//! Little-endian layout: 4-byte `G3DM` signature, u32 counts of
//! primitives, materials and textures, then one block per primitive:
//! u32 vertex count, u32 index count, u32 material number, the vertex
//! array (48-byte records) and the i32 triangle-index array. Material and
//! texture sections follow the primitives and are not consumed here; the
//! renderer only needs the triangle geometry.

use std::fs;
use std::mem;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

use glint_math::Vec3;

use crate::mesh::Mesh;

/// Errors that can occur while reading a G3DM file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a G3DM file (bad signature)")]
    BadSignature,

    #[error("unexpected end of file reading {0}")]
    Truncated(&'static str),
}

/// Result type for model loading.
pub type LoadResult<T> = Result<T, LoadError>;

const SIGNATURE: &[u8; 4] = b"G3DM";

/// On-disk vertex record: position, uv, normal, color.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct FileVertex {
    p: [f32; 3],
    t: [f32; 2],
    n: [f32; 3],
    c: [f32; 4],
}

/// Load every primitive of a G3DM file as a separate mesh.
pub fn load_g3dm<P: AsRef<Path>>(path: P) -> LoadResult<Vec<Mesh>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let meshes = parse_g3dm(&bytes)?;
    log::debug!(
        "loaded {} primitives, {} triangles from {}",
        meshes.len(),
        meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
        path.display()
    );
    Ok(meshes)
}

/// Parse an in-memory G3DM image.
pub fn parse_g3dm(bytes: &[u8]) -> LoadResult<Vec<Mesh>> {
    let mut r = Reader { bytes, pos: 0 };

    if r.take(4, "signature")? != SIGNATURE {
        return Err(LoadError::BadSignature);
    }
    let prim_count = r.u32("primitive count")?;
    let _material_count = r.u32("material count")?;
    let _texture_count = r.u32("texture count")?;

    let mut meshes = Vec::new();
    for prim in 0..prim_count {
        let vertex_count = r.u32("vertex count")? as usize;
        let index_count = r.u32("index count")? as usize;
        let material_no = r.u32("material number")?;

        let vertex_bytes = r.take(
            vertex_count.saturating_mul(mem::size_of::<FileVertex>()),
            "vertex array",
        )?;
        let index_bytes = r.take(index_count.saturating_mul(4), "index array")?;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        for chunk in vertex_bytes.chunks_exact(mem::size_of::<FileVertex>()) {
            let v: FileVertex = bytemuck::pod_read_unaligned(chunk);
            positions.push(Vec3::new(v.p[0] as f64, v.p[1] as f64, v.p[2] as f64));
            normals.push(Vec3::new(v.n[0] as f64, v.n[1] as f64, v.n[2] as f64));
        }

        let mut indices = Vec::with_capacity(index_count);
        let mut dropped = 0usize;
        for chunk in index_bytes.chunks_exact(4) {
            let idx = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            if idx < 0 || idx as usize >= vertex_count {
                dropped += 1;
                indices.push(0);
            } else {
                indices.push(idx as u32);
            }
        }
        if dropped > 0 {
            log::warn!(
                "primitive {}: {} indices out of range, clamped to vertex 0",
                prim,
                dropped
            );
        }
        // A trailing partial triangle is dropped rather than refused.
        indices.truncate(indices.len() / 3 * 3);

        let mut mesh = Mesh::new(positions, indices, Some(normals));
        mesh.material_no = material_no;
        if mesh
            .normals
            .as_ref()
            .is_some_and(|ns| ns.iter().any(|n| n.length_squared() < 1.0e-12))
        {
            log::warn!("primitive {}: degenerate vertex normals, recomputing", prim);
            mesh.compute_normals();
        }
        meshes.push(mesh);
    }
    Ok(meshes)
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &'static str) -> LoadResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(LoadError::Truncated(what))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self, what: &'static str) -> LoadResult<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
