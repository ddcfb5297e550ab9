//! Region (de)serialization: little-endian binary framing and the JSON
//! debug dump.

use crate::contour::{EdgeVertex, SubContour};
use crate::errors::DecodeError;
use crate::polygon::OctahedronPolygon;
use nalgebra::Vector3;
use std::io::{Read, Write};

/// Sanity bound for length prefixes; a region with more elements than this
/// in one list is rejected rather than trusted.
const MAX_LEN: u32 = 1 << 24;

impl OctahedronPolygon {
    /// Serialize the eight face-contour lists in index order: each list is
    /// a `u32` count of sub-contours, each sub-contour a `u32` count of
    /// vertices, each vertex three little-endian `f64` followed by one
    /// edge-flag byte. Caches and the cap are derivative state and are not
    /// written.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for side in self.sides() {
            out.write_all(&(side.len() as u32).to_le_bytes())?;
            for sc in side {
                out.write_all(&(sc.len() as u32).to_le_bytes())?;
                for ev in &sc.vertices {
                    out.write_all(&ev.vertex.x.to_le_bytes())?;
                    out.write_all(&ev.vertex.y.to_le_bytes())?;
                    out.write_all(&ev.vertex.z.to_le_bytes())?;
                    out.write_all(&[ev.edge_flag as u8])?;
                }
            }
        }
        Ok(())
    }

    /// Read a region serialized by [`write_to`](Self::write_to) and rebuild
    /// its caches before returning it.
    pub fn read_from<R: Read>(input: &mut R) -> Result<Self, DecodeError> {
        let mut poly = OctahedronPolygon::empty();
        for side in poly.sides.iter_mut() {
            let contour_count = read_len(input)?;
            for _ in 0..contour_count {
                let vertex_count = read_len(input)?;
                let mut vertices = Vec::with_capacity(vertex_count as usize);
                for _ in 0..vertex_count {
                    let x = read_f64(input)?;
                    let y = read_f64(input)?;
                    let z = read_f64(input)?;
                    let mut flag = [0u8; 1];
                    input.read_exact(&mut flag)?;
                    let edge_flag = match flag[0] {
                        0 => false,
                        1 => true,
                        other => return Err(DecodeError::InvalidFlag(other)),
                    };
                    vertices.push(EdgeVertex::new(Vector3::new(x, y, z), edge_flag));
                }
                side.push(SubContour { vertices });
            }
        }
        poly.update_vertex_array();
        Ok(poly)
    }

    /// Dump the region as JSON: eight arrays of sub-contours, each vertex a
    /// `[ra_deg, dec_deg, edge_flag]` triple.
    pub fn to_json(&self) -> String {
        let faces: Vec<serde_json::Value> = self
            .sides()
            .iter()
            .map(|side| {
                serde_json::Value::Array(
                    side.iter().map(SubContour::to_json_fragment).collect(),
                )
            })
            .collect();
        serde_json::Value::Array(faces).to_string()
    }
}

fn read_len<R: Read>(input: &mut R) -> Result<u32, DecodeError> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    let len = u32::from_le_bytes(buf);
    if len > MAX_LEN {
        return Err(DecodeError::LengthOutOfRange(len));
    }
    Ok(len)
}

fn read_f64<R: Read>(input: &mut R) -> Result<f64, DecodeError> {
    let mut buf = [0u8; 8];
    input.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}
