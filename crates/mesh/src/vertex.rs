use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use crate::MeshError;

/// Slack allowed on UV components before they are rejected, so that
/// coordinates computed with trigonometry may land a rounding error outside
/// the unit range.
const UV_EPSILON: f64 = 1e-9;

/// Packed vertex as laid out in the vertex buffer: 8 bytes, no padding.
///
/// Positions are signed 16-bit integers at whatever scale the mesh was built
/// with; the model transform undoes that scale at draw time. The texture
/// coordinate is a pair of normalized bytes packed as `u + v * 256`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Vertex {
    pub position: [i16; 3],
    pub uv: u16,
}

impl Vertex {
    /// Size of one vertex in the buffer, in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Scale and quantize a position, and pack a texture coordinate.
    pub fn quantize(position: Vec3, scale: f32, uv: Vec2) -> Result<Self, MeshError> {
        let scale = scale as f64;
        Ok(Self {
            position: [
                quantize_component(position.x as f64 * scale)?,
                quantize_component(position.y as f64 * scale)?,
                quantize_component(position.z as f64 * scale)?,
            ],
            uv: pack_uv(uv.x as f64, uv.y as f64)?,
        })
    }

    /// The two normalized texture bytes `(u, v)`.
    pub fn uv_bytes(&self) -> (u8, u8) {
        ((self.uv & 0xff) as u8, (self.uv >> 8) as u8)
    }
}

/// Truncate toward zero into the `i16` range.
///
/// Values that do not fit, and non-finite values, are rejected rather than
/// wrapped.
pub fn quantize_component(value: f64) -> Result<i16, MeshError> {
    let truncated = value.trunc();
    if !truncated.is_finite() || truncated < i16::MIN as f64 || truncated > i16::MAX as f64 {
        return Err(MeshError::PositionOutOfRange { value });
    }
    Ok(truncated as i16)
}

/// Quantize each channel to a byte (`trunc(c * 255)`) and pack as `u + v * 256`.
pub fn pack_uv(u: f64, v: f64) -> Result<u16, MeshError> {
    Ok(quantize_uv(u)? as u16 + quantize_uv(v)? as u16 * 256)
}

fn quantize_uv(c: f64) -> Result<u8, MeshError> {
    if !(-UV_EPSILON..=1.0 + UV_EPSILON).contains(&c) {
        return Err(MeshError::UvOutOfRange { value: c });
    }
    Ok((c.clamp(0.0, 1.0) * 255.0).trunc() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_eight_bytes() {
        assert_eq!(Vertex::STRIDE, 8);
    }

    #[test]
    fn quantize_truncates_toward_zero() {
        assert_eq!(quantize_component(2.9).unwrap(), 2);
        assert_eq!(quantize_component(-2.9).unwrap(), -2);
        assert_eq!(quantize_component(32767.5).unwrap(), 32767);
        assert_eq!(quantize_component(-32768.0).unwrap(), -32768);
    }

    #[test]
    fn quantize_rejects_overflow() {
        assert!(matches!(
            quantize_component(32768.0),
            Err(MeshError::PositionOutOfRange { .. })
        ));
        assert!(quantize_component(-40000.0).is_err());
        assert!(quantize_component(f64::NAN).is_err());
        assert!(quantize_component(f64::INFINITY).is_err());
    }

    #[test]
    fn uv_packs_low_byte_u_high_byte_v() {
        let packed = pack_uv(1.0, 0.5).unwrap();
        assert_eq!(packed, 255 + 127 * 256);
        let v = Vertex {
            position: [0; 3],
            uv: packed,
        };
        assert_eq!(v.uv_bytes(), (255, 127));
    }

    #[test]
    fn uv_out_of_unit_range_is_rejected() {
        assert!(matches!(
            pack_uv(1.5, 0.0),
            Err(MeshError::UvOutOfRange { .. })
        ));
        assert!(pack_uv(0.0, -0.1).is_err());
        assert!(pack_uv(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn quantize_applies_scale_before_truncation() {
        let v = Vertex::quantize(Vec3::new(-1.0, 0.05, 2.0), 10.0, Vec2::new(0.0, 0.25)).unwrap();
        assert_eq!(v.position, [-10, 0, 20]);
        assert_eq!(v.uv_bytes(), (0, 63));
    }

    #[test]
    fn quantize_reports_scaled_overflow() {
        let err = Vertex::quantize(Vec3::new(4000.0, 0.0, 0.0), 10.0, Vec2::ZERO).unwrap_err();
        assert!(matches!(err, MeshError::PositionOutOfRange { .. }));
    }
}
