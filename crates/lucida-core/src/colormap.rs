//! Colormap lookup tables for mono images.

use crate::consts::LUT_SIZE;

/// 256 RGB entries indexed by the 8-bit display value.
pub type Lut = [[u8; 3]; LUT_SIZE];

/// Maps a colormap name to its lookup table.
///
/// Hosts with their own colormap source (e.g. a plotting library) implement
/// this; [`BuiltinColormaps`] covers the common scientific maps.
pub trait ColormapResolver {
    /// Lookup table for `name`, or `None` if the name is unknown.
    fn resolve(&self, name: &str) -> Option<Lut>;

    /// Names accepted by [`resolve`](Self::resolve), for pickers.
    fn names(&self) -> Vec<String>;
}

/// Small set of built-in colormaps.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinColormaps;

const BUILTIN_NAMES: &[&str] = &["gray", "gray_r", "hot", "green", "viridis"];

impl ColormapResolver for BuiltinColormaps {
    fn resolve(&self, name: &str) -> Option<Lut> {
        let map: fn(f32) -> [u8; 3] = match name {
            "gray" => |v| {
                let g = f32_to_u8(v * 255.0);
                [g, g, g]
            },
            "gray_r" => |v| {
                let g = f32_to_u8((1.0 - v) * 255.0);
                [g, g, g]
            },
            "hot" => |v| {
                // black -> red -> yellow -> white
                let r = f32_to_u8(v * 3.0 * 255.0);
                let g = f32_to_u8((v * 3.0 - 1.0) * 255.0);
                let b = f32_to_u8((v * 3.0 - 2.0) * 255.0);
                [r, g, b]
            },
            "green" => |v| [0, f32_to_u8(v * 255.0), 0],
            // Approximate: blue -> teal -> green -> yellow
            "viridis" => |v| {
                [
                    f32_to_u8(255.0 * v.powf(2.0)),
                    f32_to_u8(255.0 * v),
                    f32_to_u8(255.0 * (1.0 - v)),
                ]
            },
            _ => return None,
        };
        Some(build_lut(map))
    }

    fn names(&self) -> Vec<String> {
        BUILTIN_NAMES.iter().map(|n| n.to_string()).collect()
    }
}

/// Sample `map` at 256 evenly spaced points in [0, 1].
pub fn build_lut(map: impl Fn(f32) -> [u8; 3]) -> Lut {
    let mut lut = [[0u8; 3]; LUT_SIZE];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = map(i as f32 / (LUT_SIZE - 1) as f32);
    }
    lut
}

fn f32_to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
