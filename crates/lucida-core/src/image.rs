use std::fmt;

use ndarray::parallel::prelude::*;
use ndarray::{s, Array2, Array3, ArrayBase, ArrayView2, ArrayView3, ArrayViewD, Data, Dimension, Ix2, Ix3};
use num_traits::AsPrimitive;

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{Result, ViewerError};

/// Channel layout of the current image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChannelMode {
    Mono,
    Rgb,
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mono => write!(f, "Mono"),
            Self::Rgb => write!(f, "RGB"),
        }
    }
}

/// Raw samples handed to the viewer, stored as f64.
///
/// Mono buffers have shape (height, width); colour buffers have shape
/// (height, width, 3).
#[derive(Clone, Debug, PartialEq)]
pub enum ImageData {
    Mono(Array2<f64>),
    Rgb(Array3<f64>),
}

/// Value(s) of a single pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    Mono(f64),
    Rgb([f64; 3]),
}

/// Min/max/mean summary over an image or a region of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ImageData {
    /// Build from a buffer of any dimensionality: 2-D is mono, 3-D is colour.
    pub fn from_dyn<T: AsPrimitive<f64>>(buffer: ArrayViewD<'_, T>) -> Result<Self> {
        match buffer.ndim() {
            2 => {
                let view = buffer
                    .into_dimensionality::<Ix2>()
                    .map_err(|_| ViewerError::UnsupportedShape { ndim: 2 })?;
                Ok(Self::mono(view))
            }
            3 => {
                let view = buffer
                    .into_dimensionality::<Ix3>()
                    .map_err(|_| ViewerError::UnsupportedShape { ndim: 3 })?;
                Self::rgb(view)
            }
            ndim => Err(ViewerError::UnsupportedShape { ndim }),
        }
    }

    pub fn mono<T: AsPrimitive<f64>>(buffer: ArrayView2<'_, T>) -> Self {
        Self::Mono(buffer.mapv(|v| v.as_()))
    }

    /// Build a colour image. Channels beyond the third (e.g. alpha) are dropped.
    pub fn rgb<T: AsPrimitive<f64>>(buffer: ArrayView3<'_, T>) -> Result<Self> {
        let channels = buffer.dim().2;
        if channels < COLOR_CHANNEL_COUNT {
            return Err(ViewerError::TooFewChannels { channels });
        }
        let rgb = buffer.slice(s![.., .., ..COLOR_CHANNEL_COUNT]);
        Ok(Self::Rgb(rgb.mapv(|v| v.as_())))
    }

    pub fn mode(&self) -> ChannelMode {
        match self {
            Self::Mono(_) => ChannelMode::Mono,
            Self::Rgb(_) => ChannelMode::Rgb,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::Mono(data) => data.ncols(),
            Self::Rgb(data) => data.dim().1,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Mono(data) => data.nrows(),
            Self::Rgb(data) => data.dim().0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Pixel value at image coordinates, or `None` outside the buffer.
    pub fn sample(&self, x: i64, y: i64) -> Option<Sample> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return None;
        }
        let (row, col) = (y as usize, x as usize);
        Some(match self {
            Self::Mono(data) => Sample::Mono(data[[row, col]]),
            Self::Rgb(data) => Sample::Rgb([
                data[[row, col, 0]],
                data[[row, col, 1]],
                data[[row, col, 2]],
            ]),
        })
    }

    /// Statistics over every sample (all channels for colour images).
    pub fn stats(&self) -> Option<ImageStats> {
        match self {
            Self::Mono(data) => summarize(data),
            Self::Rgb(data) => summarize(data),
        }
    }

    /// Statistics over columns `x1..x2` and rows `y1..y2` (end-exclusive).
    ///
    /// Returns `None` when the region is empty or reaches outside the image.
    pub fn region_stats(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> Option<ImageStats> {
        let (w, h) = (self.width() as i64, self.height() as i64);
        if x1 < 0 || y1 < 0 || x2 > w || y2 > h || x1 >= x2 || y1 >= y2 {
            return None;
        }
        let (x1, y1, x2, y2) = (x1 as usize, y1 as usize, x2 as usize, y2 as usize);
        match self {
            Self::Mono(data) => summarize(&data.slice(s![y1..y2, x1..x2])),
            Self::Rgb(data) => summarize(&data.slice(s![y1..y2, x1..x2, ..])),
        }
    }
}

#[derive(Clone, Copy)]
struct Accumulator {
    min: f64,
    max: f64,
    sum: f64,
    count: usize,
}

impl Accumulator {
    const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        sum: 0.0,
        count: 0,
    };

    fn push(mut self, v: f64) -> Self {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        self.sum += v;
        self.count += 1;
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }

    fn finish(self) -> Option<ImageStats> {
        (self.count > 0).then(|| ImageStats {
            min: self.min,
            max: self.max,
            mean: self.sum / self.count as f64,
        })
    }
}

fn summarize<S, D>(data: &ArrayBase<S, D>) -> Option<ImageStats>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let acc = if data.len() >= PARALLEL_PIXEL_THRESHOLD {
        data.view()
            .into_par_iter()
            .fold(|| Accumulator::EMPTY, |acc, &v| acc.push(v))
            .reduce(|| Accumulator::EMPTY, Accumulator::merge)
    } else {
        data.iter().fold(Accumulator::EMPTY, |acc, &v| acc.push(v))
    };
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};

    #[test]
    fn dyn_buffer_selects_mode_by_dimensionality() {
        let mono = Array::<u16, _>::zeros(IxDyn(&[3, 5]));
        let img = ImageData::from_dyn(mono.view()).unwrap();
        assert_eq!(img.mode(), ChannelMode::Mono);
        assert_eq!((img.width(), img.height()), (5, 3));

        let rgb = Array::<u8, _>::zeros(IxDyn(&[3, 5, 4]));
        let img = ImageData::from_dyn(rgb.view()).unwrap();
        assert_eq!(img.mode(), ChannelMode::Rgb);
        assert_eq!((img.width(), img.height()), (5, 3));
    }

    #[test]
    fn one_dimensional_buffer_is_rejected() {
        let line = Array::<f32, _>::zeros(IxDyn(&[8]));
        let err = ImageData::from_dyn(line.view()).unwrap_err();
        assert!(matches!(err, ViewerError::UnsupportedShape { ndim: 1 }));
    }

    #[test]
    fn two_channel_buffer_is_rejected() {
        let arr = Array3::<f32>::zeros((2, 2, 2));
        let err = ImageData::rgb(arr.view()).unwrap_err();
        assert!(matches!(err, ViewerError::TooFewChannels { channels: 2 }));
    }

    #[test]
    fn large_buffer_stats_match_sequential() {
        let data = Array2::from_shape_fn((300, 300), |(r, c)| (r * 300 + c) as f64);
        let img = ImageData::Mono(data);
        let stats = img.stats().unwrap();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 89_999.0);
        assert!((stats.mean - 44_999.5).abs() < 1e-6);
    }
}
