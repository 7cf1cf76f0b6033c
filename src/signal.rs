//! The one-dimensional signal being annotated.
//!
//! Samples are held as `f32` regardless of the on-disk dtype. The signal
//! defines the hard data bounds `[0, len - 1]` that the viewport and every
//! annotation live inside.

use std::io::Cursor;
use std::path::Path;

use ndarray::{Array1, ArrayD, ArrayView1, Axis, s};
use ndarray_npy::ReadNpyExt;

/// Errors that can occur when loading a signal.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a NumPy array file")]
    NotNpy,

    #[error("Failed to read NumPy array: unsupported dtype or invalid format")]
    UnsupportedDtype,

    #[error("Unsupported array shape {0:?} (expected 1-D, or 2-D with samples in rows)")]
    UnsupportedShape(Vec<usize>),

    #[error("Signal has no samples")]
    Empty,

    #[error("Invalid sample rate {0} (must be finite and positive)")]
    InvalidSampleRate(f32),
}

/// Sample array plus its sampling frequency.
#[derive(Debug, Clone)]
pub struct Signal {
    samples: Array1<f32>,
    sample_rate: f32,
}

impl Signal {
    /// NumPy magic bytes: \x93NUMPY
    const NPY_MAGIC: &'static [u8] = &[0x93, b'N', b'U', b'M', b'P', b'Y'];

    pub fn new(samples: Array1<f32>, sample_rate: f32) -> Result<Self, SignalError> {
        if samples.is_empty() {
            return Err(SignalError::Empty);
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SignalError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Decode an in-memory `.npy` file.
    ///
    /// Accepts `f32`, `f64`, `i16` and `i32` arrays. A 2-D array is read as
    /// `(samples, channels)` and its first channel is used.
    pub fn from_npy_bytes(data: &[u8], sample_rate: f32) -> Result<Self, SignalError> {
        if !data.starts_with(Self::NPY_MAGIC) {
            return Err(SignalError::NotNpy);
        }
        let samples = decode_npy(data)?;
        log::info!(
            "Loaded signal: {} samples at {} Hz",
            samples.len(),
            sample_rate
        );
        Self::new(samples, sample_rate)
    }

    /// Read and decode a `.npy` file from disk.
    pub fn load_npy(path: &Path, sample_rate: f32) -> Result<Self, SignalError> {
        let data = std::fs::read(path)?;
        log::debug!("Read {} bytes from {:?}", data.len(), path);
        Self::from_npy_bytes(&data, sample_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn samples(&self) -> ArrayView1<'_, f32> {
        self.samples.view()
    }

    /// Hard x bounds in sample indices: `(0, len - 1)`.
    pub fn data_bounds(&self) -> (f64, f64) {
        (0.0, self.len().saturating_sub(1) as f64)
    }

    /// Samples `start..stop`, clamped to the signal.
    pub fn slice(&self, start: usize, stop: usize) -> ArrayView1<'_, f32> {
        let stop = stop.min(self.len());
        let start = start.min(stop);
        self.samples.slice(s![start..stop])
    }

    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / f64::from(self.sample_rate)
    }
}

fn decode_npy(data: &[u8]) -> Result<Array1<f32>, SignalError> {
    let mut cursor = Cursor::new(data);

    // f32 first, it is what most recordings are stored as
    if let Ok(array) = ArrayD::<f32>::read_npy(&mut cursor) {
        return to_samples(array);
    }

    cursor.set_position(0);
    if let Ok(array) = ArrayD::<f64>::read_npy(&mut cursor) {
        return to_samples(array);
    }

    // Raw PCM
    cursor.set_position(0);
    if let Ok(array) = ArrayD::<i16>::read_npy(&mut cursor) {
        return to_samples(array);
    }

    cursor.set_position(0);
    if let Ok(array) = ArrayD::<i32>::read_npy(&mut cursor) {
        return to_samples(array);
    }

    Err(SignalError::UnsupportedDtype)
}

fn to_samples<T>(array: ArrayD<T>) -> Result<Array1<f32>, SignalError>
where
    T: IntoSample + Copy,
{
    let shape = array.shape().to_vec();
    log::debug!("Signal array shape = {:?}", shape);

    match shape.as_slice() {
        [_] => Ok(array.iter().map(|&v| v.into_sample()).collect()),
        [rows, channels] => {
            if *rows == 0 || *channels == 0 {
                return Err(SignalError::Empty);
            }
            if *channels > 1 {
                log::warn!("Signal has {} channels, using the first", channels);
            }
            Ok(array
                .index_axis(Axis(1), 0)
                .iter()
                .map(|&v| v.into_sample())
                .collect())
        }
        _ => Err(SignalError::UnsupportedShape(shape)),
    }
}

/// Conversion of stored sample values to `f32`. Values keep their scale.
trait IntoSample {
    fn into_sample(self) -> f32;
}

impl IntoSample for f32 {
    fn into_sample(self) -> f32 {
        self
    }
}

impl IntoSample for f64 {
    fn into_sample(self) -> f32 {
        self as f32
    }
}

impl IntoSample for i16 {
    fn into_sample(self) -> f32 {
        f32::from(self)
    }
}

impl IntoSample for i32 {
    fn into_sample(self) -> f32 {
        self as f32
    }
}
