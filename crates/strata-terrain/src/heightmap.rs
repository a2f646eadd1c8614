//! Multi-octave fBm heightmap used to lay down starting terrain.

use noise::{NoiseFn, Simplex};

/// Octave configuration for [`HeightmapSampler`].
#[derive(Clone, Debug)]
pub struct HeightmapParams {
    pub seed: u64,
    /// Number of octaves summed. Default: 5.
    pub octaves: u32,
    /// Frequency multiplier between octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves. Default: 0.5.
    pub persistence: f64,
    /// Frequency of the first octave, in cycles per block. Default: 0.01.
    pub base_frequency: f64,
    /// Amplitude of the first octave, in blocks. Default: 24.0.
    pub amplitude: f64,
    /// Height returned where the noise is zero. Default: 48.0.
    pub base_height: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 5,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.01,
            amplitude: 24.0,
            base_height: 48.0,
        }
    }
}

/// Terrain height as fractal Brownian motion over 2D simplex noise.
pub struct HeightmapSampler {
    noise: Simplex,
    params: HeightmapParams,
}

impl HeightmapSampler {
    pub fn new(params: HeightmapParams) -> Self {
        let noise = Simplex::new(params.seed as u32);
        Self { noise, params }
    }

    /// Raw fBm value at `(x, z)`, in `[-max_amplitude, max_amplitude]`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Block height of the topmost terrain block in column `(x, z)`.
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        (self.params.base_height + self.sample(f64::from(x), f64::from(z))).floor() as i32
    }

    /// Geometric sum of all octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amp;
            amp *= self.params.persistence;
        }
        sum
    }

    pub fn params(&self) -> &HeightmapParams {
        &self.params
    }
}
