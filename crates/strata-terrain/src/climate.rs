//! Temperature and humidity fields.
//!
//! Each field is 2D simplex noise over the horizontal plane, normalized to
//! `[0, 1]`, lowered with altitude above the field's sea level, then shaped by
//! the configured curve, gain and offset.

use noise::{NoiseFn, Simplex};
use strata_config::{ClimateConfig, Curve, FieldConfig};

/// Which climate field to sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Temperature,
    Humidity,
}

/// Source of temperature and humidity values in `[0, 1]`.
pub trait FieldSampler {
    fn sample(&self, kind: FieldKind, x: f64, y: f64, z: f64) -> f64;
}

/// One noise-driven scalar field.
pub struct NoiseField {
    noise: Simplex,
    config: FieldConfig,
}

impl NoiseField {
    pub fn new(seed: u32, config: FieldConfig) -> Self {
        Self {
            noise: Simplex::new(seed),
            config,
        }
    }

    /// Samples the field at a block position. Always returns a value in `[0, 1]`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let c = &self.config;
        let raw = self.noise.get([x * c.frequency, z * c.frequency]);
        let mut value = (raw + 1.0) * 0.5;

        if y > c.sea_level && c.amplitude > 0.0 {
            let altitude = ((y - c.sea_level) / c.amplitude).min(1.0);
            value -= c.scale * altitude;
        }
        value = value.clamp(0.0, 1.0);

        value = match c.curve {
            Curve::Identity => value,
            Curve::Power(exponent) => value.powf(exponent),
        };

        (c.offset + c.gain * value).clamp(0.0, 1.0)
    }
}

/// Temperature and humidity noise fields with decorrelated seeds.
pub struct ClimateFields {
    temperature: NoiseField,
    humidity: NoiseField,
}

impl ClimateFields {
    pub fn new(config: &ClimateConfig) -> Self {
        let temperature = NoiseField::new(config.seed as u32, config.temperature.clone());
        let humidity = NoiseField::new(
            config.seed.wrapping_add(0xDEAD_BEEF) as u32,
            config.humidity.clone(),
        );
        Self {
            temperature,
            humidity,
        }
    }

    pub fn field(&self, kind: FieldKind) -> &NoiseField {
        match kind {
            FieldKind::Temperature => &self.temperature,
            FieldKind::Humidity => &self.humidity,
        }
    }
}

impl FieldSampler for ClimateFields {
    fn sample(&self, kind: FieldKind, x: f64, y: f64, z: f64) -> f64 {
        self.field(kind).sample(x, y, z)
    }
}

/// Uniform climate everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantFields {
    pub temperature: f64,
    pub humidity: f64,
}

impl ConstantFields {
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
        }
    }
}

impl FieldSampler for ConstantFields {
    fn sample(&self, kind: FieldKind, _x: f64, _y: f64, _z: f64) -> f64 {
        match kind {
            FieldKind::Temperature => self.temperature,
            FieldKind::Humidity => self.humidity,
        }
    }
}
