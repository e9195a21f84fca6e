//! Synthetic signal generator.
//!
//! The backend form takes up to three sinusoids as flat numbered fields
//! (`amplitude_1`, `frequency_1`, `phase_1`, ...). [`GeneratorRequest`] keeps them
//! as a list and flattens on serialization.

use super::analysis::{DataPoint, Plots};
use super::decode::null_as_default;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// The backend form accepts at most this many explicit sinusoids.
pub const MAX_SINUSOIDS: usize = 3;

/// `(amplitude, frequency, phase)`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sinusoid(pub f64, pub f64, pub f64);

impl Sinusoid {
    pub fn amplitude(&self) -> f64 {
        self.0
    }

    pub fn frequency(&self) -> f64 {
        self.1
    }

    pub fn phase(&self) -> f64 {
        self.2
    }
}

/// `POST /generator/`
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorRequest {
    pub x_start: f64,
    pub x_end: f64,
    pub num_points: u32,
    pub offset: f64,
    pub num_sinusoids: u32,
    pub add_noise: bool,
    pub noise_level: f64,
    pub use_random_parameters: bool,
    pub sinusoids: Vec<Sinusoid>,
}

impl Default for GeneratorRequest {
    fn default() -> Self {
        Self {
            x_start: 0.0,
            x_end: 50.0,
            num_points: 1000,
            offset: 0.0,
            num_sinusoids: 3,
            add_noise: false,
            noise_level: 0.1,
            use_random_parameters: false,
            sinusoids: vec![
                Sinusoid(1.0, 0.1, 0.0),
                Sinusoid(0.5, 0.2, 0.0),
                Sinusoid(0.3, 0.05, 0.0),
            ],
        }
    }
}

impl Serialize for GeneratorRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("x_start", &self.x_start)?;
        map.serialize_entry("x_end", &self.x_end)?;
        map.serialize_entry("num_points", &self.num_points)?;
        map.serialize_entry("offset", &self.offset)?;
        map.serialize_entry("num_sinusoids", &self.num_sinusoids)?;
        map.serialize_entry("add_noise", &self.add_noise)?;
        // Noise level is only meaningful when noise is enabled
        let noise_level = if self.add_noise { self.noise_level } else { 0.0 };
        map.serialize_entry("noise_level", &noise_level)?;
        map.serialize_entry("use_random_parameters", &self.use_random_parameters)?;
        for (i, s) in self.sinusoids.iter().take(MAX_SINUSOIDS).enumerate() {
            let n = i + 1;
            map.serialize_entry(&format!("amplitude_{n}"), &s.0)?;
            map.serialize_entry(&format!("frequency_{n}"), &s.1)?;
            map.serialize_entry(&format!("phase_{n}"), &s.2)?;
        }
        map.end()
    }
}

/// Parameters actually used by the generator (random ones included).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneratorParameters {
    #[serde(default)]
    pub sinusoids: Vec<Sinusoid>,
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub noise_level: f64,
    #[serde(default)]
    pub x_range: Option<(f64, f64)>,
    #[serde(default)]
    pub num_points: u32,
}

/// Generator output. Lives only as long as the results screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedSignal {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub function_string: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: GeneratorParameters,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plots: Plots,
    #[serde(default, deserialize_with = "null_as_default")]
    pub csv_data: Vec<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GeneratedSignal {
    pub const CSV_FILE_NAME: &'static str = "generated_signal.csv";

    /// `x,y` CSV of the generated samples.
    pub fn to_csv(&self) -> String {
        let mut rows = Vec::with_capacity(self.csv_data.len() + 1);
        rows.push("x,y".to_string());
        rows.extend(self.csv_data.iter().map(|p| format!("{},{}", p.x, p.y)));
        rows.join("\n")
    }
}
