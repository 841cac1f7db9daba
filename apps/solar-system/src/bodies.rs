/// Body table and scene settings, loaded from JSON and validated up front.
///
/// The default table is embedded at build time from
/// `data/solar-system.json`. Colors are packed `0xRRGGBB` integers.

use orrery_engine::Rgb;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../data/solar-system.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid solar system JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("planet table is empty")]
    Empty,

    #[error("duplicate body name {0:?}")]
    DuplicateName(String),

    #[error("{body}: {field} must be positive, got {value}")]
    NonPositive {
        body: String,
        field: &'static str,
        value: f64,
    },

    #[error("moon {moon:?} orbits unknown planet {parent:?}")]
    MissingParent { moon: String, parent: String },
}

/// One body orbiting its parent on a circle. Immutable after loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CelestialBody {
    pub name: String,
    /// Scene units from the parent's origin.
    #[serde(rename = "distance")]
    pub orbital_distance: f32,
    /// Radians per clock unit.
    #[serde(rename = "speed")]
    pub angular_speed: f32,
    #[serde(rename = "size")]
    pub visual_radius: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoonConfig {
    pub parent: String,
    #[serde(flatten)]
    pub body: CelestialBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub name: String,
    pub size: f32,
    pub color: Rgb,
    /// Text of the floating screen label. Empty disables the label.
    pub label: String,
    pub label_class: String,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            name: "Sun".into(),
            size: 2.0,
            color: Rgb::from_hex(0xffff00),
            label: "Sun".into(),
            label_class: "label".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Stars fill the cube `[-extent, extent]³`.
    pub extent: f32,
    pub color: Rgb,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self { count: 10_000, extent: 1000.0, color: Rgb::WHITE }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: Rgb,
    pub ambient_intensity: f32,
    pub sun_light_color: Rgb,
    pub sun_light_intensity: f32,
    pub sun_light_range: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Rgb::WHITE,
            ambient_intensity: 0.6,
            sun_light_color: Rgb::WHITE,
            sun_light_intensity: 1.0,
            sun_light_range: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraPlacement {
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraPlacement {
    fn default() -> Self {
        Self { position: [0.0, 5.0, 50.0], target: [0.0; 3] }
    }
}

/// Everything the scene builder needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub sun: SunConfig,
    pub planets: Vec<CelestialBody>,
    #[serde(default)]
    pub moons: Vec<MoonConfig>,
    #[serde(default = "default_time_step")]
    pub time_step: f64,
    #[serde(default = "default_orbit_segments")]
    pub orbit_segments: u32,
    #[serde(default = "default_orbit_color")]
    pub orbit_color: Rgb,
    #[serde(default)]
    pub starfield: StarfieldConfig,
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub camera: CameraPlacement,
}

fn default_time_step() -> f64 {
    0.05
}

fn default_orbit_segments() -> u32 {
    100
}

fn default_orbit_color() -> Rgb {
    Rgb::WHITE
}

impl SystemConfig {
    /// The embedded default table.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planets.is_empty() {
            return Err(ConfigError::Empty);
        }

        positive(&self.sun.name, "size", self.sun.size as f64)?;
        positive("config", "time_step", self.time_step)?;
        positive("config", "orbit_segments", self.orbit_segments as f64)?;

        let mut names = HashSet::new();
        names.insert(self.sun.name.as_str());
        let bodies = self.planets.iter().chain(self.moons.iter().map(|m| &m.body));
        for body in bodies {
            if !names.insert(body.name.as_str()) {
                return Err(ConfigError::DuplicateName(body.name.clone()));
            }
            positive(&body.name, "distance", body.orbital_distance as f64)?;
            positive(&body.name, "speed", body.angular_speed as f64)?;
            positive(&body.name, "size", body.visual_radius as f64)?;
        }

        for moon in &self.moons {
            if !self.planets.iter().any(|p| p.name == moon.parent) {
                return Err(ConfigError::MissingParent {
                    moon: moon.body.name.clone(),
                    parent: moon.parent.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn planet(&self, name: &str) -> Option<&CelestialBody> {
        self.planets.iter().find(|p| p.name == name)
    }
}

fn positive(body: &str, field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { body: body.to_string(), field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "planets": [{ "name": "Earth", "distance": 10, "size": 1, "color": 255, "speed": 0.07 }],
        "moons": [{ "name": "Moon", "parent": "Earth", "distance": 1.5, "size": 0.2, "color": 11184810, "speed": 0.5 }]
    }"#;

    #[test]
    fn embedded_table_matches_reference() {
        let config = SystemConfig::load().unwrap();
        let names: Vec<_> = config.planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );

        let mercury = &config.planets[0];
        assert_eq!(mercury.orbital_distance, 5.0);
        assert_eq!(mercury.angular_speed, 0.2);
        assert_eq!(mercury.visual_radius, 0.5);
        assert_eq!(mercury.color, Rgb::from_hex(0xaaaaaa));
        assert_eq!(config.planet("Saturn").unwrap().color, Rgb::from_hex(0xffd700));
        assert_eq!(config.planet("Neptune").unwrap().color, Rgb::from_hex(0x0000ff));

        assert_eq!(config.sun.color, Rgb::from_hex(0xffff00));
        assert_eq!(config.sun.size, 2.0);
        assert_eq!(config.moons.len(), 1);
        assert_eq!(config.moons[0].parent, "Earth");
        assert_eq!(config.moons[0].body.orbital_distance, 1.5);
        assert_eq!(config.moons[0].body.angular_speed, 0.5);
        assert_eq!(config.time_step, 0.05);
        assert_eq!(config.orbit_segments, 100);
        assert_eq!(config.starfield, StarfieldConfig::default());
        assert_eq!(config.lighting, LightingConfig::default());
        assert_eq!(config.camera, CameraPlacement::default());
    }

    #[test]
    fn optional_sections_default() {
        let config = SystemConfig::from_json(MINIMAL).unwrap();
        assert_eq!(config.sun, SunConfig::default());
        assert_eq!(config.time_step, 0.05);
        assert_eq!(config.starfield.count, 10_000);
        assert_eq!(config.orbit_color, Rgb::WHITE);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(SystemConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(SystemConfig::from_json(r#"{"moons": []}"#), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = SystemConfig::from_json(r#"{"planets": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Empty));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let json = MINIMAL.replace("\"Moon\"", "\"Earth\"");
        let err = SystemConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName(name) if name == "Earth"));
    }

    #[test]
    fn non_positive_values_are_rejected() {
        let json = MINIMAL.replace("\"speed\": 0.07", "\"speed\": 0");
        match SystemConfig::from_json(&json).unwrap_err() {
            ConfigError::NonPositive { body, field, value } => {
                assert_eq!((body.as_str(), field, value), ("Earth", "speed", 0.0));
            }
            other => panic!("unexpected error: {other}"),
        }

        let json = MINIMAL.replace("\"distance\": 1.5", "\"distance\": -1.5");
        assert!(matches!(
            SystemConfig::from_json(&json),
            Err(ConfigError::NonPositive { field: "distance", .. })
        ));
    }

    #[test]
    fn moon_requires_its_parent() {
        let json = MINIMAL.replace("\"parent\": \"Earth\"", "\"parent\": \"Mars\"");
        match SystemConfig::from_json(&json).unwrap_err() {
            ConfigError::MissingParent { moon, parent } => {
                assert_eq!((moon.as_str(), parent.as_str()), ("Moon", "Mars"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_messages_are_readable() {
        let err = ConfigError::NonPositive { body: "Mars".into(), field: "size", value: -1.0 };
        assert_eq!(err.to_string(), "Mars: size must be positive, got -1");
    }
}
