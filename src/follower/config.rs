use serde::Deserialize;
use std::fmt;

// Body defaults
pub const DEFAULT_BACKGROUND_IMAGE: &str = "ghost_body.png";
pub const DEFAULT_WIDTH: f32 = 50.0;
pub const DEFAULT_HEIGHT: f32 = 50.0;
pub const DEFAULT_OFFSET_X: f32 = 25.0;
pub const DEFAULT_OFFSET_Y: f32 = 25.0;
pub const DEFAULT_OPACITY: f32 = 0.8;
pub const DEFAULT_SPRING: f32 = 8.0;
pub const DEFAULT_INERTIA: f32 = 30.0;
pub const DEFAULT_WOBBLE: f32 = 50.0;
pub const DEFAULT_Z_INDEX: i32 = 1000;

// Eyes defaults
pub const DEFAULT_EYES_IMAGE: &str = "ghost_eyes.png";
pub const DEFAULT_EYES_WIDTH: f32 = 12.0;
pub const DEFAULT_EYES_HEIGHT: f32 = 16.0;
pub const DEFAULT_EYES_OFFSET_X: f32 = 19.0;
pub const DEFAULT_EYES_OFFSET_Y: f32 = 16.0;
pub const DEFAULT_EYES_RADIUS: f32 = 5.0;
pub const DEFAULT_EYES_OPACITY: f32 = 1.0;

/// How a follower moves toward the pointer each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowStrategy {
    /// Two-stage smoothing toward a drifting target
    #[default]
    Basic,
    /// Momentum toward a target jittered around the pointer
    Wobble,
    /// Body stays put, only the eyes look at the pointer
    Eyes,
}

impl FollowStrategy {
    /// Look up a strategy by name, `None` if the name is unknown
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "basic" => Some(FollowStrategy::Basic),
            "wobble" => Some(FollowStrategy::Wobble),
            "eyes" => Some(FollowStrategy::Eyes),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FollowStrategy::Basic => "basic",
            FollowStrategy::Wobble => "wobble",
            FollowStrategy::Eyes => "eyes",
        }
    }

    /// Unknown names degrade to `Basic` instead of failing
    fn resolve(name: Option<&str>) -> Self {
        match name {
            None => FollowStrategy::default(),
            Some(name) => FollowStrategy::from_name(name).unwrap_or_else(|| {
                log::warn!("Unknown follow strategy {:?}, falling back to basic", name);
                FollowStrategy::Basic
            }),
        }
    }
}

impl fmt::Display for FollowStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error types for follower configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite { field: &'static str, value: f32 },
    ZeroDivisor(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonFinite { field, value } => {
                write!(f, "Field `{}` must be finite, got {}", field, value)
            }
            ConfigError::ZeroDivisor(field) => {
                write!(f, "Field `{}` must be non-zero", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Caller-supplied follower options; every field may be omitted
///
/// Field names follow the JSON shape used by the preset file
/// (`followStrategy`, `offsetX`, `backgroundImage`, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FollowerOptions {
    pub background_image: Option<String>,
    pub follow_strategy: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub opacity: Option<f32>,
    pub spring: Option<f32>,
    pub inertia: Option<f32>,
    pub wobble: Option<f32>,
    pub xflip: Option<bool>,
    pub yflip: Option<bool>,
    #[serde(rename = "zindex")]
    pub z_index: Option<i32>,
    pub eyes: Option<EyesSetting>,
}

/// The nested eyes option: explicitly switched off, or partially specified
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEyesSetting")]
pub enum EyesSetting {
    Disabled,
    Enabled(EyesOptions),
}

/// Wire shape: `false`, `true`, or an object
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEyesSetting {
    Flag(bool),
    Options(EyesOptions),
}

impl From<RawEyesSetting> for EyesSetting {
    fn from(raw: RawEyesSetting) -> Self {
        match raw {
            RawEyesSetting::Flag(false) => EyesSetting::Disabled,
            RawEyesSetting::Flag(true) => EyesSetting::Enabled(EyesOptions::default()),
            RawEyesSetting::Options(options) => EyesSetting::Enabled(options),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EyesOptions {
    pub background_image: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub offset_x: Option<f32>,
    pub offset_y: Option<f32>,
    pub radius: Option<f32>,
    pub opacity: Option<f32>,
}

/// Fully resolved follower configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FollowerConfig {
    pub follow_strategy: FollowStrategy,
    pub background_image: String,
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub opacity: f32,
    pub spring: f32,
    pub inertia: f32,
    pub wobble: f32,
    pub xflip: bool,
    pub yflip: bool,
    pub z_index: i32,
    /// `None` when eyes are disabled
    pub eyes: Option<EyesConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EyesConfig {
    pub background_image: String,
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub radius: f32,
    pub opacity: f32,
}

impl Default for FollowerConfig {
    fn default() -> Self {
        FollowerOptions::default().resolve()
    }
}

impl Default for EyesConfig {
    fn default() -> Self {
        EyesOptions::default().resolve()
    }
}

impl FollowerOptions {
    /// Merge with the defaults, field by field
    pub fn resolve(&self) -> FollowerConfig {
        let eyes = match &self.eyes {
            Some(EyesSetting::Disabled) => None,
            Some(EyesSetting::Enabled(options)) => Some(options.resolve()),
            None => Some(EyesOptions::default().resolve()),
        };

        FollowerConfig {
            follow_strategy: FollowStrategy::resolve(self.follow_strategy.as_deref()),
            background_image: self
                .background_image
                .clone()
                .unwrap_or_else(|| DEFAULT_BACKGROUND_IMAGE.to_string()),
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            height: self.height.unwrap_or(DEFAULT_HEIGHT),
            offset_x: self.offset_x.unwrap_or(DEFAULT_OFFSET_X),
            offset_y: self.offset_y.unwrap_or(DEFAULT_OFFSET_Y),
            opacity: self.opacity.unwrap_or(DEFAULT_OPACITY),
            spring: self.spring.unwrap_or(DEFAULT_SPRING),
            inertia: self.inertia.unwrap_or(DEFAULT_INERTIA),
            wobble: self.wobble.unwrap_or(DEFAULT_WOBBLE),
            xflip: self.xflip.unwrap_or(false),
            yflip: self.yflip.unwrap_or(false),
            z_index: self.z_index.unwrap_or(DEFAULT_Z_INDEX),
            eyes,
        }
    }
}

impl EyesOptions {
    pub fn resolve(&self) -> EyesConfig {
        EyesConfig {
            background_image: self
                .background_image
                .clone()
                .unwrap_or_else(|| DEFAULT_EYES_IMAGE.to_string()),
            width: self.width.unwrap_or(DEFAULT_EYES_WIDTH),
            height: self.height.unwrap_or(DEFAULT_EYES_HEIGHT),
            offset_x: self.offset_x.unwrap_or(DEFAULT_EYES_OFFSET_X),
            offset_y: self.offset_y.unwrap_or(DEFAULT_EYES_OFFSET_Y),
            radius: self.radius.unwrap_or(DEFAULT_EYES_RADIUS),
            opacity: self.opacity.unwrap_or(DEFAULT_EYES_OPACITY),
        }
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

impl FollowerConfig {
    /// Reject values that would turn positions into NaN or infinity
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("width", self.width)?;
        check_finite("height", self.height)?;
        check_finite("offsetX", self.offset_x)?;
        check_finite("offsetY", self.offset_y)?;
        check_finite("opacity", self.opacity)?;
        check_finite("spring", self.spring)?;
        check_finite("inertia", self.inertia)?;
        check_finite("wobble", self.wobble)?;

        if self.spring == 0.0 {
            return Err(ConfigError::ZeroDivisor("spring"));
        }
        if self.inertia == 0.0 {
            return Err(ConfigError::ZeroDivisor("inertia"));
        }

        if let Some(eyes) = &self.eyes {
            check_finite("eyes.width", eyes.width)?;
            check_finite("eyes.height", eyes.height)?;
            check_finite("eyes.offsetX", eyes.offset_x)?;
            check_finite("eyes.offsetY", eyes.offset_y)?;
            check_finite("eyes.radius", eyes.radius)?;
            check_finite("eyes.opacity", eyes.opacity)?;
        }

        Ok(())
    }
}
