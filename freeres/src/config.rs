use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

use freeres_lib::GameResolution;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

const MAIN: &str = "SlashGaming Diablo II Free Resolution";
const METADATA: &str = "!!!Metadata (Do not modify)!!!";
const METADATA_VERSION: &str = "Version";
const INGAME_RESOLUTION_MODE: &str = "Ingame Resolution Mode";
const INGAME_RESOLUTIONS: &str = "Ingame Resolutions";
const IS_ENABLE_SCREEN_BORDER_FRAME: &str = "Enable Screen Border Frame?";
const IS_USE_ORIGINAL_SCREEN_BORDER_FRAME: &str = "Use Original Screen Border Frame?";
const IS_USE_800_INTERFACE_BAR: &str = "Use 800 Interface Bar?";
const MAIN_MENU_RESOLUTION: &str = "Main Menu Resolution";
const CUSTOM_MPQ_PATH: &str = "Custom MPQ Path";
const SCREEN_BACKGROUND: &str = "Screen Background";
const CUSTOM_LEFT_SCREEN_BORDER: &str = "Custom Left Screen Border";
const CUSTOM_RIGHT_SCREEN_BORDER: &str = "Custom Right Screen Border";
const SCREEN_BORDER_HORIZONTAL_RIBBON: &str = "Screen Border Horizontal Ribbon";
const SCREEN_BORDER_VERTICAL_RIBBON: &str = "Screen Border Vertical Ribbon";

/// Resolution modes the game itself knows: 640x480 and 800x600.
pub const NUM_STOCK_RESOLUTIONS: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON config value for \"{key_path}\"")]
    InvalidValue { key_path: String },
    #[error("failed to access the config file: {0}")]
    Io(#[from] io::Error),
    #[error("the config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataVersion {
    #[serde(rename = "Major High")]
    pub major_high: u32,
    #[serde(rename = "Major Low")]
    pub major_low: u32,
    #[serde(rename = "Minor High")]
    pub minor_high: u32,
    #[serde(rename = "Minor Low")]
    pub minor_low: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Metadata {
    #[serde(rename = "Version")]
    pub version: MetadataVersion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: i32,
    pub height: i32,
}

impl From<Resolution> for GameResolution {
    fn from(value: Resolution) -> Self {
        GameResolution::new(value.width, value.height)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftScreenBorder {
    #[serde(rename = "Left")]
    pub left: String,
    #[serde(rename = "Top")]
    pub top: String,
    #[serde(rename = "Top Right")]
    pub top_right: String,
    #[serde(rename = "Bottom")]
    pub bottom: String,
    #[serde(rename = "Bottom Right")]
    pub bottom_right: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightScreenBorder {
    #[serde(rename = "Right")]
    pub right: String,
    #[serde(rename = "Top")]
    pub top: String,
    #[serde(rename = "Top Left")]
    pub top_left: String,
    #[serde(rename = "Bottom")]
    pub bottom: String,
    #[serde(rename = "Bottom Left")]
    pub bottom_left: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Config {
    #[serde(rename = "!!!Metadata (Do not modify)!!!")]
    pub metadata: Metadata,
    #[serde(rename = "Ingame Resolution Mode")]
    pub ingame_resolution_mode: u32,
    #[serde(rename = "Ingame Resolutions")]
    pub ingame_resolutions: Vec<Resolution>,
    #[serde(rename = "Enable Screen Border Frame?")]
    pub is_enable_screen_border_frame: bool,
    #[serde(rename = "Use Original Screen Border Frame?")]
    pub is_use_original_screen_border_frame: bool,
    #[serde(rename = "Use 800 Interface Bar?")]
    pub is_use_800_interface_bar: bool,
    #[serde(rename = "Main Menu Resolution")]
    pub main_menu_resolution: Resolution,
    #[serde(rename = "Custom MPQ Path")]
    pub custom_mpq_path: String,
    #[serde(rename = "Screen Background")]
    pub screen_background_image_path: String,
    #[serde(rename = "Custom Left Screen Border")]
    pub custom_left_screen_border: LeftScreenBorder,
    #[serde(rename = "Custom Right Screen Border")]
    pub custom_right_screen_border: RightScreenBorder,
    #[serde(rename = "Screen Border Horizontal Ribbon")]
    pub screen_border_horizontal_ribbon_image_path: String,
    #[serde(rename = "Screen Border Vertical Ribbon")]
    pub screen_border_vertical_ribbon_image_path: String,
}

#[derive(Serialize)]
struct ConfigFile<'a> {
    #[serde(rename = "SlashGaming Diablo II Free Resolution")]
    main: &'a Config,
}

impl Default for Config {
    fn default() -> Self {
        const PANEL: &str = "data\\SGD2FreeResolution\\ui\\PANEL";
        Self {
            metadata: Metadata {
                version: MetadataVersion {
                    major_high: 3,
                    major_low: 0,
                    minor_high: 2,
                    minor_low: 0,
                },
            },
            ingame_resolution_mode: 0,
            ingame_resolutions: [(1068, 600), (1280, 720), (1600, 900), (1920, 1080)]
                .into_iter()
                .map(|(width, height)| Resolution { width, height })
                .collect(),
            is_enable_screen_border_frame: true,
            is_use_original_screen_border_frame: false,
            is_use_800_interface_bar: true,
            main_menu_resolution: Resolution {
                width: 800,
                height: 600,
            },
            custom_mpq_path: String::new(),
            screen_background_image_path: "data\\SGD2FreeResolution\\ui\\panel\\D2MRStoneBack"
                .to_owned(),
            custom_left_screen_border: LeftScreenBorder {
                left: format!("{PANEL}\\D2MRFancyBorderLeft"),
                top: format!("{PANEL}\\D2MRFancyBorderTop"),
                top_right: format!("{PANEL}\\D2MRFancyBorderCornerTopRight"),
                bottom: format!("{PANEL}\\D2MRFancyBorderBottom"),
                bottom_right: format!("{PANEL}\\D2MRFancyBorderCornerBottomRight"),
            },
            custom_right_screen_border: RightScreenBorder {
                right: format!("{PANEL}\\D2MRFancyBorderRight"),
                top: format!("{PANEL}\\D2MRFancyBorderTop"),
                top_left: format!("{PANEL}\\D2MRFancyBorderCornerTopLeft"),
                bottom: format!("{PANEL}\\D2MRFancyBorderBottom"),
                bottom_left: format!("{PANEL}\\D2MRFancyBorderCornerBottomLeft"),
            },
            screen_border_horizontal_ribbon_image_path: format!(
                "{PANEL}\\D2MRFancyHorizontalBar"
            ),
            screen_border_vertical_ribbon_image_path: format!("{PANEL}\\D2MRFancyVerticalBar"),
        }
    }
}

/// A JSON object together with its dotted key path, for error messages.
struct Section<'a> {
    object: &'a Map<String, Value>,
    path: String,
}

impl<'a> Section<'a> {
    fn root(value: &'a Value) -> Result<Self, ConfigError> {
        let object = value
            .as_object()
            .and_then(|root| root.get(MAIN))
            .and_then(Value::as_object)
            .ok_or_else(|| ConfigError::InvalidValue {
                key_path: MAIN.to_owned(),
            })?;
        Ok(Self {
            object,
            path: MAIN.to_owned(),
        })
    }

    fn key_path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    fn invalid(&self, key: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key_path: self.key_path(key),
        }
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        let Some(value) = self.object.get(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|_| self.invalid(key))
    }

    fn section(&self, key: &str) -> Result<Option<Section<'a>>, ConfigError> {
        let Some(value) = self.object.get(key) else {
            return Ok(None);
        };
        let object = value.as_object().ok_or_else(|| self.invalid(key))?;
        Ok(Some(Section {
            object,
            path: self.key_path(key),
        }))
    }

    fn resolutions(&self, key: &str) -> Result<Option<Vec<Resolution>>, ConfigError> {
        let Some(value) = self.object.get(key) else {
            return Ok(None);
        };
        let elements = value.as_array().ok_or_else(|| self.invalid(key))?;
        elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let invalid = || ConfigError::InvalidValue {
                    key_path: format!("{}[{}]", self.key_path(key), i),
                };
                let resolution: Resolution =
                    serde_json::from_value(element.clone()).map_err(|_| invalid())?;
                if resolution.width <= 0 || resolution.height <= 0 {
                    return Err(invalid());
                }
                Ok(resolution)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl Config {
    /// Reads the config, taking defaults for missing keys. A key that is
    /// present with the wrong shape is an error naming its key path.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let main = Section::root(value)?;
        let mut config = Config::default();

        if let Some(metadata) = main.section(METADATA)? {
            if let Some(version) = metadata.get(METADATA_VERSION)? {
                config.metadata.version = version;
            }
        }
        if let Some(resolutions) = main.resolutions(INGAME_RESOLUTIONS)? {
            config.ingame_resolutions = resolutions;
        }
        if let Some(mode) = main.get(INGAME_RESOLUTION_MODE)? {
            config.ingame_resolution_mode = mode;
        }
        if config.ingame_resolution_mode as usize
            >= NUM_STOCK_RESOLUTIONS + config.ingame_resolutions.len()
        {
            return Err(main.invalid(INGAME_RESOLUTION_MODE));
        }
        if let Some(value) = main.get(IS_ENABLE_SCREEN_BORDER_FRAME)? {
            config.is_enable_screen_border_frame = value;
        }
        if let Some(value) = main.get(IS_USE_ORIGINAL_SCREEN_BORDER_FRAME)? {
            config.is_use_original_screen_border_frame = value;
        }
        if let Some(value) = main.get(IS_USE_800_INTERFACE_BAR)? {
            config.is_use_800_interface_bar = value;
        }
        if let Some(value) = main.get(MAIN_MENU_RESOLUTION)? {
            config.main_menu_resolution = value;
        }
        if let Some(value) = main.get(CUSTOM_MPQ_PATH)? {
            config.custom_mpq_path = value;
        }
        if let Some(value) = main.get(SCREEN_BACKGROUND)? {
            config.screen_background_image_path = value;
        }
        if let Some(value) = main.get(CUSTOM_LEFT_SCREEN_BORDER)? {
            config.custom_left_screen_border = value;
        }
        if let Some(value) = main.get(CUSTOM_RIGHT_SCREEN_BORDER)? {
            config.custom_right_screen_border = value;
        }
        if let Some(value) = main.get(SCREEN_BORDER_HORIZONTAL_RIBBON)? {
            config.screen_border_horizontal_ribbon_image_path = value;
        }
        if let Some(value) = main.get(SCREEN_BORDER_VERTICAL_RIBBON)? {
            config.screen_border_vertical_ribbon_image_path = value;
        }
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&ConfigFile { main: self })?)
    }

    /// Reads `path`, or writes the defaults there when it does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let value: Value = serde_json::from_str(&text)?;
                Self::from_json(&value)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let config = Config::default();
                if let Err(err) = fs::write(path, config.to_json_string()?) {
                    warn!("failed to write {}: {}", path.display(), err);
                } else {
                    info!("created {}", path.display());
                }
                Ok(config)
            }
            Err(err) => Err(err.into()),
        }
    }
}
