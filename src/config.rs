use crate::error::Result;
use crate::highlight::HighlightStyle;
use crate::layout::{FixedAdvance, LineBreakMode};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

const QUALIFIER: &str = "net.roblillack";
const ORGANIZATION: &str = "Linktext";
const APPLICATION: &str = "linktext";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Appearance and layout settings for a link label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub font_size: u8,
    pub text_color: u32,
    pub link_color: u32,
    pub highlight: HighlightStyle,
    /// 0 means unlimited
    pub max_lines: usize,
    pub line_break_mode: LineBreakMode,
    /// Per-glyph advance; derived from the font size when unset
    pub glyph_advance: Option<f64>,
    /// Line height; derived from the font size when unset
    pub line_height: Option<f64>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            font_size: 14,
            text_color: 0x000000FF, // Black
            link_color: 0x0000EEFF, // Standard blue link color
            highlight: HighlightStyle::default(),
            max_lines: 0,
            line_break_mode: LineBreakMode::WordWrap,
            glyph_advance: None,
            line_height: None,
        }
    }
}

impl LabelConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Glyph metrics matching these settings
    pub fn measure(&self) -> FixedAdvance {
        let base = FixedAdvance::for_font_size(self.font_size);
        FixedAdvance::new(
            self.glyph_advance.unwrap_or(base.advance),
            self.line_height.unwrap_or(base.line_height),
        )
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
