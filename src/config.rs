use crate::theme::{Palette, Rgb};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Kazanım Grafiği";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub title: String,
    /// HTML template path; the embedded page is used when unset.
    pub template: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            template: None,
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub palette: Palette,
    pub render: RenderConfig,
}

/// Partial palette. Per-type entries extend the built-in tables rather than
/// replace them; every other field replaces the default when set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteOverlay {
    pub colors: Option<BTreeMap<String, Rgb>>,
    pub radii: Option<BTreeMap<String, u32>>,
    pub fallback_color: Option<Rgb>,
    pub default_radius: Option<u32>,
    pub score_stops: Option<Vec<Rgb>>,
}

impl PaletteOverlay {
    pub fn apply(self, palette: &mut Palette) -> anyhow::Result<()> {
        if let Some(colors) = self.colors {
            palette.colors.extend(colors);
        }
        if let Some(radii) = self.radii {
            palette.radii.extend(radii);
        }
        if let Some(v) = self.fallback_color {
            palette.fallback_color = v;
        }
        if let Some(v) = self.default_radius {
            palette.default_radius = v;
        }
        if let Some(stops) = self.score_stops {
            anyhow::ensure!(!stops.is_empty(), "scoreStops needs at least one color");
            palette.score_stops = stops;
        }
        Ok(())
    }

    pub fn into_palette(self) -> anyhow::Result<Palette> {
        let mut palette = Palette::default();
        self.apply(&mut palette)?;
        Ok(palette)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    colors: Option<BTreeMap<String, Rgb>>,
    radii: Option<BTreeMap<String, u32>>,
    fallback_color: Option<Rgb>,
    default_radius: Option<u32>,
    score_stops: Option<Vec<Rgb>>,
    title: Option<String>,
    template: Option<PathBuf>,
    pretty: Option<bool>,
}

/// Reads a JSON5 config file on top of the defaults. A relative template
/// path is resolved against the config file's directory.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config = parse_config(&contents)
        .with_context(|| format!("invalid config {}", path.display()))?;

    if let Some(template) = config.render.template.take() {
        let resolved = match path.parent() {
            Some(dir) if template.is_relative() => dir.join(template),
            _ => template,
        };
        config.render.template = Some(resolved);
    }
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    PaletteOverlay {
        colors: parsed.colors,
        radii: parsed.radii,
        fallback_color: parsed.fallback_color,
        default_radius: parsed.default_radius,
        score_stops: parsed.score_stops,
    }
    .apply(&mut config.palette)?;
    if let Some(v) = parsed.title {
        config.render.title = v;
    }
    if let Some(v) = parsed.template {
        config.render.template = Some(v);
    }
    if let Some(v) = parsed.pretty {
        config.render.pretty = v;
    }
    Ok(config)
}
