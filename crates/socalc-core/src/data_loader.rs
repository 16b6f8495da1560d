//! Data-driven catalog loading.
//!
//! Feature-gated behind `data-loader`. Catalog files reference effects by
//! name and come in three formats, picked by file extension: `.json`,
//! `.ron` and `.toml`. Conversions are `[from, to]` pairs kept in file order.
//!
//! ```toml
//! [[effects]]
//! name = "calming"
//! multiplier = 0.1
//!
//! [[mixins]]
//! name = "banana"
//! cost = 2
//! effect = "gingeritis"
//! conversions = [["calming", "sneaky"]]
//!
//! [[substances]]
//! name = "og_kush"
//! value = 35
//! effects = ["calming"]
//! ```

use crate::catalog::{Catalog, CatalogBuilder, CatalogError, Conversion};
use crate::effect::{EffectSet, Multiplier};
use crate::id::EffectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {}", .file.display())]
    UnsupportedFormat { file: PathBuf },

    #[error("{format} parse error: {detail}")]
    Parse { format: Format, detail: String },

    #[error("{format} serialize error: {detail}")]
    Serialize { format: Format, detail: String },

    /// An effect name could not be resolved.
    #[error("unresolved effect reference '{name}' in {context}")]
    UnresolvedRef { name: String, context: String },

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
    Toml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "JSON",
            Format::Ron => "RON",
            Format::Toml => "TOML",
        })
    }
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ---------------------------------------------------------------------------
// File data structures
// ---------------------------------------------------------------------------

/// Top-level catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub effects: Vec<EffectData>,
    #[serde(default)]
    pub mixins: Vec<MixinData>,
    #[serde(default)]
    pub substances: Vec<SubstanceData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectData {
    pub name: String,
    /// Decimal ratio, rounded to hundredths on load.
    #[serde(default)]
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixinData {
    pub name: String,
    pub cost: u32,
    /// Main effect, by name.
    pub effect: String,
    /// `(from, to)` effect names, applied in this order.
    #[serde(default)]
    pub conversions: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceData {
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    pub value: u32,
    #[serde(default)]
    pub effects: Vec<String>,
}

impl CatalogData {
    /// Resolve effect names and build a validated catalog.
    pub fn resolve(&self) -> Result<Catalog, DataLoadError> {
        let mut b = CatalogBuilder::new();
        for effect in &self.effects {
            b.register_effect(&effect.name, Multiplier::from_f64(effect.multiplier));
        }

        for mixin in &self.mixins {
            let context = format!("mixin '{}'", mixin.name);
            let effect = resolve_effect(&b, &mixin.effect, &context)?;
            let conversions = mixin
                .conversions
                .iter()
                .map(|(from, to)| {
                    Ok(Conversion::new(
                        resolve_effect(&b, from, &context)?,
                        resolve_effect(&b, to, &context)?,
                    ))
                })
                .collect::<Result<Vec<_>, DataLoadError>>()?;
            b.register_mixin(&mixin.name, mixin.cost, effect, conversions);
        }

        for substance in &self.substances {
            let context = format!("substance '{}'", substance.name);
            let effects = substance
                .effects
                .iter()
                .map(|name| resolve_effect(&b, name, &context))
                .collect::<Result<EffectSet, DataLoadError>>()?;
            b.register_substance(&substance.name, substance.cost, substance.value, effects);
        }

        Ok(b.build()?)
    }
}

fn resolve_effect(b: &CatalogBuilder, name: &str, context: &str) -> Result<EffectId, DataLoadError> {
    b.effect_id(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        name: name.to_string(),
        context: context.to_string(),
    })
}

impl From<&Catalog> for CatalogData {
    fn from(catalog: &Catalog) -> Self {
        let effect_name = |id: EffectId| {
            catalog
                .effect(id)
                .map_or_else(|| format!("#{}", id.0), |def| def.name.clone())
        };

        CatalogData {
            effects: catalog
                .effects()
                .map(|(_, def)| EffectData {
                    name: def.name.clone(),
                    multiplier: def.multiplier.to_f64(),
                })
                .collect(),
            mixins: catalog
                .mixins()
                .map(|(_, def)| MixinData {
                    name: def.name.clone(),
                    cost: def.cost,
                    effect: effect_name(def.effect),
                    conversions: def
                        .conversions
                        .iter()
                        .map(|c| (effect_name(c.from), effect_name(c.to)))
                        .collect(),
                })
                .collect(),
            substances: catalog
                .substances()
                .map(|(_, def)| SubstanceData {
                    name: def.name.clone(),
                    cost: def.cost,
                    value: def.value,
                    effects: def.effects.iter().map(effect_name).collect(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing and writing
// ---------------------------------------------------------------------------

pub fn parse_catalog(content: &str, format: Format) -> Result<Catalog, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse { format, detail };
    let data: CatalogData = match format {
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string()))?,
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string()))?,
    };
    data.resolve()
}

pub fn catalog_to_string(catalog: &Catalog, format: Format) -> Result<String, DataLoadError> {
    let data = CatalogData::from(catalog);
    let ser_err = |detail: String| DataLoadError::Serialize { format, detail };
    match format {
        Format::Json => serde_json::to_string_pretty(&data).map_err(|e| ser_err(e.to_string())),
        Format::Ron => ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::new())
            .map_err(|e| ser_err(e.to_string())),
        Format::Toml => toml::to_string_pretty(&data).map_err(|e| ser_err(e.to_string())),
    }
}

/// Read a catalog file, detecting the format from its extension.
pub fn load_catalog(path: &Path) -> Result<Catalog, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&content, format)?;
    log::debug!(
        "loaded catalog from {}: {} effects, {} mixins, {} substances",
        path.display(),
        catalog.effect_count(),
        catalog.mixin_count(),
        catalog.substance_count()
    );
    Ok(catalog)
}

/// Write `catalog` to `path` in the format its extension names.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<(), DataLoadError> {
    let format = detect_format(path)?;
    let content = catalog_to_string(catalog, format)?;
    std::fs::write(path, content)?;
    Ok(())
}
