//! Region boundaries and the map overlay built from them.
//!
//! The dataset is a GeoJSON `FeatureCollection` (or a single `Feature`) whose
//! features carry `townName` and `population` properties. It is loaded once and
//! never modified; overlays are rebuilt from it on every render.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ResaleError, Result};
use crate::markup::escape_html;

/// Property holding the region's display name.
pub const NAME_PROPERTY: &str = "townName";

/// Property holding the region's population.
pub const POPULATION_PROPERTY: &str = "population";

/// Map centre (latitude, longitude) for Singapore.
pub const SINGAPORE_CENTER: [f64; 2] = [1.3521, 103.8198];

/// Initial zoom level of the map.
pub const DEFAULT_ZOOM: u8 = 12;

/// Maximum popup width in pixels.
pub const POPUP_MAX_WIDTH: u32 = 300;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
    FeatureCollection { features: Vec<RegionFeature> },
    Feature(RegionFeature),
}

/// A raw GeoJSON feature as read from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionFeature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Value,
}

impl RegionFeature {
    /// Extract the region record, failing fast on absent attributes.
    pub fn to_record(&self, index: usize) -> Result<RegionRecord> {
        let name = self.property_text(NAME_PROPERTY, index)?;
        let population = self.property_text(POPULATION_PROPERTY, index)?;
        if self.geometry.is_null() {
            return Err(ResaleError::MissingField {
                field: "geometry",
                index,
            });
        }

        Ok(RegionRecord {
            name,
            population,
            geometry: self.geometry.clone(),
        })
    }

    fn property_text(&self, field: &'static str, index: usize) -> Result<String> {
        let value = self
            .properties
            .as_ref()
            .and_then(|props| props.get(field))
            .ok_or(ResaleError::MissingField { field, index })?;

        match value {
            Value::Null => Err(ResaleError::MissingField { field, index }),
            Value::String(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

/// Boundary dataset loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct RegionDataset {
    /// File the dataset was read from, if any.
    pub source: Option<PathBuf>,
    /// Features in file order.
    pub features: Vec<RegionFeature>,
}

impl RegionDataset {
    /// Load a GeoJSON file.
    ///
    /// A missing or unparsable file is a `ResourceLoad` error. Features with
    /// absent attributes are accepted here and only fail when rendered.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| ResaleError::resource_load(path, e.to_string()))?;
        let mut dataset = Self::from_geojson(&contents)
            .map_err(|e| ResaleError::resource_load(path, e.to_string()))?;
        dataset.source = Some(path.to_path_buf());
        Ok(dataset)
    }

    /// Parse GeoJSON text.
    pub fn from_geojson(text: &str) -> Result<Self> {
        let features = match serde_json::from_str::<GeoJson>(text)? {
            GeoJson::FeatureCollection { features } => features,
            GeoJson::Feature(feature) => vec![feature],
        };
        Ok(Self {
            source: None,
            features,
        })
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the dataset has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Region records in file order; the first incomplete feature fails the call.
    pub fn records(&self) -> Result<Vec<RegionRecord>> {
        self.features
            .iter()
            .enumerate()
            .map(|(index, feature)| feature.to_record(index))
            .collect()
    }
}

/// A region with the attributes shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub population: String,
    pub geometry: Value,
}

impl RegionRecord {
    /// Popup text revealed on click.
    pub fn popup_content(&self) -> String {
        format!(
            "Name: {}<br>Population: {}",
            escape_html(&self.name),
            escape_html(&self.population)
        )
    }

    /// Overlay for this region.
    pub fn to_overlay(&self) -> RegionOverlay {
        RegionOverlay {
            tooltip: escape_html(&self.name),
            popup: self.popup_content(),
            popup_max_width: POPUP_MAX_WIDTH,
            geometry: self.geometry.clone(),
        }
    }
}

/// One clickable shape on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOverlay {
    /// Hover label (HTML-escaped name).
    pub tooltip: String,
    /// Click popup markup.
    pub popup: String,
    pub popup_max_width: u32,
    /// GeoJSON geometry of the shape.
    pub geometry: Value,
}

/// Tile layer drawn under the overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url: &'static str,
    pub attribution: &'static str,
}

/// Everything the client needs to draw the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: TileLayer,
    pub overlays: Vec<RegionOverlay>,
}

impl MapView {
    /// Basemap centred on Singapore with the given overlays.
    pub fn new(overlays: Vec<RegionOverlay>) -> Self {
        Self {
            center: SINGAPORE_CENTER,
            zoom: DEFAULT_ZOOM,
            tiles: TileLayer {
                url: TILE_URL,
                attribution: TILE_ATTRIBUTION,
            },
            overlays,
        }
    }
}

/// One overlay per record, in record order.
pub fn render_overlays(records: &[RegionRecord]) -> Vec<RegionOverlay> {
    records.iter().map(RegionRecord::to_overlay).collect()
}

/// Build the map view for a dataset.
///
/// Fails with `MissingField` if any feature lacks a name, population or geometry.
pub fn render_map(dataset: &RegionDataset) -> Result<MapView> {
    let records = dataset.records()?;
    Ok(MapView::new(render_overlays(&records)))
}
