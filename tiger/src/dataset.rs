//! Accès aux datasets TIGER convertis en couches GeoJSON
//!
//! Un dataset est un répertoire contenant une FeatureCollection par relation
//! TIGER (`CompleteChain.geojson`, `PolyChainLink.geojson`, ...), tel que
//! produit par `ogr2ogr` depuis les fichiers TIGER/Line bruts. Les noms de
//! couches et de champs sont ceux du driver TIGER d'OGR.

use std::path::PathBuf;

use geo::LineString;
use geojson::GeoJson;
use serde_json::Value;
use tracing::debug;

use crate::TigerError;

/// Objet JSON des propriétés d'une feature (ordre des champs préservé)
pub type Properties = serde_json::Map<String, Value>;

/// Un dataset TIGER ouvert en lecture seule
#[derive(Debug)]
pub struct Dataset {
    dir: PathBuf,
}

/// Une couche (relation) du dataset, chargée en mémoire
#[derive(Debug)]
pub struct Layer {
    /// Nom de la couche (ex: "CompleteChain")
    pub name: String,

    /// Features dans l'ordre du fichier
    pub features: Vec<Feature>,
}

/// Un enregistrement d'une couche
#[derive(Debug, Clone)]
pub struct Feature {
    /// Géométrie GeoJSON brute, si présente
    pub geometry: Option<geojson::Geometry>,

    /// Attributs de l'enregistrement, dans l'ordre du fichier source
    pub properties: Properties,
}

impl Dataset {
    /// Ouvre un dataset (répertoire de couches GeoJSON)
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, TigerError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("dataset directory not found: {}", dir.display()),
            )
            .into());
        }
        Ok(Self { dir })
    }

    /// Charge une couche par son nom OGR (fichier `<nom>.geojson`)
    ///
    /// # Errors
    ///
    /// `MissingLayer` si le fichier est absent, `InvalidLayer` si son contenu
    /// n'est pas une FeatureCollection GeoJSON.
    pub fn layer(&self, name: &str) -> Result<Layer, TigerError> {
        let path = self.dir.join(format!("{name}.geojson"));
        if !path.is_file() {
            return Err(TigerError::MissingLayer {
                name: name.to_string(),
                dataset: self.dir.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let geojson: GeoJson = content
            .parse()
            .map_err(|e: geojson::Error| TigerError::invalid_layer(name, e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(TigerError::invalid_layer(
                name,
                "expected a FeatureCollection",
            ));
        };

        let features: Vec<Feature> = collection
            .features
            .into_iter()
            .map(|f| Feature {
                geometry: f.geometry,
                properties: f.properties.unwrap_or_default(),
            })
            .collect();

        debug!(layer = name, features = features.len(), "Layer loaded");

        Ok(Layer {
            name: name.to_string(),
            features,
        })
    }
}

impl Feature {
    /// Lit un champ entier obligatoire
    ///
    /// Tolère l'encodage en chaîne numérique: selon le schéma source,
    /// `ogr2ogr` émet les identifiants TIGER tantôt en nombre, tantôt en
    /// chaîne.
    pub fn require_i64(&self, field: &str) -> Result<i64, TigerError> {
        match self.properties.get(field) {
            None | Some(Value::Null) => Err(TigerError::MissingField(field.to_string())),
            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| TigerError::FieldType {
                field: field.to_string(),
                expected: "integer",
            }),
            Some(Value::String(s)) => {
                s.trim().parse::<i64>().map_err(|_| TigerError::FieldType {
                    field: field.to_string(),
                    expected: "integer",
                })
            }
            Some(_) => Err(TigerError::FieldType {
                field: field.to_string(),
                expected: "integer",
            }),
        }
    }

    /// Lit un champ texte obligatoire
    pub fn require_string(&self, field: &str) -> Result<String, TigerError> {
        match self.properties.get(field) {
            None | Some(Value::Null) => Err(TigerError::MissingField(field.to_string())),
            Some(Value::String(s)) => Ok(s.trim().to_string()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(_) => Err(TigerError::FieldType {
                field: field.to_string(),
                expected: "string",
            }),
        }
    }

    /// Extrait la géométrie comme LineString
    pub fn line_string(&self) -> Result<LineString<f64>, TigerError> {
        let geometry = self
            .geometry
            .as_ref()
            .ok_or_else(|| TigerError::InvalidGeometry("record has no geometry".to_string()))?;

        LineString::try_from(geometry.value.clone()).map_err(|_| {
            TigerError::InvalidGeometry("expected a LineString geometry".to_string())
        })
    }
}
