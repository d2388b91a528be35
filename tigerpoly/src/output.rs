//! Écriture des couches de sortie en GeoJSON (streaming avec geozero)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;
use tiger::Properties;

/// Écrit une FeatureCollection GeoJSON feature par feature
///
/// Le fichier cible est tronqué s'il existe déjà. Le footer de la collection
/// est écrit par [`LayerWriter::finish`], ou à défaut à la destruction, pour
/// qu'un run interrompu laisse tout de même un fichier bien formé.
pub struct LayerWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    count: usize,
    finished: bool,
}

impl LayerWriter {
    /// Crée le fichier de sortie et écrit le header de la collection
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        write!(writer, r#"{{"type":"FeatureCollection","features":["#)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            count: 0,
            finished: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Nombre de features écrites jusqu'ici
    pub fn count(&self) -> usize {
        self.count
    }

    /// Écrit une feature: attributs source répliqués tels quels, dans leur
    /// ordre d'origine, plus la géométrie assemblée
    pub fn write_feature(
        &mut self,
        properties: &Properties,
        geometry: &geo::Geometry<f64>,
    ) -> Result<()> {
        if self.count > 0 {
            write!(self.writer, ",")?;
        }

        write!(self.writer, r#"{{"type":"Feature","properties":"#)?;
        serde_json::to_writer(&mut self.writer, properties)?;

        write!(self.writer, r#","geometry":"#)?;
        let mut geom_buf = Vec::new();
        let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
        geometry.process_geom(&mut geom_writer)?;
        self.writer.write_all(&geom_buf)?;

        write!(self.writer, "}}")?;

        self.count += 1;
        Ok(())
    }

    /// Termine la collection et vide les tampons
    pub fn finish(mut self) -> Result<usize> {
        self.write_footer()
            .with_context(|| format!("Failed to finalize {}", self.path.display()))?;
        Ok(self.count)
    }

    fn write_footer(&mut self) -> std::io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        write!(self.writer, "]}}")?;
        self.writer.flush()
    }
}

impl Drop for LayerWriter {
    fn drop(&mut self) {
        // Fermeture garantie même quand le run est abandonné en cours de route
        let _ = self.write_footer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, LineString, Polygon};
    use serde_json::json;

    fn unit_square() -> Geometry<f64> {
        Geometry::Polygon(Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        ))
    }

    #[test]
    fn test_write_feature_collection() {
        let path = std::env::temp_dir().join(format!("tigerpoly_out_{}.geojson", std::process::id()));

        let mut writer = LayerWriter::create(&path).unwrap();
        let mut properties = Properties::new();
        properties.insert("MODULE".to_string(), json!("0500"));
        properties.insert("POLYID".to_string(), json!(1));
        writer.write_feature(&properties, &unit_square()).unwrap();
        let count = writer.finish().unwrap();
        assert_eq!(count, 1);

        // Fichier bien formé de bout en bout
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["type"], json!("FeatureCollection"));
        assert_eq!(parsed["features"].as_array().unwrap().len(), 1);

        let feature = &parsed["features"][0];
        assert_eq!(feature["properties"]["MODULE"], json!("0500"));
        assert_eq!(feature["geometry"]["type"], json!("Polygon"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_drop_closes_collection() {
        let path =
            std::env::temp_dir().join(format!("tigerpoly_drop_{}.geojson", std::process::id()));

        {
            let mut writer = LayerWriter::create(&path).unwrap();
            writer
                .write_feature(&Properties::new(), &unit_square())
                .unwrap();
            // Pas de finish(): le Drop doit refermer la collection
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&content);
        assert!(parsed.is_ok());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let path =
            std::env::temp_dir().join(format!("tigerpoly_trunc_{}.geojson", std::process::id()));
        std::fs::write(&path, "stale content from a previous run").unwrap();

        let writer = LayerWriter::create(&path).unwrap();
        let count = writer.finish().unwrap();
        assert_eq!(count, 0);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, r#"{"type":"FeatureCollection","features":[]}"#);

        std::fs::remove_file(&path).ok();
    }
}
