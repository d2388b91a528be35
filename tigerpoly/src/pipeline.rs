//! Orchestration des quatre étapes d'assemblage
//!
//! Le flot est strictement séquentiel: chaque étape consomme entièrement sa
//! couche d'entrée avant la suivante. Les étapes 1 et 2 remplissent l'index
//! des modules, les étapes 3 et 4 le consultent pour écrire les deux
//! datasets de sortie.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tiger::Dataset;
use tracing::info;

use crate::builder;
use crate::index::ModuleIndex;
use crate::output::LayerWriter;
use crate::report::AssemblyReport;

// Noms de couches du driver TIGER d'OGR
const LAYER_POLYGON: &str = "Polygon";
const LAYER_LANDMARKS: &str = "Landmarks";
const LAYER_COMPLETE_CHAIN: &str = "CompleteChain";
const LAYER_POLY_CHAIN_LINK: &str = "PolyChainLink";
const LAYER_AREA_LANDMARKS: &str = "AreaLandmarks";

/// Exécute l'assemblage complet sur un dataset
///
/// `output_basename` préfixe les deux fichiers de sortie
/// (`<basename>Polygon.geojson` et `<basename>AreaLandmarks.geojson`).
pub fn run(input: &Path, output_basename: &str) -> Result<AssemblyReport> {
    let started_at = Instant::now();
    let mut report = AssemblyReport::new();

    let dataset = Dataset::open(input)?;

    // Les sorties sont créées d'emblée et refermées sur tous les chemins de
    // sortie, y compris en cas d'échec (cf. Drop de LayerWriter)
    let poly_path = PathBuf::from(format!("{output_basename}Polygon.geojson"));
    let area_path = PathBuf::from(format!("{output_basename}AreaLandmarks.geojson"));
    let mut poly_out = LayerWriter::create(&poly_path)?;
    let mut area_out = LayerWriter::create(&area_path)?;

    let mut index = ModuleIndex::new();

    // Étape 1: index des lignes
    let chains = dataset.layer(LAYER_COMPLETE_CHAIN)?;
    report.lines = index
        .index_lines(&chains)
        .context("indexing CompleteChain")?;
    report.modules = index.module_count();
    println!("Got {} lines in {} modules.", report.lines, report.modules);

    // Étape 2: index des liens
    let links = dataset.layer(LAYER_POLY_CHAIN_LINK)?;
    report.links = index
        .index_links(&links)
        .context("indexing PolyChainLink")?;
    println!("Processed {} links.", report.links);

    // Étape 3: polygones
    let polygons = dataset.layer(LAYER_POLYGON)?;
    builder::build_polygons(&polygons, &index, &mut poly_out, &mut report)?;
    if report.degenerate > 0 {
        println!("Discarded {} degenerate polygons.", report.degenerate);
    }
    println!("Built {} polygons.", report.polygons_built);

    // Étape 4: area landmarks
    let memberships = dataset.layer(LAYER_AREA_LANDMARKS)?;
    let landmarks = dataset.layer(LAYER_LANDMARKS)?;
    builder::build_area_landmarks(&memberships, &landmarks, &index, &mut area_out, &mut report)?;
    println!("Built {} area landmarks.", report.landmarks_built);

    let poly_count = poly_out.finish()?;
    let area_count = area_out.finish()?;
    info!(
        polygons = poly_count,
        landmarks = area_count,
        "Output datasets written"
    );

    report.set_duration(started_at.elapsed());
    Ok(report)
}
