//! Étapes 3 et 4: construction des polygones puis des area landmarks

use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, bail, Context, Result};
use geo::{Geometry, LineString};
use tiger::{assembly, AssemblyMode, Layer};
use tracing::{debug, warn};

use crate::index::{Module, ModuleIndex, PolyKey};
use crate::output::LayerWriter;
use crate::report::AssemblyReport;

/// Étape 3: assemble un polygone par enregistrement de la couche Polygon
///
/// Chaque enregistrement doit avoir une entrée dans l'index des liens de son
/// module (l'absence est fatale). Le résultat est écrit avec tous les
/// attributs source répliqués; les rings trop courts pour enfermer une
/// surface (moins de 4 points) sont écartés avant l'assemblage du polygone,
/// et l'enregistrement est compté dégénéré s'il n'en reste aucun.
pub fn build_polygons(
    layer: &Layer,
    index: &ModuleIndex,
    out: &mut LayerWriter,
    report: &mut AssemblyReport,
) -> Result<()> {
    for feature in &layer.features {
        let module_id = feature.require_string("MODULE")?;
        let cenid = feature.require_string("CENID")?;
        let polyid = feature.require_i64("POLYID")?;

        let Some(module) = index.module(&module_id) else {
            bail!("Polygon record references unknown module {module_id}");
        };

        let edges = boundary_edges(module, &(cenid.clone(), polyid))
            .with_context(|| format!("polygon {cenid}/{polyid} in module {module_id}"))?;

        let mut rings = assembly::reconstruct_rings(&edges, AssemblyMode::Strict)
            .with_context(|| format!("polygon {cenid}/{polyid} in module {module_id}"))?;

        // Artefact attendu des tuiles de bordure: des bouts de chaîne qui ne
        // referment aucune surface. Écartés avant le choix du ring extérieur
        // pour qu'un fragment isolé ne supplante jamais un vrai ring.
        rings.retain(|ring| ring.0.len() >= 4);
        if rings.is_empty() {
            report.degenerate += 1;
            continue;
        }

        let polygon = assembly::polygon_from_rings(rings, AssemblyMode::Strict)?;
        out.write_feature(&feature.properties, &Geometry::Polygon(polygon))?;
        report.polygons_built += 1;
    }

    Ok(())
}

/// Étape 4: assemble le contour extérieur de chaque area landmark
///
/// Phase 1: regroupe les enregistrements de membership par identifiant de
/// landmark. Phase 2: pour chaque landmark, compte combien de polygones
/// membres chaque chaîne borde; seules les chaînes vues exactement une fois
/// forment le contour extérieur de l'union, celles vues deux fois sont des
/// frontières internes entre membres et sont exclues.
pub fn build_area_landmarks(
    area_layer: &Layer,
    landmark_layer: &Layer,
    index: &ModuleIndex,
    out: &mut LayerWriter,
    report: &mut AssemblyReport,
) -> Result<()> {
    // Phase 1: LAND -> polygones membres
    let mut area: HashMap<i64, Vec<PolyKey>> = HashMap::new();
    for feature in &area_layer.features {
        let land = feature.require_i64("LAND")?;
        let cenid = feature.require_string("CENID")?;
        let polyid = feature.require_i64("POLYID")?;
        area.entry(land).or_default().push((cenid, polyid));
    }

    // Phase 2: un polygone par landmark référencé
    for feature in &landmark_layer.features {
        let land = feature.require_i64("LAND")?;
        let module_id = feature.require_string("MODULE")?;

        let Some(members) = area.get(&land) else {
            // Landmark ponctuel ou hors tuile: aucun enregistrement de
            // membership, rien à construire
            debug!(land, "No area membership for landmark");
            report.landmarks_skipped += 1;
            continue;
        };

        let Some(module) = index.module(&module_id) else {
            bail!("Landmark record references unknown module {module_id}");
        };

        // Occurrences de chaque chaîne sur l'ensemble des membres.
        // BTreeMap pour un ordre d'assemblage stable d'un run à l'autre.
        let mut seen: BTreeMap<i64, usize> = BTreeMap::new();
        for key in members {
            let Some(tlids) = module.links.get(key) else {
                bail!(
                    "no chain links indexed for polygon {}/{} of landmark {land}",
                    key.0,
                    key.1
                );
            };
            for tlid in tlids {
                *seen.entry(*tlid).or_insert(0) += 1;
            }
        }

        let edges: Vec<LineString<f64>> = seen
            .iter()
            .filter(|&(_, &count)| count == 1)
            .map(|(tlid, _)| {
                module
                    .lines
                    .get(tlid)
                    .cloned()
                    .ok_or_else(|| anyhow!("chain {tlid} not indexed in module {module_id}"))
            })
            .collect::<Result<_>>()?;

        match assembly::build_polygon(&edges, AssemblyMode::Permissive) {
            Ok(polygon) => {
                out.write_feature(&feature.properties, &Geometry::Polygon(polygon))?;
                report.landmarks_built += 1;
            }
            Err(e) => {
                warn!(land, module = %module_id, error = %e, "Ring assembly failed for area landmark");
                report.landmarks_skipped += 1;
            }
        }
    }

    Ok(())
}

/// Résout la liste des chaînes bordant un polygone en géométries
fn boundary_edges(module: &Module, key: &PolyKey) -> Result<Vec<LineString<f64>>> {
    let Some(tlids) = module.links.get(key) else {
        bail!("no chain links indexed for this polygon");
    };

    tlids
        .iter()
        .map(|tlid| {
            module
                .lines
                .get(tlid)
                .cloned()
                .ok_or_else(|| anyhow!("chain {tlid} not indexed"))
        })
        .collect()
}
