//! Assemblage de polygones à partir de chaînes non ordonnées
//!
//! Les chaînes TIGER qui bordent un polygone arrivent sans ordre ni
//! orientation. L'assemblage les raccorde par extrémités partagées en rings
//! fermés ([`ring`]), puis organise les rings en ring extérieur + trous
//! ([`topology`]).

pub mod ring;
pub mod topology;

pub use ring::reconstruct_rings;
pub use topology::organize_rings;

use geo::{LineString, Polygon};
use tracing::warn;

use crate::TigerError;

/// Mode d'assemblage des rings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    /// Les chaînes ouvertes sont restituées telles quelles (le tri des
    /// résultats dégénérés revient à l'appelant) et l'orientation des rings
    /// est conservée.
    Strict,

    /// Les chaînes ouvertes sont refermées automatiquement, les fragments
    /// inutilisables sont ignorés et l'orientation des rings est corrigée
    /// (extérieur anti-horaire, trous horaires).
    Permissive,
}

/// Organise des rings en un polygone (ring extérieur + trous)
///
/// # Errors
///
/// `AssemblyFailed` si la liste de rings est vide.
pub fn polygon_from_rings(
    rings: Vec<LineString<f64>>,
    mode: AssemblyMode,
) -> Result<Polygon<f64>, TigerError> {
    if rings.is_empty() {
        return Err(TigerError::AssemblyFailed(
            "no rings to build a polygon from".to_string(),
        ));
    }

    let mut polygons = topology::organize_rings(rings);
    if polygons.len() > 1 {
        warn!(
            outers = polygons.len(),
            "Multiple disjoint outer rings, keeping the first"
        );
    }

    let mut polygon = polygons.remove(0);
    if mode == AssemblyMode::Permissive {
        fix_winding(&mut polygon);
    }

    Ok(polygon)
}

/// Assemble des segments en un polygone en une seule passe
pub fn build_polygon(
    edges: &[LineString<f64>],
    mode: AssemblyMode,
) -> Result<Polygon<f64>, TigerError> {
    let rings = ring::reconstruct_rings(edges, mode)?;
    polygon_from_rings(rings, mode)
}

/// Ramène le ring extérieur en anti-horaire et les trous en horaire
fn fix_winding(polygon: &mut Polygon<f64>) {
    use geo::algorithm::winding_order::Winding;

    polygon.exterior_mut(|ring| ring.make_ccw_winding());
    polygon.interiors_mut(|rings| {
        for ring in rings {
            ring.make_cw_winding();
        }
    });
}
