//! Chaînage des segments en rings par extrémités partagées

use geo::{Coord, LineString};
use tracing::{debug, warn};

use crate::TigerError;

use super::AssemblyMode;

/// Tolérance de comparaison des extrémités. Les coordonnées TIGER portent
/// six décimales de degrés, les extrémités partagées sont donc identiques
/// bien en deçà de ce seuil.
const TOLERANCE: f64 = 1e-9;

/// Raccorde des segments non ordonnés en rings
///
/// Les segments déjà fermés sont pris comme rings tels quels. Les autres
/// sont chaînés de proche en proche par extrémités communes, dans un sens ou
/// dans l'autre. Une chaîne qui ne se referme pas est restituée ouverte en
/// mode [`AssemblyMode::Strict`], refermée automatiquement (ou écartée si
/// trop courte) en mode [`AssemblyMode::Permissive`].
///
/// # Errors
///
/// `AssemblyFailed` si aucun ring ne peut être produit.
pub fn reconstruct_rings(
    edges: &[LineString<f64>],
    mode: AssemblyMode,
) -> Result<Vec<LineString<f64>>, TigerError> {
    let mut remaining: Vec<Vec<Coord>> = edges
        .iter()
        .map(|edge| edge.0.clone())
        .filter(|coords| coords.len() >= 2)
        .collect();

    if remaining.is_empty() {
        return Err(TigerError::AssemblyFailed(
            "no usable edges to assemble".to_string(),
        ));
    }

    let mut rings: Vec<LineString<f64>> = Vec::new();

    // D'abord, extraire les segments qui bouclent sur eux-mêmes
    remaining.retain(|coords| {
        if coords.len() >= 3 && coords_equal(coords[0], coords[coords.len() - 1]) {
            rings.push(LineString::new(coords.clone()));
            false
        } else {
            true
        }
    });

    // Chaîner les segments restants de proche en proche
    while let Some(mut chain) = remaining.pop() {
        let mut made_progress = true;
        while made_progress && !remaining.is_empty() {
            made_progress = false;
            let chain_first = chain[0];
            let chain_last = chain[chain.len() - 1];

            for i in (0..remaining.len()).rev() {
                let edge = &remaining[i];
                let edge_first = edge[0];
                let edge_last = edge[edge.len() - 1];

                if coords_equal(chain_last, edge_first) {
                    // Suite directe en fin de chaîne
                    let edge = remaining.swap_remove(i);
                    chain.pop(); // Éviter le doublon au point de raccord
                    chain.extend(edge);
                    made_progress = true;
                    break;
                } else if coords_equal(chain_last, edge_last) {
                    // Suite en fin de chaîne, segment retourné
                    let edge = remaining.swap_remove(i);
                    chain.pop();
                    chain.extend(edge.into_iter().rev());
                    made_progress = true;
                    break;
                } else if coords_equal(chain_first, edge_last) {
                    // Insertion en tête de chaîne
                    let mut new_chain = remaining.swap_remove(i);
                    new_chain.pop();
                    new_chain.extend(chain);
                    chain = new_chain;
                    made_progress = true;
                    break;
                } else if coords_equal(chain_first, edge_first) {
                    // Insertion en tête, segment retourné
                    let edge = remaining.swap_remove(i);
                    let mut reversed: Vec<Coord> = edge.into_iter().rev().collect();
                    reversed.pop();
                    reversed.extend(chain);
                    chain = reversed;
                    made_progress = true;
                    break;
                }
            }
        }

        let is_closed = chain.len() > 1 && coords_equal(chain[0], chain[chain.len() - 1]);

        if is_closed {
            rings.push(LineString::new(chain));
        } else {
            match mode {
                AssemblyMode::Strict => {
                    // Chaîne ouverte restituée telle quelle: les tuiles de
                    // bordure produisent couramment des bouts de polygone,
                    // c'est à l'appelant d'écarter les résultats dégénérés.
                    rings.push(LineString::new(chain));
                }
                AssemblyMode::Permissive => {
                    if chain.len() >= 3 {
                        let gap = ((chain[0].x - chain[chain.len() - 1].x).powi(2)
                            + (chain[0].y - chain[chain.len() - 1].y).powi(2))
                        .sqrt();
                        warn!(points = chain.len(), gap, "Auto-closing unclosed ring");
                        let first = chain[0];
                        chain.push(first);
                        rings.push(LineString::new(chain));
                    } else {
                        debug!(points = chain.len(), "Dropping unusable fragment");
                    }
                }
            }
        }
    }

    if rings.is_empty() {
        Err(TigerError::AssemblyFailed(
            "could not reconstruct any ring".to_string(),
        ))
    } else {
        Ok(rings)
    }
}

/// Compare deux coordonnées avec tolérance
fn coords_equal(a: Coord, b: Coord) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}
