//! Classement des rings reconstruits en extérieurs et trous
//!
//! Les liens chaîne/polygone TIGER ne distinguent pas le contour d'un
//! polygone de celui de ses enclaves: tout arrive comme une liste de rings.
//! Le classement se fait ici par inclusion géométrique.

use std::collections::{HashMap, HashSet};

use geo::{Contains, LineString, Point, Polygon};

/// Répartit les rings entre extérieurs et trous
///
/// Un ring dont le premier point tombe dans un autre ring est un trou de
/// celui-ci; les rings restants sont des extérieurs. Retourne un polygone
/// par ring extérieur, dans l'ordre d'arrivée des rings.
pub fn organize_rings(rings: Vec<LineString<f64>>) -> Vec<Polygon<f64>> {
    if rings.is_empty() {
        return Vec::new();
    }

    if rings.len() == 1 {
        return vec![Polygon::new(rings.into_iter().next().unwrap(), vec![])];
    }

    let mut outer_indices: Vec<usize> = Vec::new();
    let mut inner_map: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut assigned: HashSet<usize> = HashSet::new();

    for i in 0..rings.len() {
        let mut is_inner = false;

        for j in 0..rings.len() {
            if i == j {
                continue;
            }

            // Le test d'inclusion porte sur le premier point: les rings
            // TIGER ne se croisent pas, un point suffit
            if let Some(first_coord) = rings[i].0.first() {
                let point = Point::new(first_coord.x, first_coord.y);
                let candidate = Polygon::new(rings[j].clone(), vec![]);

                if candidate.contains(&point) {
                    if !assigned.contains(&i) {
                        inner_map.entry(j).or_default().push(i);
                        assigned.insert(i);
                        is_inner = true;
                    }
                    break;
                }
            }
        }

        if !is_inner && !assigned.contains(&i) {
            outer_indices.push(i);
        }
    }

    outer_indices
        .into_iter()
        .map(|outer_idx| {
            let outer = rings[outer_idx].clone();
            let holes: Vec<LineString<f64>> = inner_map
                .get(&outer_idx)
                .map(|inners| inners.iter().map(|&i| rings[i].clone()).collect())
                .unwrap_or_default();
            Polygon::new(outer, holes)
        })
        .collect()
}
