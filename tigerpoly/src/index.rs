//! Index en mémoire des modules (tuiles) TIGER
//!
//! Les deux premières étapes du run remplissent cet index: les géométries
//! de chaînes par TLID, puis les listes de chaînes bordant chaque polygone.
//! Les étapes suivantes ne font que le consulter.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use geo::LineString;
use tiger::Layer;

/// Clé d'un polygone au sein d'un module: (CENID, POLYID)
pub type PolyKey = (String, i64);

/// Index des lignes et des liens d'une tuile
#[derive(Debug, Default)]
pub struct Module {
    /// TLID -> géométrie de la chaîne
    pub lines: HashMap<i64, LineString<f64>>,

    /// (CENID, POLYID) -> TLID des chaînes bordant ce polygone
    pub links: HashMap<PolyKey, Vec<i64>>,
}

/// Index partagé: identifiant de module -> index de la tuile
#[derive(Debug, Default)]
pub struct ModuleIndex {
    modules: HashMap<String, Module>,
}

impl ModuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Étape 1: indexe les géométries de la couche CompleteChain par TLID
    ///
    /// Crée chaque module à sa première apparition. Retourne le nombre de
    /// lignes indexées.
    pub fn index_lines(&mut self, layer: &Layer) -> Result<usize> {
        let mut count = 0;

        for feature in &layer.features {
            let tlid = feature.require_i64("TLID")?;
            let module_id = feature.require_string("MODULE")?;
            let line = feature
                .line_string()
                .with_context(|| format!("chain {tlid} in module {module_id}"))?;

            self.modules
                .entry(module_id)
                .or_default()
                .lines
                .insert(tlid, line);
            count += 1;
        }

        Ok(count)
    }

    /// Étape 2: indexe la couche PolyChainLink des deux côtés de chaque chaîne
    ///
    /// Les auto-liens (même polygone à gauche et à droite) ne portent aucune
    /// information de frontière et sont écartés. Chaque TLID référencé doit
    /// avoir été indexé dans les lignes du même module. Retourne le nombre
    /// de côtés indexés.
    pub fn index_links(&mut self, layer: &Layer) -> Result<usize> {
        let mut count = 0;

        for feature in &layer.features {
            let tlid = feature.require_i64("TLID")?;
            let module_id = feature.require_string("MODULE")?;

            let left = (
                feature.require_string("CENIDL")?,
                feature.require_i64("POLYIDL")?,
            );
            let right = (
                feature.require_string("CENIDR")?,
                feature.require_i64("POLYIDR")?,
            );

            if left == right {
                continue;
            }

            let Some(module) = self.modules.get_mut(&module_id) else {
                bail!("PolyChainLink references unknown module {module_id} (TLID {tlid})");
            };
            if !module.lines.contains_key(&tlid) {
                bail!("PolyChainLink references unknown chain {tlid} in module {module_id}");
            }

            for key in [right, left] {
                module.links.entry(key).or_default().push(tlid);
                count += 1;
            }
        }

        Ok(count)
    }
}
