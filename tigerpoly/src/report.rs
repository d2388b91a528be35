//! Compteurs et résumé du run d'assemblage

use std::time::Duration;

/// Compteurs accumulés au fil des quatre étapes du run
#[derive(Debug, Default, Clone)]
pub struct AssemblyReport {
    /// Chaînes indexées (étape 1)
    pub lines: usize,
    /// Modules rencontrés (étape 1)
    pub modules: usize,
    /// Côtés de lien indexés (étape 2)
    pub links: usize,
    /// Polygones assemblés et écrits (étape 3)
    pub polygons_built: usize,
    /// Polygones dégénérés écartés (étape 3)
    pub degenerate: usize,
    /// Area landmarks assemblés et écrits (étape 4)
    pub landmarks_built: usize,
    /// Landmarks sautés, sans membership ou non assemblables (étape 4)
    pub landmarks_skipped: usize,

    duration_secs: f64,
}

impl AssemblyReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Résumé compact sur une ligne
    pub fn summary(&self) -> String {
        format!(
            "{} polygons ({} degenerate), {} area landmarks ({} skipped) from {} lines in {} modules",
            self.polygons_built,
            self.degenerate,
            self.landmarks_built,
            self.landmarks_skipped,
            self.lines,
            self.modules
        )
    }

    /// Affiche le résumé final sur la console
    pub fn display(&self) {
        println!("Done in {:.2}s: {}", self.duration_secs, self.summary());
    }
}
