//! # tigerpoly
//!
//! Reconstruction des polygones TIGER depuis la topologie de chaînes.
//!
//! Les fichiers TIGER/Line du Census Bureau ne portent pas de géométries de
//! polygone: chaque "complete chain" est partagée par au plus deux faces,
//! identifiées par les enregistrements de lien chaîne/polygone. Ce binaire
//! reconstruit les polygones (et le contour des area landmarks nommés) en
//! quatre étapes séquentielles sur un index en mémoire, puis écrit deux
//! datasets GeoJSON avec le schéma d'attributs source répliqué.
//!
//! ## Usage
//!
//! ```bash
//! tigerpoly ./tgr06001 [./out/]
//! ```

pub mod builder;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod report;

pub use pipeline::run;
pub use report::AssemblyReport;
