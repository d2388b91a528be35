//! # tiger
//!
//! Lecture des couches TIGER/Line et assemblage de polygones depuis la
//! topologie de chaînes.
//!
//! Le format TIGER du Census Bureau ne distribue pas les polygones comme
//! géométries explicites: les "complete chains" portent les segments de
//! ligne, et les enregistrements de lien chaîne/polygone indiquent quelle
//! chaîne borde quelle face, à gauche et à droite. Ce crate fournit:
//!
//! - [`dataset`]: accès aux relations TIGER converties en couches GeoJSON
//!   (une FeatureCollection par relation, noms de couches et de champs du
//!   driver TIGER d'OGR);
//! - [`assembly`]: reconstruction de rings fermés à partir de segments non
//!   ordonnés, et organisation en polygones avec trous.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tiger::{assembly, AssemblyMode, Dataset};
//!
//! let ds = Dataset::open("./tgr06001")?;
//! let chains = ds.layer("CompleteChain")?;
//! let edges: Vec<_> = chains
//!     .features
//!     .iter()
//!     .map(|f| f.line_string())
//!     .collect::<Result<_, _>>()?;
//! let polygon = assembly::build_polygon(&edges, AssemblyMode::Strict)?;
//! ```

pub mod assembly;
pub mod dataset;
pub mod error;

pub use assembly::AssemblyMode;
pub use dataset::{Dataset, Feature, Layer, Properties};
pub use error::TigerError;
