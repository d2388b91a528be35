//! Types d'erreurs pour le crate tiger

use thiserror::Error;

/// Erreurs pouvant survenir lors de la lecture d'un dataset TIGER
/// ou de l'assemblage des polygones
#[derive(Debug, Error)]
pub enum TigerError {
    /// Erreur d'I/O lors de la lecture d'une couche
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Couche absente du dataset
    #[error("Missing layer '{name}' in dataset {dataset}")]
    MissingLayer { name: String, dataset: String },

    /// Couche illisible (GeoJSON invalide)
    #[error("Invalid layer '{name}': {reason}")]
    InvalidLayer { name: String, reason: String },

    /// Champ obligatoire absent d'un enregistrement
    #[error("Missing required field '{0}'")]
    MissingField(String),

    /// Champ présent mais d'un type inattendu
    #[error("Field '{field}' has unexpected type (expected {expected})")]
    FieldType {
        field: String,
        expected: &'static str,
    },

    /// Géométrie absente ou d'un type inattendu
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Échec de l'assemblage des rings
    #[error("Ring assembly failed: {0}")]
    AssemblyFailed(String),
}

impl TigerError {
    /// Crée une erreur de couche invalide avec contexte
    pub fn invalid_layer(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLayer {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
