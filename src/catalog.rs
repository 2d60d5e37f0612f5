//! Model catalog: which fields of which models carry a narrowed type.
//!
//! Built once per pass from the generator's DMMF document. Only the subset we
//! need is deserialized; a field is typed when its documentation contains
//! `[TypeName]`, e.g. `/// [UserMetadata]` in the schema.
use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{NarrowError, Result};

static TYPE_DOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]").unwrap());

// ------------------------------ DMMF subset ------------------------------- //

#[derive(Debug, Deserialize)]
struct Dmmf {
    datamodel: Datamodel,
}

#[derive(Debug, Deserialize)]
struct Datamodel {
    #[serde(default)]
    models: Vec<DmmfModel>,
}

#[derive(Debug, Deserialize)]
struct DmmfModel {
    name: String,
    #[serde(default)]
    fields: Vec<DmmfField>,
}

#[derive(Debug, Deserialize)]
struct DmmfField {
    name: String,
    #[serde(default)]
    documentation: Option<String>,
}

// -------------------------------- Catalog --------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedField {
    pub name: String,
    /// Concrete type declared by the user inside the namespace.
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub fields: Vec<TypedField>,
}

impl Model {
    pub fn typed_field(&self, field: &str) -> Option<&TypedField> {
        self.fields.iter().find(|f| f.name == field)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: BTreeMap<String, Model>,
}

impl ModelCatalog {
    pub fn new(models: impl IntoIterator<Item = Model>) -> Self {
        Self {
            models: models.into_iter().map(|m| (m.name.clone(), m)).collect(),
        }
    }

    pub fn from_dmmf_json(src: &str) -> Result<Self> {
        let dmmf: Dmmf = from_str_with_path(src)?;
        let models = dmmf.datamodel.models.into_iter().map(|model| {
            let fields = model
                .fields
                .into_iter()
                .filter_map(|field| {
                    let type_name = parse_type_doc(field.documentation.as_deref()?)?;
                    Some(TypedField { name: field.name, type_name })
                })
                .collect::<Vec<_>>();
            Model { name: model.name, fields }
        });
        let catalog = Self::new(models);
        tracing::debug!(
            models = catalog.models.len(),
            typed_fields = catalog.models.values().map(|m| m.fields.len()).sum::<usize>(),
            "loaded model catalog"
        );
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path).map_err(|source| NarrowError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_dmmf_json(&src)
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    pub fn typed_field(&self, model: &str, field: &str) -> Option<&TypedField> {
        self.model(model)?.typed_field(field)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }
}

/// `[Type]` anywhere in a field's documentation names its concrete type.
pub fn parse_type_doc(documentation: &str) -> Option<String> {
    let captured = TYPE_DOC_RE.captures(documentation)?.get(1)?.as_str().trim();
    (!captured.is_empty()).then(|| captured.to_string())
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| NarrowError::Catalog {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}
