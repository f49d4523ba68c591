//! Institution directory entries.

use serde::{Deserialize, Serialize};

use crate::shape::{each, non_empty_str, EmptyField, Shape};

/// A financial institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub institution_id: String,
    pub name: String,
    pub country_codes: Vec<String>,
    pub products: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default, skip_serializing)]
    pub oauth: Option<bool>,
    #[serde(default, skip_serializing)]
    pub routing_numbers: Vec<String>,
}

impl Shape for Institution {
    const NAME: &'static str = "institution";

    fn check(&self) -> Result<(), EmptyField> {
        non_empty_str("institution_id", &self.institution_id)?;
        non_empty_str("name", &self.name)
    }
}

/// Upstream `/institutions/get` envelope. Consumers receive only the
/// `institutions` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstitutionList {
    pub institutions: Vec<Institution>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl Shape for InstitutionList {
    const NAME: &'static str = "institutions";

    fn check(&self) -> Result<(), EmptyField> {
        each("institutions", &self.institutions, Shape::check)
    }
}
