//! Member shapes of mocked interfaces, and drift detection against a
//! declared API shape.
//!
//! A [`MockShape`] is exported from the compile-time member list of a
//! mocked type. An [`ApiShape`] is what the real service says it offers,
//! usually checked in as JSON next to the tests. [`validate`] reports every
//! name present on one side and missing on the other.

use crate::logging;
use crate::member::{MemberDescriptor, MemberKind};
use crate::statics::{StaticSurface, StaticTable};
use crate::{MockError, Mockable, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSignature {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySignature {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Members of a mocked type as the mock sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockShape {
    pub type_name: String,
    #[serde(default)]
    pub methods: Vec<MethodSignature>,
    #[serde(default)]
    pub properties: Vec<PropertySignature>,
}

impl MockShape {
    pub fn of<T: ?Sized + Mockable>() -> Self {
        Self::from_descriptors(T::TYPE_NAME, T::members())
    }

    pub fn of_static<S: StaticSurface>() -> Self {
        let table = StaticTable::of::<S>();
        Self::from_descriptors(S::TYPE_NAME, table.descriptors())
    }

    pub fn from_descriptors(type_name: &str, members: &[MemberDescriptor]) -> Self {
        let mut methods = Vec::new();
        let mut properties = Vec::new();
        for member in members {
            match member.kind {
                MemberKind::Method => methods.push(MethodSignature {
                    name: member.name.to_string(),
                    return_type: member.returns.to_string(),
                    parameters: member
                        .params
                        .iter()
                        .map(|(name, ty)| ParameterSignature {
                            name: name.to_string(),
                            ty: ty.to_string(),
                        })
                        .collect(),
                }),
                MemberKind::Property => properties.push(PropertySignature {
                    name: member.name.to_string(),
                    ty: member.returns.to_string(),
                }),
            }
        }
        Self {
            type_name: type_name.to_string(),
            methods,
            properties,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = read(path)?;
        serde_json::from_str(&content).map_err(|e| {
            MockError::Shape(format!("Failed to parse mock shape {:?}: {}", path, e))
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MockError::Shape(format!("Failed to serialize mock shape: {}", e)))
    }
}

/// Member names the real API declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiShape {
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub properties: Vec<String>,
}

impl ApiShape {
    pub fn load(path: &Path) -> Result<Self> {
        let content = read(path)?;
        Self::from_json(&content)
            .map_err(|e| MockError::Shape(format!("Failed to parse API shape {:?}: {}", path, e)))
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub mismatches: Vec<String>,
}

/// Compare a mock shape with the API it stands in for.
pub fn validate(mock: &MockShape, api: &ApiShape) -> ValidationResult {
    let mock_methods: BTreeSet<&str> = mock.methods.iter().map(|m| m.name.as_str()).collect();
    let mock_properties: BTreeSet<&str> =
        mock.properties.iter().map(|p| p.name.as_str()).collect();
    let api_methods: BTreeSet<&str> = api.methods.iter().map(String::as_str).collect();
    let api_properties: BTreeSet<&str> = api.properties.iter().map(String::as_str).collect();

    let mut mismatches = Vec::new();
    for name in mock_methods.difference(&api_methods) {
        mismatches.push(format!("Method {} exists in mock but not in API", name));
    }
    for name in mock_properties.difference(&api_properties) {
        mismatches.push(format!("Property {} exists in mock but not in API", name));
    }
    for name in api_methods.difference(&mock_methods) {
        mismatches.push(format!("Method {} exists in API but not in mock", name));
    }
    for name in api_properties.difference(&mock_properties) {
        mismatches.push(format!("Property {} exists in API but not in mock", name));
    }

    logging::log_shape_mismatches(mismatches.len());
    ValidationResult {
        is_valid: mismatches.is_empty(),
        mismatches,
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| MockError::Shape(format!("Failed to read {:?}: {}", path, e)))
}
