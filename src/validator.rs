//! Declaration lint and schema/type contract checks.
//!
//! Neither check is enforced at runtime: lint issues are logged when a route is declared,
//! and contract checks are meant for tests that pin a schema to the Rust type a handler
//! declares for it.

use crate::error::Result;
use crate::schema::{Schema, SchemaKind};
use crate::spec::{OperationEntry, RequestEntry};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

/// Log each issue at `warn`.
pub fn log_issues(issues: &[ValidationIssue]) {
    for issue in issues {
        warn!(
            location = %issue.location,
            kind = %issue.kind,
            message = %issue.message,
            "Route declaration issue"
        );
    }
}

/// Lint a route before it is bound: path placeholders vs. the params schema.
#[must_use]
pub fn lint_route(path: &str, request: Option<&RequestEntry>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let placeholders = path_placeholders(path);
    let params = request.and_then(|r| r.params.as_ref());

    let Some(params) = params else {
        for name in &placeholders {
            issues.push(ValidationIssue::new(
                path,
                "MissingPathParam",
                format!("placeholder `{{{name}}}` has no params schema"),
            ));
        }
        return issues;
    };

    let declared = property_names(params);
    for name in placeholders.difference(&declared) {
        issues.push(ValidationIssue::new(
            path,
            "MissingPathParam",
            format!("placeholder `{{{name}}}` is not a property of the params schema"),
        ));
    }
    for name in declared.difference(&placeholders) {
        issues.push(ValidationIssue::new(
            path,
            "UnusedPathParam",
            format!("params property `{name}` does not appear in the path"),
        ));
    }
    issues
}

/// [`lint_route`] for a registered operation.
#[must_use]
pub fn lint_operation(op: &OperationEntry) -> Vec<ValidationIssue> {
    lint_route(&op.path, op.request.as_ref())
}

fn path_placeholders(path: &str) -> BTreeSet<String> {
    path.split('/')
        .filter_map(|segment| {
            segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .or_else(|| segment.strip_prefix(':'))
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn property_names(schema: &Schema) -> BTreeSet<String> {
    match schema.kind() {
        SchemaKind::Object(props) => props.iter().map(|p| p.name.clone()).collect(),
        SchemaKind::Raw(raw) => raw
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default(),
        _ => BTreeSet::new(),
    }
}

/// Whether a schema and a Rust type agree about one JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCheck {
    pub schema_accepts: bool,
    pub type_accepts: bool,
    pub schema_errors: Vec<String>,
}

impl ContractCheck {
    /// `true` when the schema and the type both accept or both reject the value.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.schema_accepts == self.type_accepts
    }
}

/// Check `value` against both `schema` and `T`'s `Deserialize` impl.
///
/// # Errors
///
/// Returns [`RegistrarError::SchemaCompile`](crate::error::RegistrarError::SchemaCompile)
/// when the schema does not compile.
pub fn check_contract<T: DeserializeOwned>(schema: &Schema, value: &Value) -> Result<ContractCheck> {
    let schema_errors = schema.validate(value)?;
    let type_accepts = serde_json::from_value::<T>(value.clone()).is_ok();
    Ok(ContractCheck {
        schema_accepts: schema_errors.is_empty(),
        type_accepts,
        schema_errors,
    })
}
