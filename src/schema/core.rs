use crate::error::{RegistrarError, Result};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named component schemas collected while rendering a document.
pub type Components = BTreeMap<String, Value>;

const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

/// Shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Array(Schema),
    Object(Vec<Property>),
    /// Logical OR of the member schemas, rendered as `anyOf`.
    AnyOf(Vec<Schema>),
    /// A JSON Schema fragment supplied verbatim.
    Raw(Value),
}

/// One property of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub schema: Schema,
    pub required: bool,
}

#[derive(Debug, Clone)]
struct SchemaNode {
    kind: SchemaKind,
    name: Option<String>,
    description: Option<String>,
    example: Option<Value>,
}

/// Handle to an immutable schema node.
///
/// Cloning is an `Arc` clone. `PartialEq` compares identity, not structure.
#[derive(Debug, Clone)]
pub struct Schema(Arc<SchemaNode>);

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Schema {
    fn from_kind(kind: SchemaKind) -> Self {
        Self(Arc::new(SchemaNode {
            kind,
            name: None,
            description: None,
            example: None,
        }))
    }

    #[must_use]
    pub fn string() -> Self {
        Self::from_kind(SchemaKind::String)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::from_kind(SchemaKind::Number)
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::from_kind(SchemaKind::Integer)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::from_kind(SchemaKind::Boolean)
    }

    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::from_kind(SchemaKind::Array(items))
    }

    /// Union of `members`. Rendered as `anyOf`.
    #[must_use]
    pub fn any_of(members: impl IntoIterator<Item = Schema>) -> Self {
        Self::from_kind(SchemaKind::AnyOf(members.into_iter().collect()))
    }

    /// Wrap a hand-written JSON Schema fragment.
    #[must_use]
    pub fn raw(fragment: Value) -> Self {
        Self::from_kind(SchemaKind::Raw(fragment))
    }

    /// Give the schema a component name. Named schemas render as `$ref` in documents.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.0).name = Some(name.into());
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.0).description = Some(description.into());
        self
    }

    #[must_use]
    pub fn example(mut self, example: Value) -> Self {
        Arc::make_mut(&mut self.0).example = Some(example);
        self
    }

    /// Start a new object schema from this one's properties.
    ///
    /// The result is a fresh, unnamed schema. Non-object schemas extend from an empty object.
    #[must_use]
    pub fn extend(&self) -> ObjectSchema {
        ObjectSchema {
            properties: self.properties().map(<[Property]>::to_vec).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.0.kind
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    #[must_use]
    pub fn example_value(&self) -> Option<&Value> {
        self.0.example.as_ref()
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        match &self.0.kind {
            SchemaKind::Object(_) => true,
            SchemaKind::Raw(v) => v.get("type").and_then(Value::as_str) == Some("object"),
            _ => false,
        }
    }

    /// Object properties, when this is an object schema built with [`ObjectSchema`].
    #[must_use]
    pub fn properties(&self) -> Option<&[Property]> {
        match &self.0.kind {
            SchemaKind::Object(props) => Some(props),
            _ => None,
        }
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties()?.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Self-contained JSON Schema with every named schema expanded inline.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        self.fragment(None)
    }

    /// Document fragment. Named schemas are emitted once into `components` and referenced.
    pub fn render(&self, components: &mut Components) -> Value {
        self.fragment(Some(components))
    }

    /// Emit this schema and every named schema it references into `components`.
    pub fn emit_components(&self, components: &mut Components) {
        self.fragment(Some(components));
    }

    /// The schema's own body, with nested named schemas kept as `$ref`s.
    ///
    /// Two schemas sharing a component name must agree on this value.
    #[must_use]
    pub fn definition(&self) -> Value {
        self.body(Some(&mut Components::new()))
    }

    fn fragment(&self, mut components: Option<&mut Components>) -> Value {
        if let (Some(name), Some(comps)) = (self.name(), components.as_deref_mut()) {
            if !comps.contains_key(name) {
                // Reserve the slot first so sibling references to the same name stay stable.
                comps.insert(name.to_string(), Value::Null);
                let body = self.body(Some(&mut *comps));
                comps.insert(name.to_string(), body);
            }
            return json!({ "$ref": format!("{COMPONENT_REF_PREFIX}{name}") });
        }
        self.body(components)
    }

    fn body(&self, mut components: Option<&mut Components>) -> Value {
        let mut out = match &self.0.kind {
            SchemaKind::String => json!({ "type": "string" }),
            SchemaKind::Number => json!({ "type": "number" }),
            SchemaKind::Integer => json!({ "type": "integer" }),
            SchemaKind::Boolean => json!({ "type": "boolean" }),
            SchemaKind::Array(items) => json!({
                "type": "array",
                "items": items.fragment(components.as_deref_mut()),
            }),
            SchemaKind::Object(props) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for prop in props {
                    properties.insert(
                        prop.name.clone(),
                        prop.schema.fragment(components.as_deref_mut()),
                    );
                    if prop.required {
                        required.push(Value::String(prop.name.clone()));
                    }
                }
                let mut obj = Map::new();
                obj.insert("type".into(), Value::String("object".into()));
                obj.insert("properties".into(), Value::Object(properties));
                if !required.is_empty() {
                    obj.insert("required".into(), Value::Array(required));
                }
                Value::Object(obj)
            }
            SchemaKind::AnyOf(members) => {
                let members: Vec<Value> = members
                    .iter()
                    .map(|m| m.fragment(components.as_deref_mut()))
                    .collect();
                json!({ "anyOf": members })
            }
            SchemaKind::Raw(v) => v.clone(),
        };

        if let Value::Object(obj) = &mut out {
            if let Some(desc) = &self.0.description {
                obj.insert("description".into(), Value::String(desc.clone()));
            }
            if let Some(example) = &self.0.example {
                obj.insert("example".into(), example.clone());
            }
        }
        out
    }

    /// Compile a `jsonschema` validator for the inline form of this schema.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::SchemaCompile`] when the fragment is not valid JSON Schema
    /// (only possible for [`Schema::raw`] fragments).
    pub fn validator(&self) -> Result<jsonschema::Validator> {
        jsonschema::validator_for(&self.to_json_schema()).map_err(|e| {
            RegistrarError::SchemaCompile {
                message: e.to_string(),
            }
        })
    }

    /// Validation messages for `instance`; empty when it conforms.
    ///
    /// # Errors
    ///
    /// See [`Schema::validator`].
    pub fn validate(&self, instance: &Value) -> Result<Vec<String>> {
        let validator = self.validator()?;
        Ok(validator
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect())
    }

    /// `true` when `instance` conforms. A schema that fails to compile accepts nothing.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator()
            .map(|v| v.is_valid(instance))
            .unwrap_or(false)
    }
}

/// Builder for object schemas.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    properties: Vec<Property>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Required property. Replaces an existing property of the same name.
    #[must_use]
    pub fn field(self, name: impl Into<String>, schema: Schema) -> Self {
        self.insert(name.into(), schema, true)
    }

    /// Optional property. Replaces an existing property of the same name.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, schema: Schema) -> Self {
        self.insert(name.into(), schema, false)
    }

    fn insert(mut self, name: String, schema: Schema, required: bool) -> Self {
        let prop = Property {
            name,
            schema,
            required,
        };
        match self.properties.iter_mut().find(|p| p.name == prop.name) {
            Some(existing) => *existing = prop,
            None => self.properties.push(prop),
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Schema {
        Schema::from_kind(SchemaKind::Object(self.properties))
    }
}
