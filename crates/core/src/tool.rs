//! Tool trait — the abstraction over the agent's local capabilities.
//!
//! Tools give the agent something to do between model rounds: look up the
//! weather, recommend attractions, search hotels, and so on. Arguments arrive
//! from the model as a serialized JSON object and are parsed into a typed
//! [`ToolArgs`] bag before any tool sees them.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::ToolError;
use crate::provider::ToolDefinition;

/// A single argument value, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    /// Human-readable kind name, matching JSON Schema type names.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ArgValue::Null => "null",
            ArgValue::Bool(_) => "boolean",
            ArgValue::Number(_) => "number",
            ArgValue::Text(_) => "string",
            ArgValue::List(_) => "array",
            ArgValue::Map(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => ArgValue::Bool(b),
            Value::Number(n) => ArgValue::Number(n),
            Value::String(s) => ArgValue::Text(s),
            Value::Array(items) => ArgValue::List(items.into_iter().map(ArgValue::from).collect()),
            Value::Object(map) => {
                ArgValue::Map(map.into_iter().map(|(k, v)| (k, ArgValue::from(v))).collect())
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Text(s)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Number(n.into())
    }
}

/// Parsed tool arguments: an ordered key/value bag of tagged values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolArgs(BTreeMap<String, ArgValue>);

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the raw argument string the model emitted.
    ///
    /// Only a JSON object is accepted; anything else is
    /// [`ToolError::InvalidArguments`].
    pub fn parse(raw: &str) -> Result<Self, ToolError> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| ToolError::InvalidArguments(format!("malformed JSON: {e}")))?;

        match ArgValue::from(value) {
            ArgValue::Map(map) => Ok(Self(map)),
            other => Err(ToolError::InvalidArguments(format!(
                "expected a JSON object, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Builder-style insert, handy for tests and offline callers.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    /// The value under `key` if it is text.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ArgValue::as_str)
    }

    /// The text value under `key`, or [`ToolError::MissingArgument`].
    pub fn require_text(&self, key: &str) -> Result<&str, ToolError> {
        self.text(key)
            .ok_or_else(|| ToolError::MissingArgument(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The kind a declared tool parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Number,
    Bool,
    List,
    Map,
}

impl ParamKind {
    /// JSON Schema type name.
    pub fn json_type(self) -> &'static str {
        match self {
            ParamKind::Text => "string",
            ParamKind::Number => "number",
            ParamKind::Bool => "boolean",
            ParamKind::List => "array",
            ParamKind::Map => "object",
        }
    }

    fn accepts(self, value: &ArgValue) -> bool {
        matches!(
            (self, value),
            (ParamKind::Text, ArgValue::Text(_))
                | (ParamKind::Number, ArgValue::Number(_))
                | (ParamKind::Bool, ArgValue::Bool(_))
                | (ParamKind::List, ArgValue::List(_))
                | (ParamKind::Map, ArgValue::Map(_))
        )
    }
}

/// A declared tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }

    /// The single free-text `query` parameter every built-in tool takes.
    pub fn query() -> Self {
        Self::required("query", ParamKind::Text, "The user's query or request parameters")
    }
}

/// Build the JSON Schema object for a parameter list.
pub fn json_schema(params: &[ParamSpec]) -> serde_json::Value {
    let properties: serde_json::Map<String, serde_json::Value> = params
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                serde_json::json!({
                    "type": p.kind.json_type(),
                    "description": p.description,
                }),
            )
        })
        .collect();

    let required: Vec<&str> = params
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.as_str())
        .collect();

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Check parsed arguments against declared parameters.
///
/// Required parameters must be present and non-null; present values must
/// match their declared kind. Undeclared keys are ignored.
pub fn validate_args(params: &[ParamSpec], args: &ToolArgs) -> Result<(), ToolError> {
    for spec in params {
        match args.get(&spec.name) {
            None | Some(ArgValue::Null) => {
                if spec.required {
                    return Err(ToolError::MissingArgument(spec.name.clone()));
                }
            }
            Some(value) if !spec.kind.accepts(value) => {
                return Err(ToolError::InvalidArguments(format!(
                    "'{}' must be {}, got {}",
                    spec.name,
                    spec.kind.json_type(),
                    value.kind_name()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// The core Tool trait.
///
/// Each capability (weather, attractions, hotels, routes, food) implements
/// this trait and is registered in the [`ToolRegistry`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "weather_query").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// Declared parameters. Defaults to the single required `query` text.
    fn parameters(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::query()]
    }

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value {
        json_schema(&self.parameters())
    }

    /// Execute the tool with already-validated arguments.
    async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError>;

    /// Validate `args` against [`Tool::parameters`], then execute.
    async fn call(&self, args: &ToolArgs) -> Result<String, ToolError> {
        validate_args(&self.parameters(), args)?;
        self.execute(args).await
    }

    /// Convert this tool into a ToolDefinition for sending to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

/// A registry of available tools, ordered by name.
///
/// The agent loop uses this to:
/// 1. Get tool definitions to send to the LLM (always in the same order)
/// 2. Look up tools when the LLM requests them
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::debug!(tool = %name, "Replaced previously registered tool");
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All tool definitions, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// All registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "Echoes back the query"
        }
        async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
            Ok(args.require_text("query")?.to_string())
        }
    }

    struct CountTool;

    #[async_trait]
    impl Tool for CountTool {
        fn name(&self) -> &str {
            "count"
        }
        fn description(&self) -> &str {
            "Counts days"
        }
        fn parameters(&self) -> Vec<ParamSpec> {
            vec![
                ParamSpec::required("days", ParamKind::Number, "How many days"),
                ParamSpec::optional("verbose", ParamKind::Bool, "Chatty output"),
            ]
        }
        async fn execute(&self, args: &ToolArgs) -> Result<String, ToolError> {
            let days = args.get("days").and_then(ArgValue::as_f64).unwrap_or(0.0);
            Ok(format!("{days} days"))
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool { name: "echo" }));
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn registry_definitions_are_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        for name in ["weather_query", "attraction_recommend", "hotel_search", "food_recommend"] {
            registry.register(Box::new(EchoTool { name }));
        }
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            ["attraction_recommend", "food_recommend", "hotel_search", "weather_query"]
        );
        assert_eq!(registry.names(), names);
    }

    #[test]
    fn duplicate_registration_last_wins() {
        struct Other;
        #[async_trait]
        impl Tool for Other {
            fn name(&self) -> &str {
                "echo"
            }
            fn description(&self) -> &str {
                "replacement"
            }
            async fn execute(&self, _args: &ToolArgs) -> Result<String, ToolError> {
                Ok("other".into())
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool { name: "echo" }));
        registry.register(Box::new(Other));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("echo").unwrap().description(), "replacement");
    }

    #[test]
    fn default_schema_is_single_required_query() {
        let def = EchoTool { name: "echo" }.to_definition();
        assert_eq!(def.parameters["type"], "object");
        assert_eq!(def.parameters["properties"]["query"]["type"], "string");
        assert_eq!(def.parameters["required"], serde_json::json!(["query"]));
    }

    #[test]
    fn parse_object_arguments() {
        let args = ToolArgs::parse(r#"{"query":"Beijing","days":3,"tags":["a"]}"#).unwrap();
        assert_eq!(args.text("query"), Some("Beijing"));
        assert_eq!(args.get("days").and_then(ArgValue::as_f64), Some(3.0));
        assert!(matches!(args.get("tags"), Some(ArgValue::List(items)) if items.len() == 1));
    }

    #[test]
    fn parse_rejects_malformed_and_non_object() {
        assert!(matches!(
            ToolArgs::parse("{not json"),
            Err(ToolError::InvalidArguments(_))
        ));
        assert!(matches!(
            ToolArgs::parse("[1,2]"),
            Err(ToolError::InvalidArguments(msg)) if msg.contains("array")
        ));
        assert!(ToolArgs::parse("").is_err());
    }

    #[tokio::test]
    async fn call_validates_before_executing() {
        let tool = EchoTool { name: "echo" };

        let missing = tool.call(&ToolArgs::new()).await.unwrap_err();
        assert_eq!(missing, ToolError::MissingArgument("query".into()));

        let wrong_kind = tool.call(&ToolArgs::new().with("query", 7_i64)).await.unwrap_err();
        assert!(matches!(wrong_kind, ToolError::InvalidArguments(msg) if msg.contains("string")));

        let ok = tool.call(&ToolArgs::new().with("query", "hello")).await.unwrap();
        assert_eq!(ok, "hello");
    }

    #[tokio::test]
    async fn optional_parameters_may_be_absent() {
        let out = CountTool
            .call(&ToolArgs::new().with("days", 2_i64))
            .await
            .unwrap();
        assert_eq!(out, "2 days");

        let err = CountTool
            .call(&ToolArgs::new().with("days", 2_i64).with("verbose", "yes"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
