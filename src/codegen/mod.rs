//! TypeScript declaration generator for the Web3 API.
//!
//! Reads the service's OpenAPI document and renders a `.d.ts` file holding
//! the schema types plus a `Web3Api` class declaration with one static
//! namespace per tag and one method per operation.
//!
//! ```
//! use moralis_web3_api::codegen;
//!
//! let schema = serde_json::json!({
//!     "paths": {
//!         "/{address}/balance": {
//!             "get": {
//!                 "operationId": "getNativeBalance",
//!                 "tags": ["balance"],
//!                 "parameters": [
//!                     { "in": "path", "name": "address", "required": true,
//!                       "schema": { "type": "string" } }
//!                 ],
//!                 "responses": { "200": { "description": "ok" } }
//!             }
//!         }
//!     }
//! });
//! let content = codegen::generate(&schema).unwrap();
//! assert!(content.contains("  static balance: {\n"));
//! ```

mod typescript;
mod web3_api;

pub use typescript::render_schema;
pub use web3_api::{make_method, make_tag_object, make_web3_api_class};

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Where the Web3 API publishes its OpenAPI document.
pub const DEFAULT_SCHEMA_URL: &str = "https://deep-index.moralis.io/api-docs/v2/swagger.json";

/// Where the declarations are written, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "types/generated/web3Api.d.ts";

const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Follows at most this many chained `$ref`s.
const MAX_REF_DEPTH: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[cfg(feature = "client")]
    #[error("failed to fetch schema: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("statusCode={0}")]
    Status(u16),
    #[error("failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to write declarations: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// One operation of the document, with `$ref`s already resolved.
#[derive(Clone, Debug)]
pub struct Operation<'a> {
    pub id: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    /// First tag; untagged operations get no class method.
    pub tag: Option<&'a str>,
    pub data: &'a Value,
    /// Path-level parameters merged with (and overridden by) the operation's.
    pub parameters: Vec<&'a Value>,
    pub request_body: Option<&'a Value>,
    /// Response codes in declaration order: integer codes ascending, then the rest.
    pub responses: Vec<(&'a str, &'a Value)>,
}

impl Operation<'_> {
    /// Unique parameter locations in first-seen order.
    pub fn parameter_locations(&self) -> Vec<&str> {
        let mut locations: Vec<&str> = Vec::new();
        for param in &self.parameters {
            if let Some(location) = param.get("in").and_then(Value::as_str) {
                if !locations.contains(&location) {
                    locations.push(location);
                }
            }
        }
        locations
    }
}

/// Operations of a document, indexed by id and grouped by tag.
#[derive(Clone, Debug)]
pub struct SchemaIndex<'a> {
    pub document: &'a Value,
    /// Operations in path order, then method order.
    pub operations: Vec<Operation<'a>>,
    /// Tags in first-seen order with their operation ids.
    pub tags: Vec<(&'a str, Vec<&'a str>)>,
    by_id: BTreeMap<&'a str, usize>,
}

impl<'a> SchemaIndex<'a> {
    pub fn build(document: &'a Value) -> Result<Self, CodegenError> {
        let paths = document
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| CodegenError::InvalidSchema("missing `paths` object".to_string()))?;

        let mut index = Self {
            document,
            operations: Vec::new(),
            tags: Vec::new(),
            by_id: BTreeMap::new(),
        };

        for (path, item) in paths {
            let item = resolve(document, item);
            let shared = collect_parameters(document, item.get("parameters"));
            for &method in HTTP_METHODS {
                let Some(data) = item.get(method) else {
                    continue;
                };
                let Some(id) = data.get("operationId").and_then(Value::as_str) else {
                    warn!(%path, method, "skipping operation without operationId");
                    continue;
                };
                if index.by_id.contains_key(id) {
                    warn!(%path, method, operation_id = id, "skipping duplicate operationId");
                    continue;
                }
                index.push(Operation {
                    id,
                    method,
                    path,
                    tag: data
                        .get("tags")
                        .and_then(Value::as_array)
                        .and_then(|tags| tags.first())
                        .and_then(Value::as_str),
                    data,
                    parameters: merge_parameters(
                        &shared,
                        collect_parameters(document, data.get("parameters")),
                    ),
                    request_body: data.get("requestBody").map(|body| resolve(document, body)),
                    responses: ordered_responses(document, data.get("responses")),
                });
            }
        }
        Ok(index)
    }

    fn push(&mut self, operation: Operation<'a>) {
        if let Some(tag) = operation.tag {
            match self.tags.iter_mut().find(|(name, _)| *name == tag) {
                Some((_, ids)) => ids.push(operation.id),
                None => self.tags.push((tag, vec![operation.id])),
            }
        }
        self.by_id.insert(operation.id, self.operations.len());
        self.operations.push(operation);
    }

    pub fn operation(&self, id: &str) -> Option<&Operation<'a>> {
        self.by_id.get(id).map(|&i| &self.operations[i])
    }
}

/// Follow local `$ref`s; unresolvable references are returned unchanged.
fn resolve<'a>(document: &'a Value, mut value: &'a Value) -> &'a Value {
    for _ in 0..MAX_REF_DEPTH {
        let Some(pointer) = value
            .get("$ref")
            .and_then(Value::as_str)
            .and_then(|reference| reference.strip_prefix('#'))
        else {
            break;
        };
        match document.pointer(pointer) {
            Some(target) => value = target,
            None => break,
        }
    }
    value
}

fn collect_parameters<'a>(document: &'a Value, parameters: Option<&'a Value>) -> Vec<&'a Value> {
    parameters
        .and_then(Value::as_array)
        .map(|params| params.iter().map(|param| resolve(document, param)).collect())
        .unwrap_or_default()
}

fn parameter_key(param: &Value) -> (Option<&str>, Option<&str>) {
    (
        param.get("in").and_then(Value::as_str),
        param.get("name").and_then(Value::as_str),
    )
}

fn merge_parameters<'a>(shared: &[&'a Value], own: Vec<&'a Value>) -> Vec<&'a Value> {
    let mut merged: Vec<&Value> = shared
        .iter()
        .copied()
        .filter(|param| !own.iter().any(|o| parameter_key(o) == parameter_key(param)))
        .collect();
    merged.extend(own);
    merged
}

fn ordered_responses<'a>(
    document: &'a Value,
    responses: Option<&'a Value>,
) -> Vec<(&'a str, &'a Value)> {
    let Some(responses) = responses.and_then(Value::as_object) else {
        return Vec::new();
    };
    let mut numeric: Vec<(u32, &str, &Value)> = Vec::new();
    let mut named: Vec<(&str, &Value)> = Vec::new();
    for (code, response) in responses {
        let response = resolve(document, response);
        match code.parse::<u32>() {
            Ok(n) if !code.starts_with('+') => numeric.push((n, code, response)),
            _ => named.push((code, response)),
        }
    }
    numeric.sort_by_key(|(n, _, _)| *n);
    numeric
        .into_iter()
        .map(|(_, code, response)| (code, response))
        .chain(named)
        .collect()
}

/// The type helper appended after the schema types.
const DEFAULT_RESPONSE: &str = "
  export interface defaultResponse<T> {
    next?: () => Promise<T & this>;
  }
  ";

/// Render the complete declaration file for an OpenAPI document.
pub fn generate(document: &Value) -> Result<String, CodegenError> {
    let index = SchemaIndex::build(document)?;
    let mut content = typescript::render_types(&index)?;
    content.push('\n');
    content.push_str(DEFAULT_RESPONSE);
    content.push('\n');
    content.push_str(&make_web3_api_class(&index));
    Ok(content)
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> Result<(), CodegenError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(feature = "client")]
pub use self::fetch::{fetch_schema, generate_web3_api_types};

#[cfg(feature = "client")]
mod fetch {
    use super::{CodegenError, generate, write_output};
    use serde_json::Value;
    use std::path::Path;
    use tracing::{debug, info};

    /// Download and parse the OpenAPI document; non-2xx statuses are errors.
    pub async fn fetch_schema(url: &str) -> Result<Value, CodegenError> {
        debug!(%url, "fetching schema");
        let response = reqwest::get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CodegenError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the schema at `url`, render it and write the result to `output`.
    pub async fn generate_web3_api_types(url: &str, output: &Path) -> Result<(), CodegenError> {
        let document = fetch_schema(url).await?;
        let content = generate(&document)?;
        write_output(output, &content)?;
        info!(path = %output.display(), bytes = content.len(), "wrote Web3 API types");
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        const SCHEMA_PATH: &str = "/api-docs/v2/swagger.json";

        #[tokio::test]
        async fn non_success_status_is_rejected() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(SCHEMA_PATH))
                .respond_with(ResponseTemplate::new(503))
                .mount(&server)
                .await;

            let err = fetch_schema(&format!("{}{SCHEMA_PATH}", server.uri()))
                .await
                .expect_err("status");
            assert!(matches!(err, CodegenError::Status(503)));
            assert_eq!(err.to_string(), "statusCode=503");
        }

        #[tokio::test]
        async fn malformed_body_is_a_parse_error() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
                .mount(&server)
                .await;

            let err = fetch_schema(&server.uri()).await.expect_err("parse");
            assert!(matches!(err, CodegenError::Parse(_)));
        }

        #[tokio::test]
        async fn pipeline_writes_the_declaration_file() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(SCHEMA_PATH))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "swagger": "2.0",
                    "paths": { "/{address}/balance": { "get": {
                        "operationId": "getNativeBalance",
                        "tags": ["account"],
                        "parameters": [
                            { "in": "path", "name": "address", "required": true, "type": "string" }
                        ],
                        "responses": { "200": {
                            "description": "ok",
                            "schema": { "$ref": "#/definitions/nativeBalance" }
                        } }
                    } } },
                    "definitions": { "nativeBalance": {
                        "type": "object",
                        "properties": { "balance": { "type": "string" } }
                    } }
                })))
                .mount(&server)
                .await;

            let dir = tempfile::tempdir().expect("tempdir");
            let output = dir.path().join("types/generated/web3Api.d.ts");
            generate_web3_api_types(&format!("{}{SCHEMA_PATH}", server.uri()), &output)
                .await
                .expect("generate");

            let content = std::fs::read_to_string(&output).expect("read");
            assert!(content.contains("export interface definitions {\n  nativeBalance: {\n"));
            assert!(content.contains(
                "          \"application/json\": definitions[\"nativeBalance\"];\n"
            ));
            assert!(content.contains("  static account: {\n    getNativeBalance: (options: "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "openapi": "3.0.0",
            "paths": {
                "/erc20/{address}/allowance": {
                    "parameters": [
                        { "$ref": "#/components/parameters/address" }
                    ],
                    "get": {
                        "operationId": "getTokenAllowance",
                        "tags": ["token"],
                        "parameters": [
                            { "in": "query", "name": "chain", "schema": { "type": "string" } },
                            { "in": "query", "name": "owner_address", "required": true,
                              "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "Returns the allowance",
                                "content": { "application/json": {
                                    "schema": { "$ref": "#/components/schemas/erc20Allowance" }
                                } }
                            }
                        }
                    }
                },
                "/info/endpointWeights": {
                    "get": {
                        "operationId": "endpointWeights",
                        "tags": ["utils"],
                        "responses": { "default": { "description": "weights" } }
                    }
                },
                "/untagged": {
                    "get": { "operationId": "untagged", "responses": {} },
                    "post": { "responses": {} }
                }
            },
            "components": {
                "parameters": {
                    "address": { "in": "path", "name": "address", "required": true,
                                 "schema": { "type": "string" } }
                },
                "schemas": {
                    "erc20Allowance": {
                        "type": "object",
                        "required": ["allowance"],
                        "properties": { "allowance": { "type": "string" } }
                    }
                }
            }
        })
    }

    #[test]
    fn index_groups_operations_by_first_tag() {
        let document = document();
        let index = SchemaIndex::build(&document).expect("index");
        assert_eq!(
            index.tags,
            vec![("token", vec!["getTokenAllowance"]), ("utils", vec!["endpointWeights"])]
        );
        assert_eq!(index.operations.len(), 3);
        assert!(index.operation("untagged").is_some_and(|op| op.tag.is_none()));
    }

    #[test]
    fn parameters_merge_and_resolve_refs() {
        let document = document();
        let index = SchemaIndex::build(&document).expect("index");
        let operation = index.operation("getTokenAllowance").expect("operation");
        assert_eq!(operation.parameters.len(), 3);
        assert_eq!(operation.parameter_locations(), vec!["path", "query"]);
    }

    #[test]
    fn responses_are_ordered_numerically_first() {
        let document = json!({ "responses": {
            "default": {}, "404": {}, "200": {}, "2XX": {}
        } });
        let codes: Vec<&str> = ordered_responses(&document, document.get("responses"))
            .into_iter()
            .map(|(code, _)| code)
            .collect();
        assert_eq!(codes, vec!["200", "404", "default", "2XX"]);
    }

    #[test]
    fn index_follows_document_order() {
        let document: Value = serde_json::from_str(
            r#"{
                "paths": {
                    "/z": { "get": { "operationId": "zeta", "tags": ["token"], "responses": {} } },
                    "/a": { "get": { "operationId": "alpha", "tags": ["account"], "responses": {} } },
                    "/m": { "get": { "operationId": "mu", "tags": ["token"], "responses": {} } }
                }
            }"#,
        )
        .expect("schema");
        let index = SchemaIndex::build(&document).expect("index");
        assert_eq!(
            index.tags,
            vec![("token", vec!["zeta", "mu"]), ("account", vec!["alpha"])]
        );
        let paths: Vec<&str> = index.operations.iter().map(|op| op.path).collect();
        assert_eq!(paths, vec!["/z", "/a", "/m"]);

        let content = generate(&document).expect("generate");
        let token_at = content.find("  static token: {\n    zeta: ").expect("token");
        let account_at = content.find("  static account: {\n    alpha: ").expect("account");
        assert!(token_at < account_at);
    }

    #[test]
    fn missing_paths_is_invalid() {
        let err = generate(&json!({ "openapi": "3.0.0" })).expect_err("invalid");
        assert!(matches!(err, CodegenError::InvalidSchema(_)));
    }

    #[test]
    fn generate_joins_types_helper_and_class() {
        let document = document();
        let content = generate(&document).expect("generate");
        let helper_at = content
            .find("\n\n  export interface defaultResponse<T> {\n    next?: () => Promise<T & this>;\n  }\n  \n")
            .expect("defaultResponse helper");
        let class_at = content.find("export default class Web3Api {\n").expect("class");
        assert!(helper_at < class_at);
        assert!(content.starts_with("/**\n * This file was auto-generated"));
        assert!(content.ends_with("}\n"));
        assert!(content.contains(
            "    getTokenAllowance: (options: operations[\"getTokenAllowance\"][\"parameters\"][\"query\"] & operations[\"getTokenAllowance\"][\"parameters\"][\"path\"]) => Promise<operations[\"getTokenAllowance\"][\"responses\"][\"200\"][\"content\"][\"application/json\"] & defaultResponse<operations[\"getTokenAllowance\"][\"responses\"][\"200\"][\"content\"][\"application/json\"]>>;\n"
        ));
        assert!(!content.contains("static untagged"));
    }

    #[test]
    fn generate_is_deterministic() {
        let document = document();
        assert_eq!(
            generate(&document).expect("first"),
            generate(&document).expect("second")
        );
    }

    #[test]
    fn write_output_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("types/generated/web3Api.d.ts");
        write_output(&path, "export {};\n").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "export {};\n");
    }
}
