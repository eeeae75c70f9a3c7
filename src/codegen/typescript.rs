//! JSON Schema → TypeScript type rendering.
//!
//! Produces the `paths`, `components`/`definitions` and `operations`
//! interfaces of the generated declaration file.

use super::{CodegenError, Operation, SchemaIndex};
use serde_json::{Map, Value};
use std::fmt::Write;

const HEADER: &str = "/**
 * This file was auto-generated from the Web3 API schema.
 * Do not make direct changes to the file.
 */
";

/// Parameter locations, in the order they are emitted.
const PARAMETER_LOCATIONS: &[&str] = &["query", "header", "path", "cookie", "body", "formData"];

/// Render the type interfaces of a schema document.
pub fn render_types(index: &SchemaIndex<'_>) -> Result<String, CodegenError> {
    let mut out = String::from(HEADER);
    out.push('\n');
    render_paths(&mut out, index);
    out.push('\n');
    render_schemas(&mut out, index.document);
    out.push('\n');
    render_operations(&mut out, index);
    Ok(out)
}

fn render_paths(out: &mut String, index: &SchemaIndex<'_>) {
    out.push_str("export interface paths {\n");
    let mut current: Option<&str> = None;
    for operation in &index.operations {
        if current != Some(operation.path) {
            if current.is_some() {
                out.push_str("  };\n");
            }
            let _ = writeln!(out, "  {}: {{", ts_key(operation.path));
            current = Some(operation.path);
        }
        let _ = writeln!(
            out,
            "    {}: operations[{}];",
            operation.method,
            quote(operation.id)
        );
    }
    if current.is_some() {
        out.push_str("  };\n");
    }
    out.push_str("}\n");
}

fn render_schemas(out: &mut String, document: &Value) {
    if let Some(definitions) = document.get("definitions").and_then(Value::as_object) {
        out.push_str("export interface definitions ");
        out.push_str(&render_named_schemas(definitions, 0));
        out.push('\n');
        return;
    }

    let empty = Map::new();
    let schemas = document
        .pointer("/components/schemas")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    out.push_str("export interface components {\n");
    let _ = writeln!(out, "  schemas: {};", render_named_schemas(schemas, 2));
    out.push_str("}\n");
}

fn render_named_schemas(schemas: &Map<String, Value>, indent: usize) -> String {
    if schemas.is_empty() {
        return "{}".to_string();
    }
    let pad = " ".repeat(indent);
    let mut body = String::from("{\n");
    for (name, schema) in schemas {
        push_doc(&mut body, indent + 2, schema.get("description"));
        let _ = writeln!(
            body,
            "{pad}  {}: {};",
            ts_key(name),
            render_schema(schema, indent + 2)
        );
    }
    let _ = write!(body, "{pad}}}");
    body
}

fn render_operations(out: &mut String, index: &SchemaIndex<'_>) {
    out.push_str("export interface operations {\n");
    for operation in &index.operations {
        push_doc(out, 2, operation.data.get("summary"));
        let _ = writeln!(out, "  {}: {{", ts_key(operation.id));
        render_parameters(out, operation);
        render_request_body(out, operation);
        render_responses(out, operation);
        out.push_str("  };\n");
    }
    out.push_str("}\n");
}

fn render_parameters(out: &mut String, operation: &Operation<'_>) {
    if operation.parameters.is_empty() {
        return;
    }
    out.push_str("    parameters: {\n");
    for location in PARAMETER_LOCATIONS {
        let in_location: Vec<&Value> = operation
            .parameters
            .iter()
            .copied()
            .filter(|param| param.get("in").and_then(Value::as_str) == Some(*location))
            .collect();
        if in_location.is_empty() {
            continue;
        }
        let _ = writeln!(out, "      {location}: {{");
        for param in in_location {
            let Some(name) = param.get("name").and_then(Value::as_str) else {
                continue;
            };
            let required = *location == "path"
                || param.get("required").and_then(Value::as_bool) == Some(true);
            // OpenAPI 3 nests the schema; Swagger 2 inlines it except for bodies.
            let schema = param.get("schema").unwrap_or(param);
            push_doc(out, 8, param.get("description"));
            let _ = writeln!(
                out,
                "        {}{}: {};",
                ts_key(name),
                if required { "" } else { "?" },
                render_schema(schema, 8)
            );
        }
        out.push_str("      };\n");
    }
    out.push_str("    };\n");
}

fn render_request_body(out: &mut String, operation: &Operation<'_>) {
    let Some(body) = operation.request_body else {
        return;
    };
    let required = body.get("required").and_then(Value::as_bool) == Some(true);
    let _ = writeln!(
        out,
        "    requestBody{}: {{",
        if required { "" } else { "?" }
    );
    render_content(out, body.get("content"), None, 6);
    out.push_str("    };\n");
}

fn render_responses(out: &mut String, operation: &Operation<'_>) {
    if operation.responses.is_empty() {
        out.push_str("    responses: {};\n");
        return;
    }
    out.push_str("    responses: {\n");
    for (code, response) in &operation.responses {
        push_doc(out, 6, response.get("description"));
        let content = response.get("content");
        let swagger_schema = response.get("schema");
        if content.is_none() && swagger_schema.is_none() {
            let _ = writeln!(out, "      {}: unknown;", ts_key(code));
            continue;
        }
        let _ = writeln!(out, "      {}: {{", ts_key(code));
        render_content(out, content, swagger_schema, 8);
        out.push_str("      };\n");
    }
    out.push_str("    };\n");
}

/// Render a `content` map; a Swagger 2 `schema` is emitted as JSON content.
fn render_content(
    out: &mut String,
    content: Option<&Value>,
    swagger_schema: Option<&Value>,
    indent: usize,
) {
    let pad = " ".repeat(indent);
    let _ = writeln!(out, "{pad}content: {{");
    if let Some(media) = content.and_then(Value::as_object) {
        for (mime, media_type) in media {
            let ty = media_type
                .get("schema")
                .map(|schema| render_schema(schema, indent + 2))
                .unwrap_or_else(|| "unknown".to_string());
            let _ = writeln!(out, "{pad}  {}: {ty};", quote(mime));
        }
    } else if let Some(schema) = swagger_schema {
        let _ = writeln!(
            out,
            "{pad}  \"application/json\": {};",
            render_schema(schema, indent + 2)
        );
    }
    let _ = writeln!(out, "{pad}}};");
}

/// Render a schema as a TypeScript type expression. Multi-line object types
/// are indented relative to `indent`.
pub fn render_schema(schema: &Value, indent: usize) -> String {
    let Some(obj) = schema.as_object() else {
        return match schema {
            Value::Bool(false) => "never".to_string(),
            _ => "unknown".to_string(),
        };
    };

    let ty = if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
        ref_type(reference)
    } else if let Some(members) = obj.get("allOf").and_then(Value::as_array) {
        join_members(members, " & ", indent)
    } else if let Some(members) = obj
        .get("oneOf")
        .or_else(|| obj.get("anyOf"))
        .and_then(Value::as_array)
    {
        join_members(members, " | ", indent)
    } else if let Some(values) = obj.get("enum").and_then(Value::as_array) {
        values.iter().map(literal).collect::<Vec<_>>().join(" | ")
    } else {
        match obj.get("type").and_then(Value::as_str) {
            Some("string") => "string".to_string(),
            Some("integer" | "number") => "number".to_string(),
            Some("boolean") => "boolean".to_string(),
            Some("null") => "null".to_string(),
            Some("array") => array_type(obj, indent),
            Some("object") => object_type(obj, indent),
            None if obj.contains_key("properties") => object_type(obj, indent),
            None if obj.contains_key("items") => array_type(obj, indent),
            _ => "unknown".to_string(),
        }
    };

    if obj.get("nullable").and_then(Value::as_bool) == Some(true) {
        format!("{ty} | null")
    } else {
        ty
    }
}

fn join_members(members: &[Value], separator: &str, indent: usize) -> String {
    if members.is_empty() {
        return "unknown".to_string();
    }
    members
        .iter()
        .map(|member| {
            let ty = render_schema(member, indent);
            if separator == " & " && ty.contains(" | ") {
                format!("({ty})")
            } else {
                ty
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn array_type(obj: &Map<String, Value>, indent: usize) -> String {
    let item = obj
        .get("items")
        .map(|items| render_schema(items, indent))
        .unwrap_or_else(|| "unknown".to_string());
    if item.contains(' ') && !item.starts_with('{') {
        format!("({item})[]")
    } else {
        format!("{item}[]")
    }
}

fn object_type(obj: &Map<String, Value>, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let properties = obj.get("properties").and_then(Value::as_object);
    let additional = match obj.get("additionalProperties") {
        Some(Value::Bool(true)) => Some("unknown".to_string()),
        Some(schema @ Value::Object(map)) if !map.is_empty() => {
            Some(render_schema(schema, indent + 2))
        }
        Some(Value::Object(_)) => Some("unknown".to_string()),
        _ => None,
    };

    let properties = match properties {
        Some(properties) if !properties.is_empty() => properties,
        _ => {
            let value = additional.unwrap_or_else(|| "unknown".to_string());
            return format!("{{ [key: string]: {value} }}");
        }
    };

    let required: Vec<&str> = obj
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut body = String::from("{\n");
    for (name, property) in properties {
        push_doc(&mut body, indent + 2, property.get("description"));
        let _ = writeln!(
            body,
            "{pad}  {}{}: {};",
            ts_key(name),
            if required.contains(&name.as_str()) { "" } else { "?" },
            render_schema(property, indent + 2)
        );
    }
    if let Some(value) = additional {
        let _ = writeln!(body, "{pad}  [key: string]: {value};");
    }
    let _ = write!(body, "{pad}}}");
    body
}

/// `#/components/schemas/Foo` → `components["schemas"]["Foo"]`.
fn ref_type(reference: &str) -> String {
    let Some(pointer) = reference.strip_prefix("#/") else {
        return "unknown".to_string();
    };
    let mut segments = pointer
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"));
    let Some(root) = segments.next() else {
        return "unknown".to_string();
    };
    segments.fold(root, |mut ty, segment| {
        let _ = write!(ty, "[{}]", quote(&segment));
        ty
    })
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(text) => quote(text),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn quote(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

/// Object key: bare when it is an identifier or an integer, quoted otherwise.
fn ts_key(name: &str) -> String {
    let is_identifier = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    let is_integer = !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit());
    if is_identifier || is_integer {
        name.to_string()
    } else {
        quote(name)
    }
}

fn push_doc(out: &mut String, indent: usize, description: Option<&Value>) {
    let Some(text) = description.and_then(Value::as_str) else {
        return;
    };
    let text = text.trim().replace("*/", "*\\/");
    if text.is_empty() {
        return;
    }
    let pad = " ".repeat(indent);
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() == 1 {
        let _ = writeln!(out, "{pad}/** @description {text} */");
        return;
    }
    let _ = writeln!(out, "{pad}/**");
    for (i, line) in lines.iter().enumerate() {
        let line = line.trim_end();
        if i == 0 {
            let _ = writeln!(out, "{pad} * @description {line}");
        } else if line.is_empty() {
            let _ = writeln!(out, "{pad} *");
        } else {
            let _ = writeln!(out, "{pad} * {line}");
        }
    }
    let _ = writeln!(out, "{pad} */");
}
