//! The `Web3Api` class declaration: one static namespace per tag.

use super::{Operation, SchemaIndex};

/// One method line. `options` intersects the query and path parameter types
/// that exist; the promised type is the JSON content of the first declared
/// response when that code is `200`, otherwise `unknown`.
pub fn make_method(operation: &Operation<'_>) -> String {
    let locations = operation.parameter_locations();
    let operations = format!("operations[\"{}\"]", operation.id);

    let options: Vec<String> = ["query", "path"]
        .into_iter()
        .filter(|location| locations.contains(location))
        .map(|location| format!("{operations}[\"parameters\"][\"{location}\"]"))
        .collect();

    let response_code = operation
        .responses
        .first()
        .map_or("200", |(code, _)| *code);
    let result = if response_code == "200" {
        format!("{operations}[\"responses\"][\"{response_code}\"][\"content\"][\"application/json\"]")
    } else {
        "unknown".to_string()
    };

    let option_param = if options.is_empty() {
        String::new()
    } else {
        format!("options: {}", options.join(" & "))
    };

    format!(
        "    {}: ({option_param}) => Promise<{result} & defaultResponse<{result}>>;\n",
        operation.id
    )
}

/// A `static <tag>` object; only the first space of the tag becomes `_`.
pub fn make_tag_object(tag: &str, operations: &[&Operation<'_>]) -> String {
    let safe_tag = tag.replacen(' ', "_", 1);
    let methods: String = operations.iter().map(|op| make_method(op)).collect();
    format!("  static {safe_tag}: {{\n{methods}  }}\n\n")
}

pub fn make_web3_api_class(index: &SchemaIndex<'_>) -> String {
    let mut content = String::from("export default class Web3Api {\n");
    content.push_str(
        "  static initialize: (options: {apiKey?: string, serverUrl?: string, Moralis?: any}) => void;\n",
    );
    content.push('\n');

    for (tag, ids) in &index.tags {
        let operations: Vec<&Operation<'_>> =
            ids.iter().filter_map(|id| index.operation(id)).collect();
        content.push_str(&make_tag_object(tag, &operations));
    }

    content.push_str("}\n");
    content
}
