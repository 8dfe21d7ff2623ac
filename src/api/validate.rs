use std::collections::HashMap;
use std::net::Ipv4Addr;

/// A query string that passed validation.
#[derive(Debug, Clone)]
pub struct ValidRequest {
    pub ip: String,
    pub path: String,
}

/// Schema property declaration order; also the order required-property
/// errors are reported in.
const PROPERTIES: [&str; 2] = ["ip", "path"];

/// Validate the `get-file` query parameters.
///
/// All violations are collected, not just the first. Message wording and
/// report order match jsonschema Draft4 output for the schema
/// `{ip: string/ipv4, path: string/minLength 1, additionalProperties: false,
/// required: [ip, path]}`: per-property value errors first (ip, then path),
/// then unexpected properties, then missing required properties.
pub fn validate_query(params: &HashMap<String, String>) -> Result<ValidRequest, Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ip) = params.get("ip") {
        if ip.parse::<Ipv4Addr>().is_err() {
            errors.push(format!("'{ip}' is not a 'ipv4'"));
        }
    }
    if let Some(path) = params.get("path") {
        if path.is_empty() {
            errors.push(format!("'{path}' is too short"));
        }
    }

    let mut extras: Vec<&str> = params
        .keys()
        .map(String::as_str)
        .filter(|k| !PROPERTIES.contains(k))
        .collect();
    if !extras.is_empty() {
        extras.sort_unstable();
        let listed = extras
            .iter()
            .map(|e| format!("'{e}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let verb = if extras.len() == 1 { "was" } else { "were" };
        errors.push(format!(
            "Additional properties are not allowed ({listed} {verb} unexpected)"
        ));
    }

    for prop in PROPERTIES {
        if !params.contains_key(prop) {
            errors.push(format!("'{prop}' is a required property"));
        }
    }

    match (params.get("ip"), params.get("path")) {
        (Some(ip), Some(path)) if errors.is_empty() => Ok(ValidRequest {
            ip: ip.clone(),
            path: path.clone(),
        }),
        _ => Err(errors),
    }
}
