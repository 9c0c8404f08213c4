//! Parsing of comma-separated, optionally qualified name lists such as
//! `orders.id, users.id, created_at`.

use model::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Bare(String),
    Qualified { qualifier: String, name: String },
}

/// Splits `input` on commas and each entry on `qualifier`.
///
/// Empty entries (trailing or doubled commas) are dropped. Whitespace and
/// surrounding quote characters are trimmed from every part. An entry with
/// more than two parts, or with an empty part, is `MalformedSymbol`.
pub fn parse_symbol_list(input: &str, qualifier: char) -> Result<Vec<Symbol>, ValidationError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_symbol(entry, qualifier))
        .collect()
}

fn parse_symbol(entry: &str, qualifier: char) -> Result<Symbol, ValidationError> {
    let parts: Vec<&str> = entry.split(qualifier).map(trim_part).collect();

    if parts.iter().any(|p| p.is_empty()) {
        return Err(ValidationError::MalformedSymbol(entry.to_string()));
    }

    match parts.as_slice() {
        [name] => Ok(Symbol::Bare(name.to_string())),
        [qualifier, name] => Ok(Symbol::Qualified {
            qualifier: qualifier.to_string(),
            name: name.to_string(),
        }),
        _ => Err(ValidationError::MalformedSymbol(entry.to_string())),
    }
}

fn trim_part(part: &str) -> &str {
    part.trim().trim_matches(|c| c == '\'' || c == '"')
}
