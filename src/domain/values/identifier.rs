use crate::domain::error::DomainError;

/// Validate a table or column name before it is spliced into SQL.
///
/// Accepts ASCII alphanumerics and `_`, not starting with a digit.
pub fn validate_identifier(name: &str) -> Result<(), DomainError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        return Err(DomainError::InvalidInput(format!(
            "Invalid identifier '{name}': use letters, digits and '_'"
        )));
    }
    Ok(())
}

/// Double-quoted identifier, validated first.
pub fn quote_identifier(name: &str) -> Result<String, DomainError> {
    validate_identifier(name)?;
    Ok(format!("\"{name}\""))
}
