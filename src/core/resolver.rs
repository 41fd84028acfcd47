use crate::core::template::is_single_component;
use crate::domain::model::SubstitutionRecord;
use crate::utils::error::{Result, ScaffoldError};

/// Validates the three raw answers and derives the substitution record.
///
/// Checks run in a fixed order: emptiness, a space in the name, an
/// underscore in the name, a name that is not a single path component
/// (`..`, `a/b`), then the port. The port is kept verbatim so
/// formatting such as leading zeros survives into the rendered project.
pub fn resolve(raw_name: &str, raw_route: &str, raw_port: &str) -> Result<SubstitutionRecord> {
    for (field, value) in [("name", raw_name), ("route", raw_route), ("port", raw_port)] {
        if value.is_empty() {
            return Err(ScaffoldError::MissingInput { field });
        }
    }

    if raw_name.contains(' ') {
        return Err(ScaffoldError::InvalidName {
            name: raw_name.to_string(),
            reason: "contains space",
        });
    }

    if raw_name.contains('_') {
        return Err(ScaffoldError::InvalidName {
            name: raw_name.to_string(),
            reason: "contains underscore",
        });
    }

    // The pill names the project directory and renamed files.
    if !is_single_component(&raw_name.to_lowercase()) {
        return Err(ScaffoldError::InvalidName {
            name: raw_name.to_string(),
            reason: "is not a single path component",
        });
    }

    if raw_port.parse::<u64>().is_err() {
        return Err(ScaffoldError::InvalidPort {
            value: raw_port.to_string(),
        });
    }

    let pill = raw_name.to_lowercase();
    let lower = pill.replace('-', " ");
    let title = title_case(&lower);

    Ok(SubstitutionRecord::new(
        pill,
        title,
        lower,
        raw_route.to_lowercase(),
        raw_port.to_string(),
    ))
}

fn title_case(words: &str) -> String {
    words
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_destination_basic() {
        let record = resolve("Destination-Basic", "Destinations", "9201").unwrap();
        assert_eq!(record.service_name_pill(), "destination-basic");
        assert_eq!(record.service_name_lower(), "destination basic");
        assert_eq!(record.service_name_title(), "Destination Basic");
        assert_eq!(record.route(), "destinations");
        assert_eq!(record.port(), "9201");
    }

    #[test]
    fn test_lower_is_pill_with_spaces() {
        for name in ["a", "multi-part-name", "Trailing-", "x--y"] {
            let record = resolve(name, "r", "1").unwrap();
            assert_eq!(
                record.service_name_lower(),
                record.service_name_pill().replace('-', " ")
            );
            assert_eq!(record, resolve(name, "r", "1").unwrap());
        }
    }

    #[test]
    fn test_rejects_space_in_name() {
        let err = resolve("bad name", "x", "1").unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidName { reason: "contains space", .. }
        ));
    }

    #[test]
    fn test_rejects_underscore_in_name() {
        let err = resolve("bad_name", "x", "1").unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidName { reason: "contains underscore", .. }
        ));
    }

    #[test]
    fn test_space_checked_before_underscore() {
        let err = resolve("bad_name here", "x", "1").unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidName { reason: "contains space", .. }
        ));
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        assert!(matches!(
            resolve("ok", "x", "abc").unwrap_err(),
            ScaffoldError::InvalidPort { .. }
        ));
        assert!(matches!(
            resolve("ok", "x", "-1").unwrap_err(),
            ScaffoldError::InvalidPort { .. }
        ));
    }

    #[test]
    fn test_missing_input_names_field() {
        assert!(matches!(
            resolve("", "x", "1").unwrap_err(),
            ScaffoldError::MissingInput { field: "name" }
        ));
        assert!(matches!(
            resolve("ok", "", "1").unwrap_err(),
            ScaffoldError::MissingInput { field: "route" }
        ));
        assert!(matches!(
            resolve("ok", "x", "").unwrap_err(),
            ScaffoldError::MissingInput { field: "port" }
        ));
    }

    #[test]
    fn test_missing_input_checked_before_name_rules() {
        assert!(matches!(
            resolve("bad name", "", "1").unwrap_err(),
            ScaffoldError::MissingInput { field: "route" }
        ));
    }

    #[test]
    fn test_port_kept_verbatim() {
        let record = resolve("svc", "svc", "08080").unwrap();
        assert_eq!(record.port(), "08080");
    }

    #[test]
    fn test_name_must_be_one_path_component() {
        for name in ["../../escaped", "api/v1", "..", "."] {
            let err = resolve(name, "r", "1").unwrap_err();
            assert!(
                matches!(
                    err,
                    ScaffoldError::InvalidName {
                        reason: "is not a single path component",
                        ..
                    }
                ),
                "{name}"
            );
        }
        // Routes are only rendered into contents and names, not joined.
        assert!(resolve("svc", "api/v1", "1").is_ok());
    }
}
