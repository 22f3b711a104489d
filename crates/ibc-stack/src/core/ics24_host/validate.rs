use super::error::IdentifierError as Error;

/// Path separator (ie. forward slash '/')
const PATH_SEPARATOR: char = '/';
const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

pub(crate) const MIN_IDENTIFIER_LENGTH: usize = 2;
pub(crate) const MAX_IDENTIFIER_LENGTH: usize = 64;
pub(crate) const MAX_PORT_IDENTIFIER_LENGTH: usize = 128;

/// Default validator function for identifiers.
///
/// A valid identifier is non-empty, free of path separators, within the given
/// length bounds and made only of alphanumerics or `._+-#[]<>`.
pub fn validate_identifier(id: &str, min: usize, max: usize) -> Result<(), Error> {
    if id.is_empty() {
        return Err(Error::Empty);
    }

    if id.contains(PATH_SEPARATOR) {
        return Err(Error::ContainSeparator { id: id.into() });
    }

    if id.len() < min || id.len() > max {
        return Err(Error::InvalidLength {
            id: id.into(),
            length: id.len(),
            min,
            max,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(Error::InvalidCharacter { id: id.into() });
    }

    Ok(())
}

/// Client, connection and channel identifiers are chosen by the caller of the
/// handshake, so only the generic character and length rules apply.
pub fn validate_generic_identifier(id: &str) -> Result<(), Error> {
    validate_identifier(id, MIN_IDENTIFIER_LENGTH, MAX_IDENTIFIER_LENGTH)
}

pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier(id, MIN_IDENTIFIER_LENGTH, MAX_PORT_IDENTIFIER_LENGTH)
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    use super::*;
    use test_log::test;

    #[test]
    fn parse_invalid_port_id_min() {
        // invalid min port id
        let id = validate_port_identifier("p");
        assert!(id.is_err())
    }

    #[test]
    fn parse_invalid_port_id_max() {
        // invalid max port id (test string length is 130 chars)
        let id = validate_port_identifier(
            "9anxkcme6je544d5lnj46zqiiiygfqzf8w4bjecbnyj4lj6s7zlpst67yln64tixp9anxkcme6je544d5lnj46zqiiiygfqzf8w4bjecbnyj4lj6s7zlpst67yln64tixp",
        );
        assert!(id.is_err())
    }

    #[test]
    fn parse_invalid_id_chars() {
        // invalid id chars
        let id = validate_generic_identifier("channel@01");
        assert_eq!(
            id,
            Err(Error::InvalidCharacter {
                id: "channel@01".to_string()
            })
        )
    }

    #[test]
    fn parse_invalid_id_path_separator() {
        // invalid id with path separator
        let id = validate_generic_identifier("id/1");
        assert!(matches!(id, Err(Error::ContainSeparator { .. })))
    }

    #[test]
    fn parse_invalid_id_empty() {
        // invalid id empty
        let id = validate_generic_identifier("");
        assert_eq!(id, Err(Error::Empty))
    }

    #[test]
    fn parse_handshake_test_ids() {
        for id in ["ch1", "ch2", "firstport", "testconnection", "test-client"] {
            assert!(validate_generic_identifier(id).is_ok(), "{id} should be valid");
        }
    }
}
