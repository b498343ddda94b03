use std::fmt;

/// Error types for import planning
#[derive(Debug)]
pub enum ImportError {
    /// Resource type has no identity convention registered
    UnsupportedResourceType { resource_type: String },

    /// A composite identity field the resource type requires was never recorded
    MissingIdentityField {
        resource_type: String,
        field: String,
    },

    /// A composite identity field was recorded that the resource type never reads
    UnexpectedIdentityField {
        resource_type: String,
        field: String,
    },

    /// Inventory file could not be parsed
    ConfigParse(String),

    /// File system operation failed
    FileSystem(String),

    /// Invalid input or parameter
    InvalidInput(String),

    /// General I/O error
    Io(std::io::Error),

    /// Serialization error
    Serialization(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::UnsupportedResourceType { resource_type } => {
                write!(f, "Unsupported resource type '{}'", resource_type)
            }
            ImportError::MissingIdentityField {
                resource_type,
                field,
            } => {
                write!(
                    f,
                    "Missing identity field '{}' for resource type '{}'",
                    field, resource_type
                )
            }
            ImportError::UnexpectedIdentityField {
                resource_type,
                field,
            } => {
                write!(
                    f,
                    "Unexpected identity field '{}' for resource type '{}'",
                    field, resource_type
                )
            }
            ImportError::ConfigParse(msg) => {
                write!(f, "Failed to parse inventory: {}", msg)
            }
            ImportError::FileSystem(msg) => {
                write!(f, "File system error: {}", msg)
            }
            ImportError::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
            ImportError::Io(err) => {
                write!(f, "I/O error: {}", err)
            }
            ImportError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err)
    }
}

impl From<serde_yaml::Error> for ImportError {
    fn from(err: serde_yaml::Error) -> Self {
        ImportError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Serialization(err.to_string())
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = ImportError::MissingIdentityField {
            resource_type: "aws_iam_group_policy".to_string(),
            field: "policy_name".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Missing identity field 'policy_name' for resource type 'aws_iam_group_policy'"
        );
    }

    #[test]
    fn test_yaml_error_becomes_config_parse() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let err: ImportError = yaml_err.into();

        assert!(matches!(err, ImportError::ConfigParse(_)));
        assert!(err.to_string().starts_with("Failed to parse inventory"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err: ImportError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();

        assert!(err.source().is_some());
    }
}
