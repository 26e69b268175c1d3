//! Pure string derivations for environment-qualified names and resource
//! types. No validation or normalization is performed; callers pass display
//! names as authored.

/// Joins a key with an environment tag: `eid("Database", "prod")` is
/// `"Database-prod"`.
pub fn eid(key: &str, env: &str) -> String {
    format!("{key}-{env}")
}

/// Derives a CloudFormation resource type from a `Service.Module` key:
/// `resource_type("S3.Bucket")` is `"AWS::S3::Bucket"`. A key without a
/// dot still gets the `AWS::` prefix.
pub fn resource_type(key: &str) -> String {
    let mut segments = vec!["AWS"];
    segments.extend(key.split('.'));
    segments.join("::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eid_joins_with_hyphen() {
        assert_eq!(eid("Database", "prod"), "Database-prod");
        assert_eq!(eid("", "dev"), "-dev");
    }

    #[test]
    fn test_eid_performs_no_normalization() {
        assert_eq!(eid("My Stack", "Prod "), "My Stack-Prod ");
    }

    #[test]
    fn test_resource_type_joins_segments() {
        assert_eq!(resource_type("S3.Bucket"), "AWS::S3::Bucket");
        assert_eq!(resource_type("SSM.Parameter"), "AWS::SSM::Parameter");
    }

    #[test]
    fn test_resource_type_deep_key() {
        assert_eq!(resource_type("A.B.C"), "AWS::A::B::C");
    }

    #[test]
    fn test_resource_type_without_separator() {
        assert_eq!(resource_type("Bucket"), "AWS::Bucket");
    }
}
