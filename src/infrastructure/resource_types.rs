//! Resource Type Registry
//!
//! Each supported Terraform resource type is addressed either by one provider
//! ID or by a fixed set of composite fields. The enumeration side records
//! exactly `fields`, and the type's import ID formatter reads them back to
//! build the string `tofu import` expects.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::discovery::{Identity, Instance, RawResource};
use super::error::{ImportError, ImportResult};
use super::identity::CompositeId;

/// Builds a provider import ID from composite fields
pub type ImportIdFormatter = fn(&CompositeId, &str) -> ImportResult<String>;

/// How a resource type is identified
#[derive(Debug, Clone, Copy)]
pub enum IdentityKind {
    /// Addressed by the cloud ID alone
    Single {
        /// The ID format description for import
        id_format: &'static str,
    },
    /// Addressed by several named fields
    Composite {
        fields: &'static [&'static str],
        /// `None` when the provider cannot import this type
        import_id: Option<ImportIdFormatter>,
        id_format: &'static str,
    },
}

/// Identity convention for one Terraform resource type
#[derive(Debug, Clone, Copy)]
pub struct ResourceTypeSpec {
    /// The Terraform resource type (e.g., "aws_instance")
    pub tf_type: &'static str,
    pub description: &'static str,
    pub identity: IdentityKind,
}

impl ResourceTypeSpec {
    const fn single(
        tf_type: &'static str,
        description: &'static str,
        id_format: &'static str,
    ) -> Self {
        Self {
            tf_type,
            description,
            identity: IdentityKind::Single { id_format },
        }
    }

    const fn composite(
        tf_type: &'static str,
        description: &'static str,
        fields: &'static [&'static str],
        import_id: Option<ImportIdFormatter>,
        id_format: &'static str,
    ) -> Self {
        Self {
            tf_type,
            description,
            identity: IdentityKind::Composite {
                fields,
                import_id,
                id_format,
            },
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self.identity, IdentityKind::Composite { .. })
    }

    /// Whether `tofu import` supports this type
    pub fn importable(&self) -> bool {
        match self.identity {
            IdentityKind::Single { .. } => true,
            IdentityKind::Composite { import_id, .. } => import_id.is_some(),
        }
    }

    /// Composite fields recorded for this type (empty for single-key types)
    pub fn fields(&self) -> &'static [&'static str] {
        match self.identity {
            IdentityKind::Single { .. } => &[],
            IdentityKind::Composite { fields, .. } => fields,
        }
    }

    pub fn id_format(&self) -> &'static str {
        match self.identity {
            IdentityKind::Single { id_format } => id_format,
            IdentityKind::Composite { id_format, .. } => id_format,
        }
    }

    /// Build the identity of a raw record, enforcing the type's field set
    pub fn identity_for(&self, record: &RawResource) -> ImportResult<Identity> {
        let fields = self.fields();

        if let Some(extra) = record
            .fields
            .keys()
            .find(|key| !fields.contains(&key.as_str()))
        {
            return Err(ImportError::UnexpectedIdentityField {
                resource_type: self.tf_type.to_string(),
                field: extra.clone(),
            });
        }

        match self.identity {
            IdentityKind::Single { .. } => {
                if record.id.is_empty() {
                    return Err(ImportError::InvalidInput(format!(
                        "{} record has no id",
                        self.tf_type
                    )));
                }

                Ok(Identity::Single(record.id.clone()))
            }
            IdentityKind::Composite { fields, .. } => {
                if let Some(missing) = fields.iter().find(|f| !record.fields.contains_key(**f)) {
                    return Err(ImportError::MissingIdentityField {
                        resource_type: self.tf_type.to_string(),
                        field: missing.to_string(),
                    });
                }

                Ok(Identity::Composite(CompositeId::encode(
                    record.fields.iter().map(|(k, v)| (k.as_str(), v.as_str())),
                )))
            }
        }
    }

    /// The provider import ID for an instance of this type.
    ///
    /// Returns `Ok(None)` for types the provider cannot import.
    pub fn import_id(&self, instance: &Instance) -> ImportResult<Option<String>> {
        match (self.identity, instance.identity()) {
            (IdentityKind::Single { .. }, Identity::Single(id)) => Ok(Some(id.clone())),
            (IdentityKind::Composite { import_id, .. }, Identity::Composite(fields)) => {
                match import_id {
                    Some(format_id) => format_id(fields, self.tf_type).map(Some),
                    None => Ok(None),
                }
            }
            _ => Err(ImportError::InvalidInput(format!(
                "{} does not match the identity convention of {}",
                instance.address(),
                self.tf_type
            ))),
        }
    }
}

/// Look up the identity convention of a resource type
pub fn lookup(tf_type: &str) -> ImportResult<&'static ResourceTypeSpec> {
    RESOURCE_TYPES
        .get(tf_type)
        .ok_or_else(|| ImportError::UnsupportedResourceType {
            resource_type: tf_type.to_string(),
        })
}

/// All supported resource types, sorted
pub fn supported_types() -> Vec<&'static ResourceTypeSpec> {
    let mut specs: Vec<&'static ResourceTypeSpec> = RESOURCE_TYPES.values().collect();
    specs.sort_by_key(|spec| spec.tf_type);
    specs
}

pub fn is_supported(tf_type: &str) -> bool {
    RESOURCE_TYPES.contains_key(tf_type)
}

fn iam_group_policy_id(id: &CompositeId, tf_type: &str) -> ImportResult<String> {
    let group = id.require(tf_type, "group_name")?;
    let policy = id.require(tf_type, "policy_name")?;
    Ok(format!("{}:{}", group, policy))
}

fn iam_role_policy_id(id: &CompositeId, tf_type: &str) -> ImportResult<String> {
    let role = id.require(tf_type, "role_name")?;
    let policy = id.require(tf_type, "policy_name")?;
    Ok(format!("{}:{}", role, policy))
}

fn iam_role_policy_attachment_id(id: &CompositeId, tf_type: &str) -> ImportResult<String> {
    let role = id.require(tf_type, "role_name")?;
    let arn = id.require(tf_type, "policy_arn")?;
    Ok(format!("{}/{}", role, arn))
}

fn iam_user_policy_attachment_id(id: &CompositeId, tf_type: &str) -> ImportResult<String> {
    let user = id.require(tf_type, "user_name")?;
    let arn = id.require(tf_type, "policy_arn")?;
    Ok(format!("{}/{}", user, arn))
}

fn route_table_association_id(id: &CompositeId, tf_type: &str) -> ImportResult<String> {
    let subnet = id.require(tf_type, "subnet_id")?;
    let route_table = id.require(tf_type, "route_table_id")?;
    Ok(format!("{}/{}", subnet, route_table))
}

fn network_acl_rule_id(id: &CompositeId, tf_type: &str) -> ImportResult<String> {
    let acl = id.require(tf_type, "network_acl_id")?;
    let rule = id.require(tf_type, "rule_number")?;
    let protocol = id.require(tf_type, "protocol")?;
    let egress = id.require(tf_type, "egress")?;
    Ok(format!("{}:{}:{}:{}", acl, rule, protocol, egress))
}

/// Build the resource type registry
fn build_resource_type_map() -> HashMap<&'static str, ResourceTypeSpec> {
    let specs = [
        // EC2 and networking
        ResourceTypeSpec::single("aws_instance", "EC2 instance", "Instance ID"),
        ResourceTypeSpec::single("aws_vpc", "VPC", "VPC ID"),
        ResourceTypeSpec::single("aws_subnet", "VPC subnet", "Subnet ID"),
        ResourceTypeSpec::single("aws_security_group", "Security group", "Security Group ID"),
        ResourceTypeSpec::single("aws_route_table", "Route table", "Route Table ID"),
        ResourceTypeSpec::single("aws_network_acl", "Network ACL", "Network ACL ID"),
        ResourceTypeSpec::composite(
            "aws_route_table_association",
            "Subnet to route table association",
            &["subnet_id", "route_table_id"],
            Some(route_table_association_id),
            "subnet_id/route_table_id",
        ),
        ResourceTypeSpec::composite(
            "aws_network_acl_rule",
            "Network ACL rule",
            &["network_acl_id", "rule_number", "protocol", "egress"],
            Some(network_acl_rule_id),
            "network_acl_id:rule_number:protocol:egress",
        ),
        // Storage and messaging
        ResourceTypeSpec::single("aws_s3_bucket", "S3 bucket", "Bucket name"),
        ResourceTypeSpec::single("aws_sqs_queue", "SQS queue", "Queue URL"),
        ResourceTypeSpec::single("aws_sns_topic", "SNS topic", "Topic ARN"),
        // IAM
        ResourceTypeSpec::single("aws_iam_role", "IAM role", "Role name"),
        ResourceTypeSpec::single("aws_iam_user", "IAM user", "User name"),
        ResourceTypeSpec::single("aws_iam_group", "IAM group", "Group name"),
        ResourceTypeSpec::single("aws_iam_policy", "IAM managed policy", "Policy ARN"),
        ResourceTypeSpec::composite(
            "aws_iam_group_policy",
            "Inline IAM group policy",
            &["group_name", "policy_name"],
            Some(iam_group_policy_id),
            "group_name:policy_name",
        ),
        ResourceTypeSpec::composite(
            "aws_iam_role_policy",
            "Inline IAM role policy",
            &["role_name", "policy_name"],
            Some(iam_role_policy_id),
            "role_name:policy_name",
        ),
        ResourceTypeSpec::composite(
            "aws_iam_role_policy_attachment",
            "Managed policy attached to a role",
            &["role_name", "policy_arn"],
            Some(iam_role_policy_attachment_id),
            "role_name/policy_arn",
        ),
        ResourceTypeSpec::composite(
            "aws_iam_user_policy_attachment",
            "Managed policy attached to a user",
            &["user_name", "policy_arn"],
            Some(iam_user_policy_attachment_id),
            "user_name/policy_arn",
        ),
        // Auto Scaling
        ResourceTypeSpec::single("aws_autoscaling_group", "Auto Scaling group", "Group name"),
        ResourceTypeSpec::composite(
            "aws_autoscaling_notification",
            "Auto Scaling group notification",
            &["group_name", "topic_arn"],
            None,
            "not importable",
        ),
    ];

    specs.into_iter().map(|spec| (spec.tf_type, spec)).collect()
}

lazy_static! {
    static ref RESOURCE_TYPES: HashMap<&'static str, ResourceTypeSpec> = build_resource_type_map();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config_generator::{ConfigGenerator, GeneratorConfig};
    use crate::infrastructure::workflow::ImportPlan;
    use std::collections::BTreeSet;

    fn composite_instance(spec: &ResourceTypeSpec, fields: &[&str]) -> Instance {
        let id = CompositeId::encode(fields.iter().map(|f| (*f, format!("{}-value", f))));
        Instance::new(spec.tf_type, "sample", Identity::Composite(id))
    }

    fn listing_for(instance: Instance) -> serde_json::Value {
        let plan = ImportPlan {
            source: "inventory.yaml".to_string(),
            instances: vec![instance],
            links: Vec::new(),
            unresolved: Vec::new(),
            skipped_types: Vec::new(),
        };
        let listing = ConfigGenerator::new(GeneratorConfig::default())
            .render_listing(&plan)
            .unwrap();

        serde_json::from_str(&listing).unwrap()
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        assert!(lookup("aws_instance").is_ok());
        assert!(matches!(
            lookup("aws_kinesis_firehose_delivery_stream"),
            Err(ImportError::UnsupportedResourceType { .. })
        ));
        assert!(is_supported("aws_iam_group_policy"));
    }

    #[test]
    fn test_supported_types_sorted() {
        let types: Vec<&str> = supported_types().iter().map(|s| s.tf_type).collect();
        let mut sorted = types.clone();
        sorted.sort_unstable();

        assert_eq!(types, sorted);
        assert!(types.contains(&"aws_s3_bucket"));
    }

    #[test]
    fn test_every_composite_field_is_written_and_read() {
        for spec in supported_types().into_iter().filter(|s| s.is_composite()) {
            let IdentityKind::Composite {
                fields, import_id, ..
            } = spec.identity
            else {
                continue;
            };

            let declared: BTreeSet<&str> = fields.iter().copied().collect();
            assert_eq!(declared.len(), fields.len(), "{} repeats a field", spec.tf_type);

            // Without an import ID the listing is the only reader
            if import_id.is_none() {
                let listing = listing_for(composite_instance(spec, fields));
                for field in fields {
                    assert_eq!(
                        listing["instances"][0]["composite_id"][*field],
                        format!("{}-value", field),
                        "{} never lists {}",
                        spec.tf_type,
                        field
                    );
                }
                continue;
            }

            // Exactly the written fields are enough to build the import ID
            let full = composite_instance(spec, fields);
            let import_id = spec.import_id(&full).unwrap().unwrap();
            for field in fields {
                assert!(
                    import_id.contains(&format!("{}-value", field)),
                    "{} never reads {}",
                    spec.tf_type,
                    field
                );
            }

            // Every written field is required by the consumer
            for field in fields {
                let remaining: Vec<&str> =
                    fields.iter().copied().filter(|f| f != field).collect();
                let partial = composite_instance(spec, &remaining);

                match spec.import_id(&partial) {
                    Err(ImportError::MissingIdentityField { field: missing, .. }) => {
                        assert_eq!(missing, *field, "{}", spec.tf_type);
                    }
                    other => panic!("{} without {}: {:?}", spec.tf_type, field, other),
                }
            }
        }
    }

    #[test]
    fn test_group_policy_import_id() {
        let spec = lookup("aws_iam_group_policy").unwrap();
        let instance = Instance::new(
            spec.tf_type,
            "admins_inline",
            Identity::Composite(CompositeId::encode([
                ("group_name", "admins"),
                ("policy_name", "inline"),
            ])),
        );

        assert_eq!(spec.import_id(&instance).unwrap(), Some("admins:inline".to_string()));
    }

    #[test]
    fn test_network_acl_rule_import_id() {
        let spec = lookup("aws_network_acl_rule").unwrap();
        let record = RawResource::new(spec.tf_type, "")
            .with_name("allow-https")
            .with_field("network_acl_id", "acl-1")
            .with_field("rule_number", "100")
            .with_field("protocol", "6")
            .with_field("egress", "false");
        let identity = spec.identity_for(&record).unwrap();
        let instance = Instance::new(spec.tf_type, "allow_https", identity);

        assert_eq!(
            spec.import_id(&instance).unwrap(),
            Some("acl-1:100:6:false".to_string())
        );
    }

    #[test]
    fn test_single_identity_requires_id() {
        let spec = lookup("aws_instance").unwrap();
        let record = RawResource::new("aws_instance", "").with_name("web");

        assert!(matches!(
            spec.identity_for(&record),
            Err(ImportError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_single_identity_rejects_fields() {
        let spec = lookup("aws_instance").unwrap();
        let record = RawResource::new("aws_instance", "i-1").with_field("subnet_id", "subnet-1");

        assert!(matches!(
            spec.identity_for(&record),
            Err(ImportError::UnexpectedIdentityField { .. })
        ));
    }

    #[test]
    fn test_composite_identity_rejects_missing_and_orphan_fields() {
        let spec = lookup("aws_route_table_association").unwrap();

        let missing = RawResource::new(spec.tf_type, "").with_field("subnet_id", "subnet-1");
        match spec.identity_for(&missing) {
            Err(ImportError::MissingIdentityField { field, .. }) => {
                assert_eq!(field, "route_table_id");
            }
            other => panic!("unexpected: {:?}", other),
        }

        let orphan = RawResource::new(spec.tf_type, "")
            .with_field("subnet_id", "subnet-1")
            .with_field("route_table_id", "rtb-1")
            .with_field("gateway_id", "igw-1");
        match spec.identity_for(&orphan) {
            Err(ImportError::UnexpectedIdentityField { field, .. }) => {
                assert_eq!(field, "gateway_id");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_composite_identity_ignores_record_id() {
        let spec = lookup("aws_iam_role_policy_attachment").unwrap();
        let record = RawResource::new(spec.tf_type, "ignored-id")
            .with_field("role_name", "deployer")
            .with_field("policy_arn", "arn:aws:iam::aws:policy/ReadOnlyAccess");

        let identity = spec.identity_for(&record).unwrap();
        let instance = Instance::new(spec.tf_type, "deployer", identity);

        assert_eq!(instance.id(), None);
        assert_eq!(
            spec.import_id(&instance).unwrap(),
            Some("deployer/arn:aws:iam::aws:policy/ReadOnlyAccess".to_string())
        );
    }

    #[test]
    fn test_non_importable_type() {
        let spec = lookup("aws_autoscaling_notification").unwrap();
        let instance = composite_instance(spec, spec.fields());

        assert!(!spec.importable());
        assert_eq!(spec.import_id(&instance).unwrap(), None);
    }

    #[test]
    fn test_identity_mismatch_is_rejected() {
        let spec = lookup("aws_iam_group_policy").unwrap();
        let instance = Instance::new(spec.tf_type, "x", Identity::Single("x".to_string()));

        assert!(matches!(
            spec.import_id(&instance),
            Err(ImportError::InvalidInput(_))
        ));
    }
}
