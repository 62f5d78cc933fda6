//! Service identifiers
//!
//! Provider package names are the keys of [`ServiceNames`](crate::ServiceNames).
//! Endpoint IDs are the hostname prefixes the services answer on.

// Provider packages.
pub const ACCESS_ANALYZER: &str = "accessanalyzer";
pub const ACM: &str = "acm";
pub const AMP: &str = "amp";
pub const API_GATEWAY: &str = "apigateway";
pub const AUTO_SCALING: &str = "autoscaling";
pub const CE: &str = "ce";
pub const CLOUD_FORMATION: &str = "cloudformation";
pub const CLOUD_WATCH: &str = "cloudwatch";
pub const DYNAMO_DB: &str = "dynamodb";
pub const EC2: &str = "ec2";
pub const IAM: &str = "iam";
pub const KMS: &str = "kms";
pub const LAMBDA: &str = "lambda";
pub const LOGS: &str = "logs";
pub const ROUTE53: &str = "route53";
pub const S3: &str = "s3";
pub const SNS: &str = "sns";
pub const SQS: &str = "sqs";
pub const STS: &str = "sts";
pub const VERIFIED_PERMISSIONS: &str = "verifiedpermissions";

// Endpoint IDs not exposed by the AWS SDK for Rust.
pub const ACCESS_ANALYZER_ENDPOINT_ID: &str = "access-analyzer";
pub const ACM_ENDPOINT_ID: &str = "acm";
pub const AMP_ENDPOINT_ID: &str = "aps";
pub const CLOUD_WATCH_LOGS_ENDPOINT_ID: &str = "logs";
pub const LAMBDA_ENDPOINT_ID: &str = "lambda";
pub const S3_ENDPOINT_ID: &str = "s3";
pub const SNS_ENDPOINT_ID: &str = "sns";
pub const SQS_ENDPOINT_ID: &str = "sqs";
pub const STS_ENDPOINT_ID: &str = "sts";
pub const VERIFIED_PERMISSIONS_ENDPOINT_ID: &str = "verifiedpermissions";
