//! Configuration keys, environment variable names and restore policy values
//! shared by the object store and the restore action.

/// Host configuration key carrying the COS region, e.g. `ap-guangzhou`.
pub const REGION_KEY: &str = "region";

/// Host configuration key selecting the endpoint scheme.
pub const INSECURE_SKIP_TLS_VERIFY_KEY: &str = "insecureSkipTLSVerify";

/// Every key the host configuration map may carry.
pub const RECOGNIZED_CONFIG_KEYS: [&str; 2] = [REGION_KEY, INSECURE_SKIP_TLS_VERIFY_KEY];

/// Names an optional `KEY=VALUE` file whose entries override the process environment.
pub const CREDENTIALS_FILE_ENV: &str = "TENCENT_CREDENTIALS_FILE";

pub const SECRET_ID_ENV: &str = "TENCENT_CLOUD_SECRETID";
pub const SECRET_KEY_ENV: &str = "TENCENT_CLOUD_SECRETKEY";

/// Regional COS service endpoint; buckets are addressed as its subdomains.
pub const DEFAULT_ENDPOINT_TEMPLATE: &str = "cos.{region}.myqcloud.com";

/// Response header COS uses to identify a request in its own logs.
pub const REQUEST_ID_HEADER: &str = "x-cos-request-id";

pub const KIND_KEY: &str = "kind";
pub const PERSISTENT_VOLUME_KIND: &str = "PersistentVolume";
pub const PERSISTENT_VOLUME_CLAIM_KIND: &str = "PersistentVolumeClaim";

/// Smallest volume COS-backed disks accept, in bytes (10Gi).
pub const MIN_VOLUME_SIZE_BYTES: i64 = 10_737_418_240;
pub const MIN_VOLUME_SIZE: &str = "10Gi";

/// Annotation stamped on every volume manifest the restore action handled.
pub const RESTORE_ANNOTATION: &str = "velero.io/tencentcloud-restore-plugin";
pub const RESTORE_ANNOTATION_VALUE: &str = "1";
