//! Partitions, regions and DNS helpers

pub const CHINA_PARTITION_ID: &str = "aws-cn"; // AWS China partition.
pub const ISO_PARTITION_ID: &str = "aws-iso"; // AWS ISO (US) partition.
pub const ISOB_PARTITION_ID: &str = "aws-iso-b"; // AWS ISOB (US) partition.
pub const ISOE_PARTITION_ID: &str = "aws-iso-e"; // AWS ISOE (Europe) partition.
pub const ISOF_PARTITION_ID: &str = "aws-iso-f"; // AWS ISOF partition.
pub const STANDARD_PARTITION_ID: &str = "aws"; // AWS Standard partition.
pub const US_GOV_CLOUD_PARTITION_ID: &str = "aws-us-gov"; // AWS GovCloud (US) partition.

// AWS Standard partition's regions.
pub const GLOBAL_REGION_ID: &str = "aws-global";
pub const AF_SOUTH_1_REGION_ID: &str = "af-south-1"; // Africa (Cape Town).
pub const AP_EAST_1_REGION_ID: &str = "ap-east-1"; // Asia Pacific (Hong Kong).
pub const AP_NORTHEAST_1_REGION_ID: &str = "ap-northeast-1"; // Asia Pacific (Tokyo).
pub const AP_NORTHEAST_2_REGION_ID: &str = "ap-northeast-2"; // Asia Pacific (Seoul).
pub const AP_NORTHEAST_3_REGION_ID: &str = "ap-northeast-3"; // Asia Pacific (Osaka).
pub const AP_SOUTH_1_REGION_ID: &str = "ap-south-1"; // Asia Pacific (Mumbai).
pub const AP_SOUTH_2_REGION_ID: &str = "ap-south-2"; // Asia Pacific (Hyderabad).
pub const AP_SOUTHEAST_1_REGION_ID: &str = "ap-southeast-1"; // Asia Pacific (Singapore).
pub const AP_SOUTHEAST_2_REGION_ID: &str = "ap-southeast-2"; // Asia Pacific (Sydney).
pub const AP_SOUTHEAST_3_REGION_ID: &str = "ap-southeast-3"; // Asia Pacific (Jakarta).
pub const AP_SOUTHEAST_4_REGION_ID: &str = "ap-southeast-4"; // Asia Pacific (Melbourne).
pub const CA_CENTRAL_1_REGION_ID: &str = "ca-central-1"; // Canada (Central).
pub const CA_WEST_1_REGION_ID: &str = "ca-west-1"; // Canada West (Calgary).
pub const EU_CENTRAL_1_REGION_ID: &str = "eu-central-1"; // Europe (Frankfurt).
pub const EU_CENTRAL_2_REGION_ID: &str = "eu-central-2"; // Europe (Zurich).
pub const EU_NORTH_1_REGION_ID: &str = "eu-north-1"; // Europe (Stockholm).
pub const EU_SOUTH_1_REGION_ID: &str = "eu-south-1"; // Europe (Milan).
pub const EU_SOUTH_2_REGION_ID: &str = "eu-south-2"; // Europe (Spain).
pub const EU_WEST_1_REGION_ID: &str = "eu-west-1"; // Europe (Ireland).
pub const EU_WEST_2_REGION_ID: &str = "eu-west-2"; // Europe (London).
pub const EU_WEST_3_REGION_ID: &str = "eu-west-3"; // Europe (Paris).
pub const IL_CENTRAL_1_REGION_ID: &str = "il-central-1"; // Israel (Tel Aviv).
pub const ME_CENTRAL_1_REGION_ID: &str = "me-central-1"; // Middle East (UAE).
pub const ME_SOUTH_1_REGION_ID: &str = "me-south-1"; // Middle East (Bahrain).
pub const SA_EAST_1_REGION_ID: &str = "sa-east-1"; // South America (Sao Paulo).
pub const US_EAST_1_REGION_ID: &str = "us-east-1"; // US East (N. Virginia).
pub const US_EAST_2_REGION_ID: &str = "us-east-2"; // US East (Ohio).
pub const US_WEST_1_REGION_ID: &str = "us-west-1"; // US West (N. California).
pub const US_WEST_2_REGION_ID: &str = "us-west-2"; // US West (Oregon).

// AWS China partition's regions.
pub const CN_NORTH_1_REGION_ID: &str = "cn-north-1"; // China (Beijing).
pub const CN_NORTHWEST_1_REGION_ID: &str = "cn-northwest-1"; // China (Ningxia).

// AWS GovCloud (US) partition's regions.
pub const US_GOV_EAST_1_REGION_ID: &str = "us-gov-east-1"; // AWS GovCloud (US-East).
pub const US_GOV_WEST_1_REGION_ID: &str = "us-gov-west-1"; // AWS GovCloud (US-West).

// AWS ISO (US) partition's regions.
pub const US_ISO_EAST_1_REGION_ID: &str = "us-iso-east-1"; // US ISO East.
pub const US_ISO_WEST_1_REGION_ID: &str = "us-iso-west-1"; // US ISO WEST.

// AWS ISOB (US) partition's regions.
pub const US_ISOB_EAST_1_REGION_ID: &str = "us-isob-east-1"; // US ISOB East (Ohio).

/// DNS suffix of a partition. An empty partition has no suffix; unknown
/// partitions resolve to the standard suffix.
pub fn dns_suffix_for_partition(partition: &str) -> &'static str {
    match partition {
        "" => "",
        CHINA_PARTITION_ID => "amazonaws.com.cn",
        ISO_PARTITION_ID => "c2s.ic.gov",
        ISOB_PARTITION_ID => "sc2s.sgov.gov",
        ISOE_PARTITION_ID => "cloud.adc-e.uk",
        ISOF_PARTITION_ID => "csp.hci.ic.gov",
        _ => "amazonaws.com",
    }
}

/// Partition a region belongs to. Regions not listed explicitly are assumed
/// to be in the standard partition.
pub fn partition_for_region(region: &str) -> &'static str {
    match region {
        "" => "",
        CN_NORTH_1_REGION_ID | CN_NORTHWEST_1_REGION_ID => CHINA_PARTITION_ID,
        US_ISO_EAST_1_REGION_ID | US_ISO_WEST_1_REGION_ID => ISO_PARTITION_ID,
        US_ISOB_EAST_1_REGION_ID => ISOB_PARTITION_ID,
        US_GOV_EAST_1_REGION_ID | US_GOV_WEST_1_REGION_ID => US_GOV_CLOUD_PARTITION_ID,
        _ => STANDARD_PARTITION_ID,
    }
}

/// Switch a DNS hostname to reverse DNS and vice-versa.
pub fn reverse_dns(hostname: &str) -> String {
    hostname.split('.').rev().collect::<Vec<_>>().join(".")
}
