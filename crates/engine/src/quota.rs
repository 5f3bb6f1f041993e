//! Storage-quota watch: a separate periodic task that parses the
//! adapter's login-banner-derived storage stats and logs an error for
//! any partition over its configured threshold.

use rerun_adapters::StorageStats;

/// Checks every `(partition, data|files)` quota against `warn_percent`
/// and emits a `tracing::error!` for anything over it. Never fails:
/// `get_storage_stats` already degrades to an empty map on parse
/// failure.
pub fn check_storage_quota(stats: &StorageStats, warn_percent: f64) {
    for (partition, partition_stats) in stats {
        if let Some(quota) = partition_stats.data {
            if quota.percent_used > warn_percent {
                tracing::error!(
                    partition = %partition,
                    kind = "data",
                    percent_used = quota.percent_used,
                    threshold = warn_percent,
                    "storage quota threshold exceeded"
                );
            }
        }
        if let Some(quota) = partition_stats.files {
            if quota.percent_used > warn_percent {
                tracing::error!(
                    partition = %partition,
                    kind = "files",
                    percent_used = quota.percent_used,
                    threshold = warn_percent,
                    "storage quota threshold exceeded"
                );
            }
        }
    }
}
