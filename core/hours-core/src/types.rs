//! Display-ready records handed to the view layer.
//!
//! Seconds are carried alongside the formatted text so a host can sort or
//! chart without re-parsing strings.

use crate::bucket::BucketSet;
use crate::format::format_duration;
use crate::mode::InteractionMode;

/// Time spent in one mode.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ModeDuration {
    pub mode: InteractionMode,
    pub seconds: f64,
    pub text: String,
}

/// Every bucket of one scope, ready to render as a menu.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ScopeSummary {
    pub scope: String,
    pub total_seconds: f64,
    pub total: String,
    pub modes: Vec<ModeDuration>,
}

impl ScopeSummary {
    pub fn from_buckets(scope: &str, buckets: &BucketSet) -> Self {
        ScopeSummary {
            scope: scope.to_string(),
            total_seconds: buckets.total(),
            total: format_duration(buckets.total(), false),
            modes: buckets
                .iter()
                .map(|(mode, seconds)| ModeDuration {
                    mode,
                    seconds,
                    text: format_duration(seconds, false),
                })
                .collect(),
        }
    }
}
