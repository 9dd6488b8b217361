use fairsim_core::config::{env_flag, env_parse};
use fairsim_tree::{HeapType, TimelineKind};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Scheduler configuration, typically parsed from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Ready-queue backend.
    #[serde(default)]
    pub timeline: TimelineKind,
    /// `max` hands out the largest vruntime first, inverting the policy.
    #[serde(default)]
    pub heap_type: HeapType,
    /// Validate the timeline's invariants after every tick.
    #[serde(default)]
    pub verify_invariants: bool,
    /// Keep a `TickRecord` per tick in the results.
    #[serde(default = "default_record_ticks")]
    pub record_ticks: bool,
}

fn default_record_ticks() -> bool { true }

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timeline: TimelineKind::default(),
            heap_type: HeapType::default(),
            verify_invariants: false,
            record_ticks: default_record_ticks(),
        }
    }
}

impl SchedulerConfig {
    pub fn with_timeline(timeline: TimelineKind) -> Self {
        Self {
            timeline,
            ..Self::default()
        }
    }

    /// Build from `FAIRSIM_TIMELINE`, `FAIRSIM_HEAP`, `FAIRSIM_VERIFY` and
    /// `FAIRSIM_RECORD_TICKS` (call `load_dotenv()` first).
    pub fn from_env() -> Result<Self, SchedulerError> {
        let defaults = Self::default();
        Ok(Self {
            timeline: env_parse("TIMELINE")?.unwrap_or(defaults.timeline),
            heap_type: env_parse("HEAP")?.unwrap_or(defaults.heap_type),
            verify_invariants: env_flag("VERIFY", defaults.verify_invariants),
            record_ticks: env_flag("RECORD_TICKS", defaults.record_ticks),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_config_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.timeline, TimelineKind::RedBlack);
        assert_eq!(config.heap_type, HeapType::Min);
        assert!(!config.verify_invariants);
        assert!(config.record_ticks);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{"timeline": "heaparray", "verify_invariants": true}"#).unwrap();
        assert_eq!(config.timeline, TimelineKind::HeapArray);
        assert!(config.verify_invariants);
        assert!(config.record_ticks);
    }

    #[test]
    fn unknown_timeline_is_rejected() {
        let err = serde_json::from_str::<SchedulerConfig>(r#"{"timeline": "avl"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn from_env_reads_prefixed_keys() {
        std::env::set_var("FAIRSIM_TIMELINE", "heaptree");
        std::env::set_var("FAIRSIM_VERIFY", "yes");
        let config = SchedulerConfig::from_env().unwrap();
        assert_eq!(config.timeline, TimelineKind::HeapTree);
        assert!(config.verify_invariants);

        std::env::set_var("FAIRSIM_TIMELINE", "splay");
        let err = SchedulerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("FAIRSIM_TIMELINE"), "{}", err);

        std::env::remove_var("FAIRSIM_TIMELINE");
        std::env::remove_var("FAIRSIM_VERIFY");
    }
}
