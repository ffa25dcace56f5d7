//! Per-player quick-mining preferences.

use serde::{Deserialize, Serialize};

/// When quick mining activates on a block break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickMiningMode {
    /// Active only while the player sneaks.
    #[default]
    WhenSneaking,
    /// Active unless the player sneaks.
    UnlessSneaking,
    AlwaysEnabled,
    AlwaysDisabled,
}

/// Which block families quick mining covers for this player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveragePrefs {
    pub leaves: bool,
    pub logs: bool,
    pub wood: bool,
    pub stripped_logs: bool,
    pub stripped_wood: bool,
    pub mushrooms: bool,
    pub ores: bool,
    pub minerals: bool,
    pub crystals: bool,
    pub plants: bool,
    pub crops: bool,
    pub rocks: bool,
    pub soil: bool,
    pub ice: bool,
    pub sculk: bool,
}

impl Default for CoveragePrefs {
    fn default() -> Self {
        Self {
            leaves: true,
            logs: true,
            wood: true,
            stripped_logs: true,
            stripped_wood: true,
            mushrooms: true,
            ores: true,
            minerals: true,
            crystals: true,
            plants: true,
            crops: true,
            rocks: true,
            soil: true,
            ice: true,
            sculk: true,
        }
    }
}

/// Safeguards that stop a run before it does something the player regrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionPrefs {
    /// Never mine the block the player is standing on.
    pub keep_ground: bool,
    /// Abort before a renamed tool would break.
    pub abort_before_named_tool_breaks: bool,
    /// Abort before any tool would break.
    pub abort_before_tool_breaks: bool,
    /// Refuse to break budding amethyst in survival.
    pub keep_budding_amethyst: bool,
}

impl Default for ProtectionPrefs {
    fn default() -> Self {
        Self {
            keep_ground: true,
            abort_before_named_tool_breaks: true,
            abort_before_tool_breaks: false,
            keep_budding_amethyst: true,
        }
    }
}

/// Full per-player preference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPrefs {
    pub mode: QuickMiningMode,
    pub coverage: CoveragePrefs,
    pub protection: ProtectionPrefs,
    /// Deliver loot to the inventory instead of dropping it in the world.
    pub auto_collect: bool,
}

impl Default for PlayerPrefs {
    fn default() -> Self {
        Self {
            mode: QuickMiningMode::default(),
            coverage: CoveragePrefs::default(),
            protection: ProtectionPrefs::default(),
            auto_collect: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = PlayerPrefs::default();
        assert_eq!(prefs.mode, QuickMiningMode::WhenSneaking);
        assert!(prefs.coverage.ores);
        assert!(prefs.coverage.leaves);
        assert!(prefs.protection.keep_ground);
        assert!(prefs.protection.abort_before_named_tool_breaks);
        assert!(!prefs.protection.abort_before_tool_breaks);
        assert!(prefs.auto_collect);
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let prefs: PlayerPrefs =
            serde_json::from_str(r#"{"mode":"always_enabled","coverage":{"ores":false}}"#).unwrap();
        assert_eq!(prefs.mode, QuickMiningMode::AlwaysEnabled);
        assert!(!prefs.coverage.ores);
        assert!(prefs.coverage.leaves);
        assert!(prefs.protection.keep_ground);
    }

    #[test]
    fn mode_roundtrips_through_json() {
        for mode in [
            QuickMiningMode::WhenSneaking,
            QuickMiningMode::UnlessSneaking,
            QuickMiningMode::AlwaysEnabled,
            QuickMiningMode::AlwaysDisabled,
        ] {
            let json = serde_json::to_string(&mode).unwrap();
            let back: QuickMiningMode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, mode);
        }
    }
}
