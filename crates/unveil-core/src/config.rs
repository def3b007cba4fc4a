use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ripple: RippleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Reveal scheduling defaults plus per-group overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Visible fraction an element must reach before it reveals (0.0-1.0]
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Delay added per stagger index, in milliseconds
    #[serde(default = "default_stagger_unit")]
    pub stagger_unit_ms: i64,
    /// Start with reduced motion active (skips all reveal timers)
    #[serde(default)]
    pub reduced_motion: bool,
    /// Overrides keyed by group name (e.g. "sections", "chef")
    #[serde(default = "default_groups")]
    pub groups: BTreeMap<String, GroupConfig>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: default_visibility_threshold(),
            stagger_unit_ms: default_stagger_unit(),
            reduced_motion: false,
            groups: default_groups(),
        }
    }
}

impl RevealConfig {
    /// Resolve the schedule for a group, falling back to the global defaults
    pub fn schedule_for(&self, group: &str) -> ScheduleConfig {
        let overrides = self.groups.get(group);
        ScheduleConfig {
            visibility_threshold: overrides
                .and_then(|g| g.visibility_threshold)
                .unwrap_or(self.visibility_threshold),
            stagger_unit_ms: overrides
                .and_then(|g| g.stagger_unit_ms)
                .unwrap_or(self.stagger_unit_ms),
            reduced_motion: self.reduced_motion,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger_unit_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility_threshold: Option<f64>,
}

/// Per-registration reveal schedule.
///
/// Values are stored as read from configuration; use [`ScheduleConfig::sanitized`]
/// before scheduling so out-of-range input is clamped instead of rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub visibility_threshold: f64,
    pub stagger_unit_ms: i64,
    pub reduced_motion: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: default_visibility_threshold(),
            stagger_unit_ms: default_stagger_unit(),
            reduced_motion: false,
        }
    }
}

/// Smallest threshold accepted; (0, 1] excludes zero itself
pub const MIN_VISIBILITY_THRESHOLD: f64 = 0.01;

impl ScheduleConfig {
    /// Clamp threshold into (0, 1] and stagger to non-negative
    pub fn sanitized(&self) -> Self {
        let threshold = if !self.visibility_threshold.is_finite() {
            warn!(
                "Non-finite visibility threshold {}, using {}",
                self.visibility_threshold,
                default_visibility_threshold()
            );
            default_visibility_threshold()
        } else if self.visibility_threshold <= 0.0 {
            warn!(
                "Visibility threshold {} is not positive, clamping to {}",
                self.visibility_threshold, MIN_VISIBILITY_THRESHOLD
            );
            MIN_VISIBILITY_THRESHOLD
        } else if self.visibility_threshold > 1.0 {
            warn!(
                "Visibility threshold {} exceeds 1.0, clamping",
                self.visibility_threshold
            );
            1.0
        } else {
            self.visibility_threshold
        };

        if self.stagger_unit_ms < 0 {
            warn!("Negative stagger unit {}ms, clamping to 0", self.stagger_unit_ms);
        }

        Self {
            visibility_threshold: threshold,
            stagger_unit_ms: self.stagger_unit_ms.max(0),
            reduced_motion: self.reduced_motion,
        }
    }

    /// Stagger unit as Duration (negative values count as zero)
    #[inline]
    pub fn stagger_unit(&self) -> Duration {
        Duration::from_millis(self.stagger_unit_ms.max(0) as u64)
    }

    /// Delay before an element at `stagger_index` reveals
    #[inline]
    pub fn delay_for(&self, stagger_index: u32) -> Duration {
        self.stagger_unit().saturating_mul(stagger_index)
    }
}

/// Scroll-linked nav bar thresholds, in CSS pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Nav bar becomes visible past this scroll offset
    #[serde(default = "default_show_after")]
    pub show_after_px: f64,
    /// Scroll indicator hides (for good) past this offset
    #[serde(default = "default_indicator_hide")]
    pub indicator_hide_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            show_after_px: default_show_after(),
            indicator_hide_px: default_indicator_hide(),
        }
    }
}

/// Easing curve for smooth scrolling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate anchor jumps instead of jumping instantly
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of one smooth scroll
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate used to drive smooth scroll updates
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Space left above an anchor target (fixed nav height)
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: f64,
    /// Wait for the mobile drawer to close before scrolling
    #[serde(default = "default_menu_close_delay")]
    pub menu_close_delay_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
            anchor_offset: default_anchor_offset(),
            menu_close_delay_ms: default_menu_close_delay(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RippleConfig {
    /// How long a ripple span stays attached to its button
    #[serde(default = "default_ripple_lifetime")]
    pub lifetime_ms: u64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: default_ripple_lifetime(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_visibility_threshold() -> f64 {
    0.2 // 20% of the element visible
}

fn default_stagger_unit() -> i64 {
    100
}

fn default_groups() -> BTreeMap<String, GroupConfig> {
    let mut groups = BTreeMap::new();
    groups.insert(
        "sections".to_string(),
        GroupConfig {
            stagger_unit_ms: Some(100),
            visibility_threshold: None,
        },
    );
    groups.insert(
        "filosofia-images".to_string(),
        GroupConfig {
            stagger_unit_ms: Some(200),
            visibility_threshold: None,
        },
    );
    groups.insert(
        "chef".to_string(),
        GroupConfig {
            stagger_unit_ms: Some(200),
            visibility_threshold: None,
        },
    );
    groups
}

fn default_show_after() -> f64 {
    100.0
}

fn default_indicator_hide() -> f64 {
    50.0
}

fn default_animation_duration() -> u64 {
    400
}

fn default_animation_fps() -> u32 {
    60
}

fn default_anchor_offset() -> f64 {
    60.0
}

fn default_menu_close_delay() -> u64 {
    300 // matches the drawer slide-out transition
}

fn default_ripple_lifetime() -> u64 {
    600
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/unveil/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("unveil")
            .join("config.toml")
    }
}
