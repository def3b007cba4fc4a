//! Smooth scrolling to in-page anchors
//!
//! # Layers
//!
//! - `easing` - pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `config` - duration helpers over [`ScrollConfig`]
//! - `anchor` - where a link click should scroll to, and when
//! - `animation` - frame-driven scroll controller combining the above
//!
//! # Usage
//!
//! ```ignore
//! use unveil_core::scroll::{plan_scroll, LinkSource, SmoothScroller};
//!
//! let plan = plan_scroll(LinkSource::Desktop, "#menu", Some(420.0), scroll_y, &config);
//! scroller.scroll_to(plan.unwrap().target, now);
//! // every frame
//! window_scroll_to(scroller.update(frame_time));
//! ```

pub mod anchor;
pub mod animation;
pub mod config;
pub mod easing;
pub mod timing;

pub use anchor::{anchor_target, plan_scroll, LinkSource, ScrollPlan, HERO_ANCHOR, INDICATOR_ANCHOR};
pub use animation::SmoothScroller;
pub use config::{EasingType, ScrollConfig, ScrollConfigExt};
pub use easing::EasingTypeExt;
