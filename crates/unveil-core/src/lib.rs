pub mod config;
pub mod error;
pub mod focus;
pub mod lazy_image;
pub mod menu;
pub mod nav;
pub mod replay;
pub mod reveal;
pub mod ripple;
pub mod scroll;

pub use config::{AppConfig, EasingType, ScheduleConfig, ScrollConfig};
pub use error::{Error, Result};
pub use reveal::{ElementId, IntersectionEvent, RevealScheduler, RevealService, RevealState};
