//! Configuration domain

mod app_config;

pub use app_config::{
    check_fps, AppConfig, DEFAULT_FACES, DEFAULT_FPS, DEFAULT_PREVIEW_HEIGHT,
    DEFAULT_PREVIEW_WIDTH, MAX_FPS,
};
