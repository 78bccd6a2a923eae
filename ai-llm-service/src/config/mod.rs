pub mod gemini_config;
pub mod generation_options;
