//! Конфигурация нечеткого регулятора

pub mod engine;
pub mod throttle;
