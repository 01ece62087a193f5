//! Нечеткий регулятор газа (Mamdani) для автопилота автожира
//!
//! Два четких входа (ошибка по высоте и вертикальная скорость) переводятся
//! в команду газа через лингвистические правила: фаззификация, сила
//! срабатывания правил (min), отсечение следствий, агрегация (max) и
//! дефаззификация по центру тяжести.

#![cfg_attr(not(test), no_std)]

// Макросы логирования должны быть объявлены до остальных модулей
#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod data;
pub mod utils;

pub use control::engine::{EngineOptions, InferenceEngine, InputBounds};
pub use control::error::{ConfigurationError, EvaluationError};
pub use control::membership::{evaluate_membership, MembershipFunction, Shape, ShapeError};
pub use control::rules::{Rule, RuleDefinition, TermRef};
pub use control::throttle::ThrottleController;
pub use control::universe::Universe;
pub use control::variable::{
    Fuzzified, LinguisticVariable, TermDefinition, TermPoints, VariableDefinition,
};
pub use data::{Activations, Curve, Inference, Name, RuleActivation};
