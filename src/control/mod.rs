//! Нечеткий вывод: универсумы, термы, правила, движок

pub mod engine;
pub mod error;
pub mod membership;
pub mod rules;
pub mod throttle;
pub mod universe;
pub mod variable;
