//! Ошибки построения и вычисления нечеткого регулятора

use crate::control::membership::ShapeError;
use crate::data::Name;

/// Ошибки конфигурации (при построении движка)
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    InvalidUniverse { lo: f32, hi: f32, samples: usize },
    TooManySamples { samples: usize, max: usize },
    EmptyName,
    NameTooLong { len: usize, max: usize },
    NoTerms { variable: Name },
    TooManyTerms { variable: Name, max: usize },
    DuplicateTerm { variable: Name, term: Name },
    InvalidTerm { variable: Name, term: Name, reason: ShapeError },
    NoInputs,
    TooManyInputs { count: usize, max: usize },
    DuplicateVariable { variable: Name },
    EmptyRuleBase,
    TooManyRules { count: usize, max: usize },
    EmptyAntecedent { rule: usize },
    TooManyAntecedents { rule: usize, count: usize, max: usize },
    UnknownVariable { rule: usize, variable: Name },
    UnknownTerm { rule: usize, variable: Name, term: Name },
    /// Выходная переменная в посылке правила
    AntecedentOnOutput { rule: usize, variable: Name },
    /// Следствие ссылается не на выходную переменную
    ConsequentNotOutput { rule: usize, variable: Name },
    InvalidEpsilon(f32),
}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use ConfigurationError::*;
        match self {
            InvalidUniverse { lo, hi, samples } => {
                write!(f, "invalid universe [{}, {}] with {} samples", lo, hi, samples)
            }
            TooManySamples { samples, max } => {
                write!(f, "universe has {} samples, at most {} supported", samples, max)
            }
            EmptyName => write!(f, "empty variable or term name"),
            NameTooLong { len, max } => write!(f, "name of {} bytes exceeds {}", len, max),
            NoTerms { variable } => write!(f, "variable '{}' has no terms", variable),
            TooManyTerms { variable, max } => {
                write!(f, "variable '{}' has more than {} terms", variable, max)
            }
            DuplicateTerm { variable, term } => {
                write!(f, "variable '{}' defines term '{}' twice", variable, term)
            }
            InvalidTerm { variable, term, reason } => {
                write!(f, "term '{}' of '{}': {}", term, variable, reason)
            }
            NoInputs => write!(f, "no input variables"),
            TooManyInputs { count, max } => write!(f, "{} inputs, at most {} supported", count, max),
            DuplicateVariable { variable } => write!(f, "variable '{}' defined twice", variable),
            EmptyRuleBase => write!(f, "rule base is empty"),
            TooManyRules { count, max } => write!(f, "{} rules, at most {} supported", count, max),
            EmptyAntecedent { rule } => write!(f, "rule {} has no antecedent", rule),
            TooManyAntecedents { rule, count, max } => {
                write!(f, "rule {} has {} antecedents, at most {}", rule, count, max)
            }
            UnknownVariable { rule, variable } => {
                write!(f, "rule {} references unknown variable '{}'", rule, variable)
            }
            UnknownTerm { rule, variable, term } => {
                write!(f, "rule {} references unknown term '{}' of '{}'", rule, term, variable)
            }
            AntecedentOnOutput { rule, variable } => {
                write!(f, "rule {} uses output variable '{}' in its antecedent", rule, variable)
            }
            ConsequentNotOutput { rule, variable } => {
                write!(f, "rule {} concludes on non-output variable '{}'", rule, variable)
            }
            InvalidEpsilon(eps) => write!(f, "invalid area epsilon {}", eps),
        }
    }
}

impl core::error::Error for ConfigurationError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigurationError {
    fn format(&self, fmt: defmt::Formatter) {
        use ConfigurationError::*;
        match self {
            InvalidUniverse { lo, hi, samples } => {
                defmt::write!(fmt, "Fuzzy: invalid universe [{}, {}] x{}", lo, hi, samples)
            }
            TooManySamples { samples, max } => {
                defmt::write!(fmt, "Fuzzy: {} samples > {}", samples, max)
            }
            EmptyName => defmt::write!(fmt, "Fuzzy: empty name"),
            NameTooLong { len, max } => defmt::write!(fmt, "Fuzzy: name {} > {}", len, max),
            NoTerms { variable } => defmt::write!(fmt, "Fuzzy: '{}' has no terms", variable.as_str()),
            TooManyTerms { variable, max } => {
                defmt::write!(fmt, "Fuzzy: '{}' has > {} terms", variable.as_str(), max)
            }
            DuplicateTerm { variable, term } => {
                defmt::write!(fmt, "Fuzzy: duplicate term {}.{}", variable.as_str(), term.as_str())
            }
            InvalidTerm { variable, term, reason } => {
                defmt::write!(fmt, "Fuzzy: term {}.{}: {}", variable.as_str(), term.as_str(), reason)
            }
            NoInputs => defmt::write!(fmt, "Fuzzy: no inputs"),
            TooManyInputs { count, max } => defmt::write!(fmt, "Fuzzy: {} inputs > {}", count, max),
            DuplicateVariable { variable } => {
                defmt::write!(fmt, "Fuzzy: duplicate variable '{}'", variable.as_str())
            }
            EmptyRuleBase => defmt::write!(fmt, "Fuzzy: empty rule base"),
            TooManyRules { count, max } => defmt::write!(fmt, "Fuzzy: {} rules > {}", count, max),
            EmptyAntecedent { rule } => defmt::write!(fmt, "Fuzzy: rule {} has no antecedent", rule),
            TooManyAntecedents { rule, count, max } => {
                defmt::write!(fmt, "Fuzzy: rule {}: {} antecedents > {}", rule, count, max)
            }
            UnknownVariable { rule, variable } => {
                defmt::write!(fmt, "Fuzzy: rule {}: unknown variable '{}'", rule, variable.as_str())
            }
            UnknownTerm { rule, variable, term } => defmt::write!(
                fmt,
                "Fuzzy: rule {}: unknown term {}.{}",
                rule,
                variable.as_str(),
                term.as_str()
            ),
            AntecedentOnOutput { rule, variable } => {
                defmt::write!(fmt, "Fuzzy: rule {}: output '{}' in antecedent", rule, variable.as_str())
            }
            ConsequentNotOutput { rule, variable } => {
                defmt::write!(fmt, "Fuzzy: rule {}: '{}' is not the output", rule, variable.as_str())
            }
            InvalidEpsilon(eps) => defmt::write!(fmt, "Fuzzy: invalid epsilon {}", eps),
        }
    }
}

/// Ошибки вычисления (на каждом вызове)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationError {
    /// Передано неверное число входов
    InputCount { expected: usize, actual: usize },
    /// Имя входа на позиции `position` не найдено
    UnknownInput { position: usize },
    /// Вход на позиции `position` уже был задан
    DuplicateInput { position: usize },
    /// Значение входа `input` - NaN или бесконечность
    NonFiniteInput { input: usize },
    /// Площадь агрегированного множества не превышает порога
    NoRuleFired { area: f32 },
}

impl core::fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EvaluationError::InputCount { expected, actual } => {
                write!(f, "expected {} inputs, got {}", expected, actual)
            }
            EvaluationError::UnknownInput { position } => {
                write!(f, "unknown input name at position {}", position)
            }
            EvaluationError::DuplicateInput { position } => {
                write!(f, "input at position {} given twice", position)
            }
            EvaluationError::NonFiniteInput { input } => write!(f, "input {} is not finite", input),
            EvaluationError::NoRuleFired { area } => {
                write!(f, "no rule fired (aggregated area {})", area)
            }
        }
    }
}

impl core::error::Error for EvaluationError {}

#[cfg(feature = "defmt")]
impl defmt::Format for EvaluationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            EvaluationError::InputCount { expected, actual } => {
                defmt::write!(fmt, "Fuzzy: expected {} inputs, got {}", expected, actual)
            }
            EvaluationError::UnknownInput { position } => {
                defmt::write!(fmt, "Fuzzy: unknown input at {}", position)
            }
            EvaluationError::DuplicateInput { position } => {
                defmt::write!(fmt, "Fuzzy: duplicate input at {}", position)
            }
            EvaluationError::NonFiniteInput { input } => {
                defmt::write!(fmt, "Fuzzy: input {} not finite", input)
            }
            EvaluationError::NoRuleFired { area } => defmt::write!(fmt, "Fuzzy: no rule fired ({})", area),
        }
    }
}
