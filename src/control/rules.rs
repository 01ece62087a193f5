//! Правила Mamdani: посылка (И) и следствие

use heapless::Vec;

use crate::config::engine::{MAX_ANTECEDENTS, MAX_TERMS};
use crate::control::error::ConfigurationError;
use crate::control::variable::LinguisticVariable;
use crate::data::{lossy_name, RuleActivation};

/// Описание правила через имена: ((переменная, терм) И ...) -> (выход, терм)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleDefinition<'a> {
    pub antecedents: &'a [(&'a str, &'a str)],
    pub consequent: (&'a str, &'a str),
}

impl<'a> RuleDefinition<'a> {
    pub const fn new(antecedents: &'a [(&'a str, &'a str)], consequent: (&'a str, &'a str)) -> Self {
        Self {
            antecedents,
            consequent,
        }
    }
}

/// Ссылка на терм входной переменной по индексам
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermRef {
    pub variable: usize,
    pub term: usize,
}

/// Правило с разрешенными индексами
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedents: Vec<TermRef, MAX_ANTECEDENTS>,
    /// Индекс терма выходной переменной
    consequent: usize,
}

impl Rule {
    /// Разрешение имен правила `index` в индексы
    pub fn resolve(
        index: usize,
        def: &RuleDefinition<'_>,
        inputs: &[LinguisticVariable],
        output: &LinguisticVariable,
    ) -> Result<Self, ConfigurationError> {
        if def.antecedents.is_empty() {
            return Err(ConfigurationError::EmptyAntecedent { rule: index });
        }
        if def.antecedents.len() > MAX_ANTECEDENTS {
            return Err(ConfigurationError::TooManyAntecedents {
                rule: index,
                count: def.antecedents.len(),
                max: MAX_ANTECEDENTS,
            });
        }

        let mut antecedents = Vec::new();
        for &(variable, term) in def.antecedents {
            let Some(v) = inputs.iter().position(|input| input.name() == variable) else {
                if output.name() == variable {
                    return Err(ConfigurationError::AntecedentOnOutput {
                        rule: index,
                        variable: lossy_name(variable),
                    });
                }
                return Err(ConfigurationError::UnknownVariable {
                    rule: index,
                    variable: lossy_name(variable),
                });
            };
            let t = inputs[v]
                .term_index(term)
                .ok_or_else(|| ConfigurationError::UnknownTerm {
                    rule: index,
                    variable: lossy_name(variable),
                    term: lossy_name(term),
                })?;
            // Длина посылки проверена выше
            let _ = antecedents.push(TermRef {
                variable: v,
                term: t,
            });
        }

        let (variable, term) = def.consequent;
        if output.name() != variable {
            let variable = lossy_name(variable);
            return Err(if inputs.iter().any(|input| input.name() == variable.as_str()) {
                ConfigurationError::ConsequentNotOutput {
                    rule: index,
                    variable,
                }
            } else {
                ConfigurationError::UnknownVariable {
                    rule: index,
                    variable,
                }
            });
        }
        let consequent = output
            .term_index(term)
            .ok_or_else(|| ConfigurationError::UnknownTerm {
                rule: index,
                variable: lossy_name(variable),
                term: lossy_name(term),
            })?;

        Ok(Self {
            antecedents,
            consequent,
        })
    }

    pub fn antecedents(&self) -> &[TermRef] {
        &self.antecedents
    }

    pub fn consequent(&self) -> usize {
        self.consequent
    }

    /// Срабатывание правила по степеням фаззификации входов
    ///
    /// `degrees[v][t]` - степень терма `t` входа `v`. Отсутствующий индекс
    /// означает ошибку построения и приводит к панике.
    pub fn activate(&self, rule_index: usize, degrees: &[Vec<f32, MAX_TERMS>]) -> RuleActivation {
        let mut antecedent_degrees = Vec::new();
        let mut strength: f32 = 1.0;
        for r in &self.antecedents {
            let degree = degrees[r.variable][r.term];
            strength = strength.min(degree);
            let _ = antecedent_degrees.push(degree);
        }

        RuleActivation {
            rule_index,
            firing_strength: strength,
            antecedent_degrees,
            consequent_term: self.consequent,
        }
    }
}
