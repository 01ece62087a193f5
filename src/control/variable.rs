//! Лингвистические переменные и фаззификация

use heapless::Vec;

use crate::config::engine::MAX_TERMS;
use crate::control::error::ConfigurationError;
use crate::control::membership::{MembershipFunction, ShapeError};
use crate::control::universe::Universe;
use crate::data::{make_name, Name};

/// Опорные точки терма в описании конфигурации
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TermPoints<'a> {
    Triangular([f32; 3]),
    Trapezoidal([f32; 4]),
    /// Произвольные точки (x, степень), проверяются при построении
    Points(&'a [(f32, f32)]),
}

/// Описание терма: имя и форма
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermDefinition<'a> {
    pub name: &'a str,
    pub points: TermPoints<'a>,
}

impl<'a> TermDefinition<'a> {
    pub const fn triangular(name: &'a str, abc: [f32; 3]) -> Self {
        Self {
            name,
            points: TermPoints::Triangular(abc),
        }
    }

    pub const fn trapezoidal(name: &'a str, abcd: [f32; 4]) -> Self {
        Self {
            name,
            points: TermPoints::Trapezoidal(abcd),
        }
    }

    pub const fn points(name: &'a str, points: &'a [(f32, f32)]) -> Self {
        Self {
            name,
            points: TermPoints::Points(points),
        }
    }

    /// Построение функции принадлежности
    pub fn membership(&self) -> Result<MembershipFunction, ShapeError> {
        match self.points {
            TermPoints::Triangular(abc) => MembershipFunction::triangular(abc),
            TermPoints::Trapezoidal(abcd) => MembershipFunction::trapezoidal(abcd),
            TermPoints::Points(points) => MembershipFunction::from_points(points),
        }
    }
}

/// Описание переменной: имя, универсум и термы
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableDefinition<'a> {
    pub name: &'a str,
    pub lo: f32,
    pub hi: f32,
    pub samples: usize,
    pub terms: &'a [TermDefinition<'a>],
}

impl VariableDefinition<'_> {
    /// Построение переменной с проверкой универсума и всех термов
    pub fn build(&self) -> Result<LinguisticVariable, ConfigurationError> {
        let universe = Universe::new(self.lo, self.hi, self.samples)?;
        LinguisticVariable::new(self.name, universe, self.terms)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Term {
    name: Name,
    mf: MembershipFunction,
}

/// Лингвистическая переменная: универсум и именованные термы
///
/// Термы адресуются индексом в порядке объявления; имена используются
/// только при построении правил.
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable {
    name: Name,
    universe: Universe,
    terms: Vec<Term, MAX_TERMS>,
}

impl LinguisticVariable {
    /// Создание переменной
    ///
    /// Ошибка, если имя пустое или слишком длинное, термов нет или больше
    /// `MAX_TERMS`, имена термов повторяются или точки терма некорректны.
    pub fn new(
        name: &str,
        universe: Universe,
        terms: &[TermDefinition<'_>],
    ) -> Result<Self, ConfigurationError> {
        let name = make_name(name)?;
        if terms.is_empty() {
            return Err(ConfigurationError::NoTerms { variable: name });
        }
        if terms.len() > MAX_TERMS {
            return Err(ConfigurationError::TooManyTerms {
                variable: name,
                max: MAX_TERMS,
            });
        }

        let mut built: Vec<Term, MAX_TERMS> = Vec::new();
        for def in terms {
            let term = make_name(def.name)?;
            if built.iter().any(|t| t.name == term) {
                return Err(ConfigurationError::DuplicateTerm {
                    variable: name,
                    term,
                });
            }

            let mf = match def.membership() {
                Ok(mf) => mf,
                Err(reason) => {
                    return Err(ConfigurationError::InvalidTerm {
                        variable: name,
                        term,
                        reason,
                    })
                }
            };

            // Емкость проверена выше
            let _ = built.push(Term { name: term, mf });
        }

        Ok(Self {
            name,
            universe,
            terms: built,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Число термов
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Индекс терма по имени
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == term)
    }

    pub fn term_name(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(|t| t.name.as_str())
    }

    pub fn membership(&self, index: usize) -> Option<&MembershipFunction> {
        self.terms.get(index).map(|t| &t.mf)
    }

    /// Термы в порядке объявления
    pub fn terms(&self) -> impl Iterator<Item = (&str, &MembershipFunction)> + '_ {
        self.terms.iter().map(|t| (t.name.as_str(), &t.mf))
    }

    /// Степени принадлежности x всем термам
    pub fn fuzzify(&self, x: f32) -> Fuzzified<'_> {
        let degrees = self.terms.iter().map(|t| t.mf.evaluate(x)).collect();
        Fuzzified {
            variable: self,
            degrees,
        }
    }
}

/// Результат фаззификации: степени в порядке термов переменной
#[derive(Debug, Clone)]
pub struct Fuzzified<'v> {
    variable: &'v LinguisticVariable,
    degrees: Vec<f32, MAX_TERMS>,
}

impl<'v> Fuzzified<'v> {
    /// Степень по имени терма
    pub fn degree(&self, term: &str) -> Option<f32> {
        self.variable
            .term_index(term)
            .and_then(|i| self.degrees.get(i).copied())
    }

    /// Степени по индексам термов
    pub fn degrees(&self) -> &[f32] {
        &self.degrees
    }

    pub fn into_degrees(self) -> Vec<f32, MAX_TERMS> {
        self.degrees
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'v str, f32)> + '_ {
        self.variable
            .terms
            .iter()
            .zip(self.degrees.iter())
            .map(|(t, &d)| (t.name.as_str(), d))
    }
}
