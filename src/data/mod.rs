//! Данные результатов нечеткого вывода

use heapless::{String, Vec};

use crate::config::engine::{MAX_ANTECEDENTS, MAX_NAME_LEN, MAX_RULES, MAX_SAMPLES};
use crate::control::error::ConfigurationError;
use crate::control::universe::Universe;
use crate::utils::math::trapezoid;

/// Имя переменной или терма
pub type Name = String<MAX_NAME_LEN>;

/// Проверенное имя: непустое и не длиннее `MAX_NAME_LEN`
pub(crate) fn make_name(s: &str) -> Result<Name, ConfigurationError> {
    if s.is_empty() {
        return Err(ConfigurationError::EmptyName);
    }
    let mut name = Name::new();
    name.push_str(s).map_err(|_| ConfigurationError::NameTooLong {
        len: s.len(),
        max: MAX_NAME_LEN,
    })?;
    Ok(name)
}

/// Имя для сообщений об ошибках, длинные имена обрезаются
pub(crate) fn lossy_name(s: &str) -> Name {
    let mut name = Name::new();
    for c in s.chars() {
        if name.push(c).is_err() {
            break;
        }
    }
    name
}

/// Нечеткое множество, дискретизированное по универсуму
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    universe: Universe,
    /// Степени в точках универсума
    degrees: Vec<f32, MAX_SAMPLES>,
}

impl Curve {
    /// Нулевое множество
    pub fn zeros(universe: Universe) -> Self {
        let mut degrees = Vec::new();
        // Universe::new гарантирует len <= MAX_SAMPLES
        let _ = degrees.resize(universe.len(), 0.0);
        Self { universe, degrees }
    }

    /// Множество из готовых степеней; `None`, если длина не совпадает с универсумом
    pub fn from_degrees(universe: Universe, degrees: &[f32]) -> Option<Self> {
        if degrees.len() != universe.len() {
            return None;
        }
        let degrees = Vec::from_slice(degrees).ok()?;
        Some(Self { universe, degrees })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn degrees(&self) -> &[f32] {
        &self.degrees
    }

    pub(crate) fn degrees_mut(&mut self) -> &mut [f32] {
        &mut self.degrees
    }

    /// Пары (x, степень) по возрастанию x
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.universe.samples().zip(self.degrees.iter().copied())
    }

    /// Наибольшая степень
    pub fn height(&self) -> f32 {
        self.degrees.iter().fold(0.0, |acc: f32, &d| acc.max(d))
    }

    /// Площадь под кривой (метод трапеций)
    pub fn area(&self) -> f32 {
        trapezoid(self.points())
    }

    /// Центр тяжести: ∫x·μ(x)dx / ∫μ(x)dx
    ///
    /// `None`, если площадь не больше `epsilon`, умноженного на ширину
    /// универсума (средняя степень не больше `epsilon`).
    pub fn centroid(&self, epsilon: f32) -> Option<f32> {
        let area = self.area();
        let (lo, hi) = self.universe.bounds();
        if area <= epsilon * (hi - lo) {
            return None;
        }
        let moment = trapezoid(self.points().map(|(x, mu)| (x, x * mu)));
        Some(moment / area)
    }
}

/// Срабатывание одного правила
#[derive(Debug, Clone, PartialEq)]
pub struct RuleActivation {
    /// Индекс правила в базе
    pub rule_index: usize,
    /// Сила срабатывания (минимум степеней посылки)
    pub firing_strength: f32,
    /// Степени условий посылки в порядке их объявления
    pub antecedent_degrees: Vec<f32, MAX_ANTECEDENTS>,
    /// Индекс терма следствия у выходной переменной
    pub consequent_term: usize,
}

/// Срабатывания всех правил в порядке базы
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Activations {
    rules: Vec<RuleActivation, MAX_RULES>,
}

impl Activations {
    pub(crate) fn push(&mut self, activation: RuleActivation) {
        // Число правил ограничено MAX_RULES при построении
        let _ = self.rules.push(activation);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleActivation> {
        self.rules.iter()
    }

    pub fn get(&self, rule_index: usize) -> Option<&RuleActivation> {
        self.rules.get(rule_index)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Первое правило с наибольшей ненулевой силой
    pub fn dominant(&self) -> Option<&RuleActivation> {
        let mut best: Option<&RuleActivation> = None;
        for a in self.rules.iter() {
            if a.firing_strength <= 0.0 {
                continue;
            }
            match best {
                Some(b) if b.firing_strength >= a.firing_strength => {}
                _ => best = Some(a),
            }
        }
        best
    }

    /// Наибольшая сила срабатывания
    pub fn max_strength(&self) -> f32 {
        self.rules
            .iter()
            .fold(0.0, |acc: f32, a| acc.max(a.firing_strength))
    }
}

/// Результат одного вычисления
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    output: f32,
    activations: Activations,
    aggregated: Curve,
}

impl Inference {
    pub(crate) fn new(output: f32, activations: Activations, aggregated: Curve) -> Self {
        Self {
            output,
            activations,
            aggregated,
        }
    }

    /// Четкое значение выхода (центр тяжести)
    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn activations(&self) -> &Activations {
        &self.activations
    }

    /// Агрегированное выходное множество
    pub fn aggregated(&self) -> &Curve {
        &self.aggregated
    }

    /// Доминирующее правило (для визуализации)
    pub fn dominant_rule(&self) -> Option<&RuleActivation> {
        self.activations.dominant()
    }
}
