//! Движок нечеткого вывода Mamdani
//!
//! Четкие входы -> фаззификация -> сила правил (min) -> отсечение
//! следствий (min) -> агрегация (max) -> центр тяжести.
//!
//! Движок не имеет изменяемого состояния: после построения его можно
//! вызывать из нескольких потоков без блокировок.

use heapless::Vec;

use crate::config::engine::{
    AREA_EPSILON, DEFAULT_INPUT_BOUNDS, MAX_INPUTS, MAX_RULES, MAX_TERMS,
};
use crate::control::error::{ConfigurationError, EvaluationError};
use crate::control::rules::{Rule, RuleDefinition};
use crate::control::variable::{LinguisticVariable, VariableDefinition};
use crate::data::{lossy_name, Activations, Curve, Inference};

/// Обработка входов за пределами универсума
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBounds {
    /// Значение используется как есть, функции принадлежности продолжаются
    /// своими крайними значениями (0 для треугольников и трапеций)
    Extend,
    /// Значение ограничивается границами универсума до фаззификации
    Clamp,
}

/// Параметры движка
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub input_bounds: InputBounds,
    /// Порог средней степени агрегированного множества для дефаззификации:
    /// площадь сравнивается с `area_epsilon * (hi - lo)` универсума выхода
    pub area_epsilon: f32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            input_bounds: DEFAULT_INPUT_BOUNDS,
            area_epsilon: AREA_EPSILON,
        }
    }
}

/// Неизменяемая база правил с переменными
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inputs: Vec<LinguisticVariable, MAX_INPUTS>,
    output: LinguisticVariable,
    rules: Vec<Rule, MAX_RULES>,
    options: EngineOptions,
}

impl InferenceEngine {
    /// Построение движка из описаний переменных и правил
    pub fn build(
        inputs: &[VariableDefinition<'_>],
        output: &VariableDefinition<'_>,
        rules: &[RuleDefinition<'_>],
        options: EngineOptions,
    ) -> Result<Self, ConfigurationError> {
        if inputs.len() > MAX_INPUTS {
            return Err(ConfigurationError::TooManyInputs {
                count: inputs.len(),
                max: MAX_INPUTS,
            });
        }

        let mut built: Vec<LinguisticVariable, MAX_INPUTS> = Vec::new();
        for def in inputs {
            let _ = built.push(def.build()?);
        }
        Self::from_variables(built, output.build()?, rules, options)
    }

    /// Построение движка из готовых переменных
    pub fn from_variables<I>(
        inputs: I,
        output: LinguisticVariable,
        rules: &[RuleDefinition<'_>],
        options: EngineOptions,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = LinguisticVariable>,
    {
        let mut vars: Vec<LinguisticVariable, MAX_INPUTS> = Vec::new();
        let mut count = 0;
        for var in inputs {
            count += 1;
            if count <= MAX_INPUTS {
                let _ = vars.push(var);
            }
        }
        if count > MAX_INPUTS {
            return Err(ConfigurationError::TooManyInputs {
                count,
                max: MAX_INPUTS,
            });
        }
        if vars.is_empty() {
            return Err(ConfigurationError::NoInputs);
        }

        for (i, var) in vars.iter().enumerate() {
            let clash = vars[..i].iter().any(|other| other.name() == var.name())
                || output.name() == var.name();
            if clash {
                return Err(ConfigurationError::DuplicateVariable {
                    variable: lossy_name(var.name()),
                });
            }
        }

        if !options.area_epsilon.is_finite() || options.area_epsilon < 0.0 {
            return Err(ConfigurationError::InvalidEpsilon(options.area_epsilon));
        }

        if rules.is_empty() {
            return Err(ConfigurationError::EmptyRuleBase);
        }
        if rules.len() > MAX_RULES {
            return Err(ConfigurationError::TooManyRules {
                count: rules.len(),
                max: MAX_RULES,
            });
        }

        let mut resolved: Vec<Rule, MAX_RULES> = Vec::new();
        for (index, def) in rules.iter().enumerate() {
            let _ = resolved.push(Rule::resolve(index, def, &vars, &output)?);
        }

        debug!(
            "Нечеткий движок: входов {}, правил {}, точек выхода {}",
            vars.len(),
            resolved.len(),
            output.universe().len()
        );

        Ok(Self {
            inputs: vars,
            output,
            rules: resolved,
            options,
        })
    }

    /// Входные переменные в порядке подачи значений
    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.output
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Индекс входа по имени
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|v| v.name() == name)
    }

    /// Вычисление по именованным входам
    pub fn evaluate(&self, inputs: &[(&str, f32)]) -> Result<Inference, EvaluationError> {
        if inputs.len() != self.inputs.len() {
            return Err(EvaluationError::InputCount {
                expected: self.inputs.len(),
                actual: inputs.len(),
            });
        }

        let mut slots: [Option<f32>; MAX_INPUTS] = [None; MAX_INPUTS];
        for (position, &(name, value)) in inputs.iter().enumerate() {
            let index = self
                .input_index(name)
                .ok_or(EvaluationError::UnknownInput { position })?;
            if slots[index].is_some() {
                return Err(EvaluationError::DuplicateInput { position });
            }
            slots[index] = Some(value);
        }

        // Число входов совпадает, имена уникальны и известны: заполнены все слоты
        let mut crisp: Vec<f32, MAX_INPUTS> = Vec::new();
        for slot in slots.iter().take(self.inputs.len()) {
            match slot {
                Some(value) => {
                    let _ = crisp.push(*value);
                }
                None => unreachable!("unfilled input slot"),
            }
        }

        self.evaluate_crisp(&crisp)
    }

    /// Вычисление по значениям входов в порядке `inputs()`
    pub fn evaluate_crisp(&self, crisp: &[f32]) -> Result<Inference, EvaluationError> {
        let activations = self.fire(crisp)?;
        let aggregated = self.aggregate(&activations);

        match aggregated.centroid(self.options.area_epsilon) {
            Some(output) => {
                trace!("Нечеткий вывод: выход {}", output);
                Ok(Inference::new(output, activations, aggregated))
            }
            None => {
                let area = aggregated.area();
                debug!("Нечеткий вывод: ни одно правило не сработало, площадь {}", area);
                Err(EvaluationError::NoRuleFired { area })
            }
        }
    }

    /// Фаззификация входов и сила срабатывания каждого правила
    pub fn fire(&self, crisp: &[f32]) -> Result<Activations, EvaluationError> {
        if crisp.len() != self.inputs.len() {
            return Err(EvaluationError::InputCount {
                expected: self.inputs.len(),
                actual: crisp.len(),
            });
        }

        let mut degrees: Vec<Vec<f32, MAX_TERMS>, MAX_INPUTS> = Vec::new();
        for (input, (var, &x)) in self.inputs.iter().zip(crisp).enumerate() {
            if !x.is_finite() {
                return Err(EvaluationError::NonFiniteInput { input });
            }
            let x = match self.options.input_bounds {
                InputBounds::Extend => x,
                InputBounds::Clamp => var.universe().clamp(x),
            };
            let _ = degrees.push(var.fuzzify(x).into_degrees());
        }

        let mut activations = Activations::default();
        for (index, rule) in self.rules.iter().enumerate() {
            let activation = rule.activate(index, &degrees);
            trace!("Нечеткий вывод: правило {}, сила {}", index, activation.firing_strength);
            activations.push(activation);
        }

        Ok(activations)
    }

    /// Агрегированное выходное множество: поточечный максимум отсеченных следствий
    pub fn aggregate(&self, activations: &Activations) -> Curve {
        // max_r min(a_r, mu_t(x)) = min(max a_r, mu_t(x)) для правил с одним
        // термом следствия, поэтому сначала берем максимум силы по термам
        let mut term_strength: Vec<f32, MAX_TERMS> = Vec::new();
        let _ = term_strength.resize(self.output.len(), 0.0);
        for a in activations.iter() {
            if let Some(s) = term_strength.get_mut(a.consequent_term) {
                *s = s.max(a.firing_strength);
            }
        }

        let universe = *self.output.universe();
        let mut curve = Curve::zeros(universe);
        for (i, degree) in curve.degrees_mut().iter_mut().enumerate() {
            let x = universe.sample(i);
            for ((_, mf), &alpha) in self.output.terms().zip(term_strength.iter()) {
                if alpha > 0.0 {
                    *degree = degree.max(alpha.min(mf.evaluate(x)));
                }
            }
        }
        curve
    }

    /// Терм выхода `term`, отсеченный на уровне `strength`
    pub fn clipped_curve(&self, term: usize, strength: f32) -> Option<Curve> {
        let mf = self.output.membership(term)?;
        let universe = *self.output.universe();
        let mut curve = Curve::zeros(universe);
        for (i, degree) in curve.degrees_mut().iter_mut().enumerate() {
            *degree = strength.min(mf.evaluate(universe.sample(i)));
        }
        Some(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::throttle;
    use crate::control::variable::TermDefinition;

    fn reference() -> InferenceEngine {
        InferenceEngine::build(
            &throttle::INPUTS,
            &throttle::THROTTLE,
            &throttle::RULES,
            EngineOptions::default(),
        )
        .unwrap()
    }

    const SWITCH_INPUT: VariableDefinition<'static> = VariableDefinition {
        name: "x",
        lo: 0.0,
        hi: 10.0,
        samples: 101,
        terms: &[
            TermDefinition::points("low", &[(0.0, 0.0), (0.0, 1.0), (2.0, 1.0), (4.0, 0.0)]),
            TermDefinition::trapezoidal("high", [6.0, 8.0, 10.0, 10.0]),
        ],
    };

    const SWITCH_OUTPUT: VariableDefinition<'static> = VariableDefinition {
        name: "y",
        lo: 0.0,
        hi: 1.0,
        samples: 101,
        terms: &[
            TermDefinition::triangular("off", [0.0, 0.25, 0.5]),
            TermDefinition::triangular("on", [0.5, 0.75, 1.0]),
        ],
    };

    const SWITCH_RULES: [RuleDefinition<'static>; 2] = [
        RuleDefinition::new(&[("x", "low")], ("y", "off")),
        RuleDefinition::new(&[("x", "high")], ("y", "on")),
    ];

    fn switch(input_bounds: InputBounds) -> InferenceEngine {
        let options = EngineOptions {
            input_bounds,
            ..EngineOptions::default()
        };
        InferenceEngine::build(&[SWITCH_INPUT], &SWITCH_OUTPUT, &SWITCH_RULES, options).unwrap()
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InferenceEngine>();
    }

    #[test]
    fn test_build_rejects_empty_rule_base() {
        let result = InferenceEngine::build(
            &throttle::INPUTS,
            &throttle::THROTTLE,
            &[],
            EngineOptions::default(),
        );
        assert!(matches!(result, Err(ConfigurationError::EmptyRuleBase)));
    }

    #[test]
    fn test_build_rejects_too_many_rules() {
        let rules = [throttle::RULES[0]; MAX_RULES + 1];
        let result = InferenceEngine::build(
            &throttle::INPUTS,
            &throttle::THROTTLE,
            &rules,
            EngineOptions::default(),
        );
        assert!(matches!(result, Err(ConfigurationError::TooManyRules { .. })));
    }

    #[test]
    fn test_build_rejects_too_many_inputs() {
        let inputs = [throttle::ERROR; MAX_INPUTS + 1];
        let result = InferenceEngine::build(
            &inputs,
            &throttle::THROTTLE,
            &throttle::RULES,
            EngineOptions::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::TooManyInputs {
                count: MAX_INPUTS + 1,
                max: MAX_INPUTS,
            }
        );

        let vars = (0..MAX_INPUTS + 1).map(|_| throttle::ERROR.build().unwrap());
        let result = InferenceEngine::from_variables(
            vars,
            throttle::THROTTLE.build().unwrap(),
            &throttle::RULES,
            EngineOptions::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::TooManyInputs {
                count: MAX_INPUTS + 1,
                max: MAX_INPUTS,
            }
        );
    }

    #[test]
    fn test_build_rejects_no_inputs() {
        let result = InferenceEngine::build(
            &[],
            &throttle::THROTTLE,
            &throttle::RULES,
            EngineOptions::default(),
        );
        assert_eq!(result.unwrap_err(), ConfigurationError::NoInputs);

        let result = InferenceEngine::from_variables(
            core::iter::empty::<LinguisticVariable>(),
            throttle::THROTTLE.build().unwrap(),
            &throttle::RULES,
            EngineOptions::default(),
        );
        assert_eq!(result.unwrap_err(), ConfigurationError::NoInputs);
    }

    #[test]
    fn test_build_rejects_duplicate_variable() {
        let inputs = [throttle::ERROR, throttle::ERROR];
        let result = InferenceEngine::build(
            &inputs,
            &throttle::THROTTLE,
            &throttle::RULES,
            EngineOptions::default(),
        );
        assert!(matches!(result, Err(ConfigurationError::DuplicateVariable { .. })));
    }

    #[test]
    fn test_build_rejects_bad_epsilon() {
        let options = EngineOptions {
            area_epsilon: f32::NAN,
            ..EngineOptions::default()
        };
        let result =
            InferenceEngine::build(&throttle::INPUTS, &throttle::THROTTLE, &throttle::RULES, options);
        assert!(matches!(result, Err(ConfigurationError::InvalidEpsilon(_))));
    }

    #[test]
    fn test_build_rejects_unknown_term_in_rule() {
        let rules = [RuleDefinition::new(&[("error", "Z"), ("velocity", "ZZ")], ("throttle", "Hover"))];
        let result = InferenceEngine::build(
            &throttle::INPUTS,
            &throttle::THROTTLE,
            &rules,
            EngineOptions::default(),
        );
        assert!(matches!(result, Err(ConfigurationError::UnknownTerm { rule: 0, .. })));
    }

    #[test]
    fn test_aggregated_is_max_of_clipped() {
        let engine = reference();
        for (e, v) in [(2.0, -1.5), (0.3, -0.4), (-0.5, 0.6), (1.2, 0.2)] {
            let inference = engine.evaluate_crisp(&[e, v]).unwrap();
            let aggregated = inference.aggregated().degrees();

            let mut expected = [0.0f32; throttle::SAMPLES];
            for a in inference.activations().iter() {
                let clipped = engine
                    .clipped_curve(a.consequent_term, a.firing_strength)
                    .unwrap();
                for (m, &d) in expected.iter_mut().zip(clipped.degrees()) {
                    *m = m.max(d);
                }
            }
            assert_eq!(aggregated, &expected[..]);
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let engine = reference();
        let first = engine.evaluate_crisp(&[0.4, -0.3]).unwrap();
        let second = engine.evaluate_crisp(&[0.4, -0.3]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_named_inputs_any_order() {
        let engine = reference();
        let a = engine.evaluate(&[("error", 2.0), ("velocity", -1.5)]).unwrap();
        let b = engine.evaluate(&[("velocity", -1.5), ("error", 2.0)]).unwrap();
        assert_eq!(a.output(), b.output());
    }

    #[test]
    fn test_named_input_errors() {
        let engine = reference();
        assert_eq!(
            engine.evaluate(&[("error", 0.0)]).unwrap_err(),
            EvaluationError::InputCount { expected: 2, actual: 1 }
        );
        assert_eq!(
            engine.evaluate(&[("error", 0.0), ("altitude", 0.0)]).unwrap_err(),
            EvaluationError::UnknownInput { position: 1 }
        );
        assert_eq!(
            engine.evaluate(&[("error", 0.0), ("error", 1.0)]).unwrap_err(),
            EvaluationError::DuplicateInput { position: 1 }
        );
        assert_eq!(
            engine.evaluate(&[("error", f32::NAN), ("velocity", 0.0)]).unwrap_err(),
            EvaluationError::NonFiniteInput { input: 0 }
        );
    }

    #[test]
    fn test_coverage_gap_fails_explicitly() {
        let engine = reference();
        for v in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            match engine.evaluate_crisp(&[3.0, v]) {
                Err(EvaluationError::NoRuleFired { area }) => assert!(area <= AREA_EPSILON),
                other => panic!("expected NoRuleFired, got {:?}", other),
            }
        }

        // Силы срабатывания при этом доступны
        let activations = engine.fire(&[3.0, 0.0]).unwrap();
        assert_eq!(activations.len(), throttle::RULES.len());
        assert_eq!(activations.max_strength(), 0.0);
        assert!(activations.dominant().is_none());
    }

    #[test]
    fn test_narrow_output_universe_defuzzifies() {
        // Площадь при полной силе 5e-7, меньше AREA_EPSILON
        let input = VariableDefinition {
            name: "x",
            lo: 0.0,
            hi: 1.0,
            samples: 11,
            terms: &[TermDefinition::triangular("mid", [0.0, 0.5, 1.0])],
        };
        let output = VariableDefinition {
            name: "y",
            lo: 0.0,
            hi: 1e-6,
            samples: 11,
            terms: &[TermDefinition::triangular("tiny", [0.0, 5e-7, 1e-6])],
        };
        let rules = [RuleDefinition::new(&[("x", "mid")], ("y", "tiny"))];
        let engine =
            InferenceEngine::build(&[input], &output, &rules, EngineOptions::default()).unwrap();

        let inference = engine.evaluate_crisp(&[0.5]).unwrap();
        assert!(inference.aggregated().area() < AREA_EPSILON);
        assert!((inference.output() - 5e-7).abs() < 1e-9);
    }

    #[test]
    fn test_input_bounds_extend() {
        let engine = switch(InputBounds::Extend);
        assert!(matches!(
            engine.evaluate_crisp(&[-5.0]),
            Err(EvaluationError::NoRuleFired { .. })
        ));
        assert!(matches!(
            engine.evaluate_crisp(&[15.0]),
            Err(EvaluationError::NoRuleFired { .. })
        ));
        let inside = engine.evaluate_crisp(&[0.0]).unwrap();
        assert!((inside.output() - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_input_bounds_clamp() {
        let engine = switch(InputBounds::Clamp);
        let low = engine.evaluate_crisp(&[-5.0]).unwrap();
        assert!((low.output() - 0.25).abs() < 1e-3);
        let high = engine.evaluate_crisp(&[15.0]).unwrap();
        assert!((high.output() - 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_concurrent_evaluation() {
        let engine = reference();
        let expected = engine.evaluate_crisp(&[0.6, -0.8]).unwrap().output();

        std::thread::scope(|scope| {
            let handles: std::vec::Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (0..20)
                            .map(|_| engine.evaluate_crisp(&[0.6, -0.8]).unwrap().output())
                            .collect::<std::vec::Vec<f32>>()
                    })
                })
                .collect();
            for handle in handles {
                for output in handle.join().unwrap() {
                    assert_eq!(output, expected);
                }
            }
        });
    }

    #[test]
    fn test_independent_engines() {
        let throttle_engine = reference();
        let switch_engine = switch(InputBounds::Clamp);
        assert!((throttle_engine.evaluate_crisp(&[0.0, 0.0]).unwrap().output() - 50.0).abs() < 0.1);
        assert!((switch_engine.evaluate_crisp(&[9.0]).unwrap().output() - 0.75).abs() < 1e-3);
    }
}
