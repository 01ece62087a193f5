//! Нечеткий регулятор газа для удержания высоты

use crate::config::throttle::{self, HOVER_THROTTLE};
use crate::control::engine::{EngineOptions, InferenceEngine};
use crate::control::error::{ConfigurationError, EvaluationError};
use crate::data::Inference;

/// Регулятор газа на эталонной базе из 12 правил
pub struct ThrottleController {
    engine: InferenceEngine,
    /// Последний успешно вычисленный газ (%)
    last_output: Option<f32>,
}

impl ThrottleController {
    /// Создание регулятора с параметрами движка по умолчанию
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::with_options(EngineOptions::default())
    }

    pub fn with_options(options: EngineOptions) -> Result<Self, ConfigurationError> {
        let engine = InferenceEngine::build(
            &throttle::INPUTS,
            &throttle::THROTTLE,
            &throttle::RULES,
            options,
        )?;

        Ok(Self {
            engine,
            last_output: None,
        })
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Вычисление без побочных эффектов
    ///
    /// # Параметры
    /// * `error` - ошибка по высоте (м), цель минус текущая
    /// * `velocity` - вертикальная скорость (м/с), вверх положительная
    pub fn evaluate(&self, error: f32, velocity: f32) -> Result<Inference, EvaluationError> {
        self.engine.evaluate_crisp(&[error, velocity])
    }

    /// Газ (%) для цикла управления
    ///
    /// Если ни одно правило не сработало, удерживается предыдущий газ
    /// (до первого успешного вычисления - газ висения).
    pub fn update(&mut self, target: f32, current: f32, velocity: f32) -> f32 {
        match self.evaluate(target - current, velocity) {
            Ok(inference) => {
                self.last_output = Some(inference.output());
                inference.output()
            }
            Err(e) => {
                let held = self.last_output.unwrap_or(HOVER_THROTTLE);
                warn!("Регулятор газа: {}, удерживаем {}", e, held);
                held
            }
        }
    }

    /// Сброс удерживаемого значения
    pub fn reset(&mut self) {
        self.last_output = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ThrottleController {
        ThrottleController::new().unwrap()
    }

    #[test]
    fn test_hover_at_zero_error() {
        let c = controller();
        let inference = c.evaluate(0.0, 0.0).unwrap();
        assert!((inference.output() - 50.0).abs() < 0.1);

        let dominant = inference.dominant_rule().unwrap();
        assert_eq!(dominant.rule_index, 6);
        assert!((dominant.firing_strength - 1.0).abs() < 1e-6);
        assert_eq!(c.engine().output().term_name(dominant.consequent_term), Some("Hover"));
    }

    #[test]
    fn test_far_below_falling_gives_high() {
        let c = controller();
        let inference = c.evaluate(2.0, -1.5).unwrap();
        assert!(inference.output() > 80.0, "output {}", inference.output());

        let dominant = inference.dominant_rule().unwrap();
        assert_eq!(dominant.rule_index, 0);
        assert_eq!(c.engine().output().term_name(dominant.consequent_term), Some("High"));
    }

    #[test]
    fn test_far_above_rising_gives_low() {
        let c = controller();
        let inference = c.evaluate(-1.5, 2.0).unwrap();
        assert!(inference.output() < 20.0, "output {}", inference.output());

        let dominant = inference.dominant_rule().unwrap();
        assert_eq!(dominant.rule_index, 2);
        assert_eq!(c.engine().output().term_name(dominant.consequent_term), Some("Low"));
    }

    #[test]
    fn test_positive_error_rising_hovers() {
        let c = controller();
        let inference = c.evaluate(1.0, 1.0).unwrap();
        assert!(
            (49.9..=55.0).contains(&inference.output()),
            "output {}",
            inference.output()
        );
        assert_eq!(inference.dominant_rule().unwrap().rule_index, 9);
    }

    #[test]
    fn test_coverage_gap_is_error() {
        let c = controller();
        assert!(matches!(
            c.evaluate(3.0, 0.0),
            Err(EvaluationError::NoRuleFired { .. })
        ));
    }

    #[test]
    fn test_each_rule_dominates_its_case() {
        // (ошибка, скорость, правило, терм газа) по центрам термов
        let cases = [
            (2.0, -1.5, 0, "High"),
            (2.0, -1.0, 1, "High"),
            (-1.5, 2.0, 2, "Low"),
            (-1.5, 1.0, 3, "Low"),
            (1.0, -1.5, 4, "High"),
            (-1.0, 2.0, 5, "Low"),
            (0.0, 0.0, 6, "Hover"),
            (0.0, -1.0, 7, "MedHigh"),
            (0.0, 1.0, 8, "MedLow"),
            (1.0, 1.0, 9, "Hover"),
            (1.0, 0.0, 10, "MedHigh"),
            (-1.0, 0.0, 11, "MedLow"),
        ];

        let c = controller();
        let output = c.engine().output();
        for (e, v, rule, term) in cases {
            let inference = c.evaluate(e, v).unwrap();
            let dominant = inference.dominant_rule().unwrap();
            assert_eq!(dominant.rule_index, rule, "case ({}, {})", e, v);
            assert_eq!(output.term_name(dominant.consequent_term), Some(term));

            // Центр тяжести лежит внутри носителя терма
            let mf = output.membership(dominant.consequent_term).unwrap();
            let (lo, hi) = mf.support();
            assert!(lo <= inference.output() && inference.output() <= hi);
        }
    }

    #[test]
    fn test_update_holds_previous_output() {
        let mut c = controller();

        // До первого успешного вычисления - газ висения
        assert_eq!(c.update(13.0, 10.0, 0.0), HOVER_THROTTLE);

        let high = c.update(12.0, 10.0, -1.5);
        assert!(high > 80.0);
        assert_eq!(c.update(13.0, 10.0, 0.0), high);

        c.reset();
        assert_eq!(c.update(13.0, 10.0, 0.0), HOVER_THROTTLE);
    }
}
