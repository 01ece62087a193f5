//! Эталонная база правил регулятора газа (удержание высоты)
//!
//! Входы: ошибка по высоте `error` (м, цель минус текущая) и вертикальная
//! скорость `velocity` (м/с). Выход: газ `throttle` (%).

use crate::control::rules::RuleDefinition;
use crate::control::variable::{TermDefinition, VariableDefinition};

/// Число точек дискретизации каждого универсума
pub const SAMPLES: usize = 601;

/// Газ висения (%), используется как исходное значение при удержании
pub const HOVER_THROTTLE: f32 = 50.0;

/// Ошибка по высоте (м)
pub const ERROR: VariableDefinition<'static> = VariableDefinition {
    name: "error",
    lo: -3.0,
    hi: 3.0,
    samples: SAMPLES,
    terms: &[
        TermDefinition::trapezoidal("VN", [-3.0, -2.8, -2.0, -1.0]),
        TermDefinition::triangular("N", [-2.0, -1.0, 0.0]),
        TermDefinition::triangular("Z", [-0.7, 0.0, 0.7]),
        TermDefinition::triangular("P", [0.0, 1.0, 2.0]),
        TermDefinition::trapezoidal("VP", [1.0, 2.0, 2.8, 3.0]),
    ],
};

/// Вертикальная скорость (м/с): DF - быстро вниз, UF - быстро вверх
pub const VELOCITY: VariableDefinition<'static> = VariableDefinition {
    name: "velocity",
    lo: -3.0,
    hi: 3.0,
    samples: SAMPLES,
    terms: &[
        TermDefinition::trapezoidal("DF", [-3.0, -2.8, -2.0, -1.0]),
        TermDefinition::triangular("D", [-2.0, -1.0, 0.0]),
        TermDefinition::triangular("Z", [-0.7, 0.0, 0.7]),
        TermDefinition::triangular("U", [0.0, 1.0, 2.0]),
        TermDefinition::trapezoidal("UF", [1.0, 2.0, 2.8, 3.0]),
    ],
};

/// Команда газа (%)
pub const THROTTLE: VariableDefinition<'static> = VariableDefinition {
    name: "throttle",
    lo: 0.0,
    hi: 100.0,
    samples: SAMPLES,
    terms: &[
        TermDefinition::trapezoidal("Low", [0.0, 5.0, 15.0, 30.0]),
        TermDefinition::triangular("MedLow", [20.0, 35.0, 50.0]),
        TermDefinition::triangular("Hover", [40.0, 50.0, 60.0]),
        TermDefinition::triangular("MedHigh", [50.0, 65.0, 80.0]),
        TermDefinition::trapezoidal("High", [70.0, 85.0, 95.0, 100.0]),
    ],
};

/// Входные переменные в порядке подачи значений
pub const INPUTS: [VariableDefinition<'static>; 2] = [ERROR, VELOCITY];

/// 12 правил: (ошибка, скорость) -> газ
pub const RULES: [RuleDefinition<'static>; 12] = [
    RuleDefinition::new(&[("error", "VP"), ("velocity", "DF")], ("throttle", "High")),
    RuleDefinition::new(&[("error", "VP"), ("velocity", "D")], ("throttle", "High")),
    RuleDefinition::new(&[("error", "VN"), ("velocity", "UF")], ("throttle", "Low")),
    RuleDefinition::new(&[("error", "VN"), ("velocity", "U")], ("throttle", "Low")),
    RuleDefinition::new(&[("error", "P"), ("velocity", "DF")], ("throttle", "High")),
    RuleDefinition::new(&[("error", "N"), ("velocity", "UF")], ("throttle", "Low")),
    RuleDefinition::new(&[("error", "Z"), ("velocity", "Z")], ("throttle", "Hover")),
    RuleDefinition::new(&[("error", "Z"), ("velocity", "D")], ("throttle", "MedHigh")),
    RuleDefinition::new(&[("error", "Z"), ("velocity", "U")], ("throttle", "MedLow")),
    RuleDefinition::new(&[("error", "P"), ("velocity", "U")], ("throttle", "Hover")),
    RuleDefinition::new(&[("error", "P"), ("velocity", "Z")], ("throttle", "MedHigh")),
    RuleDefinition::new(&[("error", "N"), ("velocity", "Z")], ("throttle", "MedLow")),
];
