//! Ограничения емкости и численные параметры движка вывода
//!
//! Все коллекции движка имеют фиксированную емкость (heapless), поэтому
//! размеры задаются здесь на этапе компиляции.

use crate::control::engine::InputBounds;

/// Максимальная длина имени переменной или терма (байт)
pub const MAX_NAME_LEN: usize = 16;

/// Максимальное число термов у одной лингвистической переменной
pub const MAX_TERMS: usize = 8;

/// Максимальное число входных переменных
pub const MAX_INPUTS: usize = 4;

/// Максимальное число условий в посылке правила (не больше числа входов)
pub const MAX_ANTECEDENTS: usize = MAX_INPUTS;

/// Максимальное число правил в базе
pub const MAX_RULES: usize = 32;

/// Максимальное число точек дискретизации универсума
pub const MAX_SAMPLES: usize = 1024;

/// Число опорных точек функции принадлежности (трапеция)
pub const MAX_POINTS: usize = 4;

/// Порог средней степени агрегированного множества (площадь, деленная на
/// ширину универсума выхода), ниже которого считаем, что ни одно правило
/// не сработало
pub const AREA_EPSILON: f32 = 1e-6;

/// Обработка входов за пределами универсума по умолчанию
pub const DEFAULT_INPUT_BOUNDS: InputBounds = InputBounds::Extend;
