//! Универсум - дискретизированная область значений переменной

use crate::config::engine::MAX_SAMPLES;
use crate::control::error::ConfigurationError;
use crate::utils::math::constrain;

/// Равномерная сетка из `samples` точек на отрезке [lo, hi]
///
/// Точки не хранятся, а вычисляются по индексу, поэтому универсум
/// копируется дешево и не меняется после создания.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    lo: f32,
    hi: f32,
    samples: usize,
}

impl Universe {
    /// Создание универсума
    ///
    /// # Параметры
    /// * `lo`, `hi` - границы, `lo < hi`
    /// * `samples` - число точек, от 2 до `MAX_SAMPLES`
    pub fn new(lo: f32, hi: f32, samples: usize) -> Result<Self, ConfigurationError> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi || samples < 2 {
            return Err(ConfigurationError::InvalidUniverse { lo, hi, samples });
        }
        if samples > MAX_SAMPLES {
            return Err(ConfigurationError::TooManySamples {
                samples,
                max: MAX_SAMPLES,
            });
        }

        Ok(Self { lo, hi, samples })
    }

    /// Число точек
    #[inline]
    pub fn len(&self) -> usize {
        self.samples
    }

    /// Универсум всегда содержит минимум две точки
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Границы (lo, hi)
    #[inline]
    pub fn bounds(&self) -> (f32, f32) {
        (self.lo, self.hi)
    }

    /// Шаг сетки
    #[inline]
    pub fn step(&self) -> f32 {
        (self.hi - self.lo) / (self.samples - 1) as f32
    }

    /// Точка с индексом `index` (последняя точка равна `hi` точно)
    #[inline]
    pub fn sample(&self, index: usize) -> f32 {
        if index + 1 >= self.samples {
            self.hi
        } else {
            self.lo + (self.hi - self.lo) * (index as f32 / (self.samples - 1) as f32)
        }
    }

    /// Все точки по возрастанию
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.samples).map(move |i| self.sample(i))
    }

    /// Принадлежит ли значение отрезку [lo, hi]
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Ограничение значения границами универсума
    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        constrain(x, self.lo, self.hi)
    }
}
