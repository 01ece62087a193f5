//! Функции принадлежности (треугольная и трапециевидная)

use heapless::Vec;

use crate::config::engine::MAX_POINTS;
use crate::utils::math::interp_points;

/// Форма функции принадлежности
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// [a, b, c]: подъем a->b, спад b->c
    Triangular,
    /// [a, b, c, d]: подъем a->b, плато b->c, спад c->d
    Trapezoidal,
}

/// Ошибки опорных точек
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// Допустимо только 3 или 4 точки
    PointCount(usize),
    /// Координата или степень не является конечным числом
    NonFinite,
    /// x убывает
    NonMonotonic,
    /// Степень вне [0, 1]
    DegreeOutOfRange,
    /// Степени не образуют шаблон 0/1/0 или 0/1/1/0
    Pattern,
}

impl core::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShapeError::PointCount(n) => write!(f, "expected 3 or 4 control points, got {}", n),
            ShapeError::NonFinite => write!(f, "control point is not finite"),
            ShapeError::NonMonotonic => write!(f, "control points are not sorted by x"),
            ShapeError::DegreeOutOfRange => write!(f, "degree outside [0, 1]"),
            ShapeError::Pattern => write!(f, "degrees must follow 0/1/0 or 0/1/1/0"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ShapeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ShapeError::PointCount(n) => defmt::write!(fmt, "MF: {} control points", n),
            ShapeError::NonFinite => defmt::write!(fmt, "MF: non-finite point"),
            ShapeError::NonMonotonic => defmt::write!(fmt, "MF: x not sorted"),
            ShapeError::DegreeOutOfRange => defmt::write!(fmt, "MF: degree outside [0, 1]"),
            ShapeError::Pattern => defmt::write!(fmt, "MF: bad 0/1 pattern"),
        }
    }
}

/// Кусочно-линейная функция принадлежности
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipFunction {
    shape: Shape,
    /// Опорные точки (x, степень), x по неубыванию
    points: Vec<(f32, f32), MAX_POINTS>,
}

impl MembershipFunction {
    /// Треугольная функция [a, b, c]
    pub fn triangular(abc: [f32; 3]) -> Result<Self, ShapeError> {
        let [a, b, c] = abc;
        Self::from_points(&[(a, 0.0), (b, 1.0), (c, 0.0)])
    }

    /// Трапециевидная функция [a, b, c, d]
    pub fn trapezoidal(abcd: [f32; 4]) -> Result<Self, ShapeError> {
        let [a, b, c, d] = abcd;
        Self::from_points(&[(a, 0.0), (b, 1.0), (c, 1.0), (d, 0.0)])
    }

    /// Функция по произвольным опорным точкам с проверкой формы
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self, ShapeError> {
        let shape = match points.len() {
            3 => Shape::Triangular,
            4 => Shape::Trapezoidal,
            n => return Err(ShapeError::PointCount(n)),
        };

        if points.iter().any(|&(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(ShapeError::NonFinite);
        }
        if points.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(ShapeError::NonMonotonic);
        }
        if points.iter().any(|&(_, y)| !(0.0..=1.0).contains(&y)) {
            return Err(ShapeError::DegreeOutOfRange);
        }

        let pattern: &[f32] = match shape {
            Shape::Triangular => &[0.0, 1.0, 0.0],
            Shape::Trapezoidal => &[0.0, 1.0, 1.0, 0.0],
        };
        if points.iter().zip(pattern).any(|(&(_, y), &expected)| y != expected) {
            return Err(ShapeError::Pattern);
        }

        let points = Vec::from_slice(points).map_err(|_| ShapeError::PointCount(points.len()))?;
        Ok(Self { shape, points })
    }

    /// Степень принадлежности значения x, всегда в [0, 1]
    ///
    /// Вне опорных точек функция равна 0.
    #[inline]
    pub fn evaluate(&self, x: f32) -> f32 {
        interp_points(&self.points, x)
    }

    /// Форма функции
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Опорные точки
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// Носитель (крайние x)
    pub fn support(&self) -> (f32, f32) {
        (self.points[0].0, self.points[self.points.len() - 1].0)
    }

    /// Ядро: отрезок, где степень равна 1 (для треугольника - вершина)
    pub fn core(&self) -> (f32, f32) {
        match self.shape {
            Shape::Triangular => (self.points[1].0, self.points[1].0),
            Shape::Trapezoidal => (self.points[1].0, self.points[2].0),
        }
    }
}

/// Степень принадлежности x функции `mf`
#[inline]
pub fn evaluate_membership(mf: &MembershipFunction, x: f32) -> f32 {
    mf.evaluate(x)
}
