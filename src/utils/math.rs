//! Математические функции для нечеткого вывода

/// Ограничение значения в заданных пределах
#[inline(always)]
pub fn constrain(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Кусочно-линейная интерполяция по опорным точкам (x, y)
///
/// Точки должны идти по неубыванию x. Слева и справа от точек возвращается
/// значение крайней точки. Если x совпадает с несколькими точками
/// (вертикальный фронт), берется наибольшее y.
pub fn interp_points(points: &[(f32, f32)], x: f32) -> f32 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };

    if x < first.0 {
        return first.1;
    }
    if x > last.0 {
        return last.1;
    }

    let mut exact: Option<f32> = None;
    for &(px, py) in points {
        if px == x {
            exact = Some(exact.map_or(py, |y| y.max(py)));
        }
    }
    if let Some(y) = exact {
        return y;
    }

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x0 < x && x < x1 {
            // x0 < x < x1, ширина сегмента ненулевая при любом масштабе
            return y0 + (y1 - y0) * ((x - x0) / (x1 - x0));
        }
    }

    // Недостижимо для отсортированных точек
    last.1
}

/// Интеграл по формуле трапеций для последовательности точек (x, y)
pub fn trapezoid<I>(samples: I) -> f32
where
    I: IntoIterator<Item = (f32, f32)>,
{
    let mut iter = samples.into_iter();
    let mut prev = match iter.next() {
        Some(p) => p,
        None => return 0.0,
    };

    let mut area = 0.0;
    for (x, y) in iter {
        area += (x - prev.0) * (y + prev.1) * 0.5;
        prev = (x, y);
    }
    area
}
