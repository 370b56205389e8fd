use crate::color::Color;

/// Fills a `width * height` buffer that fades from green in the top row towards red at the bottom.
pub fn vertical_gradient(width: usize, height: usize) -> Vec<Color> {
    let mut colors = Vec::with_capacity(width * height);
    for h in 0..height {
        let fraction = h as f64 / height as f64;
        let row_color = Color::new(fraction, 1.0 - fraction, 0.0);
        colors.extend(std::iter::repeat(row_color).take(width));
    }
    colors
}

pub fn apply_gamma(colors: &mut [Color]) {
    for color in colors {
        color.gamma();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_gradient() {
        let colors = vertical_gradient(2, 4);
        assert_eq!(colors.len(), 8);

        let rows: Vec<_> = colors.chunks(2).map(|row| row[0].components()).collect();
        assert_eq!(rows, vec![(0.0, 1.0, 0.0), (0.25, 0.75, 0.0), (0.5, 0.5, 0.0), (0.75, 0.25, 0.0)]);
        for row in colors.chunks(2) {
            assert_eq!(row[0], row[1]);
        }
    }

    #[test]
    fn test_apply_gamma() {
        let mut colors = vertical_gradient(1, 4);
        apply_gamma(&mut colors);
        assert_eq!(colors[0].components(), (0.0, 1.0, 0.0));
        assert_eq!(colors[1].components(), (0.5, 0.75f64.sqrt(), 0.0));
    }
}
