use crate::core::sampling::SideViewPoint;

pub const DISTANCE_TO_HEIGHT_RATIO: f32 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f32 = 0.06;
const Y_PADDING_RATIO: f32 = 0.10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideViewWindow {
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl SideViewWindow {
    pub fn fit(points: impl IntoIterator<Item = SideViewPoint>) -> Self {
        let (raw_max_x, raw_min_y, raw_max_y) = points.into_iter().fold(
            (0.0f32, 0.0f32, 0.0f32),
            |(max_x, min_y, max_y), point| {
                (
                    max_x.max(point.flat),
                    min_y.min(point.height),
                    max_y.max(point.height),
                )
            },
        );

        let raw_x_span = raw_max_x.max(1.0);
        let raw_y_span = (raw_max_y - raw_min_y).max(1.0);
        let x_pad = raw_x_span * X_PADDING_RATIO;
        let y_pad = raw_y_span * Y_PADDING_RATIO;

        let mut x_span = (raw_max_x + x_pad).max(1.0);
        let mut y_span = (raw_max_y - raw_min_y + (2.0 * y_pad)).max(1.0);

        if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
            x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
        }

        let y_middle = (raw_max_y + raw_min_y) * 0.5;
        Self {
            x_max: x_span,
            y_min: y_middle - (y_span * 0.5),
            y_max: y_middle + (y_span * 0.5),
        }
    }

    pub fn height_span(&self) -> f32 {
        self.y_max - self.y_min
    }
}
