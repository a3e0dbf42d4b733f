use macroquad::math::Vec3;

// A zero axis leaves the vector as is.
pub fn remove_component_along_axis(vector: Vec3, axis: Vec3) -> Vec3 {
    let axis = axis.normalize_or_zero();
    vector - (axis * vector.dot(axis))
}

pub fn flat_distance(a: Vec3, b: Vec3, up: Vec3) -> f32 {
    remove_component_along_axis(a, up).distance(remove_component_along_axis(b, up))
}

pub fn height_along(point: Vec3, origin: Vec3, up: Vec3) -> f32 {
    (point - origin).dot(up.normalize_or_zero())
}

pub fn cosine_between(a: Vec3, b: Vec3) -> f32 {
    let lengths = a.length() * b.length();
    if lengths <= f32::EPSILON {
        return 0.0;
    }

    (a.dot(b) / lengths).clamp(-1.0, 1.0)
}
