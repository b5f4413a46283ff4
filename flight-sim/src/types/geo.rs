//! Great-circle helpers on a spherical Earth model. Angles are degrees at
//! the public boundary and radians internally.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in kilometers between two coordinates along the great circle.
pub fn haversine_distance_km(a_lat: f64, a_lon: f64, b_lat: f64, b_lon: f64) -> f64 {
    let delta_lat = (b_lat - a_lat).to_radians();
    let delta_lon = (b_lon - a_lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + a_lat.to_radians().cos() * b_lat.to_radians().cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Compass bearing from the first point facing the second, in `[0, 360)`.
pub fn initial_bearing_degrees(a_lat: f64, a_lon: f64, b_lat: f64, b_lon: f64) -> f64 {
    let lat1 = a_lat.to_radians();
    let lat2 = b_lat.to_radians();
    let delta_lon = (b_lon - a_lon).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

fn lat_lon_to_vector(lat: f64, lon: f64) -> [f64; 3] {
    let phi = lat.to_radians();
    let lambda = lon.to_radians();
    [
        phi.cos() * lambda.cos(),
        phi.cos() * lambda.sin(),
        phi.sin(),
    ]
}

fn vector_to_lat_lon(v: [f64; 3]) -> (f64, f64) {
    let hyp = (v[0] * v[0] + v[1] * v[1]).sqrt();
    (v[2].atan2(hyp).to_degrees(), v[1].atan2(v[0]).to_degrees())
}

/// Spherical linear interpolation between two unit vectors. Returns `v0`
/// unchanged when the vectors are numerically identical, so zero-length
/// routes never divide by zero.
fn slerp(v0: [f64; 3], v1: [f64; 3], t: f64) -> [f64; 3] {
    let dot = v0[0] * v1[0] + v0[1] * v1[1] + v0[2] * v1[2];
    let theta = dot.clamp(-1.0, 1.0).acos();
    if theta.abs() < 1e-6 {
        return v0;
    }

    let sin_theta = theta.sin();
    let a = ((1.0 - t) * theta).sin() / sin_theta;
    let b = (t * theta).sin() / sin_theta;
    [
        v0[0] * a + v1[0] * b,
        v0[1] * a + v1[1] * b,
        v0[2] * a + v1[2] * b,
    ]
}

/// Point at parameter `t` in `[0, 1]` along the great circle from A to B.
pub fn great_circle_point(a_lat: f64, a_lon: f64, b_lat: f64, b_lon: f64, t: f64) -> (f64, f64) {
    let v0 = lat_lon_to_vector(a_lat, a_lon);
    let v1 = lat_lon_to_vector(b_lat, b_lon);
    vector_to_lat_lon(slerp(v0, v1, t))
}

/// Samples the great circle from A to B at `segments + 1` evenly spaced
/// parameter values.
pub fn great_circle_path(
    a_lat: f64,
    a_lon: f64,
    b_lat: f64,
    b_lon: f64,
    segments: usize,
) -> Vec<(f64, f64)> {
    (0..=segments)
        .map(|i| great_circle_point(a_lat, a_lon, b_lat, b_lon, i as f64 / segments as f64))
        .collect()
}
