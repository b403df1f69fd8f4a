use glam::{Quat, Vec3};

/// Position and orientation of one marker on the sphere surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Unit vector from the surface point toward the sphere center.
    pub facing: Vec3,
    /// Rotates local +Z onto `facing`, so a marker's depth axis runs radially.
    pub orientation: Quat,
}

/// Maps geographic coordinates onto a sphere of the given radius.
///
/// Coordinates outside [-90, 90] / [-180, 180] are not rejected; they go
/// through the same trigonometric mapping.
pub fn project(latitude_deg: f32, longitude_deg: f32, radius: f32) -> Placement {
    let lat = latitude_deg / 180.0 * std::f32::consts::PI;
    let lon = longitude_deg / 180.0 * std::f32::consts::PI;

    let position = Vec3::new(
        radius * lat.cos() * lon.sin(),
        radius * lat.sin(),
        radius * lat.cos() * lon.cos(),
    );
    let facing = (-position).normalize_or_zero();
    let orientation = if facing == Vec3::ZERO {
        // degenerate radius
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::Z, facing)
    };

    Placement {
        position,
        facing,
        orientation,
    }
}
