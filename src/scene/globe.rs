use glam::{Mat4, Quat, Vec3};

use crate::interact::ray::Camera;
use crate::interact::resolver::{resolve, FrameDecision};
use crate::projection::sphere::{project, Placement};
use crate::scene::session::SessionState;
use crate::Country;

/// Marker base dimensions: a thin bar whose depth axis carries the
/// statistic.
pub const MARKER_WIDTH: f32 = 0.2;
pub const MARKER_HEIGHT: f32 = 0.2;
pub const MARKER_DEPTH: f32 = 2.0;

/// Opacity of a marker that is not under the pointer.
pub const BASE_OPACITY: f32 = 0.5;
/// Opacity of a marker under the pointer.
pub const HOVER_OPACITY: f32 = 1.0;

/// Globe radius of the original scene.
pub const DEFAULT_RADIUS: f32 = 7.0;

/// One country's visual bar on the globe. Placement is fixed at scene
/// build; scale and opacity are rewritten every tick.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    pub placement: Placement,
    /// Depth-axis multiplier; zero collapses the marker.
    pub depth_scale: f32,
    pub opacity: f32,
}

impl Marker {
    fn new(placement: Placement) -> Self {
        Marker {
            placement,
            depth_scale: 0.0,
            opacity: BASE_OPACITY,
        }
    }

    /// Half extents of the unscaled marker box in its local space.
    pub fn half_extents() -> Vec3 {
        Vec3::new(MARKER_WIDTH / 2.0, MARKER_HEIGHT / 2.0, MARKER_DEPTH / 2.0)
    }

    /// Full local-to-world transform under the given group rotation.
    pub fn world_from_local(&self, group_rotation: Quat) -> Mat4 {
        Mat4::from_quat(group_rotation)
            * Mat4::from_translation(self.placement.position)
            * Mat4::from_quat(self.placement.orientation)
            * Mat4::from_scale(Vec3::new(1.0, 1.0, self.depth_scale))
    }
}

/// The country markers plus the camera viewing them.
#[derive(Clone, Debug)]
pub struct GlobeScene {
    countries: Vec<Country>,
    markers: Vec<Marker>,
    camera: Camera,
    radius: f32,
}

impl GlobeScene {
    /// Projects every country onto the sphere once and builds its marker.
    pub fn new(countries: Vec<Country>, radius: f32, camera: Camera) -> Self {
        let markers = countries
            .iter()
            .map(|c| Marker::new(project(c.latitude, c.longitude, radius)))
            .collect();
        GlobeScene {
            countries,
            markers,
            camera,
            radius,
        }
    }

    /// Scene with the original viewing setup: radius 7, camera at z = 15.
    pub fn with_default_view(countries: Vec<Country>, aspect: f32) -> Self {
        GlobeScene::new(countries, DEFAULT_RADIUS, Camera::with_aspect(aspect))
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Runs one frame: rescales and re-highlights every marker for the
    /// current selection, then resolves the pointer against them.
    pub fn tick(&mut self, state: &SessionState) -> FrameDecision {
        resolve(&mut self.markers, &self.countries, &self.camera, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::collections::BTreeMap;

    fn country(name: &str, lat: f32, lon: f32) -> Country {
        Country {
            name: name.into(),
            latitude: lat,
            longitude: lon,
            stats: BTreeMap::new(),
        }
    }

    #[test]
    fn markers_are_placed_on_the_sphere() {
        let scene = GlobeScene::with_default_view(
            vec![country("A", 0.0, 0.0), country("B", 48.8, 2.3)],
            1.0,
        );
        assert_eq!(scene.markers().len(), 2);
        for marker in scene.markers() {
            assert_approx_eq!(marker.placement.position.length(), scene.radius(), 1e-3);
            assert_eq!(marker.opacity, BASE_OPACITY);
            assert_eq!(marker.depth_scale, 0.0);
        }
    }

    #[test]
    fn marker_transform_scales_depth_only() {
        let mut marker = Marker::new(crate::projection::sphere::project(0.0, 0.0, 7.0));
        marker.depth_scale = 0.5;
        let world = marker.world_from_local(Quat::IDENTITY);

        // local depth endpoint, halfway scaled
        let tip = world.transform_point3(Vec3::new(0.0, 0.0, 1.0));
        assert_approx_eq!(tip.z, 7.0 - 0.5, 1e-4);
        // width endpoint unscaled
        let side = world.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert_approx_eq!(side.distance(marker.placement.position), 1.0, 1e-4);
    }
}
