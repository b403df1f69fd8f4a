use std::cmp::Ordering;

use serde::Serialize;

use crate::interact::ray::{intersect_obb, Camera};
use crate::scene::globe::{Marker, BASE_OPACITY, HOVER_OPACITY};
use crate::scene::session::SessionState;
use crate::stats::normalize::{max_magnitude, scale_factor};
use crate::Country;

/// Tooltip text shown when the selected statistic has no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Depth scale below which a marker cannot be hit; a collapsed marker is
/// invisible and its transform is singular.
const MIN_PICKABLE_SCALE: f32 = 1e-6;

/// Per-frame display decision for the tooltip surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameDecision {
    /// Nothing under the pointer; hide the tooltip.
    Idle,
    /// Tooltip contents for the hovered country.
    Hover {
        country_index: usize,
        name: String,
        stat_label: String,
        value: String,
    },
}

/// Resolves one frame.
///
/// Every marker attribute is recomputed from the session state: opacities
/// reset to the baseline, depth scales rebuilt for the currently selected
/// statistic, then the pointer ray is intersected against the markers under
/// the current globe rotation. All hit markers are highlighted; the nearest
/// hit decides the tooltip. Calling this again with unchanged state yields
/// the same decision and the same marker attributes.
pub fn resolve(
    markers: &mut [Marker],
    countries: &[Country],
    camera: &Camera,
    state: &SessionState,
) -> FrameDecision {
    debug_assert_eq!(markers.len(), countries.len());

    for marker in markers.iter_mut() {
        marker.opacity = BASE_OPACITY;
    }

    let key = state.selected.key.as_str();
    let max = max_magnitude(countries, key);
    for (marker, country) in markers.iter_mut().zip(countries) {
        let raw = country.stat(key).unwrap_or("");
        marker.depth_scale = scale_factor(raw, max) as f32;
    }

    let Some(ndc) = state.pointer.ndc else {
        return FrameDecision::Idle;
    };

    let ray = camera.ray_from_ndc(ndc.x, ndc.y);
    let group_rotation = state.orientation.rotation();
    let half_extents = Marker::half_extents();

    let mut hits: Vec<(usize, f32)> = Vec::new();
    for (index, marker) in markers.iter().enumerate() {
        if marker.depth_scale < MIN_PICKABLE_SCALE {
            continue;
        }
        let world = marker.world_from_local(group_rotation);
        if let Some(distance) = intersect_obb(&ray, world, half_extents) {
            hits.push((index, distance));
        }
    }
    hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    for &(index, _) in &hits {
        markers[index].opacity = HOVER_OPACITY;
    }

    let Some(&(nearest, _)) = hits.first() else {
        return FrameDecision::Idle;
    };

    let country = &countries[nearest];
    let raw = country.stat(key).unwrap_or("");
    let value = if raw.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        raw.to_string()
    };

    FrameDecision::Hover {
        country_index: nearest,
        name: country.name.clone(),
        stat_label: state.selected.label.clone(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::globe::GlobeScene;
    use crate::scene::session::Viewport;
    use std::collections::BTreeMap;

    fn country(name: &str, lat: f32, lon: f32, gdp: &str) -> Country {
        Country {
            name: name.into(),
            latitude: lat,
            longitude: lon,
            stats: BTreeMap::from([("GDP".to_string(), gdp.to_string())]),
        }
    }

    fn scene_with(countries: Vec<Country>) -> GlobeScene {
        GlobeScene::with_default_view(countries, 1.0)
    }

    fn hover_state() -> SessionState {
        let mut state = SessionState::default();
        state.select_stat("GDP", "GDP");
        // pointer dead center
        state.pointer_moved(400.0, 300.0, Viewport::new(800.0, 600.0));
        state
    }

    #[test]
    fn pointer_over_marker_yields_hover_decision() {
        let mut scene = scene_with(vec![
            country("A", 0.0, 0.0, "$100"),
            country("B", 0.0, 90.0, ""),
        ]);
        let state = hover_state();

        let decision = scene.tick(&state);
        assert_eq!(
            decision,
            FrameDecision::Hover {
                country_index: 0,
                name: "A".into(),
                stat_label: "GDP".into(),
                value: "$100".into(),
            }
        );

        let markers = scene.markers();
        assert_eq!(markers[0].opacity, HOVER_OPACITY);
        assert_eq!(markers[0].depth_scale, 1.0);
        assert_eq!(markers[1].opacity, BASE_OPACITY);
        assert_eq!(markers[1].depth_scale, 0.0);
    }

    #[test]
    fn unmoved_pointer_stays_idle() {
        let mut scene = scene_with(vec![country("A", 0.0, 0.0, "$100")]);
        let mut state = SessionState::default();
        state.select_stat("GDP", "GDP");

        assert_eq!(scene.tick(&state), FrameDecision::Idle);
        assert_eq!(scene.markers()[0].opacity, BASE_OPACITY);
    }

    #[test]
    fn pointer_off_every_marker_yields_idle() {
        let mut scene = scene_with(vec![country("A", 0.0, 0.0, "$100")]);
        let mut state = SessionState::default();
        state.select_stat("GDP", "GDP");
        // top-left corner, away from the globe
        state.pointer_moved(2.0, 2.0, Viewport::new(800.0, 600.0));

        assert_eq!(scene.tick(&state), FrameDecision::Idle);
    }

    #[test]
    fn missing_value_marker_is_not_pickable() {
        // the only country under the pointer has no value
        let mut scene = scene_with(vec![country("A", 0.0, 0.0, "")]);
        let state = hover_state();

        assert_eq!(scene.tick(&state), FrameDecision::Idle);
        assert_eq!(scene.markers()[0].depth_scale, 0.0);
    }

    #[test]
    fn unparsable_value_scales_to_zero_but_would_show_raw_text() {
        let mut scene = scene_with(vec![
            country("A", 0.0, 0.0, "no data"),
            country("B", 0.0, 90.0, "$100"),
        ]);
        let state = hover_state();

        // A collapses, so nothing sits under the centered pointer
        assert_eq!(scene.tick(&state), FrameDecision::Idle);
        assert_eq!(scene.markers()[0].depth_scale, 0.0);
        assert_eq!(scene.markers()[1].depth_scale, 1.0);
    }

    #[test]
    fn overlapping_markers_nearest_wins_and_all_highlight() {
        // same location: A at full depth reaches closer to the camera
        let mut scene = scene_with(vec![
            country("A", 0.0, 0.0, "$100"),
            country("B", 0.0, 0.0, "50"),
        ]);
        let state = hover_state();

        let decision = scene.tick(&state);
        match decision {
            FrameDecision::Hover { name, .. } => assert_eq!(name, "A"),
            other => panic!("expected hover, got {other:?}"),
        }
        assert_eq!(scene.markers()[0].opacity, HOVER_OPACITY);
        assert_eq!(scene.markers()[1].opacity, HOVER_OPACITY);
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut scene = scene_with(vec![
            country("A", 0.0, 0.0, "$100"),
            country("B", 0.0, 90.0, "40"),
        ]);
        let state = hover_state();

        let first = scene.tick(&state);
        let attrs_first: Vec<(f32, f32)> = scene
            .markers()
            .iter()
            .map(|m| (m.depth_scale, m.opacity))
            .collect();

        let second = scene.tick(&state);
        let attrs_second: Vec<(f32, f32)> = scene
            .markers()
            .iter()
            .map(|m| (m.depth_scale, m.opacity))
            .collect();

        assert_eq!(first, second);
        assert_eq!(attrs_first, attrs_second);
    }

    #[test]
    fn degenerate_column_keeps_the_frame_alive() {
        let mut scene = scene_with(vec![
            country("A", 0.0, 0.0, ""),
            country("B", 0.0, 90.0, ""),
        ]);
        let state = hover_state();

        assert_eq!(scene.tick(&state), FrameDecision::Idle);
        for marker in scene.markers() {
            assert_eq!(marker.depth_scale, 0.0);
        }
    }
}
