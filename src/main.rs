use std::collections::BTreeMap;
use std::env;

use anyhow::{bail, Context, Result};
use glam::Vec3;
use log::info;
use once_cell::sync::Lazy;
use serde::Serialize;

use globe_engine::data::{load_countries_json, stat_keys};
use globe_engine::interact::ray::Camera;
use globe_engine::interact::resolver::FrameDecision;
use globe_engine::scene::globe::GlobeScene;
use globe_engine::scene::session::{SessionState, Viewport};
use globe_engine::Country;

static SAMPLE_COUNTRIES: Lazy<Vec<Country>> = Lazy::new(|| {
    // Tiny demo dataset; replace with a real countries.json in production.
    vec![
        sample_country("United States", 38.0, -97.0, "$21,439,453", "331,002,651"),
        sample_country("Brazil", -14.2, -51.9, "$1,839,758", "212,559,417"),
        sample_country("Egypt", 26.8, 30.8, "$302,256", "102,334,404"),
        sample_country("Japan", 36.2, 138.2, "$5,154,475", "126,476,461"),
        sample_country("Australia", -25.2, 133.7, "$1,376,255", "25,499,884"),
        sample_country("Bouvet Island", -54.4, 3.4, "", "0"),
    ]
});

fn sample_country(name: &str, lat: f32, lon: f32, gdp: &str, population: &str) -> Country {
    Country {
        name: name.into(),
        latitude: lat,
        longitude: lon,
        stats: BTreeMap::from([
            ("GDP (millions)".to_string(), gdp.to_string()),
            ("Population".to_string(), population.to_string()),
        ]),
    }
}

#[derive(Debug, Serialize)]
struct FrameReport<'a> {
    frame: usize,
    target: &'a str,
    decision: &'a FrameDecision,
}

fn print_frame(frame: usize, target: &str, decision: &FrameDecision) -> Result<()> {
    let report = FrameReport {
        frame,
        target,
        decision,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

/// Projects a world position through the camera onto the viewport, the way
/// the display surface would place a tooltip.
fn screen_position(camera: &Camera, viewport: Viewport, world: Vec3) -> Option<(f32, f32)> {
    let clip = camera.view_proj() * world.extend(1.0);
    if clip.w.abs() <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some((
        (ndc.x + 1.0) / 2.0 * viewport.width,
        (1.0 - ndc.y) / 2.0 * viewport.height,
    ))
}

fn main() -> Result<()> {
    env_logger::init();

    let countries = match env::args().nth(1) {
        Some(path) => load_countries_json(&path)
            .with_context(|| format!("failed to load dataset from {path}"))?,
        None => SAMPLE_COUNTRIES.clone(),
    };

    let keys = stat_keys(&countries);
    let Some(selected) = keys.first().cloned() else {
        bail!("dataset has no statistic columns");
    };
    info!(
        "Loaded {} countries with {} statistic columns; showing {:?}",
        countries.len(),
        keys.len(),
        selected
    );

    let viewport = Viewport::new(800.0, 600.0);
    let mut scene = GlobeScene::with_default_view(countries, viewport.aspect());
    let mut state = SessionState::default();
    state.select_stat(selected.clone(), selected);

    // sweep the pointer over each country's projected screen position
    let targets: Vec<(String, Option<(f32, f32)>)> = scene
        .countries()
        .iter()
        .zip(scene.markers())
        .map(|(country, marker)| {
            (
                country.name.clone(),
                screen_position(scene.camera(), viewport, marker.placement.position),
            )
        })
        .collect();

    let mut frame = 0usize;
    for (name, target) in targets {
        let Some((x, y)) = target else { continue };
        state.pointer_moved(x, y, viewport);
        let decision = scene.tick(&state);
        print_frame(frame, &name, &decision)?;
        frame += 1;
    }

    // drag the globe and look again from the same pointer position
    state.pointer_down(400.0, 300.0);
    state.pointer_moved(550.0, 330.0, viewport);
    state.pointer_up();
    info!(
        "Globe rotated to yaw {:.3}, pitch {:.3}",
        state.orientation.yaw, state.orientation.pitch
    );
    let decision = scene.tick(&state);
    print_frame(frame, "after drag", &decision)?;
    frame += 1;

    // park the pointer off the globe
    state.pointer_moved(5.0, 5.0, viewport);
    let decision = scene.tick(&state);
    print_frame(frame, "corner", &decision)?;

    Ok(())
}
