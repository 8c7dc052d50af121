//! Scene hierarchy demo
//!
//! Builds a small orbiting system (a spinning cube carrying a sphere, which in
//! turn carries a cylinder) next to a letter "H", animates it for a fixed
//! number of frames, and logs every draw call and world position.
//!
//! Usage: `scene_demo [config.toml|config.ron]`

use std::cell::RefCell;
use std::rc::Rc;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;

const FRAME_COUNT: u32 = 8;
const FRAME_TIME: f32 = 1.0 / 4.0;
/// Degrees per second
const ORBIT_SPEED: f32 = 90.0;
const MOON_SPEED: f32 = 180.0;

/// Renderer that logs each draw call instead of touching a GPU
#[derive(Default)]
struct LoggingRenderer {
    color: Color,
    draw_calls: usize,
}

impl LoggingRenderer {
    fn log_draw(&mut self, what: &str, model: &Mat4) {
        self.draw_calls += 1;
        log::info!(
            "draw {what} at ({:.2}, {:.2}, {:.2}) color {:?}",
            model[(0, 3)],
            model[(1, 3)],
            model[(2, 3)],
            self.color.to_array()
        );
    }
}

impl GeometryRenderer for LoggingRenderer {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_cube(&mut self, model: &Mat4) {
        self.log_draw("cube", model);
    }

    fn draw_sphere(&mut self, model: &Mat4, radius: f32) {
        self.log_draw(&format!("sphere r={radius}"), model);
    }

    fn draw_cylinder(&mut self, model: &Mat4, height: f32, radius: f32) {
        self.log_draw(&format!("cylinder h={height} r={radius}"), model);
    }

    fn draw_mesh(&mut self, model: &Mat4, mesh: &CompositeMesh) {
        self.log_draw(&format!("mesh ({} triangles)", mesh.triangle_count()), model);
    }
}

struct DemoApp {
    scene: SceneRegistry,
    renderer: Rc<RefCell<LoggingRenderer>>,
    sun: NodeHandle,
    planet: NodeHandle,
    moon: NodeHandle,
}

impl DemoApp {
    fn new(config: &SceneConfig) -> Result<Self, SceneError> {
        log::info!("Creating scene...");
        let (renderer, shared_renderer) = shared(LoggingRenderer::default());
        let mut scene = SceneRegistry::with_config(Some(shared_renderer), config.hierarchy);
        let defaults = &config.primitives;

        let sun = scene.create_cube("sun", CubeDesc::from_defaults(defaults).with_scale(Vec3::new(1.5, 1.5, 1.5)));
        let planet = scene.create_sphere(
            "planet",
            SphereDesc::from_defaults(defaults)
                .with_position(Vec3::new(4.0, 0.0, 0.0))
                .with_radius(defaults.sphere_radius * 0.5),
        );
        let moon = scene.create_cylinder(
            "moon",
            CylinderDesc::from_defaults(defaults).with_position(Vec3::new(1.5, 0.0, 0.0)),
        );
        scene.create_letter_h(
            "",
            LetterDesc::from_defaults(defaults).with_position(Vec3::new(-6.0, 0.0, 0.0)),
        );

        scene.add_child(sun, planet)?;
        scene.add_child(planet, moon)?;
        log::info!("Scene ready with {} objects", scene.object_count());

        Ok(Self {
            scene,
            renderer,
            sun,
            planet,
            moon,
        })
    }

    fn update(&mut self, delta_time: f32) -> Result<(), SceneError> {
        if let Some(mut sun) = self.scene.object_mut(self.sun) {
            sun.rotate_axis_angle(Vec3::y(), ORBIT_SPEED * delta_time, Space::Local)?;
        }
        if let Some(mut planet) = self.scene.object_mut(self.planet) {
            planet.rotate_axis_angle(Vec3::y(), MOON_SPEED * delta_time, Space::Local)?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), SceneError> {
        self.scene.draw_all()
    }

    fn report(&mut self, frame: u32) -> Result<(), SceneError> {
        for (name, node) in [("planet", self.planet), ("moon", self.moon)] {
            let position = self.scene.world_position(node)?;
            log::info!(
                "frame {frame}: {name} world position ({:.2}, {:.2}, {:.2})",
                position.x,
                position.y,
                position.z
            );
        }
        Ok(())
    }

    fn run(&mut self, frames: u32, delta_time: f32) -> Result<(), SceneError> {
        for frame in 0..frames {
            self.update(delta_time)?;
            self.render()?;
            self.report(frame)?;
        }
        log::info!(
            "Finished {frames} frames, {} draw calls",
            self.renderer.borrow().draw_calls
        );
        Ok(())
    }
}

fn load_config() -> Result<SceneConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => SceneConfig::load_from_file(&path),
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init_with_filter(&config.engine.log_level);
    log::info!("Starting scene demo");

    let mut app = DemoApp::new(&config)?;
    app.run(FRAME_COUNT, FRAME_TIME)?;
    Ok(())
}
