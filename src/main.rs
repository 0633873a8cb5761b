//! Cam Follow Path (Demo).
//!
//! Baut einen Sinus-Pfad auf, bewegt einen simulierten Tool-Transform
//! entlang des Pfads und protokolliert die vom Snap-Controller
//! geschriebenen Ausgabe-Posen.

use std::cell::RefCell;
use std::rc::Rc;

use cam_follow_path::core::{polyline_length, sine_wave_path};
use cam_follow_path::{
    MarkupPath, OutputTransform, PathSource, SnapController, SnapIntent, SnapOptions,
    TrackedTransform,
};
use glam::DVec3;

fn main() -> anyhow::Result<()> {
    DemoRunner::run()
}

struct DemoRunner;

impl DemoRunner {
    fn run() -> anyhow::Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Cam Follow Path v{} startet...", env!("CARGO_PKG_VERSION"));

        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = SnapOptions::config_path();
        let options = SnapOptions::load_from_file(&config_path);
        let demo = &options.demo;

        let path = Rc::new(RefCell::new(MarkupPath::new(sine_wave_path(
            demo.path_point_count,
            demo.path_length,
            demo.path_amplitude,
        ))));
        let tracked = Rc::new(RefCell::new(TrackedTransform::default()));
        let output = Rc::new(RefCell::new(OutputTransform::new()));

        let mut controller = SnapController::from_options(&options)?;
        controller.bind_path_source(&path);
        controller.bind_tracked_source(&tracked);
        controller.bind_output(&output);
        // Demo läuft immer mit aktivem Snap, unabhängig von `enabled` in der Datei
        controller.handle_intent(SnapIntent::SnapToggled { enabled: true })?;

        log::info!(
            "Pfad mit {} Punkten ({:.1} lang), Snap-Distanz {}",
            path.borrow().len(),
            polyline_length(&path.borrow().points()),
            controller.threshold()
        );

        let steps = demo.sweep_steps.max(1);
        for step in 0..=steps {
            let s = step as f64 / steps as f64;
            // Tool läuft geradlinig entlang X, der Pfad schwingt um die Achse
            let origin = DVec3::new(s * demo.path_length, demo.sweep_offset, 0.0);
            tracked.borrow_mut().set_origin(origin);
            controller.handle_intent(SnapIntent::PoseModified)?;

            let pose = output.borrow().pose();
            log::info!(
                "Schritt {:>3}: Tool ({:>7.2}, {:>7.2}, {:>7.2}) → Ausgabe {:?}",
                step,
                origin.x,
                origin.y,
                origin.z,
                pose
            );
        }

        controller.handle_intent(SnapIntent::SnapToggled { enabled: false })?;

        let stats = controller.stats();
        log::info!(
            "Fertig: {} eingerastet, {} außerhalb der Snap-Distanz, {} übersprungen",
            stats.snapped,
            stats.passed_through,
            stats.skipped
        );
        Ok(())
    }
}
