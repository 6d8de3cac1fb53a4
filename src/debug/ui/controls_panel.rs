// Controls Panel - pause, render and speed settings

use crate::emulator::{Emulator, RunMode};
use crate::machine::Machine;

/// Show the pause, sharp, remanence and speed controls
pub(super) fn show<M: Machine>(ui: &mut egui::Ui, emu: &mut Emulator<M>) {
    ui.heading("Controls");

    ui.horizontal(|ui| {
        let mut paused = emu.is_paused();
        if ui.checkbox(&mut paused, "Pause").changed() {
            emu.set_run_mode(if paused {
                RunMode::Paused
            } else {
                RunMode::Running
            });
        }

        let config = emu.render_config_mut();
        ui.checkbox(&mut config.sharp, "Sharp")
            .on_hover_text("Disable phosphor persistence and glow");
    });

    let config = emu.render_config_mut();
    ui.add(egui::Slider::new(&mut config.remanence, 0..=255).text("Remanence"));

    ui.horizontal(|ui| {
        ui.label("Emu. speed");
        ui.add(
            egui::DragValue::new(&mut config.speed)
                .range(1..=u32::MAX)
                .speed(0.1),
        );
    });
}
