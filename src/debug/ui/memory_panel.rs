// Memory Panel - hex + ASCII dump of RAM, ROM and cartridge

use super::DebugInspector;
use crate::machine::{Machine, MemoryRegion};
use std::fmt::Write;

/// Bytes shown on one dump row
pub const BYTES_PER_ROW: usize = 16;

/// Format one dump row: offset, hex bytes, then printable ASCII
///
/// Short rows are padded so the ASCII column stays aligned.
///
/// # Arguments
///
/// * `offset` - Offset of the first byte within the region
/// * `bytes` - Up to `BYTES_PER_ROW` bytes
pub fn format_hex_row(offset: usize, bytes: &[u8]) -> String {
    let mut row = format!("{:04X}:", offset);

    for i in 0..BYTES_PER_ROW {
        match bytes.get(i) {
            Some(b) => {
                let _ = write!(row, " {:02X}", b);
            }
            None => row.push_str("   "),
        }
    }

    row.push_str("  ");
    row.extend(bytes.iter().take(BYTES_PER_ROW).map(|&b| {
        if b.is_ascii_graphic() || b == b' ' {
            b as char
        } else {
            '.'
        }
    }));
    row
}

/// Show the region tabs and the selected dump
pub(super) fn show<M: Machine>(ui: &mut egui::Ui, state: &mut DebugInspector, machine: &M) {
    ui.horizontal(|ui| {
        for region in MemoryRegion::ALL {
            if ui
                .selectable_label(state.region == region, region.name())
                .on_hover_text(format!("{} bytes", region.size()))
                .clicked()
            {
                state.region = region;
            }
        }
    });

    ui.separator();

    let memory = machine.memory(state.region);
    let total_rows = memory.len().div_ceil(BYTES_PER_ROW);
    let row_height = ui.text_style_height(&egui::TextStyle::Monospace);

    egui::ScrollArea::vertical()
        .id_salt(state.region.name())
        .auto_shrink([false, false])
        .show_rows(ui, row_height, total_rows, |ui, rows| {
            for row in rows {
                let start = row * BYTES_PER_ROW;
                let end = (start + BYTES_PER_ROW).min(memory.len());
                ui.monospace(format_hex_row(start, &memory[start..end]));
            }
        });
}
