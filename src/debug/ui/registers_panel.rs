// Registers Panel

use crate::machine::CpuRegisters;

/// Tooltip for a register value: unsigned and signed 16-bit readings
pub fn register_tooltip(value: u16) -> String {
    format!("{}u, {}s", value, value as i16)
}

/// One labelled value in the register grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCell {
    pub label: String,
    pub value: u16,
    pub text: String,
}

impl RegisterCell {
    fn wide(label: &str, value: u16) -> Self {
        Self {
            label: label.to_string(),
            value,
            text: format!("0x{:04X}", value),
        }
    }

    fn narrow(label: &str, value: u8) -> Self {
        Self {
            label: label.to_string(),
            value: value as u16,
            text: format!("0x{:02X}", value),
        }
    }
}

/// Cells in display order, four per grid row
///
/// The indexed-mode register table follows the IRQ status, labelled by
/// postbyte index.
pub fn register_cells(regs: &CpuRegisters) -> Vec<RegisterCell> {
    let mut cells = vec![
        RegisterCell::wide("X", regs.x),
        RegisterCell::wide("Y", regs.y),
        RegisterCell::wide("U", regs.u),
        RegisterCell::wide("S", regs.s),
        RegisterCell::wide("PC", regs.pc),
        RegisterCell::narrow("A", regs.a),
        RegisterCell::narrow("B", regs.b),
        RegisterCell::narrow("DP", regs.dp),
        RegisterCell::narrow("CC", regs.cc),
        RegisterCell::narrow("IRQ stat", regs.irq_status),
    ];
    cells.extend(
        regs.indexed
            .iter()
            .enumerate()
            .map(|(i, &value)| RegisterCell::wide(&i.to_string(), value)),
    );
    cells
}

/// Show the register file
pub(super) fn show(ui: &mut egui::Ui, regs: &CpuRegisters) {
    ui.heading("Registers");

    egui::Grid::new("registers_grid")
        .num_columns(8)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for row in register_cells(regs).chunks(4) {
                for cell in row {
                    ui.label(format!("{}:", cell.label));
                    ui.monospace(&cell.text)
                        .on_hover_text(register_tooltip(cell.value));
                }
                ui.end_row();
            }
        });
}
