/// Filter panel: left sidebar with threshold, policy and 3D controls

use crate::pipeline::threshold::ThresholdPolicy;
use crate::pipeline::PipelineConfig;

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    None,
    /// Threshold, policy or 3D toggle changed; re-run the pipeline
    ConfigChanged,
    ResetThreshold,
    ExportCsv,
    OpenFile,
}

/// Render the filter panel in the left sidebar
pub fn show_filter_panel(
    ui: &mut egui::Ui,
    config: &mut PipelineConfig,
    has_image: bool,
    dimensions: Option<&str>,
    operation_count: usize,
) -> FilterAction {
    let mut action = FilterAction::None;

    ui.vertical_centered(|ui| {
        ui.heading("🔴 Red Channel");
    });
    ui.separator();

    if !has_image {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("Open an image to begin.")
                .size(12.5)
                .color(egui::Color32::from_rgb(0x88, 0x8C, 0x94)),
        );
        ui.add_space(4.0);
        ui.label(
            egui::RichText::new("Drag & drop a PNG/JPEG or File → Open")
                .size(12.0)
                .color(egui::Color32::from_rgb(0xAA, 0xAE, 0xB4)),
        );
        ui.add_space(8.0);
        if ui.button("📂 Open Image…").clicked() {
            action = FilterAction::OpenFile;
        }
        return action;
    }

    if let Some(dims) = dimensions {
        ui.label(egui::RichText::new(format!("Image size: {}", dims)).strong());
    }
    ui.label(
        egui::RichText::new(format!("📝 {} ops", operation_count))
            .size(11.5)
            .color(egui::Color32::from_rgb(0x66, 0x6C, 0x78)),
    );
    ui.separator();

    ui.collapsing("🎚 Threshold", |ui| {
        let slider = ui.add(
            egui::Slider::new(&mut config.threshold, 0..=255)
                .text("Min R")
                .clamping(egui::SliderClamping::Always),
        );
        if slider.changed() {
            action = FilterAction::ConfigChanged;
        }

        let before = config.policy;
        egui::ComboBox::from_label("Policy")
            .selected_text(config.policy.label())
            .show_ui(ui, |ui| {
                for policy in ThresholdPolicy::ALL {
                    ui.selectable_value(&mut config.policy, policy, policy.label());
                }
            });
        if config.policy != before {
            action = FilterAction::ConfigChanged;
        }

        let hint = match config.policy {
            ThresholdPolicy::Mask => "Pixels below the threshold are hidden in the heat-map.",
            ThresholdPolicy::Exclude => "Pixels below the threshold are left out of the 3D view.",
        };
        ui.label(egui::RichText::new(hint).size(11.0).weak());

        if config.threshold > 0 && ui.button("↺ Reset threshold").clicked() {
            action = FilterAction::ResetThreshold;
        }
    });

    ui.collapsing("🧊 3D View", |ui| {
        if ui.checkbox(&mut config.show_3d, "Show 3D scatter").changed() {
            action = FilterAction::ConfigChanged;
        }
        ui.label(
            egui::RichText::new(format!(
                "At most {} points are plotted (seeded random sample).",
                config.sample_cap
            ))
            .size(11.0)
            .weak(),
        );
    });

    ui.separator();
    if ui
        .button("📥 Download full CSV…")
        .on_hover_text("All pixels as x,y,R, independent of the threshold")
        .clicked()
    {
        action = FilterAction::ExportCsv;
    }

    action
}
