/// The inspection pipeline: red plane → table → threshold → heat-map / 3D sample.
///
/// `run` is a pure function of the decoded grid and the current
/// `PipelineConfig`; the UI calls it again whenever the config changes.

pub mod coords;
pub mod export;
pub mod heatmap;
pub mod sampler;
pub mod table;
pub mod threshold;

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::data::raster::{IntensityPlane, PixelGrid};
use heatmap::HeatmapFrame;
use sampler::SampleSet;
use table::PixelTable;
use threshold::ThresholdPolicy;

/// User-controlled pipeline parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum red intensity, 0 = no filtering
    pub threshold: u8,
    pub policy: ThresholdPolicy,
    /// Build the 3D sample set
    pub show_3d: bool,
    pub sample_cap: usize,
    pub sample_seed: u64,
    /// Rows shown in the table preview
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: 0,
            policy: ThresholdPolicy::default(),
            show_3d: true,
            sample_cap: sampler::DEFAULT_SAMPLE_CAP,
            sample_seed: sampler::DEFAULT_SAMPLE_SEED,
            preview_rows: table::DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PipelineConfig {
    /// Settings for a freshly opened image: threshold back to 0, the rest kept.
    pub fn for_new_image(&self) -> Self {
        Self {
            threshold: 0,
            ..self.clone()
        }
    }
}

/// What the 3D view should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScatterOutcome {
    /// 3D view switched off.
    Hidden,
    /// Every record was filtered out.
    Empty,
    Points(SampleSet),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub width: usize,
    pub height: usize,
    pub plane: IntensityPlane,
    pub table: PixelTable,
    pub heatmap: HeatmapFrame,
    pub scatter: ScatterOutcome,
    /// Color range shared by the 3D points
    pub scatter_range: (u8, u8),
}

impl PipelineOutput {
    pub fn dimensions_label(&self) -> String {
        format!("{} × {} px", self.width, self.height)
    }
}

/// Run every stage on `grid` with `config`.
pub fn run(grid: &PixelGrid, config: &PipelineConfig) -> PipelineOutput {
    let started = Instant::now();

    let plane = grid.red_plane();
    let table = PixelTable::build(&plane);
    let heatmap = HeatmapFrame::build(&plane, config.policy, config.threshold);

    let scatter = if !config.show_3d {
        ScatterOutcome::Hidden
    } else {
        let working = match config.policy {
            ThresholdPolicy::Exclude => threshold::exclude(table.records(), config.threshold),
            ThresholdPolicy::Mask => table.records().to_vec(),
        };
        if working.is_empty() {
            ScatterOutcome::Empty
        } else {
            ScatterOutcome::Points(sampler::sample(
                working,
                config.sample_cap,
                config.sample_seed,
            ))
        }
    };

    log::debug!(
        "Pipeline run: {}x{}, threshold {} ({}), {:.1} ms",
        plane.width(),
        plane.height(),
        config.threshold,
        config.policy,
        started.elapsed().as_secs_f64() * 1000.0
    );

    PipelineOutput {
        width: plane.width(),
        height: plane.height(),
        plane,
        table,
        heatmap,
        scatter,
        scatter_range: threshold::filtered_range(config.threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::raster::tests::grid_from_red;
    use table::PixelRecord;

    fn two_by_two() -> PixelGrid {
        grid_from_red(2, 2, &[10, 20, 30, 40])
    }

    fn points(output: &PipelineOutput) -> &SampleSet {
        match &output.scatter {
            ScatterOutcome::Points(set) => set,
            other => panic!("expected points, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_records() {
        let output = run(&two_by_two(), &PipelineConfig::default());
        assert_eq!(output.dimensions_label(), "2 × 2 px");
        let expected = [(0, 1, 10), (1, 1, 20), (0, 0, 30), (1, 0, 40)];
        for (rec, &(x, y, intensity)) in output.table.records().iter().zip(expected.iter()) {
            assert_eq!(*rec, PixelRecord { x, y, intensity });
        }
    }

    #[test]
    fn test_scenario_exclude_threshold_25() {
        let config = PipelineConfig {
            threshold: 25,
            policy: ThresholdPolicy::Exclude,
            ..Default::default()
        };
        let output = run(&two_by_two(), &config);
        assert_eq!(
            points(&output).records,
            vec![
                PixelRecord { x: 0, y: 0, intensity: 30 },
                PixelRecord { x: 1, y: 0, intensity: 40 },
            ]
        );
        // Table and export stay complete.
        assert_eq!(output.table.len(), 4);
        assert_eq!(export::tests::to_csv_string(&output.table).lines().count(), 5);
        assert_eq!(output.scatter_range, (25, 255));
    }

    #[test]
    fn test_exclude_everything_yields_empty() {
        let config = PipelineConfig {
            threshold: 255,
            policy: ThresholdPolicy::Exclude,
            ..Default::default()
        };
        let output = run(&two_by_two(), &config);
        assert_eq!(output.scatter, ScatterOutcome::Empty);
        assert_eq!(output.table.len(), 4);
    }

    #[test]
    fn test_mask_policy_keeps_full_scatter() {
        let config = PipelineConfig {
            threshold: 25,
            policy: ThresholdPolicy::Mask,
            ..Default::default()
        };
        let output = run(&two_by_two(), &config);
        assert_eq!(points(&output).len(), 4);
        assert_eq!(output.heatmap.masked_count(), 2);
    }

    #[test]
    fn test_threshold_zero_is_identity_for_both_policies() {
        for policy in ThresholdPolicy::ALL {
            let config = PipelineConfig {
                policy,
                ..Default::default()
            };
            let output = run(&two_by_two(), &config);
            assert_eq!(output.heatmap.masked_count(), 0);
            assert_eq!(points(&output).records, output.table.records());
        }
    }

    #[test]
    fn test_hidden_3d() {
        let config = PipelineConfig {
            show_3d: false,
            ..Default::default()
        };
        assert_eq!(run(&two_by_two(), &config).scatter, ScatterOutcome::Hidden);
    }

    #[test]
    fn test_run_is_idempotent() {
        let red: Vec<u8> = (0..200 * 150).map(|i| ((i * 7) % 256) as u8).collect();
        let grid = grid_from_red(200, 150, &red);
        let config = PipelineConfig {
            threshold: 40,
            policy: ThresholdPolicy::Exclude,
            ..Default::default()
        };
        let a = run(&grid, &config);
        let b = run(&grid, &config);
        assert_eq!(a, b);
        assert_eq!(
            export::tests::to_csv_string(&a.table),
            export::tests::to_csv_string(&b.table)
        );
        assert_eq!(points(&a).len(), sampler::DEFAULT_SAMPLE_CAP);
        assert!(points(&a).was_sampled());
    }

    #[test]
    fn test_new_image_resets_threshold_only() {
        let config = PipelineConfig {
            threshold: 99,
            policy: ThresholdPolicy::Exclude,
            show_3d: false,
            ..Default::default()
        };
        let fresh = config.for_new_image();
        assert_eq!(fresh.threshold, 0);
        assert_eq!(fresh.policy, ThresholdPolicy::Exclude);
        assert!(!fresh.show_3d);
    }
}
