//! Terminal progress display driven by algorithm checkpoints

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

use crate::algorithm::observer::SearchObserver;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::spatial::grid::Cell;

static CANDIDATE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] \
             {{percent}}% ({{human_pos}}/{{human_len}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static SWEEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg}: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Progress bar fed by `SearchObserver` checkpoints
///
/// The bar length is set from the first progress report, so the same
/// observer works for any grid size.
pub struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    /// Visible progress bar labelled with the algorithm name
    pub fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(CANDIDATE_STYLE.clone());
        bar.set_message(label.to_string());
        Self { bar }
    }

    /// Observer that tracks progress without drawing anything
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Current position of the bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl SearchObserver for ProgressObserver {
    fn on_progress(&mut self, checked: u64, total: u64) {
        if self.bar.length() != Some(total) {
            self.bar.set_length(total);
        }
        self.bar.set_position(checked);
    }

    fn on_assignment(&mut self, _agent: usize, _cell: Cell, iteration: usize) {
        self.bar.set_position(iteration as u64);
    }

    fn on_move(
        &mut self,
        iteration: usize,
        _cell: Cell,
        _from: usize,
        _to: usize,
        _imbalance: u64,
    ) {
        self.bar.set_position(iteration as u64);
    }

    fn on_finish(&mut self, _diagnostic: u64, _imbalance: u64) {
        self.bar.finish_and_clear();
    }
}

/// Create a bar counting completed sweep tasks
pub fn sweep_bar(label: &str, tasks: u64, visible: bool) -> ProgressBar {
    let bar = if visible {
        ProgressBar::new(tasks)
    } else {
        ProgressBar::with_draw_target(Some(tasks), ProgressDrawTarget::hidden())
    };
    bar.set_style(SWEEP_STYLE.clone());
    bar.set_message(label.to_string());
    bar
}
