use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const TICK_INTERVAL: Duration = Duration::from_millis(80);

const SPINNER_TEMPLATE: &str = "  {spinner:.cyan} {msg}";
const COUNTER_TEMPLATE: &str = "  {spinner:.cyan} {msg} {bar:24.cyan/blue} {pos:>4}/{len:<4} files";

/// The step currently on screen.
struct Step {
    bar: ProgressBar,
    started: Instant,
}

/// Numbered pipeline steps with a spinner (or file counter) per step and a
/// check-mark line once each one is done.
pub struct StepTracker {
    current: Option<Step>,
    run_started: Instant,
    done: u8,
    total: u8,
}

impl StepTracker {
    pub fn new(total: u8) -> Self {
        Self {
            current: None,
            run_started: Instant::now(),
            done: 0,
            total,
        }
    }

    pub fn step(&mut self, description: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(style(SPINNER_TEMPLATE, ProgressStyle::default_spinner()));
        self.show(description, bar);
    }

    pub fn counted_step(&mut self, description: &str, files: usize) {
        let bar = ProgressBar::new(files as u64);
        bar.set_style(
            style(COUNTER_TEMPLATE, ProgressStyle::default_bar()).progress_chars("━╸ "),
        );
        self.show(description, bar);
    }

    pub fn advance(&mut self) {
        if let Some(step) = &self.current {
            step.bar.inc(1);
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        let elapsed = self
            .current
            .take()
            .map(|step| {
                step.bar.finish_and_clear();
                step.started.elapsed()
            })
            .unwrap_or_default();

        let _ = write_completed(&mut io::stderr().lock(), description, elapsed, substeps);
    }

    /// Hides the running bar while `f` prints.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.current {
            Some(step) => step.bar.suspend(f),
            None => f(),
        }
    }

    /// Clears a running spinner so error output is not interleaved with it.
    pub fn abandon(&mut self) {
        if let Some(step) = self.current.take() {
            step.bar.finish_and_clear();
        }
    }

    pub fn finish(mut self, rows: usize) {
        self.abandon();
        let _ = write_footer(&mut io::stderr().lock(), rows, self.run_started.elapsed());
    }

    fn show(&mut self, description: &str, bar: ProgressBar) {
        self.abandon();
        self.done = (self.done + 1).min(self.total);
        bar.set_message(format!("[{}/{}] {}...", self.done, self.total, description));
        bar.enable_steady_tick(TICK_INTERVAL);
        self.current = Some(Step {
            bar,
            started: Instant::now(),
        });
    }
}

fn style(template: &str, fallback: ProgressStyle) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or(fallback)
        .tick_chars(TICK_CHARS)
}

fn write_completed(
    out: &mut impl Write,
    description: &str,
    elapsed: Duration,
    substeps: &[String],
) -> io::Result<()> {
    writeln!(
        out,
        "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
        description,
        elapsed.as_secs_f64()
    )?;
    for substep in substeps {
        writeln!(out, "      \x1b[2m·\x1b[0m {}", substep)?;
    }
    Ok(())
}

fn write_footer(out: &mut impl Write, rows: usize, total: Duration) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  \x1b[2m╺{}╸\x1b[0m", "━".repeat(54))?;
    writeln!(out)?;
    writeln!(
        out,
        "  \x1b[32m✓\x1b[0m {:<28} {:>25}",
        format!("{} edge(s) written", rows),
        format!("Total: {:.2}s", total.as_secs_f64())
    )?;
    writeln!(out)
}

pub enum Progress {
    Interactive(StepTracker),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        if interactive {
            Self::Interactive(StepTracker::new(total_steps))
        } else {
            Self::Silent
        }
    }

    pub fn step(&mut self, description: &str) {
        if let Self::Interactive(t) = self {
            t.step(description);
        }
    }

    pub fn counted_step(&mut self, description: &str, files: usize) {
        if let Self::Interactive(t) = self {
            t.counted_step(description, files);
        }
    }

    pub fn advance(&mut self) {
        if let Self::Interactive(t) = self {
            t.advance();
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        if let Self::Interactive(t) = self {
            t.complete_step(description, substeps);
        }
    }

    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        match self {
            Self::Interactive(t) => t.suspend(f),
            Self::Silent => f(),
        }
    }

    pub fn abandon(&mut self) {
        if let Self::Interactive(t) = self {
            t.abandon();
        }
    }

    pub fn finish(self, rows: usize) {
        if let Self::Interactive(t) = self {
            t.finish(rows);
        }
    }
}
