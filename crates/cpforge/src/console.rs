//! Colorful console output for solver events.
//!
//! Provides a `tracing` layer that formats CpForge solver events with
//! colors. Enabled by the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the console layer as the global subscriber.
///
/// Safe to call multiple times - only the first call has effect. Honors
/// `RUST_LOG` and defaults `cpforge_solver` to `info`.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::from_default_env().add_directive(
            "cpforge_solver=info"
                .parse()
                .expect("static directive is valid"),
        );

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("cpforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    message: Option<String>,
    event: Option<String>,
    solver: Option<String>,
    error: Option<String>,
    kind: Option<String>,
    name: Option<String>,
    decisions: Option<u64>,
    int_vars: Option<u64>,
    interval_vars: Option<u64>,
    loaded: Option<u64>,
    batch: Option<u64>,
    events: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "message" => self.message = Some(s),
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "solver" => self.solver = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s.trim_matches('"').to_string()),
            "kind" => self.kind = Some(s.trim_matches('"').to_string()),
            "name" => self.name = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "decisions" => self.decisions = Some(value),
            "int_vars" => self.int_vars = Some(value),
            "interval_vars" => self.interval_vars = Some(value),
            "loaded" => self.loaded = Some(value),
            "batch" => self.batch = Some(value),
            "events" => self.events = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            "solver" => self.solver = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "kind" => self.kind = Some(value.to_string()),
            "name" => self.name = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_solver_event(level: Level, v: &EventVisitor) -> String {
    if level == Level::WARN {
        return format_warning(v);
    }

    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "run_end" => format_run_end(v),
        "assignment_store" => format_assignment("Stored", v),
        "assignment_restore" => format_assignment("Restored", v),
        "assignment_save" => format_assignment("Saved", v),
        "assignment_load" => format!(
            "{} {} {} Loaded {} element(s) from record",
            timestamp().bright_black(),
            "DEBUG".bright_blue(),
            "[Assignment]".bright_cyan(),
            v.loaded.unwrap_or(0).to_string().bright_yellow(),
        ),
        "name_skipped" | "record_entry_skipped" => format_skipped(v),
        "queue_flush" => format!(
            "    {} batch {} | {} event(s)",
            "->".bright_blue(),
            v.batch.unwrap_or(0).to_string().white(),
            v.events.unwrap_or(0).to_string().bright_magenta(),
        ),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.solver.as_deref().unwrap_or("solver").white().bold(),
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} done: decisions applied ({})",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Solver]".bright_cyan(),
        v.solver.as_deref().unwrap_or("solver").white().bold(),
        v.decisions.unwrap_or(0).to_string().bright_yellow(),
    )
}

fn format_assignment(verb: &str, v: &EventVisitor) -> String {
    format!(
        "{} {} {} {} int vars ({}), interval vars ({})",
        timestamp().bright_black(),
        "DEBUG".bright_blue(),
        "[Assignment]".bright_cyan(),
        verb,
        v.int_vars.unwrap_or(0).to_string().bright_yellow(),
        v.interval_vars.unwrap_or(0).to_string().bright_yellow(),
    )
}

fn format_skipped(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {} Skipped",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Assignment]".bright_cyan(),
    );
    if let Some(kind) = &v.kind {
        output.push_str(&format!(" {}", kind));
    }
    if let Some(name) = &v.name {
        output.push_str(&format!(" '{}'", name.white().bold()));
    }
    output.push_str(&format!(
        ": {}",
        v.message.as_deref().unwrap_or("").trim_matches('"')
    ));
    output
}

fn format_warning(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {}",
        timestamp().bright_black(),
        "WARN".bright_red(),
        v.message.as_deref().unwrap_or("").trim_matches('"'),
    );
    if let Some(error) = &v.error {
        output.push_str(&format!(": {}", error.yellow()));
    }
    output
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use cpforge_solver::Solver;

    use super::*;

    #[derive(Default)]
    struct CaptureLayer {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);
            let output = format_solver_event(*event.metadata().level(), &visitor);
            if !output.is_empty() {
                self.lines.lock().unwrap().push(output);
            }
        }
    }

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            solver: Some("demo".to_string()),
            decisions: Some(2),
            int_vars: Some(3),
            interval_vars: Some(1),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_known_events_are_formatted() {
        let out = format_solver_event(Level::INFO, &visitor("solve_start"));
        assert!(out.contains("demo"));
        assert!(out.contains("started"));

        let out = format_solver_event(Level::DEBUG, &visitor("assignment_restore"));
        assert!(out.contains("Restored"));
    }

    #[test]
    fn test_unknown_events_are_dropped() {
        assert!(format_solver_event(Level::INFO, &visitor("something_else")).is_empty());
    }

    #[test]
    fn test_skipped_names_are_formatted() {
        let v = EventVisitor {
            event: Some("name_skipped".to_string()),
            kind: Some("int".to_string()),
            name: Some("x".to_string()),
            message: Some("Cannot save/load variables with duplicate names".to_string()),
            ..EventVisitor::default()
        };
        let out = format_solver_event(Level::INFO, &v);
        assert!(out.contains("Skipped int"));
        assert!(out.contains("x"));
        assert!(out.contains("duplicate names"));

        let v = EventVisitor {
            event: Some("record_entry_skipped".to_string()),
            kind: Some("interval".to_string()),
            message: Some("Interval variable not found in assignment".to_string()),
            ..EventVisitor::default()
        };
        let out = format_solver_event(Level::INFO, &v);
        assert!(out.contains("Skipped interval"));
        assert!(out.contains("not found"));
    }

    #[test]
    fn test_warning_includes_error() {
        let v = EventVisitor {
            message: Some("Propagation failed".to_string()),
            error: Some("rejected".to_string()),
            ..EventVisitor::default()
        };
        let out = format_solver_event(Level::WARN, &v);
        assert!(out.contains("Propagation failed"));
        assert!(out.contains("rejected"));
    }

    #[test]
    fn test_duplicate_name_on_save_reaches_console() {
        let layer = CaptureLayer::default();
        let lines = Arc::clone(&layer.lines);
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let mut solver = Solver::new("demo");
            let a = solver.make_int_var(0, 10, "x");
            let b = solver.make_int_var(0, 10, "x");
            let snapshot = solver.make_assignment();
            solver.assignment_mut(snapshot).unwrap().add_int_vars([a, b]);
            let record = solver.assignment(snapshot).unwrap().save(solver.network());
            assert_eq!(record.int_vars.len(), 1);
        });

        let lines = lines.lock().unwrap();
        assert!(lines
            .iter()
            .any(|line| line.contains("Skipped int") && line.contains("duplicate names")));
    }
}
