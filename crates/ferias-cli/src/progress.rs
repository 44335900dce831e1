//! Terminal progress for the slow, paced stages. Hidden when stderr is not a
//! terminal.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub(crate) fn bar(total: usize, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    let template =
        format!("{{spinner:.green}} [{{bar:40.green/dim}}] {{pos}}/{{len}} {unit} ({{eta}}) {{msg}}");
    pb.set_style(
        ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars(TICK_CHARS)
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_tracks_position_against_total() {
        let pb = bar(3, "ferias");
        pb.inc(1);
        pb.inc(1);
        assert_eq!(pb.length(), Some(3));
        assert_eq!(pb.position(), 2);
        pb.finish_and_clear();
    }

    #[test]
    fn spinner_keeps_its_message() {
        let pb = spinner("descargando 2 páginas".to_owned());
        assert_eq!(pb.message(), "descargando 2 páginas");
        pb.finish_and_clear();
    }
}
