use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}";

/// Progress bar drawn to stderr. When `visible` is false the bar still counts but draws nothing,
/// which keeps library callers and parallel sweeps quiet.
pub fn progress_bar(len: u64, msg: &str, visible: bool) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    bar.set_style(style);
    bar.set_message(msg.to_owned());

    if !visible {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }

    bar
}

#[cfg(test)]
mod tests {
    use super::progress_bar;

    #[test]
    fn test_hidden_bar_still_counts() {
        let bar = progress_bar(3, "Rating games", false);
        bar.inc(2);

        assert_eq!(bar.position(), 2);
        assert_eq!(bar.length(), Some(3));
        assert!(bar.is_hidden());
    }
}
