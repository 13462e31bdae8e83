use colored::Colorize;
use roster_lib::{
    notice::{Notice, NoticeLevel},
    sanitize::unescape_html,
};

/// Print a notice to stderr, keeping stdout free for data. Member names in the message
/// are stored HTML-escaped and are shown as plain text.
pub fn show(notice: &Notice) {
    let icon = match notice.level {
        NoticeLevel::Success => "✔".green(),
        NoticeLevel::Error => "✘".red(),
        NoticeLevel::Info => "ℹ".cyan(),
        NoticeLevel::Warning => "⚠".yellow(),
    };

    eprintln!("{icon} {}", unescape_html(&notice.message));
}
