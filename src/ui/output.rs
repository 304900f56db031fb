//! Report lines shared by the commands
//!
//! Every helper has two renderings: a `cliclack` log line for terminals and a
//! bracketed status line for CI logs and pipes.

use super::context::UiContext;
use console::{style, StyledObject};

/// Status of a single report line
#[derive(Debug, Clone, Copy)]
enum Status {
    Ok,
    Warn,
    Info,
}

impl Status {
    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Warn => style("[WARN]").yellow(),
            Self::Info => style("[INFO]").cyan(),
        }
    }

    fn log(self, message: String) {
        let _ = match self {
            Self::Ok => cliclack::log::success(message),
            Self::Warn => cliclack::log::warning(message),
            Self::Info => cliclack::log::info(message),
        };
    }
}

fn step(ctx: &UiContext, status: Status, message: &str) {
    if ctx.use_fancy_output() {
        status.log(message.to_string());
    } else {
        println!("  {} {}", status.tag(), message);
    }
}

fn outro(ctx: &UiContext, status: Status, message: &str) {
    if ctx.use_fancy_output() {
        let styled = match status {
            Status::Warn => style(message).yellow().bold(),
            _ => style(message).green().bold(),
        };
        let _ = cliclack::outro(styled);
    } else {
        println!();
        println!("{} {}", status.tag(), message);
    }
}

/// Report title
pub fn intro(ctx: &UiContext, title: &str) {
    let title = style(title).cyan().bold();
    if ctx.use_fancy_output() {
        let _ = cliclack::intro(title);
    } else {
        println!("{}\n", title);
    }
}

/// Closing line for a clean result
pub fn outro_success(ctx: &UiContext, message: &str) {
    outro(ctx, Status::Ok, message);
}

/// Closing line for a result that needs attention
pub fn outro_warn(ctx: &UiContext, message: &str) {
    outro(ctx, Status::Warn, message);
}

/// Heading for one output property
pub fn section(ctx: &UiContext, title: &str) {
    println!();
    if ctx.use_fancy_output() {
        let _ = cliclack::log::info(style(title).bold());
    } else {
        println!("{}", style(title).bold());
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    step(ctx, Status::Ok, message);
}

/// Success line with a dimmed detail, e.g. the file written
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    let detail = if ctx.use_fancy_output() {
        style(detail).dim().to_string()
    } else {
        detail.to_string()
    };
    step(ctx, Status::Ok, &format!("{} ({})", message, detail));
}

pub fn step_warn(ctx: &UiContext, message: &str) {
    step(ctx, Status::Warn, message);
}

/// Warning line followed by what it means for the task
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    let hint = if ctx.use_fancy_output() {
        style(hint).dim().to_string()
    } else {
        hint.to_string()
    };
    step(ctx, Status::Warn, &format!("{} - {}", message, hint));
}

pub fn step_info(ctx: &UiContext, message: &str) {
    step(ctx, Status::Info, message);
}

/// Dimmed secondary line, e.g. an excluded path
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        let _ = cliclack::log::remark(message);
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Indented `key: value` line
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    let key = if ctx.use_fancy_output() {
        style(key).dim().to_string()
    } else {
        key.to_string()
    };
    println!("  {}: {}", key, value);
}
