//! UI module for consistent CLI output
//!
//! Interactive terminals get `cliclack` log lines; CI and piped output fall
//! back to plain bracketed status lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use outguard::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "Output analysis");
//! ui::step_ok(&ctx, "classes: 12 outputs");
//! ui::step_warn_hint(&ctx, "Overlapping outputs", "output caching disabled");
//! ui::outro_warn(&ctx, "Not cacheable");
//! ```

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, outro_warn, remark, section, step_info, step_ok,
    step_ok_detail, step_warn, step_warn_hint,
};
