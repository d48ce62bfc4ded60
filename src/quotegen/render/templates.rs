//! Template sources, embedded at compile time.
//!
//! Templates live in stand-alone files next to this module so they can be edited and
//! diffed without touching Rust code. The name each one is registered under decides
//! escaping: `.html` names are HTML-escaped by minijinja, `.tmp` names are not.
//!
//! Terminal templates end every emitted line explicitly; with `trim_blocks` on, a block
//! tag never contributes a line break of its own.

pub const EDITOR: &str = "editor.tmp";
pub const PREVIEW: &str = "preview.tmp";
pub const PRINT_ROOT: &str = "print_root.html";
pub const MESSAGES: &str = "messages.tmp";

pub const ALL: [(&str, &str); 4] = [
    (EDITOR, include_str!("templates/editor.tmp")),
    (PREVIEW, include_str!("templates/preview.tmp")),
    (PRINT_ROOT, include_str!("templates/print_root.html")),
    (MESSAGES, include_str!("templates/messages.tmp")),
];
