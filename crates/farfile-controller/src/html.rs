//! HTML rendering of the browser view for web frontends.
//!
//! Every peer-supplied string is escaped with [`ammonia::clean_text`]
//! before it reaches the markup.

use std::fmt::Write;

use ammonia::clean_text;

use crate::constants::{EMPTY_DIRECTORY, LOADING};
use crate::notice::NoticeKind;
use crate::view::{BrowserView, EntryRow, ListingBody};

/// Render the notices and listing of `view` as an HTML fragment.
pub fn render_html(view: &BrowserView) -> String {
    let mut out = String::new();

    for notice in &view.notices {
        let class = match notice.kind {
            NoticeKind::Success => "success-message",
            NoticeKind::Error => "error-message",
        };
        let _ = write!(out, r#"<div class="{class}">{}</div>"#, clean_text(&notice.text));
    }

    out.push_str(r#"<div class="file-list">"#);
    match &view.body {
        ListingBody::Loading => {
            let _ = write!(out, r#"<div class="loading">{LOADING}</div>"#);
        }
        ListingBody::Empty => {
            let _ = write!(out, r#"<div class="empty-message">{EMPTY_DIRECTORY}</div>"#);
        }
        ListingBody::Rows(rows) => {
            for (index, row) in rows.iter().enumerate() {
                render_row(&mut out, index, row);
            }
        }
    }
    out.push_str("</div>");

    out
}

fn render_row(out: &mut String, index: usize, row: &EntryRow) {
    let class = if row.selected {
        "file-item selected"
    } else {
        "file-item"
    };
    let _ = write!(
        out,
        r#"<div class="{class}" data-index="{index}" data-type="{kind}">"#,
        kind = if row.kind.is_dir() { "directory" } else { "file" },
    );
    if let Some(glyph) = row.glyph {
        let _ = write!(out, r#"<span class="file-icon">{glyph}</span>"#);
    }
    let _ = write!(
        out,
        r#"<span class="file-name">{}</span><span class="file-size">{}</span><span class="file-permissions">{}</span></div>"#,
        clean_text(&row.name),
        clean_text(&row.size),
        clean_text(&row.permissions),
    );
}

#[cfg(test)]
mod tests {
    use farfile_core::{EntryKind, RemotePath};

    use super::*;
    use crate::view::NoticeView;

    fn view(body: ListingBody) -> BrowserView {
        BrowserView {
            path: RemotePath::home(),
            notices: vec![],
            body,
            menu: None,
            editor: None,
            prompt: None,
        }
    }

    #[test]
    fn test_empty_directory_indicator_only() {
        let html = render_html(&view(ListingBody::Empty));
        assert!(html.contains("empty-message"));
        assert!(html.contains("📭 Empty directory"));
        assert!(!html.contains("file-item"));
    }

    #[test]
    fn test_names_are_escaped() {
        let html = render_html(&view(ListingBody::Rows(vec![EntryRow {
            name: "<script>alert(1)</script>".to_string(),
            kind: EntryKind::File,
            glyph: None,
            size: "1 B".to_string(),
            permissions: "-rw-r--r--".to_string(),
            selected: false,
        }])));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("file-icon"));
    }

    #[test]
    fn test_selected_row_and_notices() {
        let mut v = view(ListingBody::Rows(vec![EntryRow {
            name: "docs".to_string(),
            kind: EntryKind::Directory,
            glyph: Some("📁"),
            size: "-".to_string(),
            permissions: "drwxr-xr-x".to_string(),
            selected: true,
        }]));
        v.notices.push(NoticeView {
            kind: NoticeKind::Error,
            text: "Error: <b>nope</b>".to_string(),
        });

        let html = render_html(&v);
        assert!(html.contains(r#"class="file-item selected""#));
        assert!(html.contains(r#"<span class="file-icon">📁</span>"#));
        assert!(html.contains(r#"<div class="error-message">Error:&#32;&lt;b&gt;nope"#));
        assert!(!html.contains("<b>"));
    }
}
