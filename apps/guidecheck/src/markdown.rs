//! Minimal Markdown structure scanning.
//!
//! Only what the checks need: blank-line separated blocks (fenced code kept
//! whole), ATX and setext headers outside fences, and line normalization.
//! This is not a CommonMark parser.

use regex::Regex;
use std::sync::OnceLock;

fn atx_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$").expect("valid regex")
    })
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("valid regex"))
}

fn setext_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}(=+|-+)[ \t]*$").expect("valid regex"))
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[ \t]*(?:[-*+]|\d{1,9}[.)])(?:[ \t]|$)").expect("valid regex")
    })
}

/// Number of leading lines taken by a `---` delimited front matter block.
///
/// Zero when the first line is not `---` or the block is never closed.
pub fn front_matter_lines(content: &str) -> usize {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return 0;
    }
    for (idx, line) in lines.enumerate() {
        let t = line.trim_end();
        if t == "---" || t == "..." {
            return idx + 2;
        }
    }
    0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub level: usize,
    pub text: String,
    /// 1-based line number of the header text.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 1-based line number of the first line.
    pub start_line: usize,
    /// Lines trimmed and joined with `\n`.
    pub text: String,
    /// True when the block is a single ATX header line.
    pub heading_only: bool,
}

/// Tracks an open code fence: marker char and minimum closing length.
#[derive(Clone, Copy)]
struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Fence> {
        let caps = fence_re().captures(line)?;
        let marker = caps.get(1)?.as_str();
        let ch = marker.chars().next()?;
        // Backtick fences may not carry backticks in their info string.
        if ch == '`' && line[caps.get(0)?.end()..].contains('`') {
            return None;
        }
        Some(Fence {
            ch,
            len: marker.chars().count(),
        })
    }

    fn closes(&self, line: &str) -> bool {
        let t = line.trim();
        let run = t.chars().take_while(|c| *c == self.ch).count();
        run >= self.len && run == t.chars().count()
    }
}

/// Normalize text for verbatim comparison: every line trimmed.
pub fn normalize(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split content into blank-line separated blocks. Fenced code blocks are
/// kept whole, including their internal blank lines.
pub fn blocks(content: &str) -> Vec<Block> {
    let mut out = Vec::new();
    let mut cur: Vec<&str> = Vec::new();
    let mut start = 0usize;
    let mut fence: Option<Fence> = None;

    fn flush(out: &mut Vec<Block>, cur: &mut Vec<&str>, start: usize) {
        if cur.is_empty() {
            return;
        }
        let heading_only = cur.len() == 1 && atx_re().is_match(cur[0]);
        let text = cur.iter().map(|l| l.trim()).collect::<Vec<_>>().join("\n");
        out.push(Block {
            start_line: start,
            text,
            heading_only,
        });
        cur.clear();
    }

    let skip = front_matter_lines(content);

    for (idx, line) in content.lines().enumerate().skip(skip) {
        let line_no = idx + 1;
        if let Some(f) = fence {
            cur.push(line);
            if f.closes(line) {
                fence = None;
                flush(&mut out, &mut cur, start);
            }
            continue;
        }
        if let Some(f) = Fence::open(line) {
            flush(&mut out, &mut cur, start);
            start = line_no;
            cur.push(line);
            fence = Some(f);
            continue;
        }
        if line.trim().is_empty() {
            flush(&mut out, &mut cur, start);
            continue;
        }
        if cur.is_empty() {
            start = line_no;
        }
        cur.push(line);
    }
    // An unterminated fence runs to end of file.
    flush(&mut out, &mut cur, start);
    out
}

/// Collect ATX and setext headers, skipping fenced code.
pub fn headers(content: &str) -> Vec<Header> {
    let mut out = Vec::new();
    let mut fence: Option<Fence> = None;
    // Previous line when it was plain paragraph text (setext candidate).
    let mut prev_text: Option<(usize, &str)> = None;
    // Inside a list until the next blank line; its lines never underline.
    let mut in_list = false;
    let skip = front_matter_lines(content);

    for (idx, line) in content.lines().enumerate().skip(skip) {
        let line_no = idx + 1;
        if let Some(f) = fence {
            if f.closes(line) {
                fence = None;
            }
            continue;
        }
        if let Some(f) = Fence::open(line) {
            fence = Some(f);
            prev_text = None;
            continue;
        }
        if line.trim().is_empty() {
            prev_text = None;
            in_list = false;
            continue;
        }
        if let Some(caps) = atx_re().captures(line) {
            let level = caps.get(1).map_or(1, |m| m.as_str().len());
            let text = caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();
            out.push(Header {
                level,
                text,
                line: line_no,
            });
            prev_text = None;
            continue;
        }
        if let (Some((text_line, text)), Some(caps)) = (prev_text, setext_re().captures(line)) {
            let level = if caps[1].starts_with('=') { 1 } else { 2 };
            out.push(Header {
                level,
                text: text.trim().to_string(),
                line: text_line,
            });
            prev_text = None;
            continue;
        }
        if in_list || list_item_re().is_match(line) {
            in_list = true;
            prev_text = None;
            continue;
        }
        prev_text = Some((line_no, line));
    }
    out
}
