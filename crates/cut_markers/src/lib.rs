// crates/cut_markers/src/lib.rs

//! Strips submission-only noise from C++ sources before they are staged.
//!
//! Two forms of marker comment are recognized:
//!   - A line marker: any line containing `// stage:cut` or `// stage:remove`
//!     (whitespace is allowed after `//` and after `stage:`, and the keyword
//!     must end at whitespace or end of line) is dropped.
//!   - A block marker: a line containing `// stage: cut start` drops itself and
//!     every line after it, up to and including a line containing
//!     `// stage: cut stop`.
//!
//! All other lines are kept byte-for-byte, line terminators included. The input
//! is treated as raw bytes, so sources in Latin-1 or any other ASCII-compatible
//! encoding pass through untouched.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

static CUT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//\s*stage:\s*(?:cut|remove)(?:\s|$)").unwrap());
static CUT_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"//\s*stage:\s*cut\s+start(?-u:\b)").unwrap());
static CUT_STOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"//\s*stage:\s*cut\s+stop(?-u:\b)").unwrap());

/// Result of filtering one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtered {
    pub content: Vec<u8>,
    /// Number of lines dropped, block markers included.
    pub removed: usize,
    /// A `cut start` was never closed; everything after it was dropped.
    pub unterminated_block: bool,
}

/// True if `line` carries a single-line cut marker.
pub fn is_cut_line(line: &[u8]) -> bool {
    CUT_LINE.is_match(line)
}

/// True if `line` opens a cut block.
pub fn is_cut_start(line: &[u8]) -> bool {
    CUT_START.is_match(line)
}

/// True if `line` closes a cut block.
pub fn is_cut_stop(line: &[u8]) -> bool {
    CUT_STOP.is_match(line)
}

/// Removes marker lines and cut blocks from `input`.
pub fn strip_cut_markers(input: &[u8]) -> Filtered {
    let mut content = Vec::with_capacity(input.len());
    let mut removed = 0;
    let mut in_block = false;

    for line in input.split_inclusive(|&b| b == b'\n') {
        if in_block {
            removed += 1;
            if is_cut_stop(line) {
                in_block = false;
            }
            continue;
        }
        if is_cut_start(line) {
            in_block = true;
            removed += 1;
            continue;
        }
        if is_cut_line(line) {
            removed += 1;
            continue;
        }
        content.extend_from_slice(line);
    }

    Filtered {
        content,
        removed,
        unterminated_block: in_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_line_matches() {
        for line in [
            "int main() {      // stage:remove",
            "garbage     // stage:remove because reasons",
            "garbage     // stage:remove  ",
            "garbage     // stage: remove  ",
            "garbage     // stage:\tremove  ",
            "garbage// stage:remove  ",
            "garbage //      \t     stage:remove  ",
            "int main() {      // stage:cut",
            "garbage     // stage:cut because reasons",
            "garbage     // stage: cut  ",
            "garbage //      \t     stage:cut  ",
            "    cout << x; // stage:cut\n",
            "    cout << x; // stage:cut\r\n",
        ] {
            assert!(is_cut_line(line.as_bytes()), "should be cut: {:?}", line);
        }
    }

    #[test]
    fn test_cut_line_rejects() {
        for line in [
            "int main() {",
            "garbage     // stage:something",
            "garbage     // stage: ",
            "garbage// stage: rmeove  ",
            "garbage// stage: ctu  ",
            "garbage //      \t     stage:remove2  ",
            "stage:cut without a comment",
        ] {
            assert!(!is_cut_line(line.as_bytes()), "should be kept: {:?}", line);
        }
    }

    #[test]
    fn test_block_start_and_stop() {
        assert!(is_cut_start(b"blah // stage: cut start"));
        assert!(is_cut_start(b"blah // stage:cut start please"));
        assert!(!is_cut_start(b"blah // stage: cut stop"));
        assert!(!is_cut_start(b"blah // stage:cut"));
        assert!(!is_cut_start(b"blah // stage: cut starter"));

        assert!(is_cut_stop(b"blah // stage: cut stop"));
        assert!(is_cut_stop(b"blah // stage:cut stop please"));
        assert!(!is_cut_stop(b"blah // stage: cut start"));
        assert!(!is_cut_stop(b"blah // stage: cut blah"));
    }

    #[test]
    fn test_strip_blocks_and_lines() {
        let input = "\
int main()
{
   // stage: cut start
   int someJazz;
   cout << \"hello\" << endl;
   // stage: cut stop
   int a = 3 + 4;
   cout << a << endl;
   cout << \"Praise be\" << endl; // stage: cut
   return 0;
}
";
        let expected = "\
int main()
{
   int a = 3 + 4;
   cout << a << endl;
   return 0;
}
";
        let filtered = strip_cut_markers(input.as_bytes());
        assert_eq!(filtered.content, expected.as_bytes());
        assert_eq!(filtered.removed, 5);
        assert!(!filtered.unterminated_block);
    }

    #[test]
    fn test_removes_exactly_the_marker_lines() {
        let input = "a\nb // stage:cut\nc\nd // stage:remove\ne";
        let filtered = strip_cut_markers(input.as_bytes());
        assert_eq!(filtered.content, b"a\nc\ne");
        assert_eq!(filtered.removed, 2);
        assert_eq!(filtered.content.split(|&b| b == b'\n').count(), input.lines().count() - 2);
    }

    #[test]
    fn test_no_markers_is_identity() {
        let input = "#include <iostream>\r\nint main() { return 0; }\r\n";
        let filtered = strip_cut_markers(input.as_bytes());
        assert_eq!(filtered.content, input.as_bytes());
        assert_eq!(filtered.removed, 0);
    }

    #[test]
    fn test_unterminated_block_drops_rest() {
        let input = "keep\n// stage: cut start\ngone\nalso gone\n";
        let filtered = strip_cut_markers(input.as_bytes());
        assert_eq!(filtered.content, b"keep\n");
        assert_eq!(filtered.removed, 3);
        assert!(filtered.unterminated_block);
    }

    #[test]
    fn test_stray_stop_is_dropped() {
        let filtered = strip_cut_markers(b"a\n// stage: cut stop\nb\n");
        assert_eq!(filtered.content, b"a\nb\n");
    }

    #[test]
    fn test_non_utf8_lines_pass_through() {
        // "// Autor: José" in Latin-1, followed by a cut line that is also Latin-1.
        let input: &[u8] = b"// Autor: Jos\xe9\nint main() {}\nint d\xe9bug; // stage:cut\n";
        let filtered = strip_cut_markers(input);
        assert_eq!(filtered.content, b"// Autor: Jos\xe9\nint main() {}\n");
        assert_eq!(filtered.removed, 1);
    }
}
