//! Text layout engine
//!
//! Reflows logical text blocks into physical display lines under a width
//! budget. The engine is pure and stateless: the caller supplies the
//! measurement function (font metrics, terminal cells, byte counts), and the
//! same inputs always produce the same lines.

/// Wrap logical text blocks into physical lines no wider than `max_width`
///
/// Each block may contain embedded newlines; every newline-separated segment
/// is its own accumulation context. Words are greedily packed onto the
/// current line, measuring after each tentative append, and are never split:
/// a single word wider than the budget is placed alone on its own line. A
/// block with no words produces no output line. Line order preserves input
/// order.
pub fn wrap_blocks<F>(blocks: &[&str], max_width: u32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut lines = Vec::new();

    for block in blocks {
        for segment in block.split('\n') {
            let mut current = String::new();

            for word in segment.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };

                if measure(&candidate) > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current = word.to_string();
                } else {
                    // An overflow-wide word stays alone on its line; the
                    // next word will flush it.
                    current = candidate;
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }
    }

    lines
}
