use composite_adapter::ItemKind;

/// Render context handed to providers when they create rows.
#[derive(Debug)]
pub struct RowContext {
    pub width: usize,
    /// Rows created so far; recycled rows do not count.
    pub inflated: usize,
}

impl RowContext {
    pub fn new(width: usize) -> Self {
        Self { width, inflated: 0 }
    }
}

/// A rendered row: the visual handle of this host.
#[derive(Clone, Debug)]
pub struct RowView {
    pub kind: ItemKind,
    pub width: usize,
    pub lines: Vec<String>,
}

impl RowView {
    pub fn new(kind: ItemKind, context: &mut RowContext) -> Self {
        context.inflated += 1;
        Self {
            kind,
            width: context.width,
            lines: Vec::new(),
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = wrap(text, self.width);
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
