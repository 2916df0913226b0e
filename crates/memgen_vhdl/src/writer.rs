//! Indented line output.

const INDENT: &str = "   ";
const REMARK_WIDTH: usize = 80;

pub(crate) struct VhdlWriter {
    output: String,
    indent: usize,
}

impl VhdlWriter {
    pub(crate) fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    pub(crate) fn line(&mut self, text: &str) {
        if !text.is_empty() {
            self.output.push_str(&INDENT.repeat(self.indent));
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.output.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// A framed comment block.
    pub(crate) fn remark(&mut self, text: &str) {
        let rule = "-".repeat(REMARK_WIDTH);
        self.line(&rule);
        let inner = REMARK_WIDTH.saturating_sub(6);
        self.line(&format!("-- {text:<inner$} --"));
        self.line(&rule);
    }

    pub(crate) fn finish(self) -> String {
        self.output
    }
}
