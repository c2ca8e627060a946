use crate::render::RenderedTranscript;

/// Container the rendered transcript is injected into.
///
/// The controller calls [`ChatView::render`] after every transcript
/// mutation with a freshly rebuilt snapshot.
pub trait ChatView {
    fn render(&mut self, rendered: &RenderedTranscript);
}

/// View backing the terminal widget: keeps the latest snapshot for the
/// next frame to draw
#[derive(Debug, Clone, Default)]
pub struct TerminalView {
    latest: RenderedTranscript,
    render_count: usize,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> &RenderedTranscript {
        &self.latest
    }

    /// Number of renders received so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl ChatView for TerminalView {
    fn render(&mut self, rendered: &RenderedTranscript) {
        self.latest = rendered.clone();
        self.render_count += 1;
    }
}

/// Records every snapshot it receives, oldest first
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub renders: Vec<RenderedTranscript>,
}

impl ChatView for RecordingView {
    fn render(&mut self, rendered: &RenderedTranscript) {
        self.renders.push(rendered.clone());
    }
}
