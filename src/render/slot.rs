use std::sync::Arc;

use super::sink::{DisplayId, RenderSink};

/// One output position on the sink: the first render appends, later renders
/// replace it in place.
#[derive(Clone)]
pub struct DisplaySlot {
    sink: Arc<dyn RenderSink>,
    id: Option<DisplayId>,
}

impl DisplaySlot {
    pub fn new(sink: Arc<dyn RenderSink>) -> Self {
        Self { sink, id: None }
    }

    pub fn render(&mut self, html: &str) {
        match &self.id {
            Some(id) => self.sink.update(id, html),
            None => self.id = Some(self.sink.display(html)),
        }
    }

    pub fn run_script(&mut self, script: &str) {
        self.render(&format!("<script>{script}</script>"));
    }

    pub fn id(&self) -> Option<&DisplayId> {
        self.id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sink::{RecordingSink, RenderEvent};

    #[test]
    fn first_render_displays_then_updates() {
        let sink = RecordingSink::new();
        let mut slot = DisplaySlot::new(Arc::new(sink.clone()));
        slot.run_script("one()");
        slot.run_script("two()");

        let events = sink.events();
        assert!(matches!(events[0], RenderEvent::Display { .. }));
        assert!(matches!(events[1], RenderEvent::Update { .. }));
        assert_eq!(events[0].id(), events[1].id());
        assert_eq!(slot.id(), Some(events[0].id()));
    }
}
