use crate::alignment::Region;

/// A single instruction for the browser-side player. The widget is stateful,
/// so commands must reach it in the order they were issued.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    Reset { streaming: bool },
    Load { url: String, regions: Vec<Region> },
    SetSampleRate { rate: u32 },
    Feed { payload: String },
    SetDone,
    Destroy,
}

impl WidgetCommand {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetCommand::Reset { .. } => "reset",
            WidgetCommand::Load { .. } => "load",
            WidgetCommand::SetSampleRate { .. } => "setSampleRate",
            WidgetCommand::Feed { .. } => "feed",
            WidgetCommand::SetDone => "setDone",
            WidgetCommand::Destroy => "destroy",
        }
    }

    /// JavaScript statement applying this command to the player `session_id`.
    pub fn to_script(&self, session_id: &str) -> String {
        let target = player_ref(session_id);
        match self {
            WidgetCommand::Reset { streaming } => format!("{target}.reset({streaming});"),
            WidgetCommand::Load { url, regions } => {
                let regions = serde_json::to_string(regions).unwrap_or_else(|_| "[]".to_string());
                format!("{target}.load({}, {regions});", js_string(url))
            }
            WidgetCommand::SetSampleRate { rate } => format!("{target}.sampleRate = {rate};"),
            WidgetCommand::Feed { payload } => format!("{target}.feed({});", js_string(payload)),
            WidgetCommand::SetDone => format!("{target}.setDone();"),
            WidgetCommand::Destroy => format!("{target}.destroy();"),
        }
    }
}

/// Expression resolving to the browser-side player registered for `session_id`.
pub fn player_ref(session_id: &str) -> String {
    format!("window.wavesurferPlayers[{}]", js_string(session_id))
}

pub(crate) fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
