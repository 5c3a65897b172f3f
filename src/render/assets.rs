use std::sync::OnceLock;

static ASSETS: OnceLock<WidgetAssets> = OnceLock::new();

/// The browser-side widget bundle (wavesurfer.js, its plugins, the PCM player
/// and the `Player` glue). Opaque to this crate; inlined into every widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAssets {
    pub script: String,
    pub style: String,
}

impl WidgetAssets {
    pub fn new(script: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            style: style.into(),
        }
    }

    /// Installs the process-wide bundle. Only the first call succeeds; the
    /// rejected bundle is handed back.
    pub fn install(assets: WidgetAssets) -> Result<(), WidgetAssets> {
        ASSETS.set(assets)
    }

    /// The installed bundle, or an empty one when nothing was installed
    /// before first use.
    pub fn global() -> &'static WidgetAssets {
        ASSETS.get_or_init(WidgetAssets::default)
    }
}
