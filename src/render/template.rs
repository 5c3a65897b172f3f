use crate::language::Language;
use crate::settings::PlayerConfig;

use super::assets::WidgetAssets;
use super::command::{js_string, player_ref};

/// HTML shell for one widget instance: the waveform container, time labels,
/// the streaming play button, the bundle and a bootstrap registering the
/// browser-side player under `session_id`.
pub fn render_widget(
    session_id: &str,
    config: &PlayerConfig,
    language: Language,
    assets: &WidgetAssets,
) -> String {
    let config_json =
        serde_json::to_string(config.as_value()).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"<div id="wavesurfer-{id}" style="width: {width}">
  <div id="waveform-{id}"></div>
  <div class="wavesurfer-controls">
    <span id="time-{id}">0:00</span> / <span id="duration-{id}">0:00</span>
    <button id="play_button_{id}" hidden data-play="{play}" data-pause="{pause}">{pause}</button>
  </div>
</div>
<style>{style}</style>
<script>{script}</script>
<script>
window.wavesurferPlayers = window.wavesurferPlayers || {{}};
{player} = new Player({id_js}, {config_json}, {language_js});
</script>"#,
        id = session_id,
        width = html_attr(config.width()),
        play = language.play_label(),
        pause = language.pause_label(),
        style = assets.style,
        script = assets.script,
        player = player_ref(session_id),
        id_js = js_string(session_id),
        language_js = js_string(language.as_str()),
    )
}

fn html_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn widget_ids_and_bootstrap_use_session_id() {
        let config = PlayerConfig::with_overrides(json!({"width": "50%"}));
        let assets = WidgetAssets::new("/*js*/", "/*css*/");
        let html = render_widget("s1", &config, Language::Zh, &assets);

        assert!(html.contains(r#"<div id="waveform-s1">"#));
        assert!(html.contains(r#"id="play_button_s1""#));
        assert!(html.contains("width: 50%"));
        assert!(html.contains("<script>/*js*/</script>"));
        assert!(html.contains(r#"window.wavesurferPlayers["s1"] = new Player("s1", {"#));
        assert!(html.contains(r#", "zh");"#));
        assert!(html.contains("播放"));
    }
}
